//! RDF serialization formats
//!
//! Supports:
//! - Turtle (TTL)
//! - N-Triples (NT)

mod ntriples;
mod turtle;

pub use ntriples::{NTriplesParserWrapper, NTriplesSerializerWrapper};
pub use turtle::{TurtleParserWrapper, TurtleSerializerWrapper};

use super::Triple;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
}

impl RdfFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ttl" => Some(RdfFormat::Turtle),
            "nt" => Some(RdfFormat::NTriples),
            _ => None,
        }
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Syntax error reported by the parser
    #[error("Syntax error: {0}")]
    Syntax(#[from] rio_turtle::TurtleError),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// Triples of a parsed document together with the prefixes it declared
#[derive(Debug, Clone, Default)]
pub struct RdfDocument {
    pub triples: Vec<Triple>,
    /// Prefix → namespace URI, usable as namespace hints
    pub prefixes: HashMap<String, String>,
}

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string
    pub fn parse(input: &str, format: RdfFormat) -> ParseResult<RdfDocument> {
        Self::parse_with_base(input, format, None)
    }

    /// Parse RDF data, resolving relative IRIs against a base IRI
    ///
    /// N-Triples has no relative IRIs, so the base only affects Turtle.
    pub fn parse_with_base(input: &str, format: RdfFormat, base_iri: Option<&str>) -> ParseResult<RdfDocument> {
        match format {
            RdfFormat::Turtle => TurtleParserWrapper::parse(input, base_iri),
            RdfFormat::NTriples => NTriplesParserWrapper::parse(input).map(|triples| RdfDocument {
                triples,
                prefixes: HashMap::new(),
            }),
        }
    }

    /// Parse RDF data from a file
    pub fn parse_file(path: &Path, format: RdfFormat) -> ParseResult<RdfDocument> {
        Self::parse_file_with_base(path, format, None)
    }

    /// Parse RDF data from a file, resolving relative IRIs against a base IRI
    pub fn parse_file_with_base(path: &Path, format: RdfFormat, base_iri: Option<&str>) -> ParseResult<RdfDocument> {
        let input = std::fs::read_to_string(path)?;
        Self::parse_with_base(&input, format, base_iri)
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize triples to a string
    pub fn serialize(triples: &[Triple], format: RdfFormat) -> SerializeResult<String> {
        match format {
            RdfFormat::Turtle => TurtleSerializerWrapper::serialize(triples),
            RdfFormat::NTriples => NTriplesSerializerWrapper::serialize(triples),
        }
    }

    /// Serialize triples to a file
    pub fn serialize_file(triples: &[Triple], path: &Path, format: RdfFormat) -> SerializeResult<()> {
        let output = Self::serialize(triples, format)?;
        std::fs::write(path, output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(RdfFormat::from_path(Path::new("data.ttl")), Some(RdfFormat::Turtle));
        assert_eq!(RdfFormat::from_path(Path::new("data.nt")), Some(RdfFormat::NTriples));
        assert_eq!(RdfFormat::from_path(Path::new("data.rdf")), None);
    }

    #[test]
    fn test_parse_file_with_base() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relative.ttl");
        std::fs::write(&path, r#"<a> <http://example.org/b> <c> ."#).unwrap();

        let document = RdfParser::parse_file_with_base(&path, RdfFormat::Turtle, Some("http://example.org/")).unwrap();
        assert_eq!(document.triples[0].to_string(), "<http://example.org/a> <http://example.org/b> <http://example.org/c> .");
        assert!(RdfParser::parse_file(&path, RdfFormat::Turtle).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.nt");
        let document = RdfParser::parse(
            r#"@prefix ex: <http://example.org/> . ex:a ex:b "c" ."#,
            RdfFormat::Turtle,
        )
        .unwrap();

        RdfSerializer::serialize_file(&document.triples, &path, RdfFormat::NTriples).unwrap();
        let reread = RdfParser::parse_file(&path, RdfFormat::NTriples).unwrap();
        assert_eq!(reread.triples, document.triples);
    }
}
