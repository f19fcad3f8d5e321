//! N-Triples format implementation

use super::turtle::{convert_triple, rio_triple};
use super::{ParseError, ParseResult, SerializeError, SerializeResult};
use crate::rdf::Triple;
use rio_api::formatter::TriplesFormatter;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser};

/// N-Triples parser
pub struct NTriplesParserWrapper;

impl NTriplesParserWrapper {
    pub fn parse(input: &str) -> ParseResult<Vec<Triple>> {
        let mut parser = NTriplesParser::new(input.as_bytes());
        let mut triples = Vec::new();
        parser.parse_all(&mut |t| -> Result<(), ParseError> {
            triples.push(convert_triple(t)?);
            Ok(())
        })?;
        Ok(triples)
    }
}

/// N-Triples serializer
pub struct NTriplesSerializerWrapper;

impl NTriplesSerializerWrapper {
    pub fn serialize(triples: &[Triple]) -> SerializeResult<String> {
        let mut formatter = NTriplesFormatter::new(Vec::new());
        for triple in triples {
            formatter
                .format(&rio_triple(triple))
                .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        }
        let output = formatter.finish()?;
        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_per_triple() {
        let input = "<http://example.org/a> <http://example.org/b> \"c\" .\n\
                     <http://example.org/a> <http://example.org/d> <http://example.org/e> .\n";
        let triples = NTriplesParserWrapper::parse(input).unwrap();
        assert_eq!(triples.len(), 2);

        let output = NTriplesSerializerWrapper::serialize(&triples).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert_eq!(NTriplesParserWrapper::parse(&output).unwrap(), triples);
    }
}
