//! Turtle format implementation

use super::{ParseError, ParseResult, RdfDocument, SerializeError, SerializeResult};
use crate::rdf::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use oxiri::Iri;
use oxrdf::vocab::xsd;
use rio_api::formatter::TriplesFormatter;
use rio_api::model;
use rio_api::parser::TriplesParser;
use rio_turtle::{TurtleFormatter, TurtleParser};

/// Turtle parser
pub struct TurtleParserWrapper;

impl TurtleParserWrapper {
    /// Parse a Turtle document, keeping the prefixes it declares
    ///
    /// Relative IRIs are resolved against `base_iri`; without one they are
    /// rejected.
    pub fn parse(input: &str, base_iri: Option<&str>) -> ParseResult<RdfDocument> {
        let base_iri = base_iri
            .map(|iri| Iri::parse(iri.to_string()))
            .transpose()
            .map_err(|e| ParseError::Parse(format!("Invalid base IRI: {}", e)))?;
        let mut parser = TurtleParser::new(input.as_bytes(), base_iri);
        let mut triples = Vec::new();

        parser.parse_all(&mut |t| -> Result<(), ParseError> {
            triples.push(convert_triple(t)?);
            Ok(())
        })?;

        Ok(RdfDocument {
            triples,
            prefixes: parser.prefixes().clone(),
        })
    }
}

/// Turtle serializer
pub struct TurtleSerializerWrapper;

impl TurtleSerializerWrapper {
    /// Serialize Triples to Turtle string
    pub fn serialize(triples: &[Triple]) -> SerializeResult<String> {
        let mut formatter = TurtleFormatter::new(Vec::new());
        for triple in triples {
            formatter
                .format(&rio_triple(triple))
                .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        }
        let output = formatter.finish()?;
        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

/// Borrowed rio view of a triple
pub(super) fn rio_triple(triple: &Triple) -> model::Triple<'_> {
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => model::Subject::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => model::Subject::BlankNode(model::BlankNode { id: b.as_str() }),
    };

    let object = match &triple.object {
        RdfObject::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => model::Term::BlankNode(model::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) => model::Term::Literal(match l.language() {
            Some(language) => model::Literal::LanguageTaggedString {
                value: l.value(),
                language,
            },
            None if l.has_datatype(xsd::STRING) => model::Literal::Simple { value: l.value() },
            None => model::Literal::Typed {
                value: l.value(),
                datatype: model::NamedNode { iri: l.datatype_iri() },
            },
        }),
    };

    model::Triple {
        subject,
        predicate: model::NamedNode {
            iri: triple.predicate.as_str(),
        },
        object,
    }
}

pub(super) fn convert_triple(t: model::Triple<'_>) -> ParseResult<Triple> {
    Ok(Triple::new(
        convert_subject(t.subject)?,
        convert_predicate(t.predicate)?,
        convert_object(t.object)?,
    ))
}

fn invalid(e: impl ToString) -> ParseError {
    ParseError::Parse(e.to_string())
}

fn convert_subject(s: model::Subject<'_>) -> ParseResult<RdfSubject> {
    match s {
        model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(NamedNode::new(n.iri).map_err(invalid)?)),
        model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(BlankNode::from_str(b.id).map_err(invalid)?)),
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

fn convert_predicate(p: model::NamedNode<'_>) -> ParseResult<RdfPredicate> {
    RdfPredicate::new(p.iri).map_err(invalid)
}

fn convert_object(o: model::Term<'_>) -> ParseResult<RdfObject> {
    match o {
        model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(NamedNode::new(n.iri).map_err(invalid)?)),
        model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(BlankNode::from_str(b.id).map_err(invalid)?)),
        model::Term::Literal(model::Literal::Simple { value }) => {
            Ok(RdfObject::Literal(Literal::new_simple_literal(value)))
        }
        model::Term::Literal(model::Literal::LanguageTaggedString { value, language }) => Ok(RdfObject::Literal(
            Literal::new_language_tagged_literal(value, language).map_err(invalid)?,
        )),
        model::Term::Literal(model::Literal::Typed { value, datatype }) => {
            let datatype = NamedNode::new(datatype.iri).map_err(invalid)?;
            Ok(RdfObject::Literal(Literal::new_typed_literal(value, datatype)))
        }
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}
