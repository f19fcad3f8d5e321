//! Conversion between RDF terms and typed property values
//!
//! The forward direction follows a fixed policy:
//! 1. A URI resource for a reference type becomes a reference to the node
//!    the resource names.
//! 2. Anything else for a reference type is rejected.
//! 3. A URI resource, or any term for the `Uri` type, becomes a URI value.
//! 4. A blank node becomes a string value holding its label.
//! 5. A literal with no declared type is read according to its datatype,
//!    trying the kinds of [`INFERENCE_ORDER`] in turn.
//! 6. A literal with a declared type is parsed as that type.

use super::identifier::IdentifierConverter;
use super::mapping::{MappingError, MappingResult};
use super::types::{Literal, NamedNode, RdfObject};
use crate::graph::value::{parse_timestamp, parse_xsd_float};
use crate::graph::{PropertyType, PropertyValue, Session};
use oxrdf::vocab::xsd;
use oxrdf::NamedNodeRef;
use tracing::debug;

/// Kinds a literal can be read as when the store declares no type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Boolean,
    Byte,
    Double,
    Float,
    Long,
    Short,
    Integer,
    Timestamp,
    Lexical,
}

/// Order in which untyped literals are matched; the first kind that accepts
/// the literal wins, and `Lexical` accepts everything
pub const INFERENCE_ORDER: [LiteralKind; 9] = [
    LiteralKind::Boolean,
    LiteralKind::Byte,
    LiteralKind::Double,
    LiteralKind::Float,
    LiteralKind::Long,
    LiteralKind::Short,
    LiteralKind::Integer,
    LiteralKind::Timestamp,
    LiteralKind::Lexical,
];

const INTEGER_FAMILY: [NamedNodeRef<'static>; 6] = [
    xsd::INTEGER,
    xsd::NON_NEGATIVE_INTEGER,
    xsd::POSITIVE_INTEGER,
    xsd::NON_POSITIVE_INTEGER,
    xsd::NEGATIVE_INTEGER,
    xsd::UNSIGNED_LONG,
];

impl LiteralKind {
    /// Read a literal as this kind, if its datatype and lexical form allow it
    pub fn read(self, literal: &Literal) -> Option<PropertyValue> {
        let lexical = literal.value().trim();

        match self {
            LiteralKind::Boolean if is_any(literal, &[xsd::BOOLEAN]) => match lexical {
                "true" | "1" => Some(PropertyValue::Boolean(true)),
                "false" | "0" => Some(PropertyValue::Boolean(false)),
                _ => None,
            },
            LiteralKind::Byte if is_any(literal, &[xsd::BYTE]) => lexical.parse().ok().map(PropertyValue::Byte),
            LiteralKind::Double if is_any(literal, &[xsd::DOUBLE]) => parse_xsd_float(lexical).map(PropertyValue::Double),
            LiteralKind::Float if is_any(literal, &[xsd::FLOAT]) => {
                parse_xsd_float(lexical).map(PropertyValue::Float)
            }
            LiteralKind::Long if is_any(literal, &[xsd::LONG, xsd::UNSIGNED_INT]) => lexical.parse().ok().map(PropertyValue::Long),
            LiteralKind::Long if is_any(literal, &INTEGER_FAMILY) => {
                let value: i64 = lexical.parse().ok()?;
                i32::try_from(value).is_err().then_some(PropertyValue::Long(value))
            }
            LiteralKind::Short if is_any(literal, &[xsd::SHORT, xsd::UNSIGNED_BYTE]) => {
                lexical.parse().ok().map(PropertyValue::Short)
            }
            LiteralKind::Integer if is_any(literal, &[xsd::INT, xsd::UNSIGNED_SHORT]) || is_any(literal, &INTEGER_FAMILY) => {
                lexical.parse().ok().map(PropertyValue::Integer)
            }
            LiteralKind::Timestamp if is_any(literal, &[xsd::DATE_TIME, xsd::DATE_TIME_STAMP, xsd::DATE]) => {
                parse_timestamp(lexical).map(PropertyValue::Date)
            }
            LiteralKind::Lexical => Some(PropertyValue::String(literal.value().to_string())),
            _ => None,
        }
    }
}

fn is_any(literal: &Literal, datatypes: &[NamedNodeRef<'_>]) -> bool {
    datatypes.iter().any(|d| literal.has_datatype(*d))
}

/// Value for a literal whose type the store does not declare
pub fn infer_value(literal: &Literal) -> PropertyValue {
    INFERENCE_ORDER
        .iter()
        .find_map(|kind| kind.read(literal))
        .unwrap_or_else(|| PropertyValue::String(literal.value().to_string()))
}

/// Create a property value from an RDF term for a declared property type
pub fn create_value<S, C>(session: &S, converter: &C, term: &RdfObject, target: PropertyType) -> MappingResult<PropertyValue>
where
    S: Session + ?Sized,
    C: IdentifierConverter + ?Sized,
{
    let factory = session.value_factory();

    match (term, target) {
        (RdfObject::NamedNode(resource), PropertyType::Reference | PropertyType::WeakReference) => {
            let id = converter
                .to_path(resource)
                .map_err(|e| MappingError::MalformedInput(format!("Unable to find referenced node: {}", e)))
                .and_then(|path| {
                    session
                        .node_at(&path)
                        .map_err(|e| MappingError::MalformedInput(format!("Unable to find referenced node: {}", e)))
                })?;
            Ok(factory.create_reference(id, target == PropertyType::WeakReference))
        }
        (_, PropertyType::Reference | PropertyType::WeakReference) => Err(MappingError::InvalidValueShape(format!(
            "Reference properties can only refer to URIs, not {}",
            term
        ))),
        (RdfObject::NamedNode(resource), _) => Ok(PropertyValue::Uri(resource.as_str().to_string())),
        (RdfObject::BlankNode(blank), PropertyType::Uri) => parse_lexical(session, blank.as_str(), target),
        (RdfObject::Literal(literal), PropertyType::Uri) => parse_lexical(session, literal.value(), target),
        (RdfObject::BlankNode(blank), _) => Ok(PropertyValue::String(blank.as_str().to_string())),
        (RdfObject::Literal(literal), PropertyType::Undefined) => Ok(infer_value(literal)),
        (RdfObject::Literal(literal), _) => {
            debug!("Using default value creation for RDF literal {}", literal);
            parse_lexical(session, literal.value(), target)
        }
    }
}

fn parse_lexical<S: Session + ?Sized>(session: &S, lexical: &str, target: PropertyType) -> MappingResult<PropertyValue> {
    session
        .value_factory()
        .create_value(lexical, target)
        .map_err(|e| MappingError::MalformedInput(e.to_string()))
}

/// RDF term for a property value
///
/// References become the resource of the node they point at.
pub fn term_for_value<S, C>(session: &S, converter: &C, value: &PropertyValue) -> MappingResult<RdfObject>
where
    S: Session + ?Sized,
    C: IdentifierConverter + ?Sized,
{
    let typed = |datatype: NamedNodeRef<'_>| -> MappingResult<RdfObject> {
        let lexical = value
            .lexical_form()
            .ok_or_else(|| MappingError::InvalidValueShape(format!("{} has no lexical form", value)))?;
        Ok(Literal::new_typed_literal(lexical, datatype).into())
    };

    match value {
        PropertyValue::Boolean(_) => typed(xsd::BOOLEAN),
        PropertyValue::Byte(_) => typed(xsd::BYTE),
        PropertyValue::Short(_) => typed(xsd::SHORT),
        PropertyValue::Integer(_) => typed(xsd::INT),
        PropertyValue::Long(_) => typed(xsd::LONG),
        PropertyValue::Float(_) => typed(xsd::FLOAT),
        PropertyValue::Double(_) => typed(xsd::DOUBLE),
        PropertyValue::Date(_) => typed(xsd::DATE_TIME),
        PropertyValue::String(s) => Ok(Literal::new_simple_literal(s.clone()).into()),
        PropertyValue::Uri(uri) => match NamedNode::new(uri) {
            Ok(node) => Ok(node.into()),
            // Relative references are kept, but cannot be resources
            Err(_) => typed(xsd::ANY_URI),
        },
        PropertyValue::Reference(id) | PropertyValue::WeakReference(id) => {
            let path = session.node(*id)?.path();
            Ok(converter.to_resource(path).into())
        }
    }
}
