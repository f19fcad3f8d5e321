//! RDF type definitions
//!
//! This module provides wrapper types around the oxrdf library for RDF primitives.

use oxrdf::{BlankNode as OxBlankNode, Literal as OxLiteral, NamedNode as OxNamedNode, NamedNodeRef};
use std::fmt;
use thiserror::Error;

/// RDF errors
#[derive(Error, Debug)]
pub enum RdfError {
    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Invalid blank node
    #[error("Invalid blank node: {0}")]
    InvalidBlankNode(String),

    /// Invalid literal
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),
}

pub type RdfResult<T> = Result<T, RdfError>;

/// Named node (IRI)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(OxNamedNode);

impl NamedNode {
    /// Create a new named node from an IRI string
    pub fn new(iri: &str) -> RdfResult<Self> {
        OxNamedNode::new(iri)
            .map(Self)
            .map_err(|e| RdfError::InvalidIri(e.to_string()))
    }

    /// Create a named node from an IRI already known to be valid
    pub fn new_unchecked(iri: impl Into<String>) -> Self {
        Self(OxNamedNode::new_unchecked(iri))
    }

    /// Get the IRI string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Namespace part of the IRI (everything before [`Self::local_name`])
    pub fn namespace(&self) -> &str {
        let iri = self.as_str();
        &iri[..split_point(iri)]
    }

    /// Local name: the longest XML name at the end of the IRI that starts
    /// with a name-start character; may be empty
    pub fn local_name(&self) -> &str {
        let iri = self.as_str();
        &iri[split_point(iri)..]
    }

    /// Get the inner oxrdf NamedNode
    pub fn inner(&self) -> &OxNamedNode {
        &self.0
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\u{B7}')
}

fn is_name_start_char(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn split_point(iri: &str) -> usize {
    let mut start = iri.len();
    for (idx, c) in iri.char_indices().rev() {
        if !is_name_char(c) {
            break;
        }
        start = idx;
    }
    iri[start..]
        .char_indices()
        .find(|(_, c)| is_name_start_char(*c))
        .map_or(iri.len(), |(offset, _)| start + offset)
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

impl From<OxNamedNode> for NamedNode {
    fn from(node: OxNamedNode) -> Self {
        Self(node)
    }
}

impl From<NamedNodeRef<'_>> for NamedNode {
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self(node.into_owned())
    }
}

impl From<NamedNode> for OxNamedNode {
    fn from(node: NamedNode) -> Self {
        node.0
    }
}

/// Blank node (anonymous node)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlankNode(OxBlankNode);

impl BlankNode {
    /// Create a new blank node with a unique identifier
    pub fn new() -> Self {
        Self(OxBlankNode::default())
    }

    /// Create a blank node from a string identifier
    pub fn from_str(s: &str) -> RdfResult<Self> {
        OxBlankNode::new(s)
            .map(Self)
            .map_err(|e| RdfError::InvalidBlankNode(e.to_string()))
    }

    /// Get the blank node identifier
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for BlankNode {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.as_str())
    }
}

/// RDF literal value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(OxLiteral);

impl Literal {
    /// Create a simple literal (plain string)
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self(OxLiteral::new_simple_literal(value))
    }

    /// Create a literal with language tag
    pub fn new_language_tagged_literal(value: impl Into<String>, language: impl Into<String>) -> RdfResult<Self> {
        OxLiteral::new_language_tagged_literal(value, language)
            .map(Self)
            .map_err(|e| RdfError::InvalidLiteral(e.to_string()))
    }

    /// Create a typed literal
    pub fn new_typed_literal(value: impl Into<String>, datatype: impl Into<NamedNode>) -> Self {
        Self(OxLiteral::new_typed_literal(value, datatype.into().0))
    }

    /// Get the lexical value
    pub fn value(&self) -> &str {
        self.0.value()
    }

    /// Get the language tag if present
    pub fn language(&self) -> Option<&str> {
        self.0.language()
    }

    /// Get the datatype
    pub fn datatype(&self) -> NamedNode {
        NamedNode(self.0.datatype().into_owned())
    }

    /// Datatype IRI, borrowed from the literal
    pub fn datatype_iri(&self) -> &str {
        self.0.datatype().as_str()
    }

    /// Whether the literal has exactly this datatype
    pub fn has_datatype(&self, datatype: NamedNodeRef<'_>) -> bool {
        self.0.datatype().as_str() == datatype.as_str()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(lang) = self.language() {
            write!(f, "\"{}\"@{}", self.value(), lang)
        } else if self.has_datatype(oxrdf::vocab::xsd::STRING) {
            write!(f, "\"{}\"", self.value())
        } else {
            write!(f, "\"{}\"^^{}", self.value(), self.datatype())
        }
    }
}

/// RDF subject (NamedNode or BlankNode)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfSubject {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
}

impl RdfSubject {
    /// Check if this is a named node
    pub fn is_named_node(&self) -> bool {
        matches!(self, RdfSubject::NamedNode(_))
    }

    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            RdfSubject::NamedNode(n) => Some(n),
            RdfSubject::BlankNode(_) => None,
        }
    }
}

impl fmt::Display for RdfSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfSubject::NamedNode(n) => write!(f, "{}", n),
            RdfSubject::BlankNode(b) => write!(f, "{}", b),
        }
    }
}

impl From<NamedNode> for RdfSubject {
    fn from(node: NamedNode) -> Self {
        RdfSubject::NamedNode(node)
    }
}

impl From<BlankNode> for RdfSubject {
    fn from(node: BlankNode) -> Self {
        RdfSubject::BlankNode(node)
    }
}

/// RDF predicate (always a NamedNode)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RdfPredicate(NamedNode);

impl RdfPredicate {
    /// Create a new predicate from an IRI
    pub fn new(iri: &str) -> RdfResult<Self> {
        Ok(Self(NamedNode::new(iri)?))
    }

    /// Get the underlying named node
    pub fn as_named_node(&self) -> &NamedNode {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RdfPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NamedNode> for RdfPredicate {
    fn from(node: NamedNode) -> Self {
        RdfPredicate(node)
    }
}

impl From<NamedNodeRef<'_>> for RdfPredicate {
    fn from(node: NamedNodeRef<'_>) -> Self {
        RdfPredicate(node.into())
    }
}

impl From<RdfPredicate> for NamedNode {
    fn from(pred: RdfPredicate) -> Self {
        pred.0
    }
}

/// RDF object (NamedNode, BlankNode, or Literal)
///
/// This is the general RDF term type used for values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfObject {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
    /// Literal value
    Literal(Literal),
}

impl RdfObject {
    /// Check if this is a named node
    pub fn is_named_node(&self) -> bool {
        matches!(self, RdfObject::NamedNode(_))
    }

    /// Check if this is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, RdfObject::BlankNode(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, RdfObject::Literal(_))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            RdfObject::Literal(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for RdfObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfObject::NamedNode(n) => write!(f, "{}", n),
            RdfObject::BlankNode(b) => write!(f, "{}", b),
            RdfObject::Literal(l) => write!(f, "{}", l),
        }
    }
}

impl From<NamedNode> for RdfObject {
    fn from(node: NamedNode) -> Self {
        RdfObject::NamedNode(node)
    }
}

impl From<BlankNode> for RdfObject {
    fn from(node: BlankNode) -> Self {
        RdfObject::BlankNode(node)
    }
}

impl From<Literal> for RdfObject {
    fn from(lit: Literal) -> Self {
        RdfObject::Literal(lit)
    }
}

/// RDF triple (subject-predicate-object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject
    pub subject: RdfSubject,
    /// Predicate
    pub predicate: RdfPredicate,
    /// Object
    pub object: RdfObject,
}

impl Triple {
    /// Create a new triple
    pub fn new(subject: impl Into<RdfSubject>, predicate: impl Into<RdfPredicate>, object: impl Into<RdfObject>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_node() {
        let node = NamedNode::new("http://localhost:8080/rest/books/one").unwrap();
        assert_eq!(node.as_str(), "http://localhost:8080/rest/books/one");
        assert_eq!(format!("{}", node), "<http://localhost:8080/rest/books/one>");
        assert!(NamedNode::new("books/one").is_err());
    }

    #[test]
    fn test_namespace_split() {
        let hash = NamedNode::new("http://purl.org/dc/elements/1.1/title").unwrap();
        assert_eq!(hash.namespace(), "http://purl.org/dc/elements/1.1/");
        assert_eq!(hash.local_name(), "title");

        let fragment = NamedNode::new("http://example.org/ns#hasPart").unwrap();
        assert_eq!(fragment.namespace(), "http://example.org/ns#");
        assert_eq!(fragment.local_name(), "hasPart");

        // A local name cannot start with a digit
        let numeric = NamedNode::new("http://example.org/ns#1st").unwrap();
        assert_eq!(numeric.namespace(), "http://example.org/ns#1");
        assert_eq!(numeric.local_name(), "st");

        let trailing = NamedNode::new("http://example.org/ns#").unwrap();
        assert_eq!(trailing.namespace(), "http://example.org/ns#");
        assert_eq!(trailing.local_name(), "");
    }

    #[test]
    fn test_blank_node() {
        assert_ne!(BlankNode::new(), BlankNode::new());
        assert_eq!(BlankNode::from_str("b0").unwrap().to_string(), "_:b0");
        assert!(BlankNode::from_str("not valid").is_err());
    }

    #[test]
    fn test_literals() {
        let title = Literal::new_simple_literal("Moby Dick");
        assert!(title.has_datatype(oxrdf::vocab::xsd::STRING));
        assert_eq!(title.to_string(), "\"Moby Dick\"");

        let tagged = Literal::new_language_tagged_literal("Moby Dick", "en").unwrap();
        assert_eq!(tagged.language(), Some("en"));
        assert!(Literal::new_language_tagged_literal("Moby Dick", "not a tag").is_err());

        let pages = Literal::new_typed_literal("635", oxrdf::vocab::xsd::SHORT);
        assert_eq!(pages.datatype_iri(), "http://www.w3.org/2001/XMLSchema#short");
        assert!(pages.language().is_none());
    }

    #[test]
    fn test_triple_display() {
        let triple = Triple::new(
            NamedNode::new("http://localhost:8080/rest/books/one").unwrap(),
            RdfPredicate::new("http://purl.org/dc/terms/title").unwrap(),
            Literal::new_simple_literal("Moby Dick"),
        );

        assert!(triple.subject.as_named_node().is_some());
        assert!(triple.object.as_literal().is_some());
        assert_eq!(
            triple.to_string(),
            "<http://localhost:8080/rest/books/one> <http://purl.org/dc/terms/title> \"Moby Dick\" ."
        );
    }
}
