//! Translation between the repository graph and RDF
//!
//! This module covers both directions of the bridge:
//! - RDF terms and triples (wrappers over `oxrdf`)
//! - Namespace bridging and property name resolution
//! - Value conversion between RDF terms and typed property values
//! - Type tags and the managed-property guard
//! - Lazy triple streams for properties, fixity, namespaces and workspaces
//! - Turtle and N-Triples serialization
//!
//! # Example
//!
//! ```rust
//! use samyama_rdf_bridge::graph::{MemorySession, Session};
//! use samyama_rdf_bridge::rdf::{
//!     IdentifierConverter, Literal, MappingConfig, PathConverter, RdfPredicate, RdfTranslator, Triple,
//! };
//! use std::collections::HashMap;
//!
//! let mut session = MemorySession::new();
//! let node = session.ensure_node("/item").unwrap();
//! let converter = PathConverter::new(&MappingConfig::default(), "default");
//!
//! let subject = converter.to_resource("/item");
//! let predicate = RdfPredicate::new("http://purl.org/dc/elements/1.1/title").unwrap();
//! let mut hints = HashMap::new();
//! hints.insert("dc".to_string(), "http://purl.org/dc/elements/1.1/".to_string());
//!
//! let mut translator = RdfTranslator::new(&mut session, &converter);
//! translator
//!     .apply_statement(&Triple::new(subject, predicate, Literal::new_simple_literal("Hello")), &hints)
//!     .unwrap();
//!
//! let triples = translator.property_triples([node], None).into_triples().unwrap();
//! assert_eq!(triples.len(), 1);
//! ```

mod types;
mod mapping;
mod serialization;

pub mod context;
pub mod guard;
pub mod identifier;
pub mod lexicon;
pub mod namespace;
pub mod typetag;
pub mod value;

pub use types::{
    RdfError, RdfResult,
    RdfSubject, RdfPredicate, RdfObject,
    NamedNode, BlankNode, Literal, Triple,
};

pub use mapping::{
    RdfTranslator, MappingConfig,
    MappingError, MappingResult, ConfigError,
};

pub use identifier::{
    IdentifierConverter, PathConverter,
    ConversionError, ConversionResult,
};

pub use context::{RdfStream, TripleSource};

pub use serialization::{
    RdfDocument, RdfFormat, RdfParser, RdfSerializer,
    ParseError, ParseResult,
    SerializeError, SerializeResult,
};
