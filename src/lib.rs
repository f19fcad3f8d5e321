//! Samyama RDF Bridge
//!
//! Translates a JCR-style repository graph to and from RDF: node properties
//! become triples, triples become typed properties and mixin types, and the
//! repository's namespaces, workspaces and fixity results are published as
//! RDF vocabulary.
//!
//! # Layout
//!
//! - [`graph`]: nodes, node types, typed property values, the namespace
//!   registry and the [`graph::Session`] contract with an in-memory store
//! - [`rdf`]: the translator, value conversion, type tags, the
//!   managed-property guard, lazy triple streams and Turtle/N-Triples I/O
//!
//! ## Example Usage
//!
//! ```rust
//! use samyama_rdf_bridge::graph::{MemorySession, PropertyValue, Session};
//! use samyama_rdf_bridge::rdf::{MappingConfig, PathConverter, RdfTranslator};
//!
//! let mut session = MemorySession::new();
//! let node = session.ensure_node("/a").unwrap();
//! session
//!     .node_mut(node)
//!     .unwrap()
//!     .set_property("jcr:title", PropertyValue::String("A".to_string()));
//!
//! let converter = PathConverter::new(&MappingConfig::default(), "default");
//! let translator = RdfTranslator::new(&mut session, converter);
//! let triples = translator.property_triples([node], None).into_triples().unwrap();
//! assert_eq!(triples[0].predicate.as_str(), "http://fedora.info/definitions/v4/repository#title");
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod rdf;

// Re-export main types for convenience
pub use graph::{
    MemorySession, NamespaceRegistry, Node, NodeId, PropertyType, PropertyValue, RepositoryError, Session,
};

pub use rdf::{
    IdentifierConverter, MappingConfig, MappingError, MappingResult, PathConverter, RdfFormat, RdfParser,
    RdfSerializer, RdfTranslator, Triple,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
