//! Repository graph model
//!
//! This module implements the structured side of the translation:
//! - Nodes with a path, a primary type, mixins and typed properties
//! - Node type definitions with property definitions
//! - The session-scoped namespace registry
//! - The [`Session`] contract and an in-memory implementation

pub mod fixity;
pub mod namespace;
pub mod node;
pub mod nodetype;
pub mod property;
pub mod session;
pub mod store;
pub mod types;
pub mod value;

// Re-export main types
pub use fixity::{DigestAlgorithm, FixityResult, FixityState};
pub use namespace::{Namespace, NamespaceError, NamespaceRegistry, NamespaceResult};
pub use node::Node;
pub use nodetype::{NodeTypeDefinition, PropertyDefinition};
pub use property::{PropertyMap, PropertyType, PropertyValue};
pub use session::{RepositoryError, RepositoryResult, Session};
pub use store::{MemorySession, DEFAULT_PRIMARY_TYPE, DEFAULT_WORKSPACE};
pub use types::NodeId;
pub use value::{ValueFactory, ValueFormatError};
