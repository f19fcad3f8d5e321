//! The store session contract
//!
//! Translation code only ever talks to the repository through [`Session`].
//! A session is bound to one workspace and is the serialization boundary for
//! all reads and writes made through it.

use super::namespace::{NamespaceError, NamespaceRegistry};
use super::node::Node;
use super::nodetype::NodeTypeDefinition;
use super::types::NodeId;
use super::value::ValueFactory;
use thiserror::Error;

/// Errors that can occur during repository operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("No node at path {0}")]
    PathNotFound(String),

    #[error("Node already exists at path {0}")]
    PathExists(String),

    #[error("No such node type: {0}")]
    NoSuchNodeType(String),

    #[error("Node type already registered: {0}")]
    NodeTypeExists(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("No such workspace: {0}")]
    NoSuchWorkspace(String),

    #[error("Workspace already exists: {0}")]
    WorkspaceExists(String),

    #[error(transparent)]
    Namespace(#[from] NamespaceError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// An open session against the repository
pub trait Session {
    /// Name of the workspace this session is bound to
    fn workspace_name(&self) -> &str;

    /// Names of all workspaces visible to this session
    fn workspace_names(&self) -> RepositoryResult<Vec<String>>;

    fn node(&self, id: NodeId) -> RepositoryResult<&Node>;

    /// Mutable access for property writes
    fn node_mut(&mut self, id: NodeId) -> RepositoryResult<&mut Node>;

    /// Resolve an absolute path to a node handle
    fn node_at(&self, path: &str) -> RepositoryResult<NodeId>;

    fn has_node_type(&self, name: &str) -> bool;

    fn node_type(&self, name: &str) -> RepositoryResult<&NodeTypeDefinition>;

    /// Register a type definition; replaces an existing one only when
    /// `allow_update` is set
    fn register_node_type(&mut self, definition: NodeTypeDefinition, allow_update: bool) -> RepositoryResult<()>;

    /// Whether the node is of the named type through its primary type,
    /// a mixin, or any of their supertypes
    fn is_node_type(&self, id: NodeId, name: &str) -> RepositoryResult<bool>;

    fn can_add_mixin(&self, id: NodeId, name: &str) -> RepositoryResult<bool>;

    fn add_mixin(&mut self, id: NodeId, name: &str) -> RepositoryResult<()>;

    fn remove_mixin(&mut self, id: NodeId, name: &str) -> RepositoryResult<()>;

    fn namespace_registry(&self) -> &NamespaceRegistry;

    fn namespace_registry_mut(&mut self) -> &mut NamespaceRegistry;

    fn value_factory(&self) -> ValueFactory {
        ValueFactory::new()
    }
}
