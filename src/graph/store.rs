//! In-memory repository session
//!
//! Reference implementation of [`Session`]: an arena of nodes addressed by
//! handle and by path, a node type registry, a namespace registry and the
//! list of workspaces. Nothing here is durable.

use super::namespace::NamespaceRegistry;
use super::node::Node;
use super::nodetype::{builtin_node_types, NodeTypeDefinition};
use super::session::{RepositoryError, RepositoryResult, Session};
use super::types::{split_qualified_name, NodeId};
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use tracing::debug;

/// Name of the workspace every repository starts with
pub const DEFAULT_WORKSPACE: &str = "default";

/// Primary type of the root node and of nodes created on demand
pub const DEFAULT_PRIMARY_TYPE: &str = "nt:unstructured";

/// In-memory session bound to one workspace
///
/// Uses:
/// - nodes: arena indexed by NodeId
/// - paths: path -> NodeId
/// - node_types: name -> definition, in registration order
#[derive(Debug)]
pub struct MemorySession {
    /// Workspace this session reads and writes
    workspace: String,

    /// All known workspaces
    workspaces: BTreeSet<String>,

    /// Node storage (arena)
    nodes: Vec<Node>,

    /// Path index
    paths: HashMap<String, NodeId>,

    /// Node type registry
    node_types: IndexMap<String, NodeTypeDefinition>,

    /// Namespace registry shared by everything done through this session
    namespaces: NamespaceRegistry,
}

impl MemorySession {
    /// Create a session on the default workspace
    pub fn new() -> Self {
        Self::with_workspace(DEFAULT_WORKSPACE)
    }

    /// Create a session on a named workspace
    pub fn with_workspace(workspace: impl Into<String>) -> Self {
        let workspace = workspace.into();
        let mut workspaces = BTreeSet::new();
        workspaces.insert(DEFAULT_WORKSPACE.to_string());
        workspaces.insert(workspace.clone());

        let node_types = builtin_node_types()
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect();

        let root = Node::new(NodeId::new(0), "/", DEFAULT_PRIMARY_TYPE);
        let mut paths = HashMap::new();
        paths.insert("/".to_string(), root.id);

        MemorySession {
            workspace,
            workspaces,
            nodes: vec![root],
            paths,
            node_types,
            namespaces: NamespaceRegistry::new(),
        }
    }

    /// Handle of the root node
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Create a node under an existing parent
    pub fn create_node(&mut self, path: &str, primary_type: &str) -> RepositoryResult<NodeId> {
        validate_path(path)?;
        if self.paths.contains_key(path) {
            return Err(RepositoryError::PathExists(path.to_string()));
        }
        let parent = parent_path(path);
        if !self.paths.contains_key(parent) {
            return Err(RepositoryError::PathNotFound(parent.to_string()));
        }
        let definition = self.node_type(primary_type)?;
        if definition.mixin {
            return Err(RepositoryError::ConstraintViolation(format!(
                "{} is a mixin and cannot be a primary type",
                primary_type
            )));
        }

        let node_id = NodeId::new(self.nodes.len() as u64);
        self.nodes.push(Node::new(node_id, path, primary_type));
        self.paths.insert(path.to_string(), node_id);

        debug!("Created node {} at {} with type {}", node_id, path, primary_type);
        Ok(node_id)
    }

    /// Return the node at `path`, creating it and any missing ancestors with
    /// the default primary type
    pub fn ensure_node(&mut self, path: &str) -> RepositoryResult<NodeId> {
        validate_path(path)?;
        if let Some(id) = self.paths.get(path) {
            return Ok(*id);
        }
        let parent = parent_path(path).to_string();
        self.ensure_node(&parent)?;
        self.create_node(path, DEFAULT_PRIMARY_TYPE)
    }

    /// Get number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All node handles in creation order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    pub fn create_workspace(&mut self, name: &str) -> RepositoryResult<()> {
        if name.is_empty() || name.contains('/') {
            return Err(RepositoryError::ConstraintViolation(format!("Illegal workspace name: {}", name)));
        }
        if !self.workspaces.insert(name.to_string()) {
            return Err(RepositoryError::WorkspaceExists(name.to_string()));
        }
        debug!("Created workspace {}", name);
        Ok(())
    }

    pub fn delete_workspace(&mut self, name: &str) -> RepositoryResult<()> {
        if name == DEFAULT_WORKSPACE || name == self.workspace {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Workspace {} is in use and cannot be deleted",
                name
            )));
        }
        if !self.workspaces.remove(name) {
            return Err(RepositoryError::NoSuchWorkspace(name.to_string()));
        }
        debug!("Deleted workspace {}", name);
        Ok(())
    }

    /// Names of the node's types and all their supertypes
    fn effective_types(&self, node: &Node) -> HashSet<String> {
        let mut seen = HashSet::new();
        let mut queue: VecDeque<String> = std::iter::once(node.primary_type().to_string())
            .chain(node.mixins().map(str::to_string))
            .collect();

        while let Some(name) = queue.pop_front() {
            if !seen.insert(name.clone()) {
                continue;
            }
            if let Some(definition) = self.node_types.get(&name) {
                queue.extend(definition.supertypes.iter().cloned());
            }
        }
        seen
    }
}

impl Default for MemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl Session for MemorySession {
    fn workspace_name(&self) -> &str {
        &self.workspace
    }

    fn workspace_names(&self) -> RepositoryResult<Vec<String>> {
        Ok(self.workspaces.iter().cloned().collect())
    }

    fn node(&self, id: NodeId) -> RepositoryResult<&Node> {
        self.nodes.get(id.index()).ok_or(RepositoryError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> RepositoryResult<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or(RepositoryError::NodeNotFound(id))
    }

    fn node_at(&self, path: &str) -> RepositoryResult<NodeId> {
        self.paths
            .get(path)
            .copied()
            .ok_or_else(|| RepositoryError::PathNotFound(path.to_string()))
    }

    fn has_node_type(&self, name: &str) -> bool {
        self.node_types.contains_key(name)
    }

    fn node_type(&self, name: &str) -> RepositoryResult<&NodeTypeDefinition> {
        self.node_types
            .get(name)
            .ok_or_else(|| RepositoryError::NoSuchNodeType(name.to_string()))
    }

    fn register_node_type(&mut self, definition: NodeTypeDefinition, allow_update: bool) -> RepositoryResult<()> {
        if self.node_types.contains_key(&definition.name) && !allow_update {
            return Err(RepositoryError::NodeTypeExists(definition.name));
        }
        let (prefix, local) = split_qualified_name(&definition.name);
        if local.is_empty() {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Illegal node type name: {}",
                definition.name
            )));
        }
        self.namespaces.uri(prefix)?;
        if let Some(missing) = definition.supertypes.iter().find(|s| !self.node_types.contains_key(*s)) {
            return Err(RepositoryError::NoSuchNodeType(missing.clone()));
        }

        debug!("Registered node type {} (mixin: {})", definition.name, definition.mixin);
        self.node_types.insert(definition.name.clone(), definition);
        Ok(())
    }

    fn is_node_type(&self, id: NodeId, name: &str) -> RepositoryResult<bool> {
        let node = self.node(id)?;
        Ok(self.effective_types(node).contains(name))
    }

    fn can_add_mixin(&self, id: NodeId, name: &str) -> RepositoryResult<bool> {
        let node = self.node(id)?;
        let mixin = self.node_type(name)?;
        if !mixin.mixin {
            return Ok(false);
        }
        let primary = self.node_type(node.primary_type())?;
        if !primary.allows_mixins {
            return Ok(false);
        }

        // A mixin may not redeclare a property with a different type
        for existing in self.effective_types(node) {
            let Some(definition) = self.node_types.get(&existing) else {
                continue;
            };
            let conflict = mixin.property_definitions.iter().any(|candidate| {
                definition
                    .property_definition(&candidate.name)
                    .map_or(false, |d| d.required_type != candidate.required_type)
            });
            if conflict {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn add_mixin(&mut self, id: NodeId, name: &str) -> RepositoryResult<()> {
        if !self.can_add_mixin(id, name)? {
            let path = self.node(id)?.path().to_string();
            return Err(RepositoryError::ConstraintViolation(format!(
                "Mixin {} cannot be added to {}",
                name, path
            )));
        }
        self.node_mut(id)?.add_mixin(name);
        Ok(())
    }

    fn remove_mixin(&mut self, id: NodeId, name: &str) -> RepositoryResult<()> {
        let node = self.node_mut(id)?;
        if !node.remove_mixin(name) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "{} is not a mixin of {}",
                name,
                node.path()
            )));
        }
        Ok(())
    }

    fn namespace_registry(&self) -> &NamespaceRegistry {
        &self.namespaces
    }

    fn namespace_registry_mut(&mut self) -> &mut NamespaceRegistry {
        &mut self.namespaces
    }
}

fn validate_path(path: &str) -> RepositoryResult<()> {
    let valid = path == "/"
        || (path.starts_with('/') && !path.ends_with('/') && !path[1..].split('/').any(|s| s.is_empty()));
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::ConstraintViolation(format!("Illegal path: {}", path)))
    }
}

fn parent_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(pos) => &path[..pos],
    }
}
