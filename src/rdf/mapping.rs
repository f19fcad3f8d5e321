//! Property graph ↔ RDF mapping
//!
//! [`RdfTranslator`] is the single entry point that ties the pieces of this
//! module together for one session.
//!
//! # Mapping Strategy
//!
//! ## RDF → Property Graph
//!
//! - `rdf:type` triples → mixin node types, defined on first use
//! - Other triples → property values, typed by the node's definitions
//! - Repository-managed predicates are rejected
//!
//! ## Property Graph → RDF
//!
//! - Property values → one triple each
//! - Fixity results, namespaces and workspaces → descriptive triples

use super::context::{FixitySource, NamespaceSource, PropertiesSource, RdfStream, WorkspaceSource};
use super::guard;
use super::identifier::{ConversionError, IdentifierConverter};
use super::namespace::resolve_iri_name;
use super::typetag;
use super::types::{NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use super::value;
use crate::graph::{
    FixityResult, NamespaceError, NodeId, PropertyDefinition, PropertyType, PropertyValue, RepositoryError, Session,
    DEFAULT_WORKSPACE,
};
use oxrdf::vocab::rdf;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Mapping errors
#[derive(Error, Debug)]
pub enum MappingError {
    /// The RDF cannot be applied as given
    #[error("Malformed RDF: {0}")]
    MalformedInput(String),

    /// A value of the wrong shape for the property's type
    #[error("Invalid value: {0}")]
    InvalidValueShape(String),

    /// Attempt to write or remove a repository-managed predicate
    #[error("Could not change triple containing predicate {predicate} on {path}: it is managed by the repository")]
    ManagedPropertyViolation { predicate: String, path: String },

    /// The node cannot take the asserted type
    #[error("Could not persist type assertion {tag}: no such mixin can be added to {path}")]
    IncompatibleType { tag: String, path: String },

    /// The store refused an operation
    #[error("Store operation failed: {0}")]
    StoreOperationFailed(#[from] RepositoryError),
}

pub type MappingResult<T> = Result<T, MappingError>;

impl From<NamespaceError> for MappingError {
    fn from(e: NamespaceError) -> Self {
        MappingError::StoreOperationFailed(RepositoryError::Namespace(e))
    }
}

impl From<ConversionError> for MappingError {
    fn from(e: ConversionError) -> Self {
        MappingError::MalformedInput(e.to_string())
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Mapping configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Base IRI under which node resources are minted
    pub base_iri: String,

    /// Workspace addressed without a `workspace:` segment
    pub default_workspace: String,
}

impl MappingConfig {
    /// Create a new mapping configuration
    pub fn new(base_iri: impl Into<String>) -> Self {
        Self {
            base_iri: base_iri.into(),
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            base_iri: "http://localhost:8080/rest/".to_string(),
            default_workspace: DEFAULT_WORKSPACE.to_string(),
        }
    }
}

/// Translates between RDF and the nodes of one session
///
/// The translator holds the session mutably for its whole life, so every
/// read and write it makes goes through that one session.
pub struct RdfTranslator<'s, S: ?Sized, C> {
    session: &'s mut S,
    converter: C,
}

impl<'s, S, C> RdfTranslator<'s, S, C>
where
    S: Session + ?Sized,
    C: IdentifierConverter,
{
    pub fn new(session: &'s mut S, converter: C) -> Self {
        Self { session, converter }
    }

    pub fn session(&self) -> &S {
        &*self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut *self.session
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Property name for a predicate, in the namespace registry of the
    /// node's session
    pub fn property_name_for_predicate(
        &mut self,
        node: NodeId,
        predicate: &RdfPredicate,
        hints: &HashMap<String, String>,
    ) -> MappingResult<String> {
        self.property_name_for_resource(node, predicate.as_named_node(), hints)
    }

    /// Property name for a predicate, without namespace hints
    pub fn session_property_name(&mut self, predicate: &RdfPredicate) -> MappingResult<String> {
        Ok(resolve_iri_name(
            self.session.namespace_registry_mut(),
            predicate.as_named_node(),
            &HashMap::new(),
        )?)
    }

    /// Store name for any resource, such as the class of an `rdf:type` triple
    pub fn property_name_for_resource(
        &mut self,
        node: NodeId,
        resource: &NamedNode,
        hints: &HashMap<String, String>,
    ) -> MappingResult<String> {
        self.session.node(node)?;
        Ok(resolve_iri_name(self.session.namespace_registry_mut(), resource, hints)?)
    }

    /// Property value for an RDF term and a declared type
    pub fn create_value(&self, term: &RdfObject, target: PropertyType) -> MappingResult<PropertyValue> {
        value::create_value(&*self.session, &self.converter, term, target)
    }

    /// RDF term for a stored value
    pub fn term_for_value(&self, value: &PropertyValue) -> MappingResult<RdfObject> {
        value::term_for_value(&*self.session, &self.converter, value)
    }

    /// First definition of a property over the node's primary type, its
    /// mixins and their supertypes
    fn property_definition(&self, node: NodeId, name: &str) -> MappingResult<Option<PropertyDefinition>> {
        let node = self.session.node(node)?;
        let mut queue: VecDeque<&str> = std::iter::once(node.primary_type()).chain(node.mixins()).collect();
        let mut seen = HashSet::new();

        while let Some(type_name) = queue.pop_front() {
            if !seen.insert(type_name) {
                continue;
            }
            let definition = self.session.node_type(type_name)?;
            if let Some(property) = definition.property_definition(name) {
                return Ok(Some(property.clone()));
            }
            queue.extend(definition.supertypes.iter().map(String::as_str));
        }
        Ok(None)
    }

    /// Declared type of a property on a node; `Undefined` if undeclared
    pub fn property_type(&self, node: NodeId, name: &str) -> MappingResult<PropertyType> {
        debug!("Getting type of property {} from {}", name, node);
        Ok(self
            .property_definition(node, name)?
            .map_or(PropertyType::Undefined, |d| d.required_type))
    }

    /// Declared type of a property on a node type; `Undefined` if the type
    /// does not declare it, or declares it more than once
    pub fn property_type_for(&self, node_type: &str, name: &str) -> MappingResult<PropertyType> {
        Ok(self.session.node_type(node_type)?.required_type(name))
    }

    /// Whether a predicate is maintained by the repository
    pub fn is_internal_property(&self, predicate: &RdfPredicate) -> bool {
        guard::is_managed_predicate(predicate)
    }

    /// Whether the node can hold children, through its primary type or a mixin
    pub fn is_container(&self, node: NodeId) -> MappingResult<bool> {
        let node = self.session.node(node)?;
        for type_name in std::iter::once(node.primary_type()).chain(node.mixins()) {
            if self.session.node_type(type_name)?.has_child_node_definitions() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Apply the class of an `rdf:type` triple to a node
    pub fn add_mixin(
        &mut self,
        node: NodeId,
        class: &NamedNode,
        hints: &HashMap<String, String>,
    ) -> MappingResult<()> {
        let name = self.property_name_for_resource(node, class, hints)?;
        let tag = typetag::lookup_or_define(&mut *self.session, &name)?;
        typetag::apply(&mut *self.session, node, &tag)
    }

    /// Withdraw the class of an `rdf:type` triple from a node
    ///
    /// Returns whether a mixin was removed.
    pub fn remove_mixin(
        &mut self,
        node: NodeId,
        class: &NamedNode,
        hints: &HashMap<String, String>,
    ) -> MappingResult<bool> {
        let name = self.property_name_for_resource(node, class, hints)?;
        typetag::withdraw(&mut *self.session, node, &name)
    }

    /// Store the object of a triple as a property value
    ///
    /// An absent property is created; a single-valued definition is
    /// replaced; otherwise the value is appended unless already present.
    pub fn add_property(
        &mut self,
        node: NodeId,
        predicate: &RdfPredicate,
        object: &RdfObject,
        hints: &HashMap<String, String>,
    ) -> MappingResult<()> {
        let path = self.session.node(node)?.path().to_string();
        guard::assert_mutable(predicate, &path)?;

        let name = self.property_name_for_predicate(node, predicate, hints)?;
        let definition = self.property_definition(node, &name)?;
        let target = definition.as_ref().map_or(PropertyType::Undefined, |d| d.required_type);
        let value = self.create_value(object, target)?;

        let single_valued = definition.map_or(false, |d| !d.multiple);
        let entry = self.session.node_mut(node)?;
        if !entry.has_property(&name) || single_valued {
            debug!("Setting property {} on {}", name, path);
            entry.set_property(name, value);
        } else if entry.append_property_value(name.clone(), value) {
            debug!("Appended value to property {} on {}", name, path);
        }
        Ok(())
    }

    /// Remove the object of a triple from a property
    ///
    /// Returns whether a value was removed; the property disappears with its
    /// last value.
    pub fn remove_property(
        &mut self,
        node: NodeId,
        predicate: &RdfPredicate,
        object: &RdfObject,
        hints: &HashMap<String, String>,
    ) -> MappingResult<bool> {
        let path = self.session.node(node)?.path().to_string();
        guard::assert_mutable(predicate, &path)?;

        let name = self.property_name_for_predicate(node, predicate, hints)?;
        if !self.session.node(node)?.has_property(&name) {
            return Ok(false);
        }
        let value = self.create_value(object, self.property_type(node, &name)?)?;
        let removed = self.session.node_mut(node)?.remove_property_value(&name, &value);
        if removed {
            debug!("Removed value {} of property {} on {}", value, name, path);
        }
        Ok(removed)
    }

    /// Node a triple's subject names
    pub fn subject_node(&self, subject: &RdfSubject) -> MappingResult<NodeId> {
        let resource = subject
            .as_named_node()
            .ok_or_else(|| MappingError::MalformedInput(format!("Subject {} is not a resource", subject)))?;
        let path = self.converter.to_path(resource)?;
        Ok(self.session.node_at(&path)?)
    }

    /// Apply one triple: `rdf:type` with a resource object becomes a mixin,
    /// anything else a property value
    pub fn apply_statement(&mut self, triple: &Triple, hints: &HashMap<String, String>) -> MappingResult<()> {
        let node = self.subject_node(&triple.subject)?;
        match (&triple.object, is_type_assertion(&triple.predicate)) {
            (RdfObject::NamedNode(class), true) => self.add_mixin(node, class, hints),
            _ => self.add_property(node, &triple.predicate, &triple.object, hints),
        }
    }

    /// Retract one triple, the inverse of [`Self::apply_statement`]
    pub fn retract_statement(&mut self, triple: &Triple, hints: &HashMap<String, String>) -> MappingResult<()> {
        let node = self.subject_node(&triple.subject)?;
        match (&triple.object, is_type_assertion(&triple.predicate)) {
            (RdfObject::NamedNode(class), true) => self.remove_mixin(node, class, hints).map(|_| ()),
            _ => self
                .remove_property(node, &triple.predicate, &triple.object, hints)
                .map(|_| ()),
        }
    }

    /// Property triples for a sequence of nodes, optionally linked from a
    /// grouping subject (such as a search result)
    pub fn property_triples<I>(
        &self,
        nodes: I,
        group: Option<NamedNode>,
    ) -> RdfStream<PropertiesSource<'_, S, &C, I::IntoIter>>
    where
        I: IntoIterator<Item = NodeId>,
    {
        RdfStream::new(PropertiesSource::new(&*self.session, &self.converter, nodes.into_iter(), group))
    }

    /// Fixity triples for the checked copies of a node's binary
    pub fn fixity_triples<I>(
        &self,
        node: NodeId,
        results: I,
        expected_digest: &str,
        expected_size: u64,
    ) -> MappingResult<RdfStream<FixitySource<I::IntoIter>>>
    where
        I: IntoIterator<Item = FixityResult>,
    {
        let subject = self.converter.to_resource(self.session.node(node)?.path());
        Ok(RdfStream::new(FixitySource::new(subject, results, expected_digest, expected_size)))
    }

    /// Vocabulary triples for every prefixed namespace in the registry
    pub fn namespace_triples(&self) -> RdfStream<NamespaceSource> {
        RdfStream::new(NamespaceSource::new(self.session.namespace_registry().namespaces()))
    }

    /// Workspace triples, hung off the repository root
    pub fn workspace_triples(&self) -> MappingResult<RdfStream<WorkspaceSource<&C>>> {
        let root = self.converter.to_resource("/");
        let workspaces = self.session.workspace_names()?;
        Ok(RdfStream::new(WorkspaceSource::new(root, &self.converter, workspaces)))
    }
}

fn is_type_assertion(predicate: &RdfPredicate) -> bool {
    predicate.as_str() == rdf::TYPE.as_str()
}
