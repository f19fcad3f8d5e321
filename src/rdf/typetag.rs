//! Type tags: mixin node types asserted through `rdf:type`
//!
//! Asserting a type the repository has never seen defines it on the fly as
//! a queryable mixin with no constraints, then applies it to the node.

use super::mapping::{MappingError, MappingResult};
use crate::graph::{NodeId, NodeTypeDefinition, Session};
use std::fmt;
use tracing::{debug, trace};

/// A node type name known to be registered in the session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeTag(String);

impl TypeTag {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Look up a node type, registering an unconstrained mixin if it is missing
pub fn lookup_or_define<S: Session + ?Sized>(session: &mut S, name: &str) -> MappingResult<TypeTag> {
    if !session.has_node_type(name) {
        debug!("Registering mixin type {}", name);
        session.register_node_type(NodeTypeDefinition::mixin(name), false)?;
    }
    Ok(TypeTag(name.to_string()))
}

/// Make the node carry the tag
///
/// Nothing happens when the node already is of that type, directly or
/// through a supertype.
pub fn apply<S: Session + ?Sized>(session: &mut S, node: NodeId, tag: &TypeTag) -> MappingResult<()> {
    if session.is_node_type(node, tag.name())? {
        trace!("{} is already a {}; skipping", node, tag);
        return Ok(());
    }

    if session.can_add_mixin(node, tag.name())? {
        debug!("Adding mixin {} to {}", tag, session.node(node)?.path());
        session.add_mixin(node, tag.name())?;
        Ok(())
    } else {
        Err(MappingError::IncompatibleType {
            tag: tag.name().to_string(),
            path: session.node(node)?.path().to_string(),
        })
    }
}

/// Remove a mixin from the node if the type exists and the node carries it
///
/// Returns whether anything was removed.
pub fn withdraw<S: Session + ?Sized>(session: &mut S, node: NodeId, name: &str) -> MappingResult<bool> {
    if !session.has_node_type(name) || !session.node(node)?.has_mixin(name) {
        return Ok(false);
    }
    debug!("Removing mixin {} from {}", name, session.node(node)?.path());
    session.remove_mixin(node, name)?;
    Ok(true)
}
