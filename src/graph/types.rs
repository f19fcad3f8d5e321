//! Core type definitions for the repository graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a node inside one session
///
/// Handles are only meaningful for the session that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        NodeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Split a qualified `prefix:local` name into its parts
///
/// Names without a colon belong to the empty prefix.
pub fn split_qualified_name(name: &str) -> (&str, &str) {
    match name.find(':') {
        Some(pos) => (&name[..pos], &name[pos + 1..]),
        None => ("", name),
    }
}
