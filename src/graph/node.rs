//! Node implementation for the repository graph
//!
//! A node has:
//! - A path, unique within its workspace
//! - One primary type and any number of mixin types
//! - Properties with one or more typed values each

use super::property::{PropertyMap, PropertyValue};
use super::types::NodeId;
use std::collections::BTreeSet;

/// A node in the repository graph
#[derive(Debug, Clone)]
pub struct Node {
    /// Handle for this node
    pub id: NodeId,

    /// Absolute path, e.g. `/objects/a`
    path: String,

    /// Name of the primary node type
    primary_type: String,

    /// Mixin type names, kept sorted for stable iteration
    mixins: BTreeSet<String>,

    /// Properties associated with this node
    properties: PropertyMap,
}

impl Node {
    /// Create a new node with a primary type and no properties
    pub fn new(id: NodeId, path: impl Into<String>, primary_type: impl Into<String>) -> Self {
        Node {
            id,
            path: path.into(),
            primary_type: primary_type.into(),
            mixins: BTreeSet::new(),
            properties: PropertyMap::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn primary_type(&self) -> &str {
        &self.primary_type
    }

    pub fn mixins(&self) -> impl Iterator<Item = &str> {
        self.mixins.iter().map(|m| m.as_str())
    }

    pub fn has_mixin(&self, name: &str) -> bool {
        self.mixins.contains(name)
    }

    /// Mixins are changed through the session, which checks type constraints
    pub(crate) fn add_mixin(&mut self, name: impl Into<String>) -> bool {
        self.mixins.insert(name.into())
    }

    pub(crate) fn remove_mixin(&mut self, name: &str) -> bool {
        self.mixins.remove(name)
    }

    /// Replace a property with a single value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Option<Vec<PropertyValue>> {
        self.properties.insert(key.into(), vec![value.into()])
    }

    /// Replace a property with a list of values; an empty list removes it
    pub fn set_property_values(&mut self, key: impl Into<String>, values: Vec<PropertyValue>) -> Option<Vec<PropertyValue>> {
        let key = key.into();
        if values.is_empty() {
            return self.properties.shift_remove(&key);
        }
        self.properties.insert(key, values)
    }

    /// Append a value unless an equal value is already present
    ///
    /// Returns whether the property changed.
    pub fn append_property_value(&mut self, key: impl Into<String>, value: PropertyValue) -> bool {
        let values = self.properties.entry(key.into()).or_default();
        if values.contains(&value) {
            return false;
        }
        values.push(value);
        true
    }

    /// Remove one value from a property, dropping the property once empty
    ///
    /// Returns whether a value was removed.
    pub fn remove_property_value(&mut self, key: &str, value: &PropertyValue) -> bool {
        let Some(values) = self.properties.get_mut(key) else {
            return false;
        };
        let before = values.len();
        values.retain(|v| v != value);
        let removed = values.len() != before;
        if values.is_empty() {
            self.properties.shift_remove(key);
        }
        removed
    }

    /// First value of a property
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key).and_then(|values| values.first())
    }

    /// All values of a property
    pub fn get_property_values(&self, key: &str) -> Option<&[PropertyValue]> {
        self.properties.get(key).map(|values| values.as_slice())
    }

    /// Remove a property
    pub fn remove_property(&mut self, key: &str) -> Option<Vec<PropertyValue>> {
        self.properties.shift_remove(key)
    }

    /// Check if property exists
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Get number of properties
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
