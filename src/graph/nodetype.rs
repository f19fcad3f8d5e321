//! Node type definitions
//!
//! Primary types and mixins share one definition shape. Definitions are
//! looked up by qualified name and never mutated once registered, apart from
//! an explicit re-registration.

use super::property::PropertyType;

/// Declared property on a node type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDefinition {
    pub name: String,
    pub required_type: PropertyType,
    pub multiple: bool,
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, required_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            required_type,
            multiple: false,
        }
    }

    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }
}

/// A primary or mixin node type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTypeDefinition {
    pub name: String,
    pub mixin: bool,
    pub queryable: bool,
    /// Primary types only: whether nodes of this type accept mixins at all
    pub allows_mixins: bool,
    pub supertypes: Vec<String>,
    pub property_definitions: Vec<PropertyDefinition>,
    /// Names of allowed child node definitions (`*` for residual)
    pub child_node_definitions: Vec<String>,
}

impl NodeTypeDefinition {
    /// A primary type with no declarations
    pub fn primary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mixin: false,
            queryable: true,
            allows_mixins: true,
            supertypes: Vec::new(),
            property_definitions: Vec::new(),
            child_node_definitions: Vec::new(),
        }
    }

    /// A queryable mixin with no structural constraints
    pub fn mixin(name: impl Into<String>) -> Self {
        Self {
            mixin: true,
            ..Self::primary(name)
        }
    }

    pub fn with_supertype(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    pub fn with_property(mut self, definition: PropertyDefinition) -> Self {
        self.property_definitions.push(definition);
        self
    }

    pub fn with_child_nodes(mut self, name: impl Into<String>) -> Self {
        self.child_node_definitions.push(name.into());
        self
    }

    pub fn sealed(mut self) -> Self {
        self.allows_mixins = false;
        self
    }

    /// Whether nodes of this type can hold children
    pub fn has_child_node_definitions(&self) -> bool {
        !self.child_node_definitions.is_empty()
    }

    /// First definition for a property name
    pub fn property_definition(&self, name: &str) -> Option<&PropertyDefinition> {
        self.property_definitions.iter().find(|d| d.name == name)
    }

    /// Required type for a property name
    ///
    /// `Undefined` when the name is not declared, or declared more than once.
    pub fn required_type(&self, name: &str) -> PropertyType {
        let mut matching = self.property_definitions.iter().filter(|d| d.name == name);
        match (matching.next(), matching.next()) {
            (Some(definition), None) => definition.required_type,
            _ => PropertyType::Undefined,
        }
    }
}

/// The type definitions every session starts with
pub fn builtin_node_types() -> Vec<NodeTypeDefinition> {
    vec![
        NodeTypeDefinition::primary("nt:base"),
        NodeTypeDefinition::primary("nt:unstructured")
            .with_supertype("nt:base")
            .with_child_nodes("*"),
        NodeTypeDefinition::primary("nt:folder")
            .with_supertype("nt:base")
            .with_child_nodes("*"),
        NodeTypeDefinition::primary("nt:resource")
            .with_supertype("nt:base")
            .with_property(PropertyDefinition::new("jcr:mimeType", PropertyType::String))
            .with_property(PropertyDefinition::new("jcr:lastModified", PropertyType::Date)),
        NodeTypeDefinition::mixin("mix:referenceable")
            .with_property(PropertyDefinition::new("jcr:uuid", PropertyType::String)),
        NodeTypeDefinition::mixin("mix:created")
            .with_property(PropertyDefinition::new("jcr:created", PropertyType::Date))
            .with_property(PropertyDefinition::new("jcr:createdBy", PropertyType::String)),
        NodeTypeDefinition::mixin("mix:lastModified")
            .with_property(PropertyDefinition::new("jcr:lastModified", PropertyType::Date))
            .with_property(PropertyDefinition::new("jcr:lastModifiedBy", PropertyType::String)),
        NodeTypeDefinition::mixin("mix:title")
            .with_property(PropertyDefinition::new("jcr:title", PropertyType::String))
            .with_property(PropertyDefinition::new("jcr:description", PropertyType::String)),
    ]
}
