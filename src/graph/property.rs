//! Property types and values for repository nodes
//!
//! Every property value carries its concrete type. Declared property types
//! (from node type definitions) additionally include `Undefined`, meaning
//! "whatever the incoming data says".

use super::types::NodeId;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use indexmap::IndexMap;
use std::fmt;

/// Declared or concrete type of a property value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    String,
    Uri,
    Date,
    Reference,
    WeakReference,
    Undefined,
}

impl PropertyType {
    /// Whether values of this type point at another node
    pub fn is_reference(&self) -> bool {
        matches!(self, PropertyType::Reference | PropertyType::WeakReference)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PropertyType::Boolean => "Boolean",
            PropertyType::Byte => "Byte",
            PropertyType::Short => "Short",
            PropertyType::Integer => "Integer",
            PropertyType::Long => "Long",
            PropertyType::Float => "Float",
            PropertyType::Double => "Double",
            PropertyType::String => "String",
            PropertyType::Uri => "URI",
            PropertyType::Date => "Date",
            PropertyType::Reference => "Reference",
            PropertyType::WeakReference => "WeakReference",
            PropertyType::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed property value
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Uri(String),
    Date(DateTime<FixedOffset>),
    Reference(NodeId),
    WeakReference(NodeId),
}

impl PropertyValue {
    /// Concrete type of this value
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Boolean(_) => PropertyType::Boolean,
            PropertyValue::Byte(_) => PropertyType::Byte,
            PropertyValue::Short(_) => PropertyType::Short,
            PropertyValue::Integer(_) => PropertyType::Integer,
            PropertyValue::Long(_) => PropertyType::Long,
            PropertyValue::Float(_) => PropertyType::Float,
            PropertyValue::Double(_) => PropertyType::Double,
            PropertyValue::String(_) => PropertyType::String,
            PropertyValue::Uri(_) => PropertyType::Uri,
            PropertyValue::Date(_) => PropertyType::Date,
            PropertyValue::Reference(_) => PropertyType::Reference,
            PropertyValue::WeakReference(_) => PropertyType::WeakReference,
        }
    }

    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the widened integer value of any integral variant
    pub fn as_long(&self) -> Option<i64> {
        match self {
            PropertyValue::Byte(b) => Some(i64::from(*b)),
            PropertyValue::Short(s) => Some(i64::from(*s)),
            PropertyValue::Integer(i) => Some(i64::from(*i)),
            PropertyValue::Long(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Target node of a strong or weak reference
    pub fn as_reference(&self) -> Option<NodeId> {
        match self {
            PropertyValue::Reference(id) | PropertyValue::WeakReference(id) => Some(*id),
            _ => None,
        }
    }

    /// XSD-compatible lexical form; `None` for references, which have no
    /// lexical form outside a session
    pub fn lexical_form(&self) -> Option<String> {
        let lexical = match self {
            PropertyValue::Boolean(b) => b.to_string(),
            PropertyValue::Byte(b) => b.to_string(),
            PropertyValue::Short(s) => s.to_string(),
            PropertyValue::Integer(i) => i.to_string(),
            PropertyValue::Long(l) => l.to_string(),
            PropertyValue::Float(f) => xsd_float_lexical(f64::from(*f), f.to_string()),
            PropertyValue::Double(d) => xsd_float_lexical(*d, d.to_string()),
            PropertyValue::String(s) | PropertyValue::Uri(s) => s.clone(),
            PropertyValue::Date(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            PropertyValue::Reference(_) | PropertyValue::WeakReference(_) => return None,
        };
        Some(lexical)
    }
}

fn xsd_float_lexical(value: f64, display: String) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "INF" } else { "-INF" }.to_string()
    } else {
        display
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "\"{}\"", s),
            PropertyValue::Uri(u) => write!(f, "<{}>", u),
            PropertyValue::Reference(id) => write!(f, "ref({})", id),
            PropertyValue::WeakReference(id) => write!(f, "weakref({})", id),
            other => match other.lexical_form() {
                Some(lexical) => f.write_str(&lexical),
                None => Ok(()),
            },
        }
    }
}

// Convenience conversions
impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Long(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Double(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<DateTime<FixedOffset>> for PropertyValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        PropertyValue::Date(dt)
    }
}

/// Property storage for a node: qualified name to one or more values,
/// in insertion order
pub type PropertyMap = IndexMap<String, Vec<PropertyValue>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_value_types() {
        assert_eq!(PropertyValue::String("test".into()).property_type(), PropertyType::String);
        assert_eq!(PropertyValue::Byte(1).property_type(), PropertyType::Byte);
        assert_eq!(PropertyValue::Long(42).property_type(), PropertyType::Long);
        assert_eq!(PropertyValue::Float(1.5).property_type(), PropertyType::Float);
        assert_eq!(
            PropertyValue::WeakReference(NodeId::new(3)).property_type(),
            PropertyType::WeakReference
        );
        assert!(PropertyType::Reference.is_reference());
        assert!(!PropertyType::Uri.is_reference());
    }

    #[test]
    fn test_property_value_conversions() {
        let string_prop: PropertyValue = "hello".into();
        assert_eq!(string_prop.as_string(), Some("hello"));

        let int_prop: PropertyValue = 42i32.into();
        assert_eq!(int_prop.as_long(), Some(42));

        let bool_prop: PropertyValue = true.into();
        assert_eq!(bool_prop.as_boolean(), Some(true));
    }

    #[test]
    fn test_lexical_forms() {
        assert_eq!(PropertyValue::Boolean(false).lexical_form().unwrap(), "false");
        assert_eq!(PropertyValue::Float(f32::INFINITY).lexical_form().unwrap(), "INF");
        assert_eq!(PropertyValue::Double(f64::NEG_INFINITY).lexical_form().unwrap(), "-INF");
        assert_eq!(PropertyValue::Double(2.5).lexical_form().unwrap(), "2.5");
        assert!(PropertyValue::Reference(NodeId::new(1)).lexical_form().is_none());

        let dt = DateTime::parse_from_rfc3339("2014-05-10T12:30:00Z").unwrap();
        assert_eq!(PropertyValue::Date(dt).lexical_form().unwrap(), "2014-05-10T12:30:00Z");
    }

    #[test]
    fn test_property_map_keeps_insertion_order() {
        let mut props = PropertyMap::new();
        props.insert("dc:title".to_string(), vec!["A".into()]);
        props.insert("dc:creator".to_string(), vec!["B".into()]);
        props.insert("ex:count".to_string(), vec![3i64.into()]);

        let names: Vec<&str> = props.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["dc:title", "dc:creator", "ex:count"]);
    }
}
