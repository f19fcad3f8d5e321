//! Construction of typed values from lexical forms

use super::property::{PropertyType, PropertyValue};
use super::types::NodeId;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::str::FromStr;
use thiserror::Error;

/// Value construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueFormatError {
    /// The lexical form is not valid for the requested type
    #[error("Cannot convert \"{lexical}\" to a {target} value")]
    InvalidLexicalForm { lexical: String, target: PropertyType },

    /// References can only be built from node handles
    #[error("{0} values cannot be created from a lexical form")]
    NotLexical(PropertyType),
}

pub type ValueFormatResult<T> = Result<T, ValueFormatError>;

/// Creates property values, the way a store session hands them out
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueFactory;

impl ValueFactory {
    pub fn new() -> Self {
        ValueFactory
    }

    /// Build a value of the given type from its lexical form
    ///
    /// `Undefined` yields a string value.
    pub fn create_value(&self, lexical: &str, target: PropertyType) -> ValueFormatResult<PropertyValue> {
        let invalid = || ValueFormatError::InvalidLexicalForm {
            lexical: lexical.to_string(),
            target,
        };
        let trimmed = lexical.trim();

        let value = match target {
            PropertyType::Boolean => PropertyValue::Boolean(parse_boolean(trimmed).ok_or_else(invalid)?),
            PropertyType::Byte => PropertyValue::Byte(trimmed.parse().map_err(|_| invalid())?),
            PropertyType::Short => PropertyValue::Short(trimmed.parse().map_err(|_| invalid())?),
            PropertyType::Integer => PropertyValue::Integer(trimmed.parse().map_err(|_| invalid())?),
            PropertyType::Long => PropertyValue::Long(trimmed.parse().map_err(|_| invalid())?),
            PropertyType::Float => PropertyValue::Float(parse_xsd_float(trimmed).ok_or_else(invalid)?),
            PropertyType::Double => PropertyValue::Double(parse_xsd_float(trimmed).ok_or_else(invalid)?),
            PropertyType::Date => PropertyValue::Date(parse_timestamp(trimmed).ok_or_else(invalid)?),
            PropertyType::Uri => {
                oxiri::IriRef::parse(trimmed).map_err(|_| invalid())?;
                PropertyValue::Uri(trimmed.to_string())
            }
            PropertyType::String | PropertyType::Undefined => PropertyValue::String(lexical.to_string()),
            PropertyType::Reference | PropertyType::WeakReference => {
                return Err(ValueFormatError::NotLexical(target))
            }
        };
        Ok(value)
    }

    /// Build a strong or weak reference to a node
    pub fn create_reference(&self, target: NodeId, weak: bool) -> PropertyValue {
        if weak {
            PropertyValue::WeakReference(target)
        } else {
            PropertyValue::Reference(target)
        }
    }
}

fn parse_boolean(s: &str) -> Option<bool> {
    match s {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Parse an `xsd:float` / `xsd:double` lexical form straight into the
/// target width
pub(crate) fn parse_xsd_float<F: FromStr>(s: &str) -> Option<F> {
    let s = match s {
        "INF" | "+INF" => "inf",
        "-INF" => "-inf",
        "NaN" => "NaN",
        _ if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => return None,
        _ => s,
    };
    s.parse().ok()
}

/// Parse an `xsd:dateTime` or `xsd:date` lexical form
///
/// Values without a timezone are taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive).into());
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_numeric_values() {
        let factory = ValueFactory::new();
        assert_eq!(factory.create_value("12", PropertyType::Byte).unwrap(), PropertyValue::Byte(12));
        assert_eq!(factory.create_value(" 300 ", PropertyType::Short).unwrap(), PropertyValue::Short(300));
        assert_eq!(
            factory.create_value("9000000000", PropertyType::Long).unwrap(),
            PropertyValue::Long(9_000_000_000)
        );
        assert_eq!(factory.create_value("2.5", PropertyType::Double).unwrap(), PropertyValue::Double(2.5));
        assert_eq!(
            factory.create_value("INF", PropertyType::Float).unwrap(),
            PropertyValue::Float(f32::INFINITY)
        );
    }

    #[test]
    fn test_float_is_rounded_once() {
        // Just above the midpoint of 1.0 and the next f32; going through f64
        // lands on the midpoint and ties back down to 1.0
        let lexical = "1.0000000596046447753906251";
        assert_eq!(parse_xsd_float::<f32>(lexical), Some(1.0 + f32::EPSILON));
        assert_eq!(
            ValueFactory::new().create_value(lexical, PropertyType::Float).unwrap(),
            PropertyValue::Float(1.0 + f32::EPSILON)
        );
        assert_eq!(parse_xsd_float::<f32>("-INF"), Some(f32::NEG_INFINITY));
        assert!(parse_xsd_float::<f64>("NaN").map_or(false, f64::is_nan));
        assert_eq!(parse_xsd_float::<f64>("inf"), None);
    }

    #[test]
    fn test_create_value_rejects_bad_lexical_forms() {
        let factory = ValueFactory::new();
        assert!(matches!(
            factory.create_value("300", PropertyType::Byte),
            Err(ValueFormatError::InvalidLexicalForm { .. })
        ));
        assert!(factory.create_value("yes", PropertyType::Boolean).is_err());
        assert!(factory.create_value("infinity", PropertyType::Double).is_err());
        assert!(factory.create_value("not a date", PropertyType::Date).is_err());
        assert_eq!(
            factory.create_value("x", PropertyType::Reference),
            Err(ValueFormatError::NotLexical(PropertyType::Reference))
        );
    }

    #[test]
    fn test_undefined_becomes_string() {
        let factory = ValueFactory::new();
        assert_eq!(
            factory.create_value("anything", PropertyType::Undefined).unwrap(),
            PropertyValue::String("anything".to_string())
        );
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let with_zone = parse_timestamp("2014-05-10T12:30:00+02:00").unwrap();
        assert_eq!(with_zone.offset().local_minus_utc(), 7200);

        let without_zone = parse_timestamp("2014-05-10T12:30:00.250").unwrap();
        assert_eq!(without_zone.offset().local_minus_utc(), 0);

        let date_only = parse_timestamp("2014-05-10").unwrap();
        assert_eq!(date_only.to_rfc3339(), "2014-05-10T00:00:00+00:00");
    }

    #[test]
    fn test_create_reference() {
        let factory = ValueFactory::new();
        assert_eq!(factory.create_reference(NodeId::new(4), false), PropertyValue::Reference(NodeId::new(4)));
        assert_eq!(factory.create_reference(NodeId::new(4), true), PropertyValue::WeakReference(NodeId::new(4)));
    }
}
