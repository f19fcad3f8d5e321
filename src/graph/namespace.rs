//! Namespace registry
//!
//! Session-scoped prefix ↔ URI table used to compress property and type
//! names into `prefix:local` form.
//!
//! Invariants:
//! - prefixes are unique
//! - a URI has at most one prefix at a time
//! - built-in mappings cannot be changed

use indexmap::IndexMap;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// JCR namespace
pub const JCR_URI: &str = "http://www.jcp.org/jcr/1.0";
/// JCR node type namespace
pub const NT_URI: &str = "http://www.jcp.org/jcr/nt/1.0";
/// JCR mixin namespace
pub const MIX_URI: &str = "http://www.jcp.org/jcr/mix/1.0";
/// XML namespace
pub const XML_URI: &str = "http://www.w3.org/XML/1998/namespace";

const BUILTIN_NAMESPACES: [(&str, &str); 5] = [
    ("", ""),
    ("jcr", JCR_URI),
    ("nt", NT_URI),
    ("mix", MIX_URI),
    ("xml", XML_URI),
];

/// Registry errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NamespaceError {
    /// Prefix is not a valid name or uses the reserved `xml` start
    #[error("Illegal namespace prefix: {0}")]
    IllegalPrefix(String),

    /// Built-in prefix or URI cannot be remapped
    #[error("Built-in namespace mapping cannot be changed: {0}")]
    Reserved(String),

    /// URI is not an absolute IRI
    #[error("Invalid namespace URI: {0}")]
    InvalidUri(String),

    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),
}

pub type NamespaceResult<T> = Result<T, NamespaceError>;

/// Namespace (prefix → URI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub prefix: String,
    pub uri: String,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }
}

/// Bidirectional prefix ↔ URI registry
#[derive(Debug, Clone)]
pub struct NamespaceRegistry {
    /// Prefix → URI, in registration order
    prefixes: IndexMap<String, String>,
    /// URI → prefix
    uris: HashMap<String, String>,
    /// Counter for generated `nsNNN` prefixes
    next_generated: u32,
}

impl NamespaceRegistry {
    /// Create a registry holding only the built-in namespaces
    pub fn new() -> Self {
        let mut registry = Self {
            prefixes: IndexMap::new(),
            uris: HashMap::new(),
            next_generated: 1,
        };
        for (prefix, uri) in BUILTIN_NAMESPACES {
            registry.insert(prefix.to_string(), uri.to_string());
        }
        registry
    }

    fn insert(&mut self, prefix: String, uri: String) {
        self.uris.insert(uri.clone(), prefix.clone());
        self.prefixes.insert(prefix, uri);
    }

    fn is_builtin_prefix(prefix: &str) -> bool {
        BUILTIN_NAMESPACES.iter().any(|(p, _)| *p == prefix)
    }

    fn is_builtin_uri(uri: &str) -> bool {
        BUILTIN_NAMESPACES.iter().any(|(_, u)| *u == uri)
    }

    /// Whether a URI has a prefix
    pub fn is_registered_uri(&self, uri: &str) -> bool {
        self.uris.contains_key(uri)
    }

    /// Prefix currently mapped to a URI
    pub fn prefix(&self, uri: &str) -> Option<&str> {
        self.uris.get(uri).map(|p| p.as_str())
    }

    /// URI currently mapped to a prefix
    pub fn uri(&self, prefix: &str) -> NamespaceResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|u| u.as_str())
            .ok_or_else(|| NamespaceError::UnknownPrefix(prefix.to_string()))
    }

    /// Register an explicit prefix for a URI
    ///
    /// Any previous prefix of the URI and any previous URI of the prefix are
    /// unmapped first.
    pub fn register_namespace(&mut self, prefix: &str, uri: &str) -> NamespaceResult<()> {
        if self.prefixes.get(prefix).map(|u| u.as_str()) == Some(uri) {
            return Ok(());
        }
        if Self::is_builtin_prefix(prefix) {
            return Err(NamespaceError::Reserved(prefix.to_string()));
        }
        if Self::is_builtin_uri(uri) {
            return Err(NamespaceError::Reserved(uri.to_string()));
        }
        validate_prefix(prefix)?;
        validate_uri(uri)?;

        if let Some(old_prefix) = self.uris.remove(uri) {
            self.prefixes.shift_remove(&old_prefix);
        }
        if let Some(old_uri) = self.prefixes.shift_remove(prefix) {
            self.uris.remove(&old_uri);
        }

        debug!("Registered namespace {} as prefix {}", uri, prefix);
        self.insert(prefix.to_string(), uri.to_string());
        Ok(())
    }

    /// Register a URI under a generated prefix, returning the prefix
    ///
    /// An already-registered URI keeps its prefix.
    pub fn register_uri(&mut self, uri: &str) -> NamespaceResult<String> {
        if let Some(prefix) = self.uris.get(uri) {
            return Ok(prefix.clone());
        }
        validate_uri(uri)?;

        let prefix = loop {
            let candidate = format!("ns{:03}", self.next_generated);
            self.next_generated += 1;
            if !self.prefixes.contains_key(&candidate) {
                break candidate;
            }
        };

        debug!("Generated prefix {} for namespace {}", prefix, uri);
        self.insert(prefix.clone(), uri.to_string());
        Ok(prefix)
    }

    /// Remove a non-built-in prefix
    pub fn unregister_namespace(&mut self, prefix: &str) -> NamespaceResult<()> {
        if Self::is_builtin_prefix(prefix) {
            return Err(NamespaceError::Reserved(prefix.to_string()));
        }
        let uri = self
            .prefixes
            .shift_remove(prefix)
            .ok_or_else(|| NamespaceError::UnknownPrefix(prefix.to_string()))?;
        self.uris.remove(&uri);
        Ok(())
    }

    /// Registered (prefix, URI) pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    /// Get all registered namespaces
    pub fn namespaces(&self) -> Vec<Namespace> {
        self.iter().map(|(p, u)| Namespace::new(p, u)).collect()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_prefix(prefix: &str) -> NamespaceResult<()> {
    let mut chars = prefix.chars();
    let valid_start = chars.next().map_or(false, |c| c.is_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if !valid_start || !valid_rest || prefix.to_ascii_lowercase().starts_with("xml") {
        return Err(NamespaceError::IllegalPrefix(prefix.to_string()));
    }
    Ok(())
}

fn validate_uri(uri: &str) -> NamespaceResult<()> {
    oxiri::Iri::parse(uri)
        .map(|_| ())
        .map_err(|_| NamespaceError::InvalidUri(uri.to_string()))
}
