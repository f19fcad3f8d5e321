//! Conversion between repository paths and RDF resources

use super::mapping::MappingConfig;
use super::types::NamedNode;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

/// Characters escaped inside one path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Marker that introduces a workspace name after the base IRI
const WORKSPACE_MARKER: &str = "workspace:";

/// Identifier conversion errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The resource is not under the configured base IRI
    #[error("Resource {0} is outside the repository")]
    OutsideBase(String),

    /// The resource belongs to another workspace
    #[error("Resource {0} belongs to another workspace")]
    OtherWorkspace(String),

    /// The resource has a shape no node path can take
    #[error("Resource {0} does not name a node")]
    NotAPath(String),

    /// A path segment is not valid percent-encoded UTF-8
    #[error("Invalid encoding in {0}")]
    InvalidEncoding(String),
}

pub type ConversionResult<T> = Result<T, ConversionError>;

/// Translates between node paths and the resources that identify them
pub trait IdentifierConverter {
    /// Path of the node a resource names
    fn to_path(&self, resource: &NamedNode) -> ConversionResult<String>;

    /// Resource naming the node at a path
    fn to_resource(&self, path: &str) -> NamedNode;

    /// Resource naming a workspace
    fn workspace_resource(&self, name: &str) -> NamedNode;
}

impl<T: IdentifierConverter + ?Sized> IdentifierConverter for &T {
    fn to_path(&self, resource: &NamedNode) -> ConversionResult<String> {
        (**self).to_path(resource)
    }

    fn to_resource(&self, path: &str) -> NamedNode {
        (**self).to_resource(path)
    }

    fn workspace_resource(&self, name: &str) -> NamedNode {
        (**self).workspace_resource(name)
    }
}

/// Addresses nodes as `<base><percent-encoded path>`
///
/// Nodes outside the default workspace are addressed as
/// `<base>workspace:<name>/<path>`.
#[derive(Debug, Clone)]
pub struct PathConverter {
    base_iri: String,
    prefix: String,
}

impl PathConverter {
    pub fn new(config: &MappingConfig, workspace: &str) -> Self {
        let mut base_iri = config.base_iri.clone();
        if !base_iri.ends_with('/') {
            base_iri.push('/');
        }
        let prefix = if workspace == config.default_workspace {
            base_iri.clone()
        } else {
            format!("{}{}{}/", base_iri, WORKSPACE_MARKER, encode(workspace))
        };
        Self { base_iri, prefix }
    }

    pub fn base_iri(&self) -> &str {
        &self.base_iri
    }
}

impl IdentifierConverter for PathConverter {
    fn to_path(&self, resource: &NamedNode) -> ConversionResult<String> {
        let iri = resource.as_str();
        let rest = iri
            .strip_prefix(self.prefix.as_str())
            .ok_or_else(|| match iri.strip_prefix(self.base_iri.as_str()) {
                Some(_) => ConversionError::OtherWorkspace(iri.to_string()),
                None => ConversionError::OutsideBase(iri.to_string()),
            })?;
        if rest.starts_with(WORKSPACE_MARKER) {
            return Err(ConversionError::OtherWorkspace(iri.to_string()));
        }
        if rest.contains(|c: char| c == '#' || c == '?') {
            return Err(ConversionError::NotAPath(iri.to_string()));
        }

        let rest = rest.trim_end_matches('/');
        if rest.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::with_capacity(rest.len() + 1);
        for segment in rest.split('/') {
            if segment.is_empty() {
                return Err(ConversionError::NotAPath(iri.to_string()));
            }
            let decoded = percent_decode_str(segment)
                .decode_utf8()
                .map_err(|_| ConversionError::InvalidEncoding(iri.to_string()))?;
            path.push('/');
            path.push_str(&decoded);
        }
        Ok(path)
    }

    fn to_resource(&self, path: &str) -> NamedNode {
        let encoded: Vec<String> = path.split('/').filter(|s| !s.is_empty()).map(encode).collect();
        NamedNode::new_unchecked(format!("{}{}", self.prefix, encoded.join("/")))
    }

    fn workspace_resource(&self, name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{}{}", self.base_iri, WORKSPACE_MARKER, encode(name)))
    }
}

fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}
