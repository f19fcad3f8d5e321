//! Namespace bridging and property name resolution
//!
//! RDF predicates are split into namespace and local name; the namespace is
//! bridged to its store equivalent and given a prefix from the session's
//! registry, producing a `prefix:local` property name. The inverse turns a
//! stored property name back into a predicate.

use super::lexicon::{JCR_NAMESPACE, REPOSITORY_NAMESPACE};
use super::types::{NamedNode, RdfPredicate};
use crate::graph::types::split_qualified_name;
use crate::graph::{NamespaceError, NamespaceRegistry, NamespaceResult};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Store namespace → RDF namespace pairs that differ between the two sides
const BRIDGED_NAMESPACES: [(&str, &str); 1] = [(JCR_NAMESPACE, REPOSITORY_NAMESPACE)];

/// Map an RDF namespace to the namespace the store uses for it
pub fn to_store_namespace(rdf_namespace: &str) -> &str {
    BRIDGED_NAMESPACES
        .iter()
        .find(|(_, rdf)| *rdf == rdf_namespace)
        .map_or(rdf_namespace, |(store, _)| *store)
}

/// Map a store namespace to the namespace published in RDF
pub fn to_rdf_namespace(store_namespace: &str) -> &str {
    BRIDGED_NAMESPACES
        .iter()
        .find(|(store, _)| *store == store_namespace)
        .map_or(store_namespace, |(_, rdf)| *rdf)
}

/// Find or allocate the prefix for an RDF namespace
///
/// Order of preference: the prefix already registered for the (bridged)
/// namespace, then a caller hint naming that namespace, which is registered
/// under exactly that prefix, then a generated prefix. Hints whose prefix is
/// empty or already bound to another namespace are ignored.
pub fn resolve_prefix(
    registry: &mut NamespaceRegistry,
    rdf_namespace: &str,
    hints: &HashMap<String, String>,
) -> NamespaceResult<String> {
    let namespace = to_store_namespace(rdf_namespace);

    if let Some(prefix) = registry.prefix(namespace) {
        debug!("Discovered namespace {} in namespace registry", namespace);
        return Ok(prefix.to_string());
    }

    debug!("Didn't discover namespace {} in namespace registry", namespace);
    // Hints may only bind free prefixes
    let hinted = hints
        .iter()
        .filter(|(prefix, uri)| uri.as_str() == namespace && !prefix.is_empty())
        .map(|(prefix, _)| prefix)
        .filter(|prefix| registry.uri(prefix).is_err())
        .min();

    match hinted {
        Some(prefix) => {
            debug!("Discovered namespace {} in namespace hints as {}", namespace, prefix);
            registry.register_namespace(prefix, namespace)?;
            Ok(prefix.clone())
        }
        None => registry.register_uri(namespace),
    }
}

/// Property name for an RDF namespace and local name
pub fn resolve_property_name(
    registry: &mut NamespaceRegistry,
    rdf_namespace: &str,
    local_name: &str,
    hints: &HashMap<String, String>,
) -> NamespaceResult<String> {
    let prefix = resolve_prefix(registry, rdf_namespace, hints)?;
    let name = qualified_name(&prefix, local_name);
    debug!("Took RDF namespace {} and translated it to property {}", rdf_namespace, name);
    Ok(name)
}

/// Property name for an IRI
pub fn resolve_iri_name(
    registry: &mut NamespaceRegistry,
    iri: &NamedNode,
    hints: &HashMap<String, String>,
) -> NamespaceResult<String> {
    resolve_property_name(registry, iri.namespace(), iri.local_name(), hints)
}

/// Predicate for a stored property name
///
/// Names without a prefix live in the empty namespace; their predicate is
/// the bare local name, which must then be an IRI on its own.
pub fn predicate_for_property(registry: &NamespaceRegistry, name: &str) -> NamespaceResult<RdfPredicate> {
    let (prefix, local) = split_qualified_name(name);
    let iri = format!("{}{}", to_rdf_namespace(registry.uri(prefix)?), local);
    trace!("Creating predicate {} for property {}", iri, name);
    NamedNode::new(&iri)
        .map(RdfPredicate::from)
        .map_err(|_| NamespaceError::InvalidUri(iri))
}

fn qualified_name(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_string()
    } else {
        format!("{}:{}", prefix, local)
    }
}
