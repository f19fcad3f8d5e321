//! Protection of repository-managed predicates

use super::lexicon::{MANAGED_NAMESPACES, MANAGED_PREDICATES};
use super::mapping::{MappingError, MappingResult};
use super::types::RdfPredicate;

/// Whether a predicate is maintained by the repository and may not be
/// written or removed by clients
pub fn is_managed_predicate(predicate: &RdfPredicate) -> bool {
    let node = predicate.as_named_node();
    MANAGED_NAMESPACES.contains(&node.namespace()) || MANAGED_PREDICATES.contains(&node.as_str())
}

/// Fail with [`MappingError::ManagedPropertyViolation`] for a managed predicate
pub fn assert_mutable(predicate: &RdfPredicate, path: &str) -> MappingResult<()> {
    if is_managed_predicate(predicate) {
        return Err(MappingError::ManagedPropertyViolation {
            predicate: predicate.as_str().to_string(),
            path: path.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::lexicon;

    fn predicate(iri: &str) -> RdfPredicate {
        RdfPredicate::new(iri).unwrap()
    }

    #[test]
    fn test_managed_namespaces() {
        assert!(is_managed_predicate(&predicate("http://fedora.info/definitions/v4/repository#created")));
        assert!(is_managed_predicate(&predicate("http://www.jcp.org/jcr/1.0uuid")));
        assert!(!is_managed_predicate(&predicate("http://purl.org/dc/elements/1.1/title")));
    }

    #[test]
    fn test_managed_predicates() {
        for iri in lexicon::MANAGED_PREDICATES {
            assert!(is_managed_predicate(&predicate(iri)), "{} should be managed", iri);
        }
        // Other terms of the same vocabularies stay writable
        assert!(!is_managed_predicate(&predicate("http://www.loc.gov/premis/rdf/v1#hasEventType")));
        assert!(!is_managed_predicate(&predicate("http://www.w3.org/ns/ldp#member")));
    }

    #[test]
    fn test_assert_mutable() {
        assert!(assert_mutable(&predicate("http://example.org/title"), "/a").is_ok());
        match assert_mutable(&predicate(lexicon::HAS_SIZE), "/a") {
            Err(MappingError::ManagedPropertyViolation { predicate, path }) => {
                assert_eq!(predicate, lexicon::HAS_SIZE);
                assert_eq!(path, "/a");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
