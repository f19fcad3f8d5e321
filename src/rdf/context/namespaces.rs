//! Vocabulary triples for the registered namespaces

use super::TripleSource;
use crate::graph::Namespace;
use crate::rdf::lexicon::{PREFERRED_NAMESPACE_PREFIX, PREFERRED_NAMESPACE_URI, VOCABULARY_TYPE};
use crate::rdf::mapping::{MappingError, MappingResult};
use crate::rdf::namespace::to_rdf_namespace;
use crate::rdf::types::{Literal, NamedNode, RdfPredicate, Triple};
use oxrdf::vocab::rdf;
use std::vec;

/// Publishes each prefixed namespace as a `voaf:Vocabulary` with its
/// preferred prefix and URI; the empty namespace is skipped
pub struct NamespaceSource {
    namespaces: vec::IntoIter<Namespace>,
}

impl NamespaceSource {
    pub fn new(namespaces: Vec<Namespace>) -> Self {
        Self {
            namespaces: namespaces.into_iter(),
        }
    }

    fn triples_for(namespace: &Namespace) -> MappingResult<Vec<Triple>> {
        let uri = to_rdf_namespace(&namespace.uri);
        let vocabulary = NamedNode::new(uri).map_err(|e| MappingError::MalformedInput(e.to_string()))?;

        Ok(vec![
            Triple::new(vocabulary.clone(), rdf::TYPE, NamedNode::new_unchecked(VOCABULARY_TYPE)),
            Triple::new(
                vocabulary.clone(),
                RdfPredicate::from(NamedNode::new_unchecked(PREFERRED_NAMESPACE_PREFIX)),
                Literal::new_simple_literal(namespace.prefix.clone()),
            ),
            Triple::new(
                vocabulary,
                RdfPredicate::from(NamedNode::new_unchecked(PREFERRED_NAMESPACE_URI)),
                Literal::new_simple_literal(uri),
            ),
        ])
    }
}

impl TripleSource for NamespaceSource {
    fn next_batch(&mut self) -> Option<MappingResult<Vec<Triple>>> {
        let namespace = self.namespaces.find(|ns| !ns.prefix.is_empty())?;
        Some(Self::triples_for(&namespace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NamespaceRegistry;
    use crate::rdf::context::RdfStream;
    use crate::rdf::lexicon::REPOSITORY_NAMESPACE;

    #[test]
    fn test_namespace_triples() {
        let mut registry = NamespaceRegistry::new();
        registry.register_namespace("dc", "http://purl.org/dc/elements/1.1/").unwrap();

        let triples = RdfStream::new(NamespaceSource::new(registry.namespaces()))
            .into_triples()
            .unwrap();

        // jcr, nt, mix, xml and dc; the empty prefix is not published
        assert_eq!(triples.len(), 15);

        let dc = NamedNode::new("http://purl.org/dc/elements/1.1/").unwrap();
        assert!(triples.contains(&Triple::new(
            dc,
            RdfPredicate::from(NamedNode::new_unchecked(PREFERRED_NAMESPACE_PREFIX)),
            Literal::new_simple_literal("dc"),
        )));

        let repository = NamedNode::new(REPOSITORY_NAMESPACE).unwrap();
        assert!(triples.contains(&Triple::new(
            repository,
            RdfPredicate::from(NamedNode::new_unchecked(PREFERRED_NAMESPACE_PREFIX)),
            Literal::new_simple_literal("jcr"),
        )));
    }
}
