//! Fixity triples for the stored copies of a binary

use super::TripleSource;
use crate::graph::FixityResult;
use crate::rdf::lexicon::{FIXITY_TYPE, HAS_FIXITY, HAS_FIXITY_STATE, HAS_LOCATION, HAS_MESSAGE_DIGEST, HAS_SIZE};
use crate::rdf::mapping::{MappingError, MappingResult};
use crate::rdf::types::{Literal, NamedNode, RdfPredicate, Triple};
use oxrdf::vocab::{rdf, xsd};
use std::iter::Enumerate;

fn predicate(iri: &str) -> RdfPredicate {
    NamedNode::new_unchecked(iri).into()
}

/// Describes each fixity result as a `premis:Fixity` resource hung off the
/// checked node, with one status triple per outcome against the expected
/// digest and size
pub struct FixitySource<I> {
    subject: NamedNode,
    results: Enumerate<I>,
    expected_digest: String,
    expected_size: u64,
}

impl<I: Iterator<Item = FixityResult>> FixitySource<I> {
    pub fn new(
        subject: NamedNode,
        results: impl IntoIterator<IntoIter = I>,
        expected_digest: impl Into<String>,
        expected_size: u64,
    ) -> Self {
        Self {
            subject,
            results: results.into_iter().enumerate(),
            expected_digest: expected_digest.into(),
            expected_size,
        }
    }

    fn triples_for(&self, index: usize, result: &FixityResult) -> MappingResult<Vec<Triple>> {
        let resource = NamedNode::new(&format!("{}#fixity/{}", self.subject.as_str(), index))
            .map_err(|e| MappingError::MalformedInput(e.to_string()))?;
        let location = resource_for(&result.location)?;
        let digest = resource_for(&result.digest)?;

        let mut triples = vec![
            Triple::new(self.subject.clone(), predicate(HAS_FIXITY), resource.clone()),
            Triple::new(resource.clone(), rdf::TYPE, NamedNode::new_unchecked(FIXITY_TYPE)),
            Triple::new(resource.clone(), predicate(HAS_LOCATION), location),
        ];
        for state in result.status(self.expected_size, &self.expected_digest) {
            triples.push(Triple::new(
                resource.clone(),
                predicate(HAS_FIXITY_STATE),
                Literal::new_simple_literal(state.as_str()),
            ));
        }
        triples.push(Triple::new(resource.clone(), predicate(HAS_MESSAGE_DIGEST), digest));
        triples.push(Triple::new(
            resource,
            predicate(HAS_SIZE),
            Literal::new_typed_literal(result.size.to_string(), xsd::LONG),
        ));
        Ok(triples)
    }
}

fn resource_for(iri: &str) -> MappingResult<NamedNode> {
    NamedNode::new(iri).map_err(|_| MappingError::MalformedInput(format!("{} is not a resource", iri)))
}

impl<I: Iterator<Item = FixityResult>> TripleSource for FixitySource<I> {
    fn next_batch(&mut self) -> Option<MappingResult<Vec<Triple>>> {
        let (index, result) = self.results.next()?;
        Some(self.triples_for(index, &result))
    }
}
