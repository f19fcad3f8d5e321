//! Streaming triple producers
//!
//! A [`TripleSource`] walks some sequence (nodes, fixity results,
//! namespaces, workspaces) and turns one element at a time into a batch of
//! triples. [`RdfStream`] flattens those batches; it never reads more than
//! one element ahead of what the caller has pulled, and ends after the first
//! error it yields.

mod fixity;
mod namespaces;
mod properties;
mod workspaces;

pub use fixity::FixitySource;
pub use namespaces::NamespaceSource;
pub use properties::PropertiesSource;
pub use workspaces::WorkspaceSource;

use super::mapping::MappingResult;
use super::types::Triple;
use std::vec;

/// A lazily consumed sequence that yields triples in batches
pub trait TripleSource {
    /// Triples for the next element, or `None` when the sequence is exhausted
    fn next_batch(&mut self) -> Option<MappingResult<Vec<Triple>>>;
}

/// Iterator over the triples of a [`TripleSource`]
pub struct RdfStream<S> {
    source: S,
    pending: vec::IntoIter<Triple>,
    finished: bool,
}

impl<S: TripleSource> RdfStream<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pending: Vec::new().into_iter(),
            finished: false,
        }
    }

    /// Drain the stream, stopping at the first error
    pub fn into_triples(self) -> MappingResult<Vec<Triple>> {
        self.collect()
    }
}

impl<S: TripleSource> Iterator for RdfStream<S> {
    type Item = MappingResult<Triple>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(triple) = self.pending.next() {
                return Some(Ok(triple));
            }
            if self.finished {
                return None;
            }
            match self.source.next_batch() {
                Some(Ok(batch)) => self.pending = batch.into_iter(),
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e));
                }
                None => {
                    self.finished = true;
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::mapping::MappingError;
    use crate::rdf::types::{Literal, NamedNode, RdfPredicate};

    /// Yields one triple per batch from a script of outcomes, counting pulls
    struct Scripted {
        script: vec::IntoIter<MappingResult<usize>>,
        pulls: usize,
    }

    impl TripleSource for Scripted {
        fn next_batch(&mut self) -> Option<MappingResult<Vec<Triple>>> {
            let step = self.script.next()?;
            self.pulls += 1;
            Some(step.map(|n| {
                (0..n)
                    .map(|i| {
                        Triple::new(
                            NamedNode::new("http://example.org/s").unwrap(),
                            RdfPredicate::new("http://example.org/p").unwrap(),
                            Literal::new_simple_literal(i.to_string()),
                        )
                    })
                    .collect()
            }))
        }
    }

    fn scripted(script: Vec<MappingResult<usize>>) -> RdfStream<Scripted> {
        RdfStream::new(Scripted {
            script: script.into_iter(),
            pulls: 0,
        })
    }

    #[test]
    fn test_flattens_batches() {
        let stream = scripted(vec![Ok(2), Ok(0), Ok(3)]);
        assert_eq!(stream.into_triples().unwrap().len(), 5);
    }

    #[test]
    fn test_pulls_lazily() {
        let mut stream = scripted(vec![Ok(2), Ok(2), Ok(2)]);
        stream.next();
        assert_eq!(stream.source.pulls, 1);
        stream.next();
        assert_eq!(stream.source.pulls, 1);
        stream.next();
        assert_eq!(stream.source.pulls, 2);
    }

    #[test]
    fn test_ends_after_error() {
        let mut stream = scripted(vec![
            Ok(1),
            Err(MappingError::MalformedInput("bad".to_string())),
            Ok(1),
        ]);
        assert!(stream.next().unwrap().is_ok());
        assert!(stream.next().unwrap().is_err());
        assert!(stream.next().is_none());
        assert_eq!(stream.source.pulls, 2);
    }
}
