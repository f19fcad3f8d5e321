//! Property triples for a sequence of nodes

use super::TripleSource;
use crate::graph::{NodeId, Session};
use crate::rdf::identifier::IdentifierConverter;
use crate::rdf::lexicon::HAS_MEMBER_OF_RESULT;
use crate::rdf::mapping::MappingResult;
use crate::rdf::namespace::predicate_for_property;
use crate::rdf::types::{NamedNode, RdfPredicate, Triple};
use crate::rdf::value::term_for_value;
use oxrdf::vocab::rdf;

/// One triple per property value of each node, plus an `rdf:type` triple
/// per mixin
///
/// With a grouping subject, each node is also linked from it as a member of
/// the result set.
pub struct PropertiesSource<'a, S: ?Sized, C, I> {
    session: &'a S,
    converter: C,
    nodes: I,
    group: Option<NamedNode>,
}

impl<'a, S, C, I> PropertiesSource<'a, S, C, I>
where
    S: Session + ?Sized,
    C: IdentifierConverter,
    I: Iterator<Item = NodeId>,
{
    pub fn new(session: &'a S, converter: C, nodes: I, group: Option<NamedNode>) -> Self {
        Self {
            session,
            converter,
            nodes,
            group,
        }
    }

    fn triples_for(&self, id: NodeId) -> MappingResult<Vec<Triple>> {
        let node = self.session.node(id)?;
        let registry = self.session.namespace_registry();
        let subject = self.converter.to_resource(node.path());
        let mut triples = Vec::new();

        for (name, values) in node.properties() {
            let predicate = predicate_for_property(registry, name)?;
            for value in values {
                let object = term_for_value(self.session, &self.converter, value)?;
                triples.push(Triple::new(subject.clone(), predicate.clone(), object));
            }
        }

        for mixin in node.mixins() {
            let class = predicate_for_property(registry, mixin)?;
            triples.push(Triple::new(subject.clone(), rdf::TYPE, NamedNode::from(class)));
        }

        if let Some(group) = &self.group {
            triples.push(Triple::new(
                group.clone(),
                RdfPredicate::from(NamedNode::new_unchecked(HAS_MEMBER_OF_RESULT)),
                subject,
            ));
        }
        Ok(triples)
    }
}

impl<'a, S, C, I> TripleSource for PropertiesSource<'a, S, C, I>
where
    S: Session + ?Sized,
    C: IdentifierConverter,
    I: Iterator<Item = NodeId>,
{
    fn next_batch(&mut self) -> Option<MappingResult<Vec<Triple>>> {
        let id = self.nodes.next()?;
        Some(self.triples_for(id))
    }
}
