//! Workspace triples

use super::TripleSource;
use crate::rdf::identifier::IdentifierConverter;
use crate::rdf::lexicon::{HAS_WORKSPACE, TITLE, WORKSPACE_TYPE};
use crate::rdf::mapping::MappingResult;
use crate::rdf::types::{Literal, NamedNode, RdfPredicate, Triple};
use oxrdf::vocab::rdf;
use std::vec;

/// Lists the repository's workspaces from the repository root
pub struct WorkspaceSource<C> {
    root: NamedNode,
    converter: C,
    workspaces: vec::IntoIter<String>,
}

impl<C: IdentifierConverter> WorkspaceSource<C> {
    pub fn new(root: NamedNode, converter: C, workspaces: Vec<String>) -> Self {
        Self {
            root,
            converter,
            workspaces: workspaces.into_iter(),
        }
    }

    fn triples_for(&self, name: &str) -> Vec<Triple> {
        let workspace = self.converter.workspace_resource(name);
        vec![
            Triple::new(
                self.root.clone(),
                RdfPredicate::from(NamedNode::new_unchecked(HAS_WORKSPACE)),
                workspace.clone(),
            ),
            Triple::new(workspace.clone(), rdf::TYPE, NamedNode::new_unchecked(WORKSPACE_TYPE)),
            Triple::new(
                workspace,
                RdfPredicate::from(NamedNode::new_unchecked(TITLE)),
                Literal::new_simple_literal(name),
            ),
        ]
    }
}

impl<C: IdentifierConverter> TripleSource for WorkspaceSource<C> {
    fn next_batch(&mut self) -> Option<MappingResult<Vec<Triple>>> {
        let name = self.workspaces.next()?;
        Some(Ok(self.triples_for(&name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::context::RdfStream;
    use crate::rdf::identifier::PathConverter;
    use crate::rdf::mapping::MappingConfig;
    use crate::rdf::types::{RdfObject, RdfSubject};

    #[test]
    fn test_workspace_triples() {
        let converter = PathConverter::new(&MappingConfig::new("http://localhost/rest/"), "default");
        let root = converter.to_resource("/");
        let source = WorkspaceSource::new(root.clone(), &converter, vec!["archive".to_string(), "default".to_string()]);
        let triples = RdfStream::new(source).into_triples().unwrap();

        assert_eq!(triples.len(), 6);
        let workspaces: Vec<&RdfObject> = triples
            .iter()
            .filter(|t| t.predicate.as_str() == HAS_WORKSPACE)
            .map(|t| &t.object)
            .collect();
        assert_eq!(
            workspaces,
            vec![
                &RdfObject::NamedNode(NamedNode::new("http://localhost/rest/workspace:archive").unwrap()),
                &RdfObject::NamedNode(NamedNode::new("http://localhost/rest/workspace:default").unwrap()),
            ]
        );
        assert!(triples.iter().all(|t| t.predicate.as_str() != HAS_WORKSPACE || t.subject == RdfSubject::from(root.clone())));
    }
}
