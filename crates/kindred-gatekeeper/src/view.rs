//! Graph view that hides the edge being edited

use kindred_domain::{EdgeId, FamilyGraph, Person, PersonId, RelationEdge};

/// Delegates to an inner graph, minus at most one edge
pub(crate) struct WithoutEdge<'a, G> {
    graph: &'a G,
    hidden: Option<EdgeId>,
}

impl<'a, G> WithoutEdge<'a, G> {
    pub(crate) fn new(graph: &'a G, hidden: Option<EdgeId>) -> Self {
        Self { graph, hidden }
    }

    fn visible(&self, edge: &RelationEdge) -> bool {
        self.hidden != Some(edge.id)
    }
}

impl<G: FamilyGraph> FamilyGraph for WithoutEdge<'_, G> {
    type Error = G::Error;

    fn person(&self, id: PersonId) -> Result<Option<Person>, Self::Error> {
        self.graph.person(id)
    }

    fn edges_of(&self, id: PersonId) -> Result<Vec<RelationEdge>, Self::Error> {
        let mut edges = self.graph.edges_of(id)?;
        edges.retain(|edge| self.visible(edge));
        Ok(edges)
    }

    fn edge(&self, id: EdgeId) -> Result<Option<RelationEdge>, Self::Error> {
        Ok(self.graph.edge(id)?.filter(|edge| self.visible(edge)))
    }

    fn edges_between(&self, a: PersonId, b: PersonId) -> Result<Vec<RelationEdge>, Self::Error> {
        let mut edges = self.graph.edges_between(a, b)?;
        edges.retain(|edge| self.visible(edge));
        Ok(edges)
    }
}
