//! Directed graph over node identifiers.
//!
//! [`DiagramGraph`] tracks which node keys exist and the directed edges
//! between them, with incoming and outgoing adjacency per node. It is the
//! referential-integrity check behind every edge declaration: an edge whose
//! endpoint was never declared is rejected with [`GraphError::UndeclaredNode`].
//!
//! The graph is a multigraph; self-loops and parallel edges are allowed.

use std::collections::HashMap;

use indexmap::IndexSet;
use thiserror::Error;

use crate::identifier::Id;

/// Errors raised while declaring the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("edge {from} -> {to} references undeclared node `{missing}`")]
    UndeclaredNode {
        from: String,
        to: String,
        missing: String,
    },

    #[error("node `{0}` is already declared")]
    DuplicateNode(String),
}

/// Position of an edge in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeIndex(usize);

impl EdgeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Directed multigraph keyed by [`Id`].
#[derive(Debug, Default, Clone)]
pub struct DiagramGraph {
    nodes: IndexSet<Id>,
    edges: Vec<(Id, Id)>,
    incoming: HashMap<Id, Vec<EdgeIndex>>,
    outgoing: HashMap<Id, Vec<EdgeIndex>>,
}

impl DiagramGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, failing if the key is already present.
    pub fn add_node(&mut self, id: Id) -> Result<(), GraphError> {
        if !self.nodes.insert(id) {
            return Err(GraphError::DuplicateNode(id.to_string()));
        }
        Ok(())
    }

    /// Adds a directed edge between two existing nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UndeclaredNode`] naming the first endpoint that is
    /// not in the graph. The graph is left unchanged in that case.
    pub fn add_edge(&mut self, source: Id, target: Id) -> Result<EdgeIndex, GraphError> {
        if let Some(missing) = [source, target]
            .into_iter()
            .find(|id| !self.nodes.contains(id))
        {
            return Err(GraphError::UndeclaredNode {
                from: source.to_string(),
                to: target.to_string(),
                missing: missing.to_string(),
            });
        }

        let idx = EdgeIndex(self.edges.len());
        self.edges.push((source, target));
        self.outgoing.entry(source).or_default().push(idx);
        self.incoming.entry(target).or_default().push(idx);
        Ok(idx)
    }

    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains(&id)
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the endpoints of the edge at `idx`.
    pub fn endpoints(&self, idx: EdgeIndex) -> Option<(Id, Id)> {
        self.edges.get(idx.0).copied()
    }

    /// Nodes with no incoming edges, in declaration order.
    pub fn roots(&self) -> impl Iterator<Item = Id> + '_ {
        self.nodes
            .iter()
            .copied()
            .filter(|id| !self.incoming.contains_key(id))
    }

    /// Targets of the edges leaving `id`, one entry per edge.
    pub fn successors(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        self.outgoing
            .get(&id)
            .into_iter()
            .flatten()
            .map(|idx| self.edges[idx.0].1)
    }

    /// Sources of the edges entering `id`, one entry per edge.
    pub fn predecessors(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        self.incoming
            .get(&id)
            .into_iter()
            .flatten()
            .map(|idx| self.edges[idx.0].0)
    }
}
