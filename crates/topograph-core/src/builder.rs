//! Scoped builder for architecture diagrams.
//!
//! Nodes and edges are attributed to the innermost cluster that is open when
//! they are declared. A cluster is open exactly for the duration of the
//! closure passed to [`TopologyBuilder::cluster`], so attribution is torn
//! down even if the closure returns early with an error.
//!
//! # Examples
//!
//! ```
//! use topograph_core::{builder::TopologyBuilder, resource::ResourceKind};
//!
//! let mut builder = TopologyBuilder::new("Web");
//! builder.cluster("VPC", |vpc| {
//!     vpc.node("alb", ResourceKind::LoadBalancer, "Load Balancer")?;
//!     vpc.node("web", ResourceKind::ComputeInstance, "Web Server")?;
//!     vpc.edge("alb", "web")
//! })?;
//!
//! let diagram = builder.finish();
//! assert_eq!(diagram.edges().len(), 1);
//! # Ok::<(), topograph_core::graph::GraphError>(())
//! ```

use indexmap::IndexMap;
use log::{debug, trace};

use crate::{
    graph::{DiagramGraph, GraphError},
    identifier::Id,
    resource::ResourceKind,
    semantic::{Cluster, ClusterId, Diagram, Direction, Edge, Node},
};

/// Declares the nodes, edges and clusters of a [`Diagram`].
#[derive(Debug)]
pub struct TopologyBuilder {
    title: String,
    direction: Direction,
    nodes: IndexMap<Id, Node>,
    edges: Vec<Edge>,
    clusters: Vec<Cluster>,
    graph: DiagramGraph,
    open: Vec<ClusterId>,
}

impl TopologyBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            direction: Direction::default(),
            nodes: IndexMap::new(),
            edges: Vec::new(),
            clusters: Vec::new(),
            graph: DiagramGraph::new(),
            open: Vec::new(),
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// The innermost open cluster, `None` at the diagram root.
    pub fn current_cluster(&self) -> Option<ClusterId> {
        self.open.last().copied()
    }

    /// Declares a node in the current scope and returns its key.
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateNode`] if `key` was already declared.
    pub fn node(
        &mut self,
        key: &str,
        kind: ResourceKind,
        label: impl Into<String>,
    ) -> Result<Id, GraphError> {
        let id = Id::new(key);
        self.graph.add_node(id)?;

        let cluster = self.current_cluster();
        let node = Node::new(id, label.into(), kind, cluster);
        debug!(node:% = id, kind:% = kind, cluster:? = cluster; "Node declared");

        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Declares a directed edge between two declared nodes.
    ///
    /// # Errors
    ///
    /// [`GraphError::UndeclaredNode`] if either endpoint is unknown.
    pub fn edge(
        &mut self,
        source: impl Into<Id>,
        target: impl Into<Id>,
    ) -> Result<(), GraphError> {
        self.push_edge(source.into(), target.into(), None)
    }

    /// Like [`edge`](Self::edge), with a label drawn along the arrow.
    pub fn labeled_edge(
        &mut self,
        source: impl Into<Id>,
        target: impl Into<Id>,
        label: impl Into<String>,
    ) -> Result<(), GraphError> {
        self.push_edge(source.into(), target.into(), Some(label.into()))
    }

    /// Declares one edge from `source` to each of `targets`.
    ///
    /// Stops at the first undeclared endpoint; edges declared before it are kept.
    pub fn fan_out<T: Into<Id>>(
        &mut self,
        source: impl Into<Id>,
        targets: impl IntoIterator<Item = T>,
    ) -> Result<(), GraphError> {
        let source = source.into();
        targets
            .into_iter()
            .try_for_each(|target| self.push_edge(source, target.into(), None))
    }

    /// Declares one edge from each of `sources` to `target`.
    pub fn fan_in<S: Into<Id>>(
        &mut self,
        sources: impl IntoIterator<Item = S>,
        target: impl Into<Id>,
    ) -> Result<(), GraphError> {
        let target = target.into();
        sources
            .into_iter()
            .try_for_each(|source| self.push_edge(source.into(), target, None))
    }

    /// Opens a cluster nested in the current scope, runs `body` inside it,
    /// then closes it whatever `body` returned.
    pub fn cluster<F>(&mut self, label: &str, body: F) -> Result<(), GraphError>
    where
        F: FnOnce(&mut Self) -> Result<(), GraphError>,
    {
        let parent = self.current_cluster();
        let path = match parent.and_then(|id| self.clusters.get(id.0)) {
            Some(parent) => parent.path().nested(label),
            None => Id::new(label),
        };
        let id = ClusterId(self.clusters.len());
        let depth = self.open.len() + 1;

        self.clusters
            .push(Cluster::new(id, path, label.to_string(), parent, depth));
        self.open.push(id);
        trace!(cluster:% = path, depth = depth; "Cluster opened");

        let result = body(self);

        self.open.pop();
        trace!(cluster:% = path, ok = result.is_ok(); "Cluster closed");
        result
    }

    /// Closes any cluster still open and returns the finished diagram.
    pub fn finish(mut self) -> Diagram {
        self.open.clear();
        debug!(
            title = self.title.as_str(),
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            clusters = self.clusters.len();
            "Diagram assembled"
        );

        Diagram {
            title: self.title,
            direction: self.direction,
            nodes: self.nodes,
            edges: self.edges,
            clusters: self.clusters,
            graph: self.graph,
        }
    }

    fn push_edge(
        &mut self,
        source: Id,
        target: Id,
        label: Option<String>,
    ) -> Result<(), GraphError> {
        self.graph.add_edge(source, target)?;

        let cluster = self.current_cluster();
        debug!(source:% = source, target:% = target; "Edge declared");
        self.edges.push(Edge::new(source, target, label, cluster));
        Ok(())
    }
}
