//! Semantic model of an architecture diagram.
//!
//! A [`Diagram`] is produced once by
//! [`TopologyBuilder::finish`](crate::builder::TopologyBuilder::finish) and is
//! read-only afterwards. Nodes and edges keep their declaration order, which
//! keeps the exported graph stable between runs.
//!
//! ```text
//! TopologyBuilder (node / edge / cluster calls)
//!     ↓ finish
//! Diagram (this module)
//!     ↓ export
//! Graphviz graph → image file
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{graph::DiagramGraph, identifier::Id, resource::ResourceKind};

/// Index of a cluster within its diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub(crate) usize);

impl ClusterId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Rank direction of the laid out graph.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TB")]
    TopBottom,
    #[serde(rename = "BT")]
    BottomTop,
    #[serde(rename = "LR")]
    LeftRight,
    #[serde(rename = "RL")]
    RightLeft,
}

impl Direction {
    /// Graphviz `rankdir` value.
    pub fn as_rankdir(self) -> &'static str {
        match self {
            Self::TopBottom => "TB",
            Self::BottomTop => "BT",
            Self::LeftRight => "LR",
            Self::RightLeft => "RL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_rankdir())
    }
}

/// A labeled resource in the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    label: String,
    kind: ResourceKind,
    cluster: Option<ClusterId>,
}

impl Node {
    pub(crate) fn new(
        id: Id,
        label: String,
        kind: ResourceKind,
        cluster: Option<ClusterId>,
    ) -> Self {
        Self {
            id,
            label,
            kind,
            cluster,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Innermost cluster open when the node was declared, `None` at the root.
    pub fn cluster(&self) -> Option<ClusterId> {
        self.cluster
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.kind)
    }
}

/// A directed relationship between two declared nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: Id,
    target: Id,
    label: Option<String>,
    cluster: Option<ClusterId>,
}

impl Edge {
    pub(crate) fn new(
        source: Id,
        target: Id,
        label: Option<String>,
        cluster: Option<ClusterId>,
    ) -> Self {
        Self {
            source,
            target,
            label,
            cluster,
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Cluster the edge was declared in.
    pub fn cluster(&self) -> Option<ClusterId> {
        self.cluster
    }
}

/// A named, nestable grouping of nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: ClusterId,
    path: Id,
    label: String,
    parent: Option<ClusterId>,
    depth: usize,
}

impl Cluster {
    pub(crate) fn new(
        id: ClusterId,
        path: Id,
        label: String,
        parent: Option<ClusterId>,
        depth: usize,
    ) -> Self {
        Self {
            id,
            path,
            label,
            parent,
            depth,
        }
    }

    pub fn id(&self) -> ClusterId {
        self.id
    }

    /// Labels from the outermost cluster down to this one, joined by `::`.
    pub fn path(&self) -> Id {
        self.path
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Option<ClusterId> {
        self.parent
    }

    /// Nesting depth, 1 for a cluster directly under the diagram.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// A complete, validated architecture diagram.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub(crate) title: String,
    pub(crate) direction: Direction,
    pub(crate) nodes: IndexMap<Id, Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) clusters: Vec<Cluster>,
    pub(crate) graph: DiagramGraph,
}

impl Diagram {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// File name stem derived from the title: words joined by `_`, lower-cased.
    ///
    /// ```
    /// use topograph_core::builder::TopologyBuilder;
    ///
    /// let diagram = TopologyBuilder::new("HA Web Application Architecture").finish();
    /// assert_eq!(diagram.file_stem(), "ha_web_application_architecture");
    /// ```
    pub fn file_stem(&self) -> String {
        self.title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase()
    }

    /// All nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node(&self, id: impl Into<Id>) -> Option<&Node> {
        self.nodes.get(&id.into())
    }

    /// All edges in declaration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(id.0)
    }

    /// Nodes declared directly in `scope` (`None` is the diagram root).
    pub fn nodes_in(&self, scope: Option<ClusterId>) -> impl Iterator<Item = &Node> {
        self.nodes().filter(move |node| node.cluster == scope)
    }

    /// Clusters whose parent is `scope` (`None` is the diagram root).
    pub fn clusters_in(&self, scope: Option<ClusterId>) -> impl Iterator<Item = &Cluster> {
        self.clusters
            .iter()
            .filter(move |cluster| cluster.parent == scope)
    }

    /// Adjacency view over the node keys.
    pub fn graph(&self) -> &DiagramGraph {
        &self.graph
    }
}
