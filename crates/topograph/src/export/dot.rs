//! Conversion from the semantic [`Diagram`] to a Graphviz graph.
//!
//! Clusters become `subgraph cluster_<n>` blocks nested the same way they were
//! declared, each holding the nodes attributed to it. Edges are all emitted at
//! graph level: Graphviz makes every node mentioned inside a subgraph a member
//! of it, so an edge statement inside a cluster could pull a foreign endpoint
//! into that cluster.

use std::path::{Path, PathBuf};

use dot_structures::{
    Attribute, Edge, EdgeTy, Graph, GraphAttributes, Id, Node, NodeId, Stmt, Subgraph, Vertex,
};
use log::{debug, trace};

use topograph_core::{
    color::Color,
    identifier,
    resource::ResourceKind,
    semantic::{Cluster, ClusterId, Diagram, Direction},
};

use crate::config::AppConfig;

/// Quotes `value` as a DOT string literal.
pub fn quoted(value: &str) -> Id {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    Id::Escaped(format!("\"{escaped}\""))
}

fn attr(key: &str, value: &str) -> Attribute {
    Attribute(Id::Plain(key.to_string()), quoted(value))
}

fn node_id(id: identifier::Id) -> NodeId {
    NodeId(quoted(&id.as_string()), None)
}

/// Fully resolved styling, validated once before conversion.
#[derive(Debug, Clone)]
struct Style {
    background: Option<Color>,
    edge: Color,
    cluster_pen: Color,
    cluster_palette: Vec<Color>,
    font_name: String,
}

/// Converts diagrams to Graphviz graphs using an [`AppConfig`].
#[derive(Debug, Clone)]
pub struct GraphConverter {
    style: Style,
    direction: Option<Direction>,
    icon_dir: Option<PathBuf>,
}

impl GraphConverter {
    /// Validates the style section of `config`.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid color.
    pub fn new(config: &AppConfig) -> Result<Self, String> {
        let style = config.style();
        Ok(Self {
            style: Style {
                background: style.background_color()?,
                edge: style.edge_color()?,
                cluster_pen: style.cluster_pen_color()?,
                cluster_palette: style.cluster_colors()?,
                font_name: style.font_name().to_string(),
            },
            direction: config.render().direction(),
            icon_dir: config.icons().directory().map(Path::to_path_buf),
        })
    }

    /// Builds the directed Graphviz graph for `diagram`.
    pub fn convert(&self, diagram: &Diagram) -> Graph {
        let direction = self.direction.unwrap_or(diagram.direction());
        debug!(title = diagram.title(), direction:% = direction; "Converting diagram to DOT");

        let mut stmts = vec![
            Stmt::GAttribute(GraphAttributes::Graph(self.graph_attributes(diagram, direction))),
            Stmt::GAttribute(GraphAttributes::Node(self.node_defaults())),
            Stmt::GAttribute(GraphAttributes::Edge(self.edge_defaults())),
        ];

        stmts.extend(self.scope_stmts(diagram, None));

        stmts.extend(diagram.edges().iter().map(|edge| {
            // Orthogonal routing ignores `label`; `xlabel` is placed after layout.
            let attributes = edge
                .label()
                .map(|label| vec![attr("xlabel", label)])
                .unwrap_or_default();
            Stmt::Edge(Edge {
                ty: EdgeTy::Pair(
                    Vertex::N(node_id(edge.source())),
                    Vertex::N(node_id(edge.target())),
                ),
                attributes,
            })
        }));

        Graph::DiGraph {
            id: quoted(diagram.title()),
            strict: false,
            stmts,
        }
    }

    fn graph_attributes(&self, diagram: &Diagram, direction: Direction) -> Vec<Attribute> {
        let mut attributes = vec![
            attr("label", diagram.title()),
            attr("rankdir", direction.as_rankdir()),
            attr("splines", "ortho"),
            attr("pad", "2.0"),
            attr("nodesep", "0.60"),
            attr("ranksep", "0.75"),
            attr("fontname", &self.style.font_name),
            attr("fontsize", "15"),
            attr("fontcolor", "#2D3436"),
        ];
        if let Some(background) = self.style.background {
            attributes.push(attr("bgcolor", &background.to_hex()));
        }
        attributes
    }

    fn node_defaults(&self) -> Vec<Attribute> {
        vec![
            attr("shape", "box"),
            attr("style", "rounded,filled"),
            attr("fixedsize", "true"),
            attr("width", "1.4"),
            attr("height", "1.4"),
            attr("labelloc", "b"),
            attr("imagescale", "true"),
            attr("fontname", &self.style.font_name),
            attr("fontsize", "13"),
            attr("fontcolor", "#2D3436"),
        ]
    }

    fn edge_defaults(&self) -> Vec<Attribute> {
        vec![
            attr("color", &self.style.edge.to_hex()),
            attr("fontcolor", &self.style.edge.to_hex()),
            attr("fontname", &self.style.font_name),
            attr("fontsize", "13"),
        ]
    }

    /// Node and nested-cluster statements for one scope.
    fn scope_stmts(&self, diagram: &Diagram, scope: Option<ClusterId>) -> Vec<Stmt> {
        let nodes = diagram.nodes_in(scope).map(|node| {
            Stmt::Node(Node {
                id: node_id(node.id()),
                attributes: self.node_attributes(node.label(), node.kind()),
            })
        });
        let clusters = diagram
            .clusters_in(scope)
            .map(|cluster| Stmt::Subgraph(self.cluster_subgraph(diagram, cluster)));

        nodes.chain(clusters).collect()
    }

    fn cluster_subgraph(&self, diagram: &Diagram, cluster: &Cluster) -> Subgraph {
        let palette = &self.style.cluster_palette;
        let background = palette[(cluster.depth() - 1) % palette.len()];
        trace!(cluster:% = cluster.path(), depth = cluster.depth(); "Emitting cluster");

        let mut stmts = vec![
            Stmt::Attribute(attr("label", cluster.label())),
            Stmt::Attribute(attr("style", "rounded,filled")),
            Stmt::Attribute(attr("labeljust", "l")),
            Stmt::Attribute(attr("pencolor", &self.style.cluster_pen.to_hex())),
            Stmt::Attribute(attr("bgcolor", &background.to_hex())),
            Stmt::Attribute(attr("fontname", &self.style.font_name)),
            Stmt::Attribute(attr("fontsize", "12")),
        ];
        stmts.extend(self.scope_stmts(diagram, Some(cluster.id())));

        Subgraph {
            id: Id::Plain(format!("cluster_{}", cluster.id().index())),
            stmts,
        }
    }

    fn node_attributes(&self, label: &str, kind: ResourceKind) -> Vec<Attribute> {
        let mut attributes = vec![attr("label", label)];

        match self.icon_for(kind) {
            Some(icon) => {
                attributes.push(attr("image", &icon.to_string_lossy()));
                attributes.push(attr("shape", "none"));
                attributes.push(attr("style", "solid"));
                // Leave room under the icon for the label.
                attributes.push(attr("height", "1.9"));
            }
            None => {
                attributes.push(attr("shape", kind.shape()));
                attributes.push(attr("fillcolor", kind.category().fill_color()));
                attributes.push(attr("labelloc", "c"));
            }
        }
        attributes
    }

    fn icon_for(&self, kind: ResourceKind) -> Option<PathBuf> {
        let path = self.icon_dir.as_ref()?.join(kind.icon_path());
        if path.is_file() {
            Some(path)
        } else {
            trace!(kind:% = kind, path:% = path.display(); "Icon not found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use topograph_core::builder::TopologyBuilder;

    use super::*;
    use crate::export::DotSourceExporter;

    fn two_tier() -> Diagram {
        let mut builder = TopologyBuilder::new("Two Tier");
        builder
            .node("dot_cli", ResourceKind::Rack, "Terraform \"CLI\"")
            .unwrap();
        builder
            .cluster("VPC", |vpc| {
                vpc.cluster("Public", |public| {
                    public.node("dot_alb", ResourceKind::LoadBalancer, "ALB")?;
                    Ok(())
                })?;
                vpc.node("dot_web", ResourceKind::ComputeInstance, "Web")?;
                vpc.edge("dot_alb", "dot_web")
            })
            .unwrap();
        builder.labeled_edge("dot_cli", "dot_web", "deploy").unwrap();
        builder.finish()
    }

    fn source_for(config: &AppConfig, diagram: &Diagram) -> String {
        let converter = GraphConverter::new(config).unwrap();
        DotSourceExporter::to_source(&converter.convert(diagram))
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(
            quoted("say \"hi\"\nnow"),
            Id::Escaped(r#""say \"hi\"\nnow""#.to_string())
        );
    }

    #[test]
    fn test_clusters_nest_in_declaration_order() {
        let source = source_for(&AppConfig::default(), &two_tier());

        let vpc = source.find("subgraph cluster_0").unwrap();
        let public = source.find("subgraph cluster_1").unwrap();
        let alb = source.find("\"dot_alb\"").unwrap();
        assert!(vpc < public && public < alb, "{source}");
        assert!(source.contains("label=\"VPC\""));
        assert!(source.contains("bgcolor=\"#e5f5fd\""));
        assert!(source.contains("bgcolor=\"#ebf3e7\""));
    }

    #[test]
    fn test_edges_emitted_after_all_clusters() {
        let source = source_for(&AppConfig::default(), &two_tier());

        let last_node = source.find("label=\"Web\"").unwrap();
        let first_edge = source.find("->").unwrap();
        assert!(last_node < first_edge, "{source}");
        assert!(source.contains("\"dot_alb\" -> \"dot_web\""));
        assert!(source.contains("xlabel=\"deploy\""));
    }

    #[test]
    fn test_edge_labels_survive_orthogonal_splines() {
        let source = source_for(&AppConfig::default(), &two_tier());

        assert!(source.contains("splines=\"ortho\""));
        assert_eq!(source.matches("xlabel=\"deploy\"").count(), 1, "{source}");
        // Every `label="deploy"` occurrence is the tail of the `xlabel`.
        assert_eq!(source.matches("label=\"deploy\"").count(), 1, "{source}");
    }

    #[test]
    fn test_labels_are_escaped() {
        let source = source_for(&AppConfig::default(), &two_tier());
        assert!(source.contains(r#"label="Terraform \"CLI\"""#), "{source}");
    }

    #[test]
    fn test_direction_override() {
        let config: AppConfig = toml::from_str("[render]\ndirection = \"LR\"").unwrap();

        let source = source_for(&config, &two_tier());

        assert!(source.contains("rankdir=\"LR\""));
    }

    #[test]
    fn test_plain_shapes_without_icons() {
        let source = source_for(&AppConfig::default(), &two_tier());

        assert!(source.contains("shape=\"box3d\""));
        assert!(source.contains(&format!(
            "fillcolor=\"{}\"",
            ResourceKind::LoadBalancer.category().fill_color()
        )));
        assert!(!source.contains("image="));
    }

    #[test]
    fn test_icons_used_when_present() {
        let icons = tempfile::tempdir().unwrap();
        let alb_icon = icons.path().join(ResourceKind::LoadBalancer.icon_path());
        fs::create_dir_all(alb_icon.parent().unwrap()).unwrap();
        fs::write(&alb_icon, b"png").unwrap();

        let config: AppConfig = toml::from_str(&format!(
            "[icons]\ndirectory = {:?}",
            icons.path().to_string_lossy()
        ))
        .unwrap();
        let source = source_for(&config, &two_tier());

        assert_eq!(source.matches("image=").count(), 1, "{source}");
        assert!(source.contains("elastic-load-balancing-application-load-balancer.png"));
    }

    #[test]
    fn test_invalid_style_rejected() {
        let config: AppConfig = toml::from_str("[style]\nbackground_color = \"nope\"").unwrap();

        let err = GraphConverter::new(&config).unwrap_err();
        assert!(err.contains("background"), "{err}");
    }
}
