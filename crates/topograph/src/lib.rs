//! Topograph - architecture diagrams declared in Rust, rendered by Graphviz.
//!
//! Diagrams are declared with the scoped [`TopologyBuilder`], converted to a
//! Graphviz graph, and written to a single file by [`DiagramRenderer`].

pub mod config;
pub mod export;

mod error;

pub use topograph_core::{builder, color, graph, identifier, resource, semantic};

pub use builder::TopologyBuilder;
pub use error::TopographError;

use std::path::{Path, PathBuf};

use log::{debug, info};

use config::AppConfig;
use export::{DotSourceExporter, Exporter, GraphvizExporter, OutputFormat, dot::GraphConverter};
use semantic::Diagram;

/// Renders finished diagrams to files.
///
/// # Examples
///
/// ```rust,no_run
/// use topograph::{DiagramRenderer, TopologyBuilder, config::AppConfig, resource::ResourceKind};
///
/// let mut builder = TopologyBuilder::new("Backend");
/// builder.node("s3", ResourceKind::StorageBucket, "State Bucket")?;
/// builder.node("ddb", ResourceKind::LockTable, "Lock Table")?;
/// builder.edge("s3", "ddb")?;
/// let diagram = builder.finish();
///
/// let renderer = DiagramRenderer::new(AppConfig::default());
/// let path = renderer.render(&diagram, ".")?;
/// assert!(path.ends_with("backend.png"));
/// # Ok::<(), topograph::TopographError>(())
/// ```
#[derive(Debug, Default)]
pub struct DiagramRenderer {
    config: AppConfig,
}

impl DiagramRenderer {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Path of the file [`render`](Self::render) writes for `diagram` in `output_dir`.
    pub fn output_path(&self, diagram: &Diagram, output_dir: impl AsRef<Path>) -> PathBuf {
        let format = self.config.render().format();
        output_dir
            .as_ref()
            .join(format!("{}.{}", diagram.file_stem(), format.extension()))
    }

    /// Returns the DOT source for `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`TopographError::Config`] if the style configuration is invalid.
    pub fn to_dot(&self, diagram: &Diagram) -> Result<String, TopographError> {
        let graph = self.converter()?.convert(diagram);
        Ok(DotSourceExporter::to_source(&graph))
    }

    /// Renders `diagram` into `output_dir` and returns the written path.
    ///
    /// Exactly one file is written, named after the diagram title; an existing
    /// file of the same name is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`TopographError::Config`] for invalid styling and
    /// [`TopographError::Render`] when Graphviz is unavailable or fails.
    pub fn render(
        &self,
        diagram: &Diagram,
        output_dir: impl AsRef<Path>,
    ) -> Result<PathBuf, TopographError> {
        let format = self.config.render().format();
        let path = self.output_path(diagram, output_dir);
        info!(
            title = diagram.title(),
            format:% = format,
            path:% = path.display();
            "Rendering diagram"
        );

        let graph = self.converter()?.convert(diagram);
        debug!(nodes = diagram.nodes().count(), edges = diagram.edges().len(); "Graph converted");

        let exporter: Box<dyn Exporter> = match format {
            OutputFormat::Dot => Box::new(DotSourceExporter),
            image => Box::new(GraphvizExporter::new(image)),
        };
        exporter.export(graph, &path)?;

        Ok(path)
    }

    fn converter(&self) -> Result<GraphConverter, TopographError> {
        GraphConverter::new(&self.config).map_err(TopographError::Config)
    }
}
