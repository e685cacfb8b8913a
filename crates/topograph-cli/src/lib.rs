//! CLI logic for rendering the HA web application architecture diagram.

pub mod architecture;

mod args;
mod config;

pub use args::Args;

use std::path::PathBuf;

use log::info;

use topograph::{DiagramRenderer, TopographError};

/// Builds the architecture diagram and renders it into `args.output_dir`.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns `TopographError` for:
/// - Configuration loading errors
/// - Undeclared node references in the topology
/// - A missing or failing Graphviz backend
/// - File I/O errors
pub fn run(args: &Args) -> Result<PathBuf, TopographError> {
    info!(output_dir:% = args.output_dir.display(); "Rendering architecture diagram");

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(format) = args.format {
        app_config = app_config.with_format(format);
    }

    let diagram = architecture::ha_web_application()?;
    info!(
        nodes = diagram.nodes().count(),
        edges = diagram.edges().len(),
        clusters = diagram.clusters().len();
        "Topology declared"
    );

    let renderer = DiagramRenderer::new(app_config);
    let path = renderer.render(&diagram, &args.output_dir)?;

    info!(output_file:% = path.display(); "Diagram exported successfully");

    Ok(path)
}
