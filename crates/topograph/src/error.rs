//! Error types for Topograph operations.
//!
//! [`TopographError`] wraps everything that can stop a render. It implements
//! [`miette::Diagnostic`] so the command line can print a hint next to the
//! failure, most usefully when the Graphviz toolchain is missing.

use std::io;

use miette::Diagnostic;
use thiserror::Error;

use topograph_core::graph::GraphError;

use crate::export;

/// The main error type for Topograph operations.
#[derive(Debug, Error, Diagnostic)]
pub enum TopographError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(topograph::io))]
    Io(#[from] io::Error),

    #[error("Graph error: {0}")]
    #[diagnostic(
        code(topograph::graph),
        help("declare every node before the edges that reference it")
    )]
    Graph(#[from] GraphError),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(topograph::config))]
    Config(String),

    #[error("Render error: {0}")]
    #[diagnostic(
        code(topograph::render),
        help("install Graphviz and make sure `dot` is on PATH, or use the `dot` output format")
    )]
    Render(#[from] export::Error),
}

#[cfg(test)]
mod tests {
    use miette::Diagnostic;

    use super::*;

    #[test]
    fn test_graph_error_wraps_message() {
        let err = TopographError::from(GraphError::DuplicateNode("alb".to_string()));

        assert_eq!(
            err.to_string(),
            "Graph error: node `alb` is already declared"
        );
        assert!(err.help().is_some());
    }

    #[test]
    fn test_render_error_has_install_hint() {
        let backend = io::Error::new(io::ErrorKind::NotFound, "dot not found");
        let err = TopographError::from(export::Error::Backend(backend));

        let help = err.help().unwrap().to_string();
        assert!(help.contains("Graphviz"), "{help}");
        assert_eq!(err.code().unwrap().to_string(), "topograph::render");
    }
}
