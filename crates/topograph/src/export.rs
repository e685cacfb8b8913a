//! Writing a diagram to disk.
//!
//! [`dot::GraphConverter`] turns a [`Diagram`] into a Graphviz graph; an
//! [`Exporter`] writes that graph to a file. [`GraphvizExporter`] runs the
//! Graphviz `dot` binary for image formats, [`DotSourceExporter`] writes the
//! DOT text itself.
//!
//! Both exporters write to a temporary file next to the target and move it
//! into place only once it is complete, so a failed run never leaves a
//! truncated image behind.

pub mod dot;

use std::{
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use dot_structures::Graph;
use graphviz_rust::{
    cmd::{CommandArg, Format},
    printer::{DotPrinter, PrinterContext},
};
use log::{debug, info};
use serde::Deserialize;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Mode of rendered files on Unix.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// File formats the renderer can produce.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Jpg,
    Pdf,
    /// Graphviz source text, written without running Graphviz.
    Dot,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        Self::Png,
        Self::Svg,
        Self::Jpg,
        Self::Pdf,
        Self::Dot,
    ];

    /// File extension, also the name used in configuration.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Jpg => "jpg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }

    fn graphviz_format(self) -> Format {
        match self {
            Self::Png => Format::Png,
            Self::Svg => Format::Svg,
            Self::Jpg => Format::Jpg,
            Self::Pdf => Format::Pdf,
            Self::Dot => Format::Dot,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "jpeg" => Ok(Self::Jpg),
            other => Self::ALL
                .into_iter()
                .find(|format| format.extension() == other)
                .ok_or_else(|| format!("unsupported output format `{s}`")),
        }
    }
}

/// Export failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Graphviz `dot` failed: {0}")]
    Backend(#[source] io::Error),

    #[error("Graphviz produced no output for {}", .0.display())]
    EmptyOutput(PathBuf),

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    fn write(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Writes a Graphviz graph to a file.
pub trait Exporter {
    fn export(&self, graph: Graph, path: &Path) -> Result<(), Error>;
}

/// Renders the graph to an image with the Graphviz `dot` binary.
#[derive(Debug, Clone, Copy)]
pub struct GraphvizExporter {
    format: OutputFormat,
}

impl GraphvizExporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl Exporter for GraphvizExporter {
    fn export(&self, graph: Graph, path: &Path) -> Result<(), Error> {
        let staging = staging_file(path)?;
        let staging_path = staging.path().to_string_lossy().into_owned();

        debug!(format:% = self.format, staging = staging_path.as_str(); "Invoking Graphviz");
        graphviz_rust::exec(
            graph,
            &mut PrinterContext::default(),
            vec![
                CommandArg::Format(self.format.graphviz_format()),
                CommandArg::Output(staging_path),
            ],
        )
        .map_err(Error::Backend)?;

        let written = staging
            .as_file()
            .metadata()
            .map_err(Error::write(path))?
            .len();
        if written == 0 {
            return Err(Error::EmptyOutput(path.to_path_buf()));
        }

        persist(staging, path)?;
        info!(path:% = path.display(), bytes = written; "Image rendered");
        Ok(())
    }
}

/// Writes the DOT source of the graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotSourceExporter;

impl DotSourceExporter {
    pub fn to_source(graph: &Graph) -> String {
        graph.print(&mut PrinterContext::default())
    }
}

impl Exporter for DotSourceExporter {
    fn export(&self, graph: Graph, path: &Path) -> Result<(), Error> {
        let source = Self::to_source(&graph);

        let mut staging = staging_file(path)?;
        staging
            .write_all(source.as_bytes())
            .map_err(Error::write(path))?;

        persist(staging, path)?;
        info!(path:% = path.display(), bytes = source.len(); "DOT source written");
        Ok(())
    }
}

fn staging_file(path: &Path) -> Result<NamedTempFile, Error> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(Error::write(path))?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(".topograph-");
    // Staging files are private by default; the rendered file is not.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(OUTPUT_MODE));
    }
    builder.tempfile_in(dir).map_err(Error::write(path))
}

fn persist(staging: NamedTempFile, path: &Path) -> Result<(), Error> {
    staging
        .persist(path)
        .map(drop)
        .map_err(|err| Error::write(path)(err.error))
}
