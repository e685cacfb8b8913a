//! Configuration types for diagram rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field is optional and falls back to the defaults below.
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`RenderConfig`] - Output format and layout direction.
//! - [`StyleConfig`] - Colors and fonts of the generated graph.
//! - [`IconConfig`] - Where to find per-resource icons.
//!
//! # Example
//!
//! ```
//! # use topograph::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.style().edge_color().unwrap().to_hex(), "#7b8894");
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use topograph_core::{color::Color, semantic::Direction};

use crate::export::OutputFormat;

const DEFAULT_EDGE_COLOR: &str = "#7B8894";
const DEFAULT_FONT_NAME: &str = "Sans-Serif";
const DEFAULT_CLUSTER_COLORS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];
const DEFAULT_CLUSTER_PEN_COLOR: &str = "#AEB6BE";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    render: RenderConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    icons: IconConfig,
}

impl AppConfig {
    pub fn new(render: RenderConfig, style: StyleConfig, icons: IconConfig) -> Self {
        Self {
            render,
            style,
            icons,
        }
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn icons(&self) -> &IconConfig {
        &self.icons
    }

    /// Replaces the configured output format, e.g. from a command-line flag.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.render.format = format;
        self
    }
}

/// Output format and layout settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    format: OutputFormat,

    /// Overrides the direction the diagram was declared with.
    #[serde(default)]
    direction: Option<Direction>,
}

impl RenderConfig {
    pub fn new(format: OutputFormat, direction: Option<Direction>) -> Self {
        Self { format, direction }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }
}

/// Visual styling of the generated graph.
///
/// Colors are kept as strings until read so that a bad value is reported
/// with the offending text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    edge_color: Option<String>,

    #[serde(default)]
    cluster_pen_color: Option<String>,

    #[serde(default)]
    font_name: Option<String>,

    /// Cluster background colors, indexed by nesting depth and cycled.
    #[serde(default)]
    cluster_colors: Option<Vec<String>>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` for a transparent default.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn edge_color(&self) -> Result<Color, String> {
        Color::new(self.edge_color.as_deref().unwrap_or(DEFAULT_EDGE_COLOR))
            .map_err(|err| format!("Invalid edge color in config: {err}"))
    }

    pub fn cluster_pen_color(&self) -> Result<Color, String> {
        Color::new(
            self.cluster_pen_color
                .as_deref()
                .unwrap_or(DEFAULT_CLUSTER_PEN_COLOR),
        )
        .map_err(|err| format!("Invalid cluster pen color in config: {err}"))
    }

    pub fn font_name(&self) -> &str {
        self.font_name.as_deref().unwrap_or(DEFAULT_FONT_NAME)
    }

    /// Returns the cluster palette; never empty.
    pub fn cluster_colors(&self) -> Result<Vec<Color>, String> {
        let colors = match &self.cluster_colors {
            Some(colors) if !colors.is_empty() => colors
                .iter()
                .map(|color| Color::new(color))
                .collect::<Result<Vec<_>, _>>(),
            Some(_) => return Err("cluster_colors must not be empty".to_string()),
            None => DEFAULT_CLUSTER_COLORS
                .iter()
                .map(|color| Color::new(color))
                .collect(),
        };
        colors.map_err(|err| format!("Invalid cluster color in config: {err}"))
    }
}

/// Location of the resource icon set.
///
/// Icons are looked up as `<directory>/<provider>/<category>/<file>.png`;
/// kinds whose icon is missing are drawn as plain shapes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IconConfig {
    #[serde(default)]
    directory: Option<PathBuf>,
}

impl IconConfig {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}
