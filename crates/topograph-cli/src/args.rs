//! Command-line argument definitions.
//!
//! Every argument is optional: with none given the diagram is rendered as a
//! PNG into the current directory.

use std::path::PathBuf;

use clap::Parser;

use topograph::export::OutputFormat;

/// Command-line arguments for the diagram renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory the image is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Output format (png, svg, jpg, pdf, dot); overrides the config file
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            format: None,
            config: None,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = Args::try_parse_from(["topograph"]).unwrap();

        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.format, None);
        assert_eq!(args.config, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_arguments() {
        let args = Args::try_parse_from([
            "topograph",
            "-o",
            "out",
            "--format",
            "svg",
            "--config",
            "cfg.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert_eq!(args.format, Some(OutputFormat::Svg));
        assert_eq!(args.config, Some(PathBuf::from("cfg.toml")));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Args::try_parse_from(["topograph", "-f", "gif"]).is_err());
    }
}
