//! Configuration file discovery for the CLI.
//!
//! Looks for a TOML configuration in, in order:
//! 1. the path given with `--config`,
//! 2. `topograph/config.toml` under the working directory,
//! 3. the platform config directory (e.g. `~/.config/topograph/config.toml`),
//!
//! and falls back to [`AppConfig::default`] when none exists.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use topograph::{TopographError, config::AppConfig};

const LOCAL_CONFIG: &str = "topograph/config.toml";

/// Configuration-related errors for the CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

impl From<ConfigError> for TopographError {
    fn from(err: ConfigError) -> Self {
        TopographError::Config(err.to_string())
    }
}

/// Finds and loads the configuration.
///
/// # Errors
///
/// Returns an error if an explicit path does not exist, or if the file that
/// was found cannot be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TopographError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG);
    if local_config.exists() {
        info!(path:% = local_config.display(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "topograph", "topograph") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path:% = system_config.display(); "Loading configuration from system path");
            return load_config_file(&system_config);
        }

        debug!(path:% = system_config.display(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: &Path) -> Result<AppConfig, TopographError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    toml::from_str(&content).map_err(|err| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use topograph::export::OutputFormat;

    use super::*;

    #[test]
    fn test_explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[render]\nformat = \"svg\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.render().format(), OutputFormat::Svg);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(err, TopographError::Config(ref msg) if msg.contains("absent.toml")));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[render\nformat = ").unwrap();

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(err, TopographError::Config(ref msg) if msg.contains("bad.toml")));
    }

    #[test]
    fn test_unknown_format_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gif.toml");
        fs::write(&path, "[render]\nformat = \"gif\"\n").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }
}
