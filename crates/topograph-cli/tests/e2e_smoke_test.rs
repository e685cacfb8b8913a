use std::{fs, path::PathBuf, process::Command};

use tempfile::tempdir;

use topograph::{TopographError, export::OutputFormat};
use topograph_cli::Args;

fn args_for(output_dir: PathBuf, format: Option<OutputFormat>) -> Args {
    Args {
        output_dir,
        format,
        config: None,
        log_level: "off".to_string(),
    }
}

fn file_names(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to list output directory")
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn e2e_dot_output_is_single_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = args_for(temp_dir.path().to_path_buf(), Some(OutputFormat::Dot));

    let path = topograph_cli::run(&args).expect("dot export should not need Graphviz");

    assert_eq!(file_names(temp_dir.path()), ["ha_web_application_architecture.dot"]);

    let source = fs::read_to_string(&path).unwrap();
    assert!(source.contains("label=\"HA Web Application Architecture\""));
    assert_eq!(source.matches("subgraph cluster_").count(), 3);
    assert_eq!(source.matches(" -> ").count(), 9);
    for label in [
        "Terraform State S3 Bucket",
        "State Lock Table",
        "Application Load Balancer",
        "NAT Gateway",
        "Auto Scaling Group",
        "App Instance 1",
        "App Instance 2",
        "AWS SSM",
        "EC2 SSM Role",
        "Terraform CLI",
    ] {
        assert!(source.contains(&format!("label=\"{label}\"")), "missing {label}");
    }
}

#[test]
fn e2e_rerun_overwrites_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = args_for(temp_dir.path().to_path_buf(), Some(OutputFormat::Dot));

    let first = topograph_cli::run(&args).unwrap();
    let first_source = fs::read_to_string(&first).unwrap();
    let second = topograph_cli::run(&args).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), first_source);
    assert_eq!(file_names(temp_dir.path()).len(), 1);
}

#[test]
fn e2e_config_file_selects_format() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("topograph.toml");
    fs::write(&config_path, "[render]\nformat = \"dot\"\ndirection = \"LR\"\n").unwrap();
    let output_dir = temp_dir.path().join("out");

    let args = Args {
        config: Some(config_path),
        ..args_for(output_dir.clone(), None)
    };
    let path = topograph_cli::run(&args).unwrap();

    assert_eq!(path, output_dir.join("ha_web_application_architecture.dot"));
    assert!(fs::read_to_string(&path).unwrap().contains("rankdir=\"LR\""));
}

#[test]
fn e2e_default_png_render() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = args_for(temp_dir.path().to_path_buf(), None);

    let graphviz_available = Command::new("dot")
        .arg("-V")
        .output()
        .is_ok_and(|output| output.status.success());

    match topograph_cli::run(&args) {
        Ok(path) => {
            assert!(graphviz_available);
            assert_eq!(file_names(temp_dir.path()), ["ha_web_application_architecture.png"]);
            assert!(fs::read(path).unwrap().starts_with(b"\x89PNG"));
        }
        Err(err) => {
            assert!(!graphviz_available, "render failed with Graphviz installed: {err}");
            assert!(matches!(err, TopographError::Render(_)));
            assert!(file_names(temp_dir.path()).is_empty());
        }
    }
}
