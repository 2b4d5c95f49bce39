//! `tessel.toml` on disk driving the pipeline.

use std::fs;

use tempfile::TempDir;
use tessel_config::{load_config_or_default, ConfigError, InfeasiblePolicy, CONFIG_FILE_NAME};
use tessel_conformance::run_pipeline;

const BIG_GATE: &str = "g1 1 1\npins g1 0 0\ngbig 6 6\npins gbig 0 0\nwire g1.p1 gbig.p1\n";

#[test]
fn missing_file_means_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_config_or_default(dir.path()).unwrap();
    assert_eq!(config.placement.on_infeasible, InfeasiblePolicy::Skip);
    let result = run_pipeline(BIG_GATE, &config);
    assert!(result.placed.unwrap().report.unplaced.is_empty());
}

#[test]
fn grid_from_file_limits_placement() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "[grid]\nwidth = 4\nheight = 4\n").unwrap();
    let config = load_config_or_default(dir.path()).unwrap();
    let result = run_pipeline(BIG_GATE, &config);
    assert_eq!(result.codes(), vec!["W300"]);
    assert_eq!(result.output.as_deref(), Some("bounding_box 0 0\ng1 0 0\nwirelength 0\n"));
}

#[test]
fn fail_policy_from_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[grid]\nwidth = 4\nheight = 4\n\n[placement]\non_infeasible = \"fail\"\n",
    )
    .unwrap();
    let config = load_config_or_default(dir.path()).unwrap();
    let result = run_pipeline(BIG_GATE, &config);
    assert!(result.error.is_some());
    assert!(result.output.is_none());
}

#[test]
fn invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "[grid]\nwidth = 0\n").unwrap();
    assert!(matches!(
        load_config_or_default(dir.path()),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn unknown_section_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "[router]\npasses = 3\n").unwrap();
    assert!(matches!(
        load_config_or_default(dir.path()),
        Err(ConfigError::ParseError(_))
    ));
}
