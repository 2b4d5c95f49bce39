//! Reading `tessel.toml` from disk or from a string.

use crate::error::ConfigError;
use crate::types::PlacerConfig;
use std::path::Path;

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "tessel.toml";

/// Loads and validates the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<PlacerConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Loads `<dir>/tessel.toml` if it exists, otherwise returns the defaults.
pub fn load_config_or_default(dir: &Path) -> Result<PlacerConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        load_config(&path)
    } else {
        Ok(PlacerConfig::default())
    }
}

/// Parses and validates configuration text.
pub fn load_config_from_str(content: &str) -> Result<PlacerConfig, ConfigError> {
    let config: PlacerConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &PlacerConfig) -> Result<(), ConfigError> {
    if config.grid.width == 0 {
        return Err(ConfigError::ValidationError(
            "grid.width must be positive".to_string(),
        ));
    }
    if config.grid.height == 0 {
        return Err(ConfigError::ValidationError(
            "grid.height must be positive".to_string(),
        ));
    }
    // Coordinates are i64; half of each extent must stay representable.
    if config.grid.width > i64::MAX as u64 || config.grid.height > i64::MAX as u64 {
        return Err(ConfigError::ValidationError(
            "grid extent does not fit in a signed 64-bit coordinate".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InfeasiblePolicy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_file_is_default() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, PlacerConfig::default());
    }

    #[test]
    fn full_config() {
        let config = load_config_from_str(
            r#"
[grid]
width = 64
height = 32

[placement]
on_infeasible = "retry"
"#,
        )
        .unwrap();
        assert_eq!(config.grid.width, 64);
        assert_eq!(config.grid.height, 32);
        assert_eq!(config.placement.on_infeasible, InfeasiblePolicy::Retry);
    }

    #[test]
    fn partial_grid_keeps_other_default() {
        let config = load_config_from_str("[grid]\nwidth = 10\n").unwrap();
        assert_eq!(config.grid.width, 10);
        assert_eq!(config.grid.height, 1_000_000);
    }

    #[test]
    fn zero_width_rejected() {
        let err = load_config_from_str("[grid]\nwidth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn unknown_policy_is_parse_error() {
        let err = load_config_from_str("[placement]\non_infeasible = \"maybe\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn unknown_key_is_parse_error() {
        let err = load_config_from_str("[grid]\ndepth = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_dir_or_default() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            load_config_or_default(tmp.path()).unwrap(),
            PlacerConfig::default()
        );

        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[placement]\non_infeasible = \"fail\"\n",
        )
        .unwrap();
        let config = load_config_or_default(tmp.path()).unwrap();
        assert_eq!(config.placement.on_infeasible, InfeasiblePolicy::Fail);
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
