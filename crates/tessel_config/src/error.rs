//! Configuration errors.

/// Errors raised while reading or validating `tessel.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML could not be parsed into the expected shape.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A value was syntactically fine but unusable.
    #[error("validation error: {0}")]
    ValidationError(String),
}
