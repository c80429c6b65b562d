use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OverridesError {
    #[error("required overrides file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read overrides file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse overrides file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("override '{0}' must be a scalar value")]
    NonScalarValue(String),

    #[error("malformed override '{0}' (expected key=value)")]
    MalformedPair(String),

    #[error("unclosed reference (missing '}}')")]
    UnclosedReference,
}
