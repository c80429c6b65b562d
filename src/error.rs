use crate::overrides::OverridesError;
use thiserror::Error;

/// Top-level error type for the feature-builder library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("override error: {0}")]
    Overrides(#[from] OverridesError),
}
