use crate::columns::Role;
use thiserror::Error;

/// Errors raised while building or replacing a canonical risk table
///
/// Only structural problems surface here. A missing or unparsable value in a
/// single cell never becomes an error; it degrades to an absent field instead.
#[derive(Debug, Error)]
pub enum RiskError {
    /// A column the canonical table cannot exist without was not found
    #[error("missing required column: {0}")]
    MissingRequiredColumn(Role),

    /// A threshold pair whose lower cut point is above its upper one
    #[error("invalid thresholds for {scale}: {lower} must not exceed {upper}")]
    InvalidThresholds {
        scale: &'static str,
        lower: f64,
        upper: f64,
    },

    /// The upload authorizer rejected the supplied secret
    #[error("upload not authorized")]
    Unauthorized,

    /// The credential itself could not be created or parsed
    #[error("credential error: {0}")]
    Credential(String),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
