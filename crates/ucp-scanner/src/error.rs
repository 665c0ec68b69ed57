use thiserror::Error;
use ucp_core::ConfigError;

/// Input that could not be turned into a probe origin.
///
/// Both variants carry the caller's raw input for diagnostics. Neither is
/// retried and no network activity happens once one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("no URL provided")]
    EmptyInput { raw: String },

    #[error("invalid URL '{raw}': {reason}")]
    MalformedUrl { raw: String, reason: String },
}

impl NormalizationError {
    /// The input exactly as the caller supplied it.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::EmptyInput { raw } | Self::MalformedUrl { raw, .. } => raw,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
