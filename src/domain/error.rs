//! Domain error types.

use super::pricing::RecommendationStatus;

/// Top-level error type for pricedesk.
///
/// Everything here is recoverable: callers report the condition and carry on.
#[derive(Debug, thiserror::Error)]
pub enum PricedeskError {
    #[error("catalog error: {reason}")]
    Catalog { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid product record {sku}: {reason}")]
    InvalidRecord { sku: String, reason: String },

    #[error("margin undefined for {sku}: price is zero")]
    UndefinedMargin { sku: String },

    #[error("no recommendation with id {id}")]
    NotFound { id: u64 },

    #[error("recommendation {id} already decided ({status})")]
    AlreadyDecided {
        id: u64,
        status: RecommendationStatus,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PricedeskError> for std::process::ExitCode {
    fn from(err: &PricedeskError) -> Self {
        let code: u8 = match err {
            PricedeskError::Io(_) => 1,
            PricedeskError::ConfigParse { .. }
            | PricedeskError::ConfigMissing { .. }
            | PricedeskError::ConfigInvalid { .. } => 2,
            PricedeskError::Catalog { .. } => 3,
            PricedeskError::InvalidRecord { .. } | PricedeskError::UndefinedMargin { .. } => 4,
            PricedeskError::NotFound { .. } | PricedeskError::AlreadyDecided { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
