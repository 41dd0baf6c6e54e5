use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to load collection '{collection}': HTTP {status}")]
    FetchFailure { collection: String, status: u16 },

    #[error("Order update failed for collection '{collection}' (items: {failed:?})")]
    WriteFailure { collection: String, failed: Vec<i64> },

    #[error("Item {id} no longer exists in collection '{collection}'")]
    StaleItem { collection: String, id: i64 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl AdminError {
    /// Failures the caller can fix by re-issuing the same operation after the
    /// next successful refetch.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AdminError::WriteFailure { .. }
                | AdminError::StaleItem { .. }
                | AdminError::FetchFailure { .. }
                | AdminError::ApiError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;
