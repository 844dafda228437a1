use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    #[error("No session token stored")]
    TokenMissing,

    #[error("Session token has expired")]
    TokenExpired,

    #[error("Malformed session token: {0}")]
    TokenMalformed(String),

    #[error("Role mismatch: required '{required}', found {actual:?}")]
    RoleMismatch {
        required: String,
        actual: Option<String>,
    },

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Server rejected request ({status}): {message}")]
    ServerRejected { status: u16, message: String },

    #[error("Could not decode response: {0}")]
    DecodeResponse(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::TokenMissing => "TOKEN_MISSING",
            AppError::TokenExpired => "TOKEN_EXPIRED",
            AppError::TokenMalformed(_) => "TOKEN_MALFORMED",
            AppError::RoleMismatch { .. } => "ROLE_MISMATCH",
            AppError::NetworkFailure(_) => "NETWORK_FAILURE",
            AppError::ServerRejected { .. } => "SERVER_REJECTED",
            AppError::DecodeResponse(_) => "DECODE_RESPONSE",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::StorageError(_) => "STORAGE_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
        }
    }

    /// Text shown inline or in a toast. Server-provided messages win when present.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ServerRejected { message, .. } if !message.is_empty() => message.clone(),
            AppError::ServerRejected { status, .. } => format!("HTTP {}", status),
            AppError::NetworkFailure(_) => "Network error, please try again.".to_string(),
            AppError::ValidationError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::DecodeResponse(err.to_string())
        } else {
            AppError::NetworkFailure(err.to_string())
        }
    }
}
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::DecodeResponse(err.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
