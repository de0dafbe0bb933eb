//! Centralized error types for VoiceUp.

use thiserror::Error;

/// Main error type for VoiceUp operations.
#[derive(Error, Debug)]
pub enum VoiceupError {
    #[error("Conversation not found: {0}")]
    ConversationNotFound(i64),

    #[error("Message not found: {0}")]
    MessageNotFound(i64),

    #[error("Analysis not found: {0}")]
    AnalysisNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    Database(#[from] voiceup_db::DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for VoiceUp operations.
pub type VoiceupResult<T> = Result<T, VoiceupError>;

impl VoiceupError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Whether the error means the requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ConversationNotFound(_)
                | Self::MessageNotFound(_)
                | Self::AnalysisNotFound(_)
                | Self::Database(voiceup_db::DbError::NotFound(_))
        )
    }
}
