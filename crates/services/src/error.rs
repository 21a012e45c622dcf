//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, SessionError};

/// Errors emitted by question sources.
///
/// Every variant invalidates the whole batch; there is no partial-credit
/// recovery, and from the user's perspective they all collapse into one
/// retry message ([`QuestionSourceError::user_message`]). The specific
/// variant is for logs only.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionSourceError {
    #[error("question source request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("question source returned an empty response")]
    EmptyResponse,

    #[error("question batch is empty")]
    EmptyBatch,

    #[error("malformed question payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl QuestionSourceError {
    /// The single user-facing message for any fetch failure. Retry is a
    /// manual user action; internal detail stays in the logs.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        "Gagal membuat soal. Silakan coba lagi."
    }
}

/// Errors emitted by `QuizLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("a question fetch is already in progress")]
    FetchInProgress,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Source(#[from] QuestionSourceError),
}
