/// Errors raised synchronously by quiz session transitions.
///
/// Answer validation failures are not errors; they come back as
/// [`crate::session::Submission::Rejected`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid state: cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: crate::session::SessionPhase,
    },
}

/// Errors from the word source / history collaborators.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
