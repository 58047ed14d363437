use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid task id: {0:?}")]
    InvalidTaskId(String),

    #[error("invalid {kind} '{value}' (expected one of: {expected})")]
    InvalidValue {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("invalid command: {0}")]
    InvalidCommand(String),
}
