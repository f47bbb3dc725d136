use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Invalid meal type: {0}")]
    InvalidMealType(String),

    #[error("Analysis webhook URL is not configured")]
    Misconfigured,

    /// The cause is kept for logs only and must not reach end users.
    #[error("Analysis webhook is unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("Analysis webhook returned status {status}")]
    UpstreamRejected { status: u16, body: String },

    #[error("Analysis response has an unexpected shape: {0}")]
    UnexpectedShape(String),

    #[error("Internal server error")]
    InternalServerError,
}
