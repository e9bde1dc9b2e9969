use thiserror::Error;

/// Error taxonomy for the judge client.
///
/// Only `InvalidPayload` is fatal to a whole batch call; every other
/// variant is scoped to a single case and gets folded into that case's
/// outcome by the orchestrator. Timeout is deliberately not in here -
/// it is a normal `CaseOutcome`, not an error.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// Malformed batch request. Raised before anything is dispatched.
    #[error("invalid batch payload: {0}")]
    InvalidPayload(String),

    /// The remote service refused to accept a submission.
    /// Carries the raw response body for diagnostics.
    #[error("submission rejected by judge (HTTP {status}): {body}")]
    SubmissionCreate { status: u16, body: String },

    /// A status request for an in-flight token failed.
    #[error("status fetch failed (HTTP {status}): {body}")]
    StatusFetch { status: u16, body: String },

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote service answered with a shape this client cannot read.
    #[error("malformed judge response: {0}")]
    MalformedResponse(String),
}
