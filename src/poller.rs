//! Submission poller - one token turned into a terminal outcome via
//! bounded polling.
//!
//! State machine: `Queued/Processing -> (loop) -> { Terminal | TimedOut }`,
//! with `Cancelled` as the cooperative exit. There is no transition back
//! out of a terminal state.
//!
//! Exhausting the attempt budget is a normal outcome and returns
//! [`CaseOutcome::TimedOut`]; a transport or fetch failure is an error for
//! this one case and propagates to the caller, which isolates it from
//! sibling cases.

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, trace, warn};

use crate::client::JudgeBackend;
use crate::config::PollConfig;
use crate::error::JudgeError;
use crate::types::{CaseOutcome, SubmissionToken};

/// Poll `token` until it reaches a terminal status or the budget runs out.
///
/// Makes at most `config.max_attempts` status fetches, sleeping
/// `config.interval` between non-terminal responses (never after the last
/// one). The cancel flag is checked at the top of every iteration.
pub async fn poll<B: JudgeBackend>(
    backend: &B,
    token: &SubmissionToken,
    config: &PollConfig,
    cancel: &watch::Receiver<bool>,
) -> Result<CaseOutcome, JudgeError> {
    for attempt in 1..=config.max_attempts {
        if *cancel.borrow() {
            debug!(token = %token, attempt, "Polling cancelled");
            return Ok(CaseOutcome::Cancelled);
        }

        let result = backend.fetch_status(token).await?;
        if result.is_terminal() {
            debug!(
                token = %token,
                attempt,
                status_id = result.status_id,
                "Submission reached terminal status"
            );
            return Ok(CaseOutcome::Terminal(result));
        }

        trace!(
            token = %token,
            attempt,
            status_id = result.status_id,
            "Submission still processing"
        );
        if attempt < config.max_attempts {
            sleep(config.interval).await;
        }
    }

    warn!(
        token = %token,
        attempts = config.max_attempts,
        "Poll budget exhausted; submission timed out"
    );
    Ok(CaseOutcome::TimedOut)
}
