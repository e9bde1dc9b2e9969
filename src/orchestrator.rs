//! Batch orchestrator - fan out one source across many stdin cases.
//!
//! **Core Responsibility:**
//! Run one submission per test case concurrently and assemble an
//! order-preserving result list.
//!
//! **Resilience property:**
//! Each case's submit + poll sequence is isolated. A submission or fetch
//! failure becomes that case's own `Error` outcome and never aborts or
//! starves sibling cases. Only payload validation fails the whole call,
//! and it does so before anything touches the network.
//!
//! **Concurrency model:**
//! Single-task cooperative fan-out: all case futures run under one
//! `join_all`, so the ordering contract (`out[i]` belongs to `stdins[i]`)
//! holds regardless of which case finishes first. A semaphore caps how
//! many submissions are in flight at once so a large batch cannot flood
//! the remote service.

use futures_util::future::join_all;
use tokio::sync::{watch, Semaphore};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::JudgeBackend;
use crate::config::{PollConfig, RunConfig};
use crate::error::JudgeError;
use crate::evaluator;
use crate::poller;
use crate::types::{BatchRequest, CaseOutcome, SubmissionRequest, TestResult};

/// Run every case of `request` and return raw outcomes in input order.
pub async fn run_batch<B: JudgeBackend>(
    backend: &B,
    request: &BatchRequest,
    config: &RunConfig,
) -> Result<Vec<CaseOutcome>, JudgeError> {
    let (_tx, cancel) = watch::channel(false);
    run_batch_with_cancel(backend, request, config, cancel).await
}

/// Like [`run_batch`], with a cancellation signal. Flipping the paired
/// sender to `true` stops further polling cooperatively; cases that have
/// not reached a terminal status resolve as `Cancelled`.
pub async fn run_batch_with_cancel<B: JudgeBackend>(
    backend: &B,
    request: &BatchRequest,
    config: &RunConfig,
    cancel: watch::Receiver<bool>,
) -> Result<Vec<CaseOutcome>, JudgeError> {
    request.validate()?;

    let batch_id = Uuid::new_v4();
    info!(
        batch_id = %batch_id,
        language_id = request.language_id,
        cases = request.test_cases.len(),
        max_in_flight = config.max_in_flight,
        "Dispatching batch"
    );

    let limiter = Semaphore::new(config.max_in_flight.max(1));
    let poll_cfg = &config.poll;

    let cases = request.test_cases.iter().enumerate().map(|(index, case)| {
        let cancel = cancel.clone();
        let limiter = &limiter;
        async move {
            let _permit = match limiter.acquire().await {
                Ok(permit) => permit,
                Err(error) => return CaseOutcome::Error(error.to_string()),
            };
            let outcome = run_case(backend, request, &case.stdin, poll_cfg, &cancel).await;
            match &outcome {
                CaseOutcome::Terminal(result) => debug!(
                    batch_id = %batch_id,
                    case = index,
                    status_id = result.status_id,
                    "Case reached terminal status"
                ),
                CaseOutcome::TimedOut => warn!(
                    batch_id = %batch_id,
                    case = index,
                    "Case timed out"
                ),
                CaseOutcome::Cancelled => debug!(
                    batch_id = %batch_id,
                    case = index,
                    "Case cancelled"
                ),
                CaseOutcome::Error(message) => warn!(
                    batch_id = %batch_id,
                    case = index,
                    error = %message,
                    "Case failed"
                ),
            }
            outcome
        }
    });

    // join_all is the join barrier: it resolves in slot order no matter
    // which underlying poll completes first.
    let outcomes = join_all(cases).await;

    info!(batch_id = %batch_id, cases = outcomes.len(), "Batch complete");
    Ok(outcomes)
}

/// One isolated submit + poll. Every failure is folded into this case's
/// own outcome so sibling cases keep running.
async fn run_case<B: JudgeBackend>(
    backend: &B,
    request: &BatchRequest,
    stdin: &str,
    poll_cfg: &PollConfig,
    cancel: &watch::Receiver<bool>,
) -> CaseOutcome {
    if *cancel.borrow() {
        return CaseOutcome::Cancelled;
    }

    let submission = SubmissionRequest {
        source_code: request.source_code.clone(),
        language_id: request.language_id,
        stdin: stdin.to_string(),
    };

    let token = match backend.submit(&submission).await {
        Ok(token) => token,
        Err(error) => return CaseOutcome::Error(error.to_string()),
    };

    match poller::poll(backend, &token, poll_cfg, cancel).await {
        Ok(outcome) => outcome,
        Err(error) => CaseOutcome::Error(error.to_string()),
    }
}

/// Full pipeline: validate, fan out, evaluate.
///
/// With an empty case list this switches to the free-form run mode: the
/// code executes once with empty stdin and the single result carries no
/// pass/fail judgement.
pub async fn run_and_evaluate<B: JudgeBackend>(
    backend: &B,
    request: &BatchRequest,
    config: &RunConfig,
) -> Result<Vec<TestResult>, JudgeError> {
    if request.test_cases.is_empty() {
        request.validate()?;
        debug!(language_id = request.language_id, "Free-form run");
        let (_tx, cancel) = watch::channel(false);
        let outcome = run_case(backend, request, "", &config.poll, &cancel).await;
        return Ok(vec![evaluator::evaluate_freeform(&outcome)]);
    }

    let outcomes = run_batch(backend, request, config).await?;
    Ok(evaluator::evaluate(&request.test_cases, &outcomes))
}
