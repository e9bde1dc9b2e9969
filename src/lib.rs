//! Client library for a remote code-execution judge.
//!
//! Submits a learner's source code plus one or more stdin cases to an
//! external judge service, polls each submission until it reaches a
//! terminal state, and reconciles outputs against expectations to
//! produce per-case verdicts.
//!
//! Pipeline: [`orchestrator::run_and_evaluate`] validates the batch,
//! fans one submission per test case out through the [`client`], drives
//! each to a terminal / timed-out / cancelled / error outcome via the
//! [`poller`], and hands the ordered outcomes to the [`evaluator`].
//!
//! One bad test case never starves or cancels the others: per-case
//! failures surface as data in that case's result slot, and the output
//! list always has the same length and order as the input cases.

pub mod client;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod orchestrator;
pub mod poller;
pub mod types;

#[cfg(test)]
mod live_tests;

pub use client::{HttpJudgeClient, JudgeBackend};
pub use config::{JudgeConfig, PollConfig, RunConfig};
pub use error::JudgeError;
pub use evaluator::{evaluate, evaluate_case, evaluate_freeform};
pub use orchestrator::{run_and_evaluate, run_batch, run_batch_with_cancel};
pub use types::{
    BatchRequest, CaseOutcome, SubmissionRequest, SubmissionResult, SubmissionToken, TestCase,
    TestResult, TestStatus, PROCESSING_STATUS_MAX,
};
