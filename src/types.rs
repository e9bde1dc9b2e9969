use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::JudgeError;

/// Highest status id the remote service uses for a still-running job.
/// 1 = queued, 2 = processing; anything above is terminal.
pub const PROCESSING_STATUS_MAX: u32 = 2;

/// Immutable input for one remote execution: one source, one stdin.
/// Created once per test case at dispatch time, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRequest {
    pub source_code: String,
    pub language_id: u32,
    pub stdin: String,
}

/// Opaque identifier for one in-flight job on the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionToken(pub String);

impl fmt::Display for SubmissionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decoded status of one submission as reported by the remote service.
///
/// Output fields are already decoded from the wire's base64; absent fields
/// stay `None`. The `status` object is opaque passthrough for presentation -
/// this crate only interprets `status_id`.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResult {
    pub token: String,
    pub status_id: u32,
    pub status: serde_json::Value,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub message: Option<String>,
}

impl SubmissionResult {
    /// Whether the remote job will not change further.
    pub fn is_terminal(&self) -> bool {
        self.status_id > PROCESSING_STATUS_MAX
    }
}

/// Fully resolved outcome of one case, consumed by the evaluator.
///
/// Tagged so the evaluation stage never has to guess from nullable fields:
/// a case is exactly one of terminal, timed out, cancelled, or failed.
#[derive(Debug, Clone)]
pub enum CaseOutcome {
    /// The remote job reached a terminal status and was decoded.
    Terminal(SubmissionResult),
    /// The poll budget ran out before a terminal status arrived.
    /// This is a first-class outcome, not an error.
    TimedOut,
    /// Polling stopped because the batch was cancelled.
    Cancelled,
    /// Submission creation or polling failed for this case alone.
    Error(String),
}

/// One test case supplied by the caller; read-only through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub stdin: String,
    pub expected_output: String,
}

/// Presentation status of one evaluated case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    /// Free-form run finished; no pass/fail judgement was made.
    Completed,
    Error,
    Cancelled,
    /// Set by callers while a batch is still in flight; never produced
    /// by the evaluator.
    Running,
    Pending,
}

/// Verdict for one test case. Produced by the evaluator, one per input
/// case, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub test_case: TestCase,
    pub status: TestStatus,
    pub actual_output: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub error: Option<String>,
}

/// One batch: a single source + language fanned out across test cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub source_code: String,
    pub language_id: u32,
    pub test_cases: Vec<TestCase>,
}

impl BatchRequest {
    /// Reject malformed batches before anything touches the network.
    /// An empty case list is valid: it selects the free-form run mode.
    pub fn validate(&self) -> Result<(), JudgeError> {
        if self.source_code.trim().is_empty() {
            return Err(JudgeError::InvalidPayload("source code is empty".into()));
        }
        if self.language_id == 0 {
            return Err(JudgeError::InvalidPayload(
                "language id must be a positive integer".into(),
            ));
        }
        Ok(())
    }
}
