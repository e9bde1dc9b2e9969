//! Result evaluator - verdicts from resolved case outcomes.
//!
//! **Core Responsibility:**
//! Compare the derived actual output against the expected output and
//! classify each case.
//!
//! **Critical Properties:**
//! - Knows nothing about the transport
//! - Knows nothing about polling
//! - Pure function: (test cases, outcomes) -> verdicts
//!
//! **Comparison Rules:**
//! - Trim surrounding whitespace on both sides: YES
//! - Exact string equality otherwise: YES (case sensitive, no numeric
//!   tolerance, no multi-line diffing)
//! - Non-empty stderr or compile output always fails the case, even when
//!   stdout matches the expected output

use crate::types::{CaseOutcome, SubmissionResult, TestCase, TestResult, TestStatus};

/// Actual output reported for a case whose poll budget ran out.
pub const TIMED_OUT_OUTPUT: &str = "Timed out";
/// Actual output reported when the terminal result carried nothing at all.
pub const NO_OUTPUT: &str = "No output";

fn normalize_output(output: &str) -> &str {
    output.trim()
}

fn field_is_empty(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}

/// Derive the "actual output" of a terminal result, in priority order:
/// stdout (if non-empty after trimming), then stderr, then compile
/// output, then the `"No output"` literal.
fn derive_from_result(result: &SubmissionResult) -> String {
    if let Some(stdout) = &result.stdout {
        if !stdout.trim().is_empty() {
            return stdout.clone();
        }
    }
    if let Some(stderr) = &result.stderr {
        if !stderr.is_empty() {
            return stderr.clone();
        }
    }
    if let Some(compile_output) = &result.compile_output {
        if !compile_output.is_empty() {
            return compile_output.clone();
        }
    }
    NO_OUTPUT.to_string()
}

/// Derive the "actual output" for any resolved outcome. Timed-out cases
/// report the `"Timed out"` literal.
pub fn derive_actual_output(outcome: &CaseOutcome) -> String {
    match outcome {
        CaseOutcome::Terminal(result) => derive_from_result(result),
        CaseOutcome::TimedOut => TIMED_OUT_OUTPUT.to_string(),
        CaseOutcome::Cancelled | CaseOutcome::Error(_) => NO_OUTPUT.to_string(),
    }
}

/// Classify one case.
///
/// `passed` requires all three at once: trimmed actual equals trimmed
/// expected, empty stderr, empty compile output. Everything else that
/// reached a terminal status is `failed`; a stray character fails the
/// case by design.
pub fn evaluate_case(case: &TestCase, outcome: &CaseOutcome) -> TestResult {
    match outcome {
        CaseOutcome::Error(message) => TestResult {
            test_case: case.clone(),
            status: TestStatus::Error,
            actual_output: None,
            stderr: None,
            compile_output: None,
            error: Some(message.clone()),
        },
        CaseOutcome::Cancelled => TestResult {
            test_case: case.clone(),
            status: TestStatus::Cancelled,
            actual_output: None,
            stderr: None,
            compile_output: None,
            error: None,
        },
        CaseOutcome::TimedOut => TestResult {
            test_case: case.clone(),
            status: TestStatus::Failed,
            actual_output: Some(TIMED_OUT_OUTPUT.to_string()),
            stderr: None,
            compile_output: None,
            error: None,
        },
        CaseOutcome::Terminal(result) => {
            let actual = derive_from_result(result);
            let clean = field_is_empty(&result.stderr) && field_is_empty(&result.compile_output);
            let passed = clean
                && normalize_output(&actual) == normalize_output(&case.expected_output);

            TestResult {
                test_case: case.clone(),
                status: if passed {
                    TestStatus::Passed
                } else {
                    TestStatus::Failed
                },
                actual_output: Some(actual),
                stderr: result.stderr.clone(),
                compile_output: result.compile_output.clone(),
                error: None,
            }
        }
    }
}

/// Evaluate a whole batch. `outcomes[i]` must belong to `cases[i]`; the
/// returned list preserves that length and order.
pub fn evaluate(cases: &[TestCase], outcomes: &[CaseOutcome]) -> Vec<TestResult> {
    debug_assert_eq!(cases.len(), outcomes.len());
    cases
        .iter()
        .zip(outcomes)
        .map(|(case, outcome)| evaluate_case(case, outcome))
        .collect()
}

/// Evaluate a free-form run (no test cases): one informational result
/// with no pass/fail judgement, using the same actual-output derivation.
pub fn evaluate_freeform(outcome: &CaseOutcome) -> TestResult {
    let test_case = TestCase {
        stdin: String::new(),
        expected_output: String::new(),
    };

    match outcome {
        CaseOutcome::Error(message) => TestResult {
            test_case,
            status: TestStatus::Error,
            actual_output: None,
            stderr: None,
            compile_output: None,
            error: Some(message.clone()),
        },
        CaseOutcome::Cancelled => TestResult {
            test_case,
            status: TestStatus::Cancelled,
            actual_output: None,
            stderr: None,
            compile_output: None,
            error: None,
        },
        CaseOutcome::Terminal(result) => TestResult {
            test_case,
            status: TestStatus::Completed,
            actual_output: Some(derive_actual_output(outcome)),
            stderr: result.stderr.clone(),
            compile_output: result.compile_output.clone(),
            error: None,
        },
        CaseOutcome::TimedOut => TestResult {
            test_case,
            status: TestStatus::Completed,
            actual_output: Some(derive_actual_output(outcome)),
            stderr: None,
            compile_output: None,
            error: None,
        },
    }
}
