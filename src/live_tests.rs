//! Live tests against a real judge deployment.
//!
//! These require a reachable service and are ignored by default:
//!
//! ```text
//! JUDGE_URL=http://localhost:2358 cargo test -- --ignored
//! ```
//!
//! `JUDGE_API_KEY` is honored when the deployment requires one.

use crate::client::HttpJudgeClient;
use crate::config::JudgeConfig;
use crate::orchestrator::run_and_evaluate;
use crate::types::{BatchRequest, TestCase, TestStatus};

/// CPython 3 on the default language manifest.
const PYTHON_LANGUAGE_ID: u32 = 71;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init();
}

fn live_config() -> JudgeConfig {
    JudgeConfig::from_env().expect("set JUDGE_URL to run live tests")
}

#[tokio::test]
#[ignore] // Requires a reachable judge service
async fn test_echo_batch_round_trip() {
    init_tracing();
    let config = live_config();
    let client = HttpJudgeClient::new(&config);

    let request = BatchRequest {
        source_code: "print(int(input()) * 2)".to_string(),
        language_id: PYTHON_LANGUAGE_ID,
        test_cases: vec![
            TestCase {
                stdin: "5".to_string(),
                expected_output: "10".to_string(),
            },
            TestCase {
                stdin: "21".to_string(),
                expected_output: "42".to_string(),
            },
        ],
    };

    let results = run_and_evaluate(&client, &request, &config.run)
        .await
        .expect("batch should dispatch");

    assert_eq!(results.len(), 2);
    for result in &results {
        assert_eq!(result.status, TestStatus::Passed);
    }
}

#[tokio::test]
#[ignore] // Requires a reachable judge service
async fn test_runtime_error_surfaces_in_actual_output() {
    init_tracing();
    let config = live_config();
    let client = HttpJudgeClient::new(&config);

    let request = BatchRequest {
        source_code: "print(1 / 0)".to_string(),
        language_id: PYTHON_LANGUAGE_ID,
        test_cases: vec![TestCase {
            stdin: "".to_string(),
            expected_output: "anything".to_string(),
        }],
    };

    let results = run_and_evaluate(&client, &request, &config.run)
        .await
        .expect("batch should dispatch");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, TestStatus::Failed);
    let actual = results[0].actual_output.as_deref().unwrap_or_default();
    assert!(
        actual.contains("ZeroDivisionError"),
        "runtime error text should be the actual output, got: {}",
        actual
    );
}

#[tokio::test]
#[ignore] // Requires a reachable judge service
async fn test_freeform_run_reports_completed() {
    init_tracing();
    let config = live_config();
    let client = HttpJudgeClient::new(&config);

    let request = BatchRequest {
        source_code: "print('hello')".to_string(),
        language_id: PYTHON_LANGUAGE_ID,
        test_cases: vec![],
    };

    let results = run_and_evaluate(&client, &request, &config.run)
        .await
        .expect("free-form run should dispatch");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, TestStatus::Completed);
    assert_eq!(
        results[0].actual_output.as_deref().map(str::trim),
        Some("hello")
    );
}
