//! Judge client - request/response calls to the remote execution service.
//!
//! **Core Responsibility:**
//! Create submissions and fetch their status, hiding the service's
//! binary-safe wire encoding.
//!
//! **Critical Architectural Boundary:**
//! - Client knows the wire format (base64 fields, snake_case JSON)
//! - Client does NOT poll; one call is one round trip
//! - Client does NOT evaluate outputs
//! - Client retains no state between calls
//!
//! Source code and stdin may contain arbitrary bytes and newlines, so both
//! directions go through base64 rather than trusting JSON text transport.

use std::future::Future;

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::JudgeConfig;
use crate::error::JudgeError;
use crate::types::{SubmissionRequest, SubmissionResult, SubmissionToken};

/// Request/response surface of the remote judge.
///
/// The poller and orchestrator are generic over this, so tests run against
/// a scripted in-memory judge instead of a live deployment.
pub trait JudgeBackend {
    /// Create one submission; returns the token identifying the remote job.
    fn submit(
        &self,
        request: &SubmissionRequest,
    ) -> impl Future<Output = Result<SubmissionToken, JudgeError>> + Send;

    /// Fetch the current status of a token. Reading a status never mutates
    /// remote state; fetching an already-terminal token returns the same
    /// terminal result again.
    fn fetch_status(
        &self,
        token: &SubmissionToken,
    ) -> impl Future<Output = Result<SubmissionResult, JudgeError>> + Send;
}

#[derive(Debug, Serialize)]
struct CreateSubmissionBody {
    language_id: u32,
    source_code: String,
    stdin: String,
}

#[derive(Debug, Deserialize)]
struct CreateSubmissionResponse {
    token: String,
}

/// Status payload as it arrives. Output fields are base64 or null;
/// `status` is an opaque descriptor object carrying at least an `id`.
#[derive(Debug, Deserialize)]
struct RawStatusResponse {
    #[serde(default)]
    status_id: Option<u32>,
    #[serde(default)]
    status: Option<serde_json::Value>,
    #[serde(default)]
    stdout: Option<String>,
    #[serde(default)]
    stderr: Option<String>,
    #[serde(default)]
    compile_output: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Decode one base64 output field. Absent stays absent. The service
/// line-wraps long payloads, so whitespace is stripped before decoding;
/// a field that still is not valid base64 passes through verbatim, and
/// invalid UTF-8 decodes lossily. This function never fails.
fn decode_output_field(field: Option<String>) -> Option<String> {
    let raw = field?;
    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    match general_purpose::STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(_) => Some(raw),
    }
}

fn decode_status(
    token: &SubmissionToken,
    raw: RawStatusResponse,
) -> Result<SubmissionResult, JudgeError> {
    let status = raw.status.unwrap_or(serde_json::Value::Null);
    let status_id = match raw.status_id {
        Some(id) => id,
        // Some deployments only nest the id inside the status object.
        None => status
            .get("id")
            .and_then(|id| id.as_u64())
            .map(|id| id as u32)
            .ok_or_else(|| {
                JudgeError::MalformedResponse(format!(
                    "status payload for token {} carries no status id",
                    token
                ))
            })?,
    };

    Ok(SubmissionResult {
        token: token.0.clone(),
        status_id,
        status,
        stdout: decode_output_field(raw.stdout),
        stderr: decode_output_field(raw.stderr),
        compile_output: decode_output_field(raw.compile_output),
        message: raw.message,
    })
}

/// HTTP implementation of [`JudgeBackend`] over reqwest.
///
/// Constructed once at process start and passed by reference into the
/// orchestrator; there is no hidden global client.
pub struct HttpJudgeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpJudgeClient {
    pub fn new(config: &JudgeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("X-Auth-Token", key),
            None => request,
        }
    }
}

impl JudgeBackend for HttpJudgeClient {
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionToken, JudgeError> {
        let body = CreateSubmissionBody {
            language_id: request.language_id,
            source_code: general_purpose::STANDARD.encode(&request.source_code),
            stdin: general_purpose::STANDARD.encode(&request.stdin),
        };

        let url = format!("{}/submissions?base64_encoded=true", self.base_url);
        let response = self.authorize(self.http.post(&url).json(&body)).send().await?;

        let http_status = response.status();
        if !http_status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JudgeError::SubmissionCreate {
                status: http_status.as_u16(),
                body,
            });
        }

        let created: CreateSubmissionResponse = response.json().await?;
        debug!(
            token = %created.token,
            language_id = request.language_id,
            "Submission created"
        );
        Ok(SubmissionToken(created.token))
    }

    async fn fetch_status(&self, token: &SubmissionToken) -> Result<SubmissionResult, JudgeError> {
        let url = format!("{}/submissions/{}?base64_encoded=true", self.base_url, token);
        let response = self.authorize(self.http.get(&url)).send().await?;

        let http_status = response.status();
        if !http_status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JudgeError::StatusFetch {
                status: http_status.as_u16(),
                body,
            });
        }

        let raw: RawStatusResponse = response.json().await?;
        decode_status(token, raw)
    }
}
