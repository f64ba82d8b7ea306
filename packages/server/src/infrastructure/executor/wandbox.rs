//! Wandbox-compatible execution proxy.
//!
//! Forwards `{compiler, code}` to a `compile.json` endpoint and folds the answer
//! into an [`ExecutionOutcome`].

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::{CodeExecutor, ExecutionError, ExecutionOutcome};

#[derive(Debug, Serialize)]
struct CompileRequest<'a> {
    compiler: &'a str,
    code: &'a str,
}

/// Subset of the Wandbox `compile.json` response we care about
#[derive(Debug, Default, Deserialize)]
struct CompileResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    signal: Option<String>,
    #[serde(default)]
    compiler_error: Option<String>,
    #[serde(default)]
    program_output: Option<String>,
    #[serde(default)]
    program_error: Option<String>,
    #[serde(default)]
    program_message: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Executor backed by a Wandbox `compile.json` endpoint
pub struct WandboxExecutor {
    client: reqwest::Client,
    endpoint: String,
}

impl WandboxExecutor {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl CodeExecutor for WandboxExecutor {
    async fn execute(
        &self,
        code: &str,
        compiler: &str,
    ) -> Result<ExecutionOutcome, ExecutionError> {
        tracing::debug!("Forwarding {} byte(s) to '{}' ({})", code.len(), self.endpoint, compiler);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&CompileRequest { compiler, code })
            .send()
            .await
            .map_err(|e| ExecutionError::Unavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExecutionError::Unavailable(e.to_string()))?;

        parse_compile_response(status, &body)
    }
}

/// Fold a raw `compile.json` body into an outcome.
///
/// A body that is not JSON is reported as [`ExecutionError::MalformedResponse`]
/// carrying the raw text, so the caller can still show it to the user.
/// A non-2xx answer never counts as a successful run.
fn parse_compile_response(
    status: StatusCode,
    body: &str,
) -> Result<ExecutionOutcome, ExecutionError> {
    let response: CompileResponse = serde_json::from_str(body).map_err(|_| {
        tracing::warn!("Execution service returned non-JSON: {}", body);
        ExecutionError::MalformedResponse(body.to_string())
    })?;

    if !status.is_success() {
        tracing::warn!("Execution service answered {}", status);
    }

    let success = status.is_success() && response.status.as_deref() == Some("0");
    let stdout = response
        .program_output
        .or(response.program_message)
        .unwrap_or_default();
    let stderr = response.program_error.unwrap_or_default();
    let diagnostic = response
        .compiler_error
        .or(response.message)
        .or(response.signal.map(|signal| format!("terminated by {}", signal)))
        .or_else(|| {
            (!status.is_success()).then(|| format!("execution service answered {}", status))
        });

    Ok(ExecutionOutcome {
        success,
        stdout,
        stderr,
        diagnostic,
    })
}
