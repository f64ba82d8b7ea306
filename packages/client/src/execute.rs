//! Client for the relay's `POST /api/execute` endpoint.

use tandem_server::infrastructure::dto::http::{ExecuteRequestDto, ExecuteResponseDto};

use crate::error::ClientError;

/// Calls the execution proxy of the relay
#[derive(Debug, Clone)]
pub struct ExecuteClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ExecuteClient {
    /// `api_url` is the relay's HTTP base, e.g. `http://127.0.0.1:5000`
    pub fn new(api_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/api/execute", api_url.trim_end_matches('/')),
        }
    }

    /// Execute `code` and return the outcome
    ///
    /// Error statuses from the relay still carry an outcome body, which is
    /// returned as-is so the diagnostic can be shown.
    pub async fn run(
        &self,
        code: String,
        compiler: Option<String>,
    ) -> Result<ExecuteResponseDto, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&ExecuteRequestDto { code, compiler })
            .send()
            .await
            .map_err(|e| ClientError::ExecutionError(e.to_string()))?;

        let status = response.status();
        response.json::<ExecuteResponseDto>().await.map_err(|_| {
            ClientError::ExecutionError(format!("unexpected response ({})", status))
        })
    }
}
