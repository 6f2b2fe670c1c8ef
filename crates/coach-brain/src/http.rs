//! Shared JSON POST with bounded retry.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use tracing::warn;

use crate::api_types::ApiErrorBody;
use crate::error::BrainError;

const RETRY_DELAY: Duration = Duration::from_millis(200);

/// Build an HTTP client with the given request timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, BrainError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

/// POST `body` as JSON with bearer auth.
///
/// Transport errors and 5xx responses are retried up to `max_retries` times;
/// any other non-2xx status fails immediately.
pub(crate) async fn post_json<T: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    bearer: &str,
    body: &T,
    max_retries: u32,
) -> Result<Response, BrainError> {
    let mut attempt = 0;
    loop {
        match send_once(client, url, bearer, body).await {
            Ok(response) => return Ok(response),
            Err(err) if err.is_retryable() && attempt < max_retries => {
                attempt += 1;
                warn!(url, attempt, error = %err, "Provider call failed, retrying");
                tokio::time::sleep(RETRY_DELAY * attempt).await;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn send_once<T: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    bearer: &str,
    body: &T,
) -> Result<Response, BrainError> {
    let response = client
        .post(url)
        .bearer_auth(bearer)
        .json(body)
        .send()
        .await
        .map_err(|e| BrainError::Network(format!("Failed to send request: {}", e)))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&error_text)
        .ok()
        .and_then(|body| body.text())
        .unwrap_or(error_text);

    Err(BrainError::Api {
        status: status.as_u16(),
        message,
    })
}
