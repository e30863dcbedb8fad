//! Shared HTTP plumbing for provider clients

use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::{AirRouteError, Result};

/// Longest error body excerpt kept in an error message
const MAX_BODY_EXCERPT: usize = 200;

/// Create the HTTP client shared by all providers. Every request is bounded by
/// the configured timeout.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds.into()))
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| AirRouteError::config(format!("Failed to create HTTP client: {e}")))
}

/// Send a request once, without retries
pub async fn send(service: &'static str, request: RequestBuilder) -> Result<Response> {
    let start_time = Instant::now();

    let response = request
        .send()
        .await
        .map_err(|e| AirRouteError::transport(service, e))?;

    let elapsed = start_time.elapsed();
    debug!(
        "{} responded {} in {:.3}s",
        service,
        response.status(),
        elapsed.as_secs_f64()
    );
    if elapsed.as_secs() > 5 {
        warn!("Slow {} response: {:.3}s", service, elapsed.as_secs_f64());
    }

    Ok(response)
}

/// Turn a non-2xx response into an upstream error
pub async fn ensure_success(service: &'static str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AirRouteError::upstream(
        service,
        format!("HTTP {status}: {}", excerpt(&body)),
    ))
}

/// Decode a JSON body
pub async fn decode_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> Result<T> {
    response.json::<T>().await.map_err(|e| {
        AirRouteError::upstream(
            service,
            format!("unreadable response: {}", e.without_url()),
        )
    })
}

/// Send, check the status and decode in one go
pub async fn get_json<T: DeserializeOwned>(
    service: &'static str,
    request: RequestBuilder,
) -> Result<T> {
    let response = send(service, request).await?;
    let response = ensure_success(service, response).await?;
    decode_json(service, response).await
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}
