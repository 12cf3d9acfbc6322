use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use crate::services::ProviderError;

/// Build the HTTP client shared by a provider
pub fn build_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ProviderError::Client)
}

/// Read a successful response body as JSON
///
/// Non-2xx responses become `ProviderError::Status`.
pub async fn read_json<T: DeserializeOwned>(
    provider: &'static str,
    response: Response,
) -> Result<T, ProviderError> {
    let body = read_body(provider, response).await?;

    serde_json::from_str(&body).map_err(|e| ProviderError::InvalidResponse {
        provider,
        reason: e.to_string(),
    })
}

/// Read a successful response body as text
pub async fn read_body(provider: &'static str, response: Response) -> Result<String, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("{} responded {} with body: {}", provider, status, body);
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|source| ProviderError::Request { provider, source })
}
