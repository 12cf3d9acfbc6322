use thiserror::Error;

/// Errors that can occur when talking to an upstream provider
///
/// Every variant means the provider could not give a usable answer, which the
/// pipeline surfaces as "provider unavailable".
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP request to {provider} failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned HTTP {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("{provider} rejected the request with status {status}{}", detail(.message))]
    Rejected {
        provider: &'static str,
        status: String,
        message: Option<String>,
    },

    #[error("invalid response from {provider}: {reason}")]
    InvalidResponse {
        provider: &'static str,
        reason: String,
    },
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(" ({})", message),
        None => String::new(),
    }
}
