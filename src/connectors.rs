use bytes::Bytes;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

use crate::{ClientConfig, DecodeError, ImportConfig};

#[derive(Debug, thiserror::Error)]
pub enum DawaError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("error with request {url}")]
    RequestFailed { url: String },
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error payload reported by the service for statuses of 400 and above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceError {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
    /// The request that failed. Filled in by the client.
    #[serde(skip)]
    pub url: String,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}. Details:{:?}. Request URL:{}",
            self.kind, self.title, self.details, self.url
        )
    }
}

impl std::error::Error for ServiceError {}

/// Issues GET requests against the service and classifies the responses.
#[derive(Clone, Debug)]
pub struct HttpConnector {
    client: Client,
    host: Option<String>,
    import: ImportConfig,
}

impl HttpConnector {
    pub fn new(config: &ClientConfig) -> Result<Self, DawaError> {
        Self::with_import_config(config, ImportConfig::default())
    }

    pub fn with_import_config(
        config: &ClientConfig,
        import: ImportConfig,
    ) -> Result<Self, DawaError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            host: config.host.clone(),
            import,
        })
    }

    /// Host substituted for the default one, if configured.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Settings applied to streams created from this connector's responses.
    pub fn import_config(&self) -> &ImportConfig {
        &self.import
    }

    /// Sends the request. Statuses below 400 hand back the response with its
    /// body unread; anything else is turned into an error.
    #[instrument(skip(self))]
    pub async fn get(&self, url: &str) -> Result<Response, DawaError> {
        let response = self.client.get(url).send().await?;
        crate::metrics::inc_requests();
        let status = response.status();
        debug!(status = status.as_u16(), "response received");
        if status.as_u16() < 400 {
            return Ok(response);
        }
        Err(classify_error_body(url, response.bytes().await))
    }
}

/// Decodes an error body into a [`ServiceError`]. An empty, unreadable or
/// malformed body gives [`DawaError::RequestFailed`].
pub(crate) fn classify_error_body(url: &str, body: Result<Bytes, reqwest::Error>) -> DawaError {
    let body = match body {
        Ok(body) if !body.is_empty() => body,
        _ => {
            return DawaError::RequestFailed {
                url: url.to_string(),
            }
        }
    };
    match serde_json::from_slice::<ServiceError>(&body) {
        Ok(mut error) => {
            error.url = url.to_string();
            DawaError::Service(error)
        }
        Err(_) => DawaError::RequestFailed {
            url: url.to_string(),
        },
    }
}
