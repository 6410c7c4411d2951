//! The request relay: cluster id + method/path/body in, normalized envelope
//! out.

use std::time::Duration;

use joint_core::{ClusterRegistry, Protocol};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::Serialize;
use tracing::debug;

use crate::error::RelayError;

/// Applied to every request; override with [`RelayClient::with_timeout`].
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Normalized response body: JSON when the server said JSON, raw text
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(v) => Some(v),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(t) => Some(t),
            ResponseBody::Json(_) => None,
        }
    }
}

/// What a relayed call produced. `success` tracks the 2xx range; the status
/// code is always included so callers can branch on application-level
/// failures (401, index-already-exists, ...).
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub status: u16,
    pub body: ResponseBody,
}

/// Resolves cluster ids to connection profiles and dispatches authenticated
/// HTTP requests against them.
#[derive(Clone)]
pub struct RelayClient {
    registry: ClusterRegistry,
    /// Standard client with certificate validation.
    verified: Client,
    /// Client for `https` profiles that opted out of certificate validation.
    insecure: Client,
}

impl RelayClient {
    pub fn new(registry: ClusterRegistry) -> Result<Self, RelayError> {
        Self::with_timeout(registry, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        registry: ClusterRegistry,
        timeout: Duration,
    ) -> Result<Self, RelayError> {
        let verified = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RelayError::Client)?;
        let insecure = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(RelayError::Client)?;
        Ok(Self {
            registry,
            verified,
            insecure,
        })
    }

    /// Dispatch one request against the cluster registered under
    /// `cluster_id`.
    ///
    /// A transport-level failure (DNS, refused, timeout, TLS) is an error; a
    /// well-formed non-2xx response is a `success: false` envelope. Exactly
    /// one attempt — retry policy belongs to the caller.
    pub async fn request(
        &self,
        cluster_id: &str,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ResponseEnvelope, RelayError> {
        let profile = self.registry.get(cluster_id).await?;

        let url = if path.starts_with('/') {
            format!("{}{}", profile.base_url(), path)
        } else {
            format!("{}/{}", profile.base_url(), path)
        };

        let client = if profile.protocol == Protocol::Https && !profile.verify {
            &self.insecure
        } else {
            &self.verified
        };

        debug!(cluster = %profile.name, %method, %url, "relaying request");

        let mut request = client.request(method, &url);

        // Empty or whitespace-only username means no auth header at all.
        if let Some(username) = profile.username.as_deref().filter(|u| !u.trim().is_empty()) {
            let password = profile.password.as_deref().unwrap_or("");
            request = request.basic_auth(username, Some(password));
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| RelayError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));

        let text = response
            .text()
            .await
            .map_err(|source| RelayError::Transport { url, source })?;

        let body = if is_json {
            match serde_json::from_str(&text) {
                Ok(json) => ResponseBody::Json(json),
                // The server lied about the content type; report what it said.
                Err(_) => ResponseBody::Text(text),
            }
        } else {
            ResponseBody::Text(text)
        };

        Ok(ResponseEnvelope {
            success: status.is_success(),
            status: status.as_u16(),
            body,
        })
    }
}
