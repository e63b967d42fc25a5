//! Optional remote recommendation source.
//!
//! The remote function receives `{ "profile": ... }` and answers with
//! `{ "recommendations": [...] }`. Its output is trusted as-is; callers fall
//! back to the local engine on any [`RemoteError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::Profile;
use super::recommendation::Recommendation;
use crate::config::RemoteConfig;

/// Alternate producer of recommendations (e.g. an LLM-backed function).
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    async fn recommend(&self, profile: &Profile) -> Result<Vec<Recommendation>, RemoteError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Transport failure, including timeouts.
    #[error("remote request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("remote returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("remote payload is not a recommendation list: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct RemoteRequest<'a> {
    pub profile: &'a Profile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemoteResponse {
    pub recommendations: Vec<Recommendation>,
}

/// HTTP client for the remote recommendation function.
pub struct RemoteRecommender {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl RemoteRecommender {
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RecommendationSource for RemoteRecommender {
    fn name(&self) -> &str {
        "remote"
    }

    async fn recommend(&self, profile: &Profile) -> Result<Vec<Recommendation>, RemoteError> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&RemoteRequest { profile });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let payload: RemoteResponse = serde_json::from_slice(&body)?;
        Ok(payload.recommendations)
    }
}
