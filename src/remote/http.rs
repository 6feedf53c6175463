//! HTTP Post Service
//!
//! reqwest-backed implementation of the Remote Post Service contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::service::{NewPost, PostService, RemotePost};
use crate::domain::{DomainError, DomainResult};

/// Default posts endpoint
const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Remote service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Posts collection endpoint (GET for the collection, POST to create)
    pub base_url: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_POSTS_URL.to_string(),
        }
    }
}

/// HTTP implementation of the remote post service
pub struct HttpPostService {
    client: reqwest::Client,
    config: RemoteConfig,
}

impl HttpPostService {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl Default for HttpPostService {
    fn default() -> Self {
        Self::new(RemoteConfig::default())
    }
}

#[async_trait]
impl PostService for HttpPostService {
    async fn fetch_all(&self) -> DomainResult<Vec<RemotePost>> {
        debug!(url = %self.config.base_url, "fetching posts");
        let response = self
            .client
            .get(&self.config.base_url)
            .send()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::Network(e.to_string()))?;

        response
            .json::<Vec<RemotePost>>()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))
    }

    async fn create(&self, post: &NewPost) -> DomainResult<RemotePost> {
        debug!(url = %self.config.base_url, title = %post.title, "creating post");
        let response = self
            .client
            .post(&self.config.base_url)
            .json(post)
            .send()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::Network(e.to_string()))?;

        response
            .json::<RemotePost>()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))
    }
}
