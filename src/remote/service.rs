//! Remote Post Service - Core Trait
//!
//! Defines the abstract interface to the remote post collection.
//! Implementations can use HTTP, in-memory fixtures, etc.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainResult;

/// Wire record returned by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePost {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

/// Payload for creating a post remotely
///
/// The service echoes it back as a [`RemotePost`] with an assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

/// Abstract remote post collection
///
/// All operations are async; transport failures surface as
/// `DomainError::Network` and never panic.
#[async_trait]
pub trait PostService: Send + Sync {
    /// Fetch the full post collection
    async fn fetch_all(&self) -> DomainResult<Vec<RemotePost>>;

    /// Persist a new post remotely
    async fn create(&self, post: &NewPost) -> DomainResult<RemotePost>;
}
