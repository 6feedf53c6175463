//! Store State
//!
//! Posts plus outstanding-request status, mirrored from the remote service.

use serde::{Deserialize, Serialize};

use crate::domain::{Post, PostId};

/// Lifecycle of the most recent remote request
///
/// Idle until the first fetch; a later fetch re-enters Loading from either
/// completion state. There is no terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// In-memory post collection with sync status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostsState {
    /// Posts in arrival order
    pub posts: Vec<Post>,
    pub status: RequestStatus,
    /// Message from the last failed remote request
    pub error: Option<String>,
}

impl PostsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// All posts in arrival order
    pub fn all_posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Exact-id lookup, no partial matching
    pub fn post_by_id(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|post| &post.id == id)
    }
}
