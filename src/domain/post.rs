//! Post Entity
//!
//! A user-authored record with title, body, author reference, creation
//! timestamp and per-kind reaction counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post identifier
///
/// Server-assigned numeric ids come back from the remote service; posts
/// created locally carry a generated token until reconciliation swaps in
/// the remote id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Remote(u64),
    Local(String),
}

impl PostId {
    /// Generate a fresh local token
    pub fn generate() -> Self {
        PostId::Local(Uuid::new_v4().to_string())
    }

    /// Whether this id is a local token not yet reconciled with the server
    pub fn is_local(&self) -> bool {
        matches!(self, PostId::Local(_))
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostId::Remote(id) => write!(f, "{}", id),
            PostId::Local(token) => write!(f, "{}", token),
        }
    }
}

/// Reaction kind determines which counter a reaction lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReactionKind {
    ThumbsUp,
    Wow,
    Heart,
    Rocket,
    Coffee,
}

impl ReactionKind {
    /// All kinds, in display order
    pub const ALL: [ReactionKind; 5] = [
        ReactionKind::ThumbsUp,
        ReactionKind::Wow,
        ReactionKind::Heart,
        ReactionKind::Rocket,
        ReactionKind::Coffee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::ThumbsUp => "thumbsUp",
            ReactionKind::Wow => "wow",
            ReactionKind::Heart => "heart",
            ReactionKind::Rocket => "rocket",
            ReactionKind::Coffee => "coffee",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "thumbsUp" => Some(ReactionKind::ThumbsUp),
            "wow" => Some(ReactionKind::Wow),
            "heart" => Some(ReactionKind::Heart),
            "rocket" => Some(ReactionKind::Rocket),
            "coffee" => Some(ReactionKind::Coffee),
            _ => None,
        }
    }

    /// Emoji shown on the reaction button
    pub fn emoji(&self) -> &'static str {
        match self {
            ReactionKind::ThumbsUp => "👍",
            ReactionKind::Wow => "😮",
            ReactionKind::Heart => "❤️",
            ReactionKind::Rocket => "🚀",
            ReactionKind::Coffee => "☕",
        }
    }
}

/// Per-post reaction counters
///
/// One field per kind, so every post always carries every counter and
/// nothing else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reactions {
    pub thumbs_up: u32,
    pub wow: u32,
    pub heart: u32,
    pub rocket: u32,
    pub coffee: u32,
}

impl Reactions {
    /// Current count for one kind
    pub fn count(&self, kind: ReactionKind) -> u32 {
        match kind {
            ReactionKind::ThumbsUp => self.thumbs_up,
            ReactionKind::Wow => self.wow,
            ReactionKind::Heart => self.heart,
            ReactionKind::Rocket => self.rocket,
            ReactionKind::Coffee => self.coffee,
        }
    }

    /// Increment the counter for one kind by exactly 1
    pub fn add(&mut self, kind: ReactionKind) {
        match kind {
            ReactionKind::ThumbsUp => self.thumbs_up += 1,
            ReactionKind::Wow => self.wow += 1,
            ReactionKind::Heart => self.heart += 1,
            ReactionKind::Rocket => self.rocket += 1,
            ReactionKind::Coffee => self.coffee += 1,
        }
    }

    /// Sum of all counters
    pub fn total(&self) -> u32 {
        self.thumbs_up + self.wow + self.heart + self.rocket + self.coffee
    }
}

/// A user-authored post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier within the store
    pub id: PostId,
    /// Post title
    pub title: String,
    /// Post body content
    pub body: String,
    /// Reference to an external author entity, not owned here
    pub author_id: u64,
    /// Creation timestamp, assigned locally when the source provides none
    pub created_at: DateTime<Utc>,
    /// Reaction counters, one per kind
    pub reactions: Reactions,
}

impl Post {
    /// Create a new local post with a fresh id token, the current
    /// timestamp and zeroed reactions
    pub fn new(title: String, body: String, author_id: u64) -> Self {
        Self {
            id: PostId::generate(),
            title,
            body,
            author_id,
            created_at: Utc::now(),
            reactions: Reactions::default(),
        }
    }
}
