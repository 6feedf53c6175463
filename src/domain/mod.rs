//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde/chrono/uuid for
//! serialization and id generation).

mod error;
mod post;

pub use error::{DomainError, DomainResult};
pub use post::{Post, PostId, ReactionKind, Reactions};
