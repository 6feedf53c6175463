//! Postboard
//!
//! Client-side post store with remote synchronization.
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - remote: Remote Post Service access (HTTP)
//! - store: State container, reducer and synchronization loop

pub mod domain;
pub mod remote;
pub mod store;

pub use domain::{DomainError, DomainResult, Post, PostId, ReactionKind, Reactions};
pub use remote::{HttpPostService, NewPost, PostService, RemoteConfig, RemotePost};
pub use store::{PostStore, PostsState, RequestStatus, StoreEvent};
