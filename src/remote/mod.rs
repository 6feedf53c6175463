//! Remote Layer
//!
//! Access to the Remote Post Service. The service contract is a trait so
//! the store can be exercised against fixtures as well as live HTTP.

mod http;
mod service;

pub use http::{HttpPostService, RemoteConfig};
pub use service::{NewPost, PostService, RemotePost};
