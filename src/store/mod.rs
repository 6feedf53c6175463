//! Store Layer
//!
//! The authoritative local view of posts: state container, pure reducer
//! and the synchronization loop that serializes all mutation.

mod post_store;
mod reducer;
mod state;


pub use post_store::PostStore;
pub use reducer::{reduce, StoreEvent};
pub use state::{PostsState, RequestStatus};
