//! Post Store
//!
//! Owns the state and serializes all mutation. Local actions apply
//! synchronously under the state lock; remote round trips run as explicit
//! request/response message pairs consumed by a single loop task, each
//! tagged with a correlation id.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, Notify, RwLock};
use tracing::debug;

use super::reducer::{reduce, StoreEvent};
use super::state::{PostsState, RequestStatus};
use crate::domain::{DomainResult, Post, PostId, ReactionKind};
use crate::remote::{NewPost, PostService};

/// Correlation id for one remote round trip
type RequestId = u64;

/// Remote requests dispatched to the sync loop
enum SyncRequest {
    FetchAll {
        request: RequestId,
    },
    Create {
        request: RequestId,
        local_id: PostId,
        draft: NewPost,
    },
}

/// Client-side post store synchronized with a remote post service
///
/// Views hold read-only snapshots via the selector methods; all writes go
/// through the reducer, either directly (local actions) or via the sync
/// loop (remote completions).
pub struct PostStore {
    state: Arc<RwLock<PostsState>>,
    requests: mpsc::UnboundedSender<SyncRequest>,
    pending: Arc<AtomicUsize>,
    settle_notify: Arc<Notify>,
    next_request: AtomicU64,
}

impl PostStore {
    /// Create a store backed by the given remote service and spawn its
    /// sync loop
    pub fn new(service: Arc<dyn PostService>) -> Self {
        let state = Arc::new(RwLock::new(PostsState::new()));
        let pending = Arc::new(AtomicUsize::new(0));
        let settle_notify = Arc::new(Notify::new());
        let (requests, receiver) = mpsc::unbounded_channel();

        tokio::spawn(run_sync_loop(
            state.clone(),
            service,
            receiver,
            pending.clone(),
            settle_notify.clone(),
        ));

        Self {
            state,
            requests,
            pending,
            settle_notify,
            next_request: AtomicU64::new(1),
        }
    }

    /// Request a refetch of the full remote collection (fire and forget)
    ///
    /// Status flips to Loading when the loop picks the request up; there is
    /// no in-flight deduplication, so concurrent fetches each append their
    /// own results.
    pub fn fetch_all(&self) {
        let request = self.next_request.fetch_add(1, Ordering::Relaxed);
        self.dispatch(SyncRequest::FetchAll { request });
    }

    /// Append a post optimistically and persist it remotely
    ///
    /// Returns the local id token; reconciliation swaps in the
    /// server-assigned id once the create echo arrives.
    pub async fn create_post(&self, title: &str, content: &str, author_id: u64) -> PostId {
        let post = Post::new(title.to_string(), content.to_string(), author_id);
        let local_id = post.id.clone();
        let draft = NewPost {
            title: post.title.clone(),
            body: post.body.clone(),
            user_id: author_id,
        };

        {
            let mut state = self.state.write().await;
            let _ = reduce(&mut state, StoreEvent::PostAdded(post));
        }

        let request = self.next_request.fetch_add(1, Ordering::Relaxed);
        self.dispatch(SyncRequest::Create {
            request,
            local_id: local_id.clone(),
            draft,
        });
        local_id
    }

    /// Increment one reaction counter on the post with the given id
    pub async fn add_reaction(&self, post_id: &PostId, kind: ReactionKind) -> DomainResult<()> {
        let mut state = self.state.write().await;
        reduce(
            &mut state,
            StoreEvent::ReactionAdded {
                post_id: post_id.clone(),
                kind,
            },
        )
    }

    /// Remove the post with the given id; absent ids are not an error
    pub async fn remove_post(&self, post_id: &PostId) {
        let mut state = self.state.write().await;
        let _ = reduce(&mut state, StoreEvent::PostRemoved(post_id.clone()));
    }

    /// Replace the post whose id matches, preserving its position
    pub async fn edit_post(&self, updated: Post) {
        let mut state = self.state.write().await;
        let _ = reduce(&mut state, StoreEvent::PostEdited(updated));
    }

    /// Snapshot of all posts in arrival order
    pub async fn posts(&self) -> Vec<Post> {
        self.state.read().await.posts.clone()
    }

    pub async fn status(&self) -> RequestStatus {
        self.state.read().await.status()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Exact-id lookup, cloned snapshot
    pub async fn post_by_id(&self, id: &PostId) -> Option<Post> {
        self.state.read().await.post_by_id(id).cloned()
    }

    /// Wait until every dispatched remote request has completed
    pub async fn settled(&self) {
        loop {
            let notified = self.settle_notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.pending.load(Ordering::Acquire) == 0 {
                return;
            }
            notified.await;
        }
    }

    fn dispatch(&self, request: SyncRequest) {
        self.pending.fetch_add(1, Ordering::AcqRel);
        if self.requests.send(request).is_err() {
            // Loop is gone (runtime shutdown); nothing will complete.
            self.pending.fetch_sub(1, Ordering::AcqRel);
            self.settle_notify.notify_waiters();
        }
    }
}

/// Single consumer loop: picks up requests, spawns the remote call, and
/// feeds each completion back through the reducer in arrival order.
async fn run_sync_loop(
    state: Arc<RwLock<PostsState>>,
    service: Arc<dyn PostService>,
    mut requests: mpsc::UnboundedReceiver<SyncRequest>,
    pending: Arc<AtomicUsize>,
    settle_notify: Arc<Notify>,
) {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(RequestId, StoreEvent)>();

    loop {
        tokio::select! {
            incoming = requests.recv() => match incoming {
                Some(SyncRequest::FetchAll { request }) => {
                    debug!(request, "fetch dispatched");
                    {
                        let mut state = state.write().await;
                        let _ = reduce(&mut state, StoreEvent::FetchStarted);
                    }
                    let service = service.clone();
                    let done = done_tx.clone();
                    tokio::spawn(async move {
                        let event = match service.fetch_all().await {
                            Ok(records) => StoreEvent::FetchSucceeded(records),
                            Err(e) => StoreEvent::FetchFailed(e.to_string()),
                        };
                        let _ = done.send((request, event));
                    });
                }
                Some(SyncRequest::Create { request, local_id, draft }) => {
                    debug!(request, %local_id, "create dispatched");
                    let service = service.clone();
                    let done = done_tx.clone();
                    tokio::spawn(async move {
                        let event = match service.create(&draft).await {
                            Ok(record) => StoreEvent::CreateSucceeded { local_id, record },
                            Err(e) => StoreEvent::CreateFailed {
                                local_id,
                                error: e.to_string(),
                            },
                        };
                        let _ = done.send((request, event));
                    });
                }
                // Store handle dropped; in-flight completions have nowhere
                // to land once this loop exits.
                None => break,
            },
            Some((request, event)) = done_rx.recv() => {
                {
                    let mut state = state.write().await;
                    let _ = reduce(&mut state, event);
                }
                debug!(request, "request completed");
                pending.fetch_sub(1, Ordering::AcqRel);
                settle_notify.notify_waiters();
            }
        }
    }
}
