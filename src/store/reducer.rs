//! Store Reducer
//!
//! Every mutation of [`PostsState`] flows through [`reduce`], whether it
//! comes from a local action or from a completed remote round trip. The
//! reducer holds no ambient state, so ordering is decided entirely by the
//! event stream feeding it.

use chrono::{Duration, Utc};
use tracing::warn;

use super::state::{PostsState, RequestStatus};
use crate::domain::{DomainError, DomainResult, Post, PostId, ReactionKind, Reactions};
use crate::remote::RemotePost;

/// Events accepted by the reducer
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A fetch request was picked up by the sync loop
    FetchStarted,
    /// Fetch completed with the full remote collection
    FetchSucceeded(Vec<RemotePost>),
    FetchFailed(String),
    /// Optimistic local append from create_post
    PostAdded(Post),
    /// Remote create echoed a record back; reconciles the optimistic entry
    CreateSucceeded {
        local_id: PostId,
        record: RemotePost,
    },
    CreateFailed {
        local_id: PostId,
        error: String,
    },
    ReactionAdded {
        post_id: PostId,
        kind: ReactionKind,
    },
    PostRemoved(PostId),
    PostEdited(Post),
}

/// Apply one event to the state
///
/// Only `ReactionAdded` on an unknown id is fallible; every other event
/// leaves the state valid regardless of input.
pub fn reduce(state: &mut PostsState, event: StoreEvent) -> DomainResult<()> {
    match event {
        StoreEvent::FetchStarted => {
            state.status = RequestStatus::Loading;
            Ok(())
        }
        StoreEvent::FetchSucceeded(records) => {
            state.status = RequestStatus::Succeeded;
            let now = Utc::now();
            // The remote source carries no timestamps; synthesize a
            // strictly descending recency per arrival index.
            for (i, record) in records.into_iter().enumerate() {
                state.posts.push(Post {
                    id: PostId::Remote(record.id),
                    title: record.title,
                    body: record.body,
                    author_id: record.user_id,
                    created_at: now - Duration::minutes(i as i64 + 1),
                    reactions: Reactions::default(),
                });
            }
            Ok(())
        }
        StoreEvent::FetchFailed(message) => {
            state.status = RequestStatus::Failed;
            state.error = Some(message);
            Ok(())
        }
        StoreEvent::PostAdded(post) => {
            state.posts.push(post);
            Ok(())
        }
        StoreEvent::CreateSucceeded { local_id, record } => {
            match state.posts.iter_mut().find(|post| post.id == local_id) {
                Some(post) => {
                    // Replace in place; reactions gathered while the
                    // request was in flight are kept.
                    post.id = PostId::Remote(record.id);
                    post.title = record.title;
                    post.body = record.body;
                    post.author_id = record.user_id;
                }
                None => {
                    // Removed while in flight; removal wins.
                    warn!(%local_id, "dropping create echo for removed post");
                }
            }
            Ok(())
        }
        StoreEvent::CreateFailed { local_id, error } => {
            warn!(%local_id, %error, "remote create failed");
            state.status = RequestStatus::Failed;
            state.error = Some(error);
            Ok(())
        }
        StoreEvent::ReactionAdded { post_id, kind } => {
            match state.posts.iter_mut().find(|post| post.id == post_id) {
                Some(post) => {
                    post.reactions.add(kind);
                    Ok(())
                }
                None => Err(DomainError::NotFound(format!(
                    "no post with id {}",
                    post_id
                ))),
            }
        }
        StoreEvent::PostRemoved(id) => {
            state.posts.retain(|post| post.id != id);
            Ok(())
        }
        StoreEvent::PostEdited(updated) => {
            if let Some(post) = state.posts.iter_mut().find(|post| post.id == updated.id) {
                *post = updated;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(id: u64, title: &str) -> RemotePost {
        RemotePost {
            id,
            title: title.to_string(),
            body: "body".to_string(),
            user_id: 1,
        }
    }

    #[test]
    fn test_fetch_status_transitions() {
        let mut state = PostsState::new();
        assert_eq!(state.status, RequestStatus::Idle);

        reduce(&mut state, StoreEvent::FetchStarted).unwrap();
        assert_eq!(state.status, RequestStatus::Loading);

        reduce(&mut state, StoreEvent::FetchSucceeded(vec![])).unwrap();
        assert_eq!(state.status, RequestStatus::Succeeded);

        // A later fetch re-enters Loading and may fail.
        reduce(&mut state, StoreEvent::FetchStarted).unwrap();
        assert_eq!(state.status, RequestStatus::Loading);
        reduce(&mut state, StoreEvent::FetchFailed("boom".to_string())).unwrap();
        assert_eq!(state.status, RequestStatus::Failed);
        assert_eq!(state.error(), Some("boom"));
    }

    #[test]
    fn test_fetch_synthesizes_descending_timestamps() {
        let mut state = PostsState::new();
        let records = vec![remote(1, "first"), remote(2, "second"), remote(3, "third")];
        reduce(&mut state, StoreEvent::FetchSucceeded(records)).unwrap();

        assert_eq!(state.posts.len(), 3);
        for pair in state.posts.windows(2) {
            assert!(pair[0].created_at > pair[1].created_at);
        }
        for post in &state.posts {
            assert_eq!(post.reactions, Reactions::default());
        }
    }

    #[test]
    fn test_fetch_failure_keeps_existing_posts() {
        let mut state = PostsState::new();
        reduce(&mut state, StoreEvent::FetchSucceeded(vec![remote(1, "kept")])).unwrap();
        reduce(&mut state, StoreEvent::FetchFailed("down".to_string())).unwrap();

        assert_eq!(state.status, RequestStatus::Failed);
        assert_eq!(state.posts.len(), 1);
    }

    #[test]
    fn test_fetches_append_independently() {
        let mut state = PostsState::new();
        reduce(&mut state, StoreEvent::FetchSucceeded(vec![remote(1, "a")])).unwrap();
        reduce(&mut state, StoreEvent::FetchSucceeded(vec![remote(1, "a")])).unwrap();
        assert_eq!(state.posts.len(), 2);
    }

    #[test]
    fn test_create_reconciliation_replaces_in_place() {
        let mut state = PostsState::new();
        reduce(&mut state, StoreEvent::FetchSucceeded(vec![remote(1, "before")])).unwrap();

        let draft = Post::new("Draft".to_string(), "Body".to_string(), 7);
        let local_id = draft.id.clone();
        reduce(&mut state, StoreEvent::PostAdded(draft)).unwrap();
        reduce(
            &mut state,
            StoreEvent::ReactionAdded {
                post_id: local_id.clone(),
                kind: ReactionKind::Rocket,
            },
        )
        .unwrap();

        reduce(
            &mut state,
            StoreEvent::CreateSucceeded {
                local_id,
                record: remote(101, "Draft"),
            },
        )
        .unwrap();

        // No duplicate append; position and in-flight reactions survive.
        assert_eq!(state.posts.len(), 2);
        let reconciled = &state.posts[1];
        assert_eq!(reconciled.id, PostId::Remote(101));
        assert_eq!(reconciled.reactions.count(ReactionKind::Rocket), 1);
    }

    #[test]
    fn test_create_echo_dropped_when_post_removed() {
        let mut state = PostsState::new();
        let draft = Post::new("Draft".to_string(), "Body".to_string(), 7);
        let local_id = draft.id.clone();
        reduce(&mut state, StoreEvent::PostAdded(draft)).unwrap();
        reduce(&mut state, StoreEvent::PostRemoved(local_id.clone())).unwrap();

        reduce(
            &mut state,
            StoreEvent::CreateSucceeded {
                local_id,
                record: remote(101, "Draft"),
            },
        )
        .unwrap();
        assert!(state.posts.is_empty());
    }

    #[test]
    fn test_create_failure_recorded_without_rollback() {
        let mut state = PostsState::new();
        let draft = Post::new("Draft".to_string(), "Body".to_string(), 7);
        let local_id = draft.id.clone();
        reduce(&mut state, StoreEvent::PostAdded(draft)).unwrap();

        reduce(
            &mut state,
            StoreEvent::CreateFailed {
                local_id,
                error: "offline".to_string(),
            },
        )
        .unwrap();

        assert_eq!(state.status, RequestStatus::Failed);
        assert_eq!(state.error(), Some("offline"));
        assert_eq!(state.posts.len(), 1);
    }

    #[test]
    fn test_reaction_on_unknown_id_is_not_found() {
        let mut state = PostsState::new();
        reduce(&mut state, StoreEvent::FetchSucceeded(vec![remote(1, "a")])).unwrap();
        let before = state.clone();

        let result = reduce(
            &mut state,
            StoreEvent::ReactionAdded {
                post_id: PostId::Remote(999),
                kind: ReactionKind::Heart,
            },
        );

        assert!(matches!(result, Err(DomainError::NotFound(_))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut state = PostsState::new();
        reduce(
            &mut state,
            StoreEvent::FetchSucceeded(vec![remote(1, "a"), remote(2, "b")]),
        )
        .unwrap();

        reduce(&mut state, StoreEvent::PostRemoved(PostId::Remote(1))).unwrap();
        let after_first = state.clone();
        reduce(&mut state, StoreEvent::PostRemoved(PostId::Remote(1))).unwrap();
        assert_eq!(state, after_first);
        assert_eq!(state.posts.len(), 1);
    }

    #[test]
    fn test_edit_preserves_position_and_other_posts() {
        let mut state = PostsState::new();
        reduce(
            &mut state,
            StoreEvent::FetchSucceeded(vec![remote(1, "a"), remote(2, "b"), remote(3, "c")]),
        )
        .unwrap();
        let untouched_first = state.posts[0].clone();
        let untouched_last = state.posts[2].clone();

        let mut updated = state.posts[1].clone();
        updated.title = "edited".to_string();
        reduce(&mut state, StoreEvent::PostEdited(updated)).unwrap();

        assert_eq!(state.posts[0], untouched_first);
        assert_eq!(state.posts[1].title, "edited");
        assert_eq!(state.posts[1].id, PostId::Remote(2));
        assert_eq!(state.posts[2], untouched_last);
    }

    #[test]
    fn test_edit_unknown_id_is_a_no_op() {
        let mut state = PostsState::new();
        reduce(&mut state, StoreEvent::FetchSucceeded(vec![remote(1, "a")])).unwrap();
        let before = state.clone();

        let mut stranger = Post::new("X".to_string(), "Y".to_string(), 9);
        stranger.id = PostId::Remote(999);
        reduce(&mut state, StoreEvent::PostEdited(stranger)).unwrap();
        assert_eq!(state, before);
    }
}
