use chrono::Utc;

use crate::domain::{
    bio_is_valid, content_is_valid, feed_window_is_valid, latest_post_ids, username_is_valid,
    LedgerEvent, Post, PostId, Principal, User,
};
use crate::storage::Registry;

use super::LedgerError;

/// The social ledger: one owned aggregate holding all mutable state and
/// exposing the registration, posting, liking and query operations. This is
/// the primary interface for any client (CLI, RPC layer, tests).
///
/// Mutating operations take `&mut self`, so writers are serialized by
/// construction; reads observe the latest committed state. Every operation
/// completes synchronously, and a failed call mutates nothing.
#[derive(Debug, Default)]
pub struct SocialLedger {
    registry: Registry,
    events: Vec<LedgerEvent>,
}

impl SocialLedger {
    /// Create an empty ledger: no users, no posts, all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // User operations
    // ========================

    /// Register the caller with a username and bio. A principal can register
    /// at most once, and the username/bio are immutable afterwards.
    pub fn register_user(
        &mut self,
        caller: Principal,
        username: &str,
        bio: &str,
    ) -> Result<(), LedgerError> {
        if self.registry.contains_user(caller) {
            return Err(LedgerError::AlreadyRegistered(caller));
        }
        if !username_is_valid(username) {
            return Err(LedgerError::InvalidUsername {
                length: username.chars().count(),
            });
        }
        if !bio_is_valid(bio) {
            return Err(LedgerError::InvalidBio {
                length: bio.chars().count(),
            });
        }

        self.registry
            .insert_user(User::new(caller, username.to_string(), bio.to_string()));
        self.events.push(LedgerEvent::UserRegistered {
            principal: caller,
            username: username.to_string(),
        });
        Ok(())
    }

    /// Snapshot of a registered user's record.
    pub fn get_user(&self, principal: Principal) -> Result<User, LedgerError> {
        self.registry
            .user(principal)
            .ok_or(LedgerError::UserNotFound(principal))
    }

    // ========================
    // Post operations
    // ========================

    /// Publish a post and return its id. Ids are allocated densely: the
    /// first post is 1, the next 2, and so on with no gaps or reuse.
    pub fn create_post(
        &mut self,
        caller: Principal,
        content: &str,
    ) -> Result<PostId, LedgerError> {
        if !self.registry.contains_user(caller) {
            return Err(LedgerError::NotRegistered(caller));
        }
        if !content_is_valid(content) {
            return Err(LedgerError::InvalidContent {
                length: content.chars().count(),
            });
        }

        // Clamp against the previous post so timestamps never go backwards
        // in id order, even if the wall clock does.
        let mut created_at = Utc::now();
        if let Some(last) = self.registry.last_post_at() {
            created_at = created_at.max(last);
        }

        let post_id = self
            .registry
            .append_post(caller, content.to_string(), created_at);
        self.events.push(LedgerEvent::PostCreated {
            post_id,
            author: caller,
            content: content.to_string(),
        });
        Ok(post_id)
    }

    /// Snapshot of a post, including its derived like count.
    pub fn get_post(&self, post_id: PostId) -> Result<Post, LedgerError> {
        self.registry
            .post(post_id)
            .ok_or(LedgerError::PostNotFound(post_id))
    }

    // ========================
    // Like operations
    // ========================

    /// Flip the caller's like on a post: absent becomes present (a like),
    /// present becomes absent (an unlike). Exactly one of the two happens per
    /// call. Authors cannot like their own posts.
    ///
    /// Only the like branch emits an event; the original contract never
    /// logged unlikes and that asymmetry is kept.
    pub fn toggle_like(&mut self, caller: Principal, post_id: PostId) -> Result<(), LedgerError> {
        if !self.registry.contains_user(caller) {
            return Err(LedgerError::NotRegistered(caller));
        }
        let author = self
            .registry
            .post_author(post_id)
            .ok_or(LedgerError::PostNotFound(post_id))?;
        if author == caller {
            return Err(LedgerError::SelfLikeForbidden(post_id));
        }

        let liked = self.registry.toggle_like(post_id, caller);
        if liked {
            self.events.push(LedgerEvent::PostLiked {
                post_id,
                liker: caller,
            });
        }
        Ok(())
    }

    /// Whether the principal currently likes the post. Total over all
    /// inputs: unknown posts and unregistered principals yield false.
    pub fn has_liked(&self, post_id: PostId, principal: Principal) -> bool {
        self.registry.has_liked(post_id, principal)
    }

    // ========================
    // Queries
    // ========================

    /// Up to `count` posts, newest first (strictly decreasing id). `count`
    /// must be between 1 and 50; a ledger with fewer posts returns them all.
    pub fn latest_posts(&self, count: usize) -> Result<Vec<Post>, LedgerError> {
        if !feed_window_is_valid(count) {
            return Err(LedgerError::InvalidRange(count));
        }

        let posts = latest_post_ids(self.registry.total_posts(), count)
            .into_iter()
            .filter_map(|id| self.registry.post(id))
            .collect();
        Ok(posts)
    }

    /// Ids of all posts authored by the principal, oldest first. Empty for
    /// unregistered principals or users without posts; never an error.
    pub fn user_posts(&self, principal: Principal) -> Vec<PostId> {
        self.registry.posts_by(principal)
    }

    // ========================
    // Introspection
    // ========================

    pub fn total_users(&self) -> u64 {
        self.registry.total_users()
    }

    pub fn total_posts(&self) -> u64 {
        self.registry.total_posts()
    }

    /// The ordered log of events emitted so far, oldest first.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }
}
