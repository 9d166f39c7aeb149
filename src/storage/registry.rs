use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::domain::{Post, PostId, Principal, User};

/// In-memory owner of all ledger registries: users, posts, the like relation
/// and per-user post lists. The registry exposes storage primitives only;
/// validation and event emission live in the service layer on top of it.
///
/// Post ids are dense: the post with id `n` lives at index `n - 1`, and the
/// next id is always `posts.len() + 1`. Nothing is ever deleted, so ids are
/// never reused and the counters only grow.
#[derive(Debug, Default)]
pub struct Registry {
    users: HashMap<Principal, User>,
    posts: Vec<Post>,
    likes: HashMap<PostId, HashSet<Principal>>,
    user_posts: HashMap<Principal, Vec<PostId>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Users
    // ========================

    pub fn total_users(&self) -> u64 {
        self.users.len() as u64
    }

    pub fn contains_user(&self, principal: Principal) -> bool {
        self.users.contains_key(&principal)
    }

    /// Insert a user record. The caller must have checked that the principal
    /// is not registered yet.
    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.principal, user);
    }

    /// Snapshot of a user record, if the principal is registered.
    pub fn user(&self, principal: Principal) -> Option<User> {
        self.users.get(&principal).cloned()
    }

    // ========================
    // Posts
    // ========================

    pub fn total_posts(&self) -> u64 {
        self.posts.len() as u64
    }

    pub fn contains_post(&self, post_id: PostId) -> bool {
        post_id >= 1 && post_id <= self.posts.len() as u64
    }

    /// Append a post, allocating the next dense id. Bumps the author's post
    /// count and appends the id to the author's post list. The caller must
    /// have checked that the author is registered.
    pub fn append_post(
        &mut self,
        author: Principal,
        content: String,
        created_at: DateTime<Utc>,
    ) -> PostId {
        let id = self.posts.len() as PostId + 1;
        self.posts.push(Post::new(id, author, content, created_at));

        if let Some(user) = self.users.get_mut(&author) {
            user.post_count += 1;
        }
        self.user_posts.entry(author).or_default().push(id);

        id
    }

    /// Snapshot of a post, with `like_count` derived from the like relation.
    pub fn post(&self, post_id: PostId) -> Option<Post> {
        let index = usize::try_from(post_id.checked_sub(1)?).ok()?;
        let mut post = self.posts.get(index)?.clone();
        post.like_count = self.like_count(post_id);
        Some(post)
    }

    pub fn post_author(&self, post_id: PostId) -> Option<Principal> {
        let index = usize::try_from(post_id.checked_sub(1)?).ok()?;
        Some(self.posts.get(index)?.author)
    }

    /// Creation timestamp of the most recent post, if any.
    pub fn last_post_at(&self) -> Option<DateTime<Utc>> {
        self.posts.last().map(|post| post.created_at)
    }

    /// Ids of all posts authored by the principal, oldest first. Empty for
    /// principals with no posts, registered or not.
    pub fn posts_by(&self, principal: Principal) -> Vec<PostId> {
        self.user_posts.get(&principal).cloned().unwrap_or_default()
    }

    // ========================
    // Like relation
    // ========================

    pub fn has_liked(&self, post_id: PostId, principal: Principal) -> bool {
        self.likes
            .get(&post_id)
            .is_some_and(|likers| likers.contains(&principal))
    }

    pub fn like_count(&self, post_id: PostId) -> u64 {
        self.likes
            .get(&post_id)
            .map_or(0, |likers| likers.len() as u64)
    }

    /// Flip the (post, liker) pair in the like relation. Returns true when
    /// the pair was added (a like), false when it was removed (an unlike).
    pub fn toggle_like(&mut self, post_id: PostId, liker: Principal) -> bool {
        let likers = self.likes.entry(post_id).or_default();
        if likers.insert(liker) {
            true
        } else {
            likers.remove(&liker);
            false
        }
    }
}
