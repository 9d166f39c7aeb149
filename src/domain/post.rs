use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Principal;

/// Posts are numbered 1, 2, 3, ... in creation order with no gaps or reuse.
pub type PostId = u64;

/// Maximum post content length in characters.
pub const CONTENT_MAX_LEN: usize = 500;

/// A published post. Immutable after creation except for `like_count`,
/// which mirrors the like relation at the time the snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author: Principal,
    pub content: String,
    /// Cardinality of the like relation for this post.
    pub like_count: u64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(id: PostId, author: Principal, content: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            author,
            content,
            like_count: 0,
            created_at,
        }
    }
}

/// Check post content against the publishing limits (1 to 500 characters).
pub fn content_is_valid(content: &str) -> bool {
    let len = content.chars().count();
    (1..=CONTENT_MAX_LEN).contains(&len)
}
