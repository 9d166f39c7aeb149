use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Principal;

/// Maximum username length in characters.
pub const USERNAME_MAX_LEN: usize = 50;

/// Maximum bio length in characters.
pub const BIO_MAX_LEN: usize = 200;

/// A registered user. Created once at registration and never removed;
/// `username` and `bio` are immutable afterwards, only `post_count` grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub principal: Principal,
    pub username: String,
    pub bio: String,
    /// Number of posts authored by this user.
    pub post_count: u64,
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn new(principal: Principal, username: String, bio: String) -> Self {
        Self {
            principal,
            username,
            bio,
            post_count: 0,
            registered_at: Utc::now(),
        }
    }
}

/// Check a username against the registration limits (1 to 50 characters).
/// Lengths are measured in Unicode scalar values, not bytes.
pub fn username_is_valid(username: &str) -> bool {
    let len = username.chars().count();
    (1..=USERNAME_MAX_LEN).contains(&len)
}

/// Check a bio against the registration limit (up to 200 characters).
pub fn bio_is_valid(bio: &str) -> bool {
    bio.chars().count() <= BIO_MAX_LEN
}
