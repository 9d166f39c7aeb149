use thiserror::Error;

use crate::domain::{PostId, Principal};

/// Everything that can go wrong with a ledger operation. Every variant is a
/// precondition failure raised before any state is touched: a failed call
/// leaves the ledger exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Principal already registered: {0}")]
    AlreadyRegistered(Principal),

    #[error("Username must be 1-50 characters, got {length}")]
    InvalidUsername { length: usize },

    #[error("Bio must be at most 200 characters, got {length}")]
    InvalidBio { length: usize },

    #[error("Principal not registered: {0}")]
    NotRegistered(Principal),

    #[error("Content must be 1-500 characters, got {length}")]
    InvalidContent { length: usize },

    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("Cannot like own post: {0}")]
    SelfLikeForbidden(PostId),

    #[error("User not found: {0}")]
    UserNotFound(Principal),

    #[error("Feed window must be 1-50, got {0}")]
    InvalidRange(usize),
}
