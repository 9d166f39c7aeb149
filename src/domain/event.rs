use serde::{Deserialize, Serialize};

use super::{PostId, Principal};

/// Observability events emitted by the ledger, exactly once per successful
/// mutating operation, in operation order. They carry the triggering call's
/// arguments and no additional state.
///
/// Note the asymmetry: the unlike branch of a toggle emits nothing. The
/// original contract only logged likes, and this implementation keeps that
/// behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEvent {
    UserRegistered {
        principal: Principal,
        username: String,
    },
    PostCreated {
        post_id: PostId,
        author: Principal,
        content: String,
    },
    PostLiked {
        post_id: PostId,
        liker: Principal,
    },
}

impl std::fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerEvent::UserRegistered {
                principal,
                username,
            } => {
                write!(f, "UserRegistered: {} as \"{}\"", principal, username)
            }
            LedgerEvent::PostCreated {
                post_id,
                author,
                content,
            } => {
                write!(f, "PostCreated: #{} by {} ({} chars)", post_id, author, content.chars().count())
            }
            LedgerEvent::PostLiked { post_id, liker } => {
                write!(f, "PostLiked: #{} by {}", post_id, liker)
            }
        }
    }
}
