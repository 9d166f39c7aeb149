// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use agora::application::SocialLedger;
use agora::domain::Principal;

/// Fresh, empty ledger for a test.
pub fn test_ledger() -> SocialLedger {
    SocialLedger::new()
}

/// Register a new principal under the given username and return it.
pub fn register(ledger: &mut SocialLedger, username: &str) -> Principal {
    let principal = Principal::new();
    ledger
        .register_user(principal, username, "")
        .expect("registration fixture failed");
    principal
}

/// Test fixture: a ledger seeded with two users and one post by the first.
pub struct AliceAndBob {
    pub alice: Principal,
    pub bob: Principal,
    pub post_id: u64,
}

impl AliceAndBob {
    pub fn seed(ledger: &mut SocialLedger) -> Self {
        let alice = register(ledger, "alice");
        let bob = register(ledger, "bob");
        let post_id = ledger
            .create_post(alice, "hello from alice")
            .expect("post fixture failed");
        Self {
            alice,
            bob,
            post_id,
        }
    }
}
