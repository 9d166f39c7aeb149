mod common;

use agora::application::LedgerError;
use agora::domain::{LedgerEvent, Principal, CONTENT_MAX_LEN};
use common::{register, test_ledger};

#[test]
fn test_create_post() {
    let mut ledger = test_ledger();
    let alice = register(&mut ledger, "alice");

    let post_id = ledger.create_post(alice, "hi").unwrap();
    assert_eq!(post_id, 1);

    let post = ledger.get_post(post_id).unwrap();
    assert_eq!(post.id, 1);
    assert_eq!(post.author, alice);
    assert_eq!(post.content, "hi");
    assert_eq!(post.like_count, 0);

    assert_eq!(ledger.total_posts(), 1);
    assert_eq!(ledger.get_user(alice).unwrap().post_count, 1);
}

#[test]
fn test_post_ids_are_dense_and_in_call_order() {
    let mut ledger = test_ledger();
    let alice = register(&mut ledger, "alice");
    let bob = register(&mut ledger, "bob");

    let mut ids = Vec::new();
    for i in 0..6 {
        let author = if i % 2 == 0 { alice } else { bob };
        ids.push(ledger.create_post(author, &format!("post {}", i)).unwrap());
    }

    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(ledger.total_posts(), 6);
}

#[test]
fn test_timestamps_non_decreasing_in_id_order() {
    let mut ledger = test_ledger();
    let alice = register(&mut ledger, "alice");

    for i in 0..10 {
        ledger.create_post(alice, &format!("post {}", i)).unwrap();
    }

    let mut previous = ledger.get_post(1).unwrap().created_at;
    for id in 2..=10 {
        let created_at = ledger.get_post(id).unwrap().created_at;
        assert!(created_at >= previous, "post {} created before post {}", id, id - 1);
        previous = created_at;
    }
}

#[test]
fn test_post_emits_event() {
    let mut ledger = test_ledger();
    let alice = register(&mut ledger, "alice");

    let post_id = ledger.create_post(alice, "hello world").unwrap();

    assert_eq!(
        ledger.events().last(),
        Some(&LedgerEvent::PostCreated {
            post_id,
            author: alice,
            content: "hello world".into(),
        })
    );
}

#[test]
fn test_unregistered_author_rejected() {
    let mut ledger = test_ledger();
    let alice = register(&mut ledger, "alice");
    ledger.create_post(alice, "hi").unwrap();

    let stranger = Principal::new();
    let err = ledger.create_post(stranger, "x").unwrap_err();
    assert_eq!(err, LedgerError::NotRegistered(stranger));

    // Nothing changed
    assert_eq!(ledger.total_posts(), 1);
    assert_eq!(ledger.events().len(), 2);
}

#[test]
fn test_empty_content_rejected() {
    let mut ledger = test_ledger();
    let alice = register(&mut ledger, "alice");

    let err = ledger.create_post(alice, "").unwrap_err();
    assert_eq!(err, LedgerError::InvalidContent { length: 0 });
    assert_eq!(ledger.total_posts(), 0);
    assert_eq!(ledger.get_user(alice).unwrap().post_count, 0);
}

#[test]
fn test_overlong_content_rejected() {
    let mut ledger = test_ledger();
    let alice = register(&mut ledger, "alice");
    let long_content = "x".repeat(CONTENT_MAX_LEN + 1);

    let err = ledger.create_post(alice, &long_content).unwrap_err();
    assert_eq!(
        err,
        LedgerError::InvalidContent {
            length: CONTENT_MAX_LEN + 1
        }
    );
}

#[test]
fn test_max_length_content_accepted() {
    let mut ledger = test_ledger();
    let alice = register(&mut ledger, "alice");

    let post_id = ledger.create_post(alice, &"x".repeat(CONTENT_MAX_LEN)).unwrap();
    assert_eq!(ledger.get_post(post_id).unwrap().content.chars().count(), CONTENT_MAX_LEN);
}

#[test]
fn test_get_post_out_of_range() {
    let mut ledger = test_ledger();
    let alice = register(&mut ledger, "alice");
    ledger.create_post(alice, "only one").unwrap();

    assert_eq!(ledger.get_post(0).unwrap_err(), LedgerError::PostNotFound(0));
    assert_eq!(ledger.get_post(2).unwrap_err(), LedgerError::PostNotFound(2));
}
