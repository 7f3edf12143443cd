//! Concurrent sessions stay independent.

use std::sync::Arc;

use adcraft::collector::Step;
use adcraft::session::{SessionError, SessionRegistry};
use uuid::Uuid;

use crate::support::authorized_mock;

#[tokio::test]
async fn open_greets_and_waits_for_name() {
    let registry = SessionRegistry::new(authorized_mock().await);
    let (id, greeting) = registry.open().await;

    assert_eq!(greeting.step, Step::CollectName);
    assert_eq!(registry.step(id).await, Ok(Step::CollectName));
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn sessions_do_not_share_drafts() {
    let registry = SessionRegistry::new(authorized_mock().await);
    let (first, _) = registry.open().await;
    let (second, _) = registry.open().await;
    assert_ne!(first, second);

    registry
        .submit_turn(first, "Summer Sale")
        .await
        .expect("first session");
    registry
        .submit_turn(first, "Traffic")
        .await
        .expect("first session");
    let rejected = registry
        .submit_turn(second, "ab")
        .await
        .expect("second session");

    assert_eq!(rejected.step, Step::CollectName);
    assert_eq!(registry.step(first).await, Ok(Step::CollectAdText));
    assert_eq!(registry.step(second).await, Ok(Step::CollectName));
}

#[tokio::test]
async fn concurrent_sessions_complete_independently() {
    let registry = Arc::new(SessionRegistry::new(authorized_mock().await));
    let mut handles = Vec::new();

    for name in ["Alpha Launch", "Beta Launch", "Gamma Launch"] {
        let registry = Arc::clone(&registry);
        handles.push(tokio::spawn(async move {
            let (id, _) = registry.open().await;
            for input in [name, "Traffic", "Hello", "Download", "3"] {
                registry.submit_turn(id, input).await.expect("open session");
            }
            registry.step(id).await
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.expect("task"), Ok(Step::Complete));
    }
    assert_eq!(registry.len(), 3);
}

#[tokio::test]
async fn unknown_or_closed_session_is_not_found() {
    let registry = SessionRegistry::new(authorized_mock().await);
    let missing = Uuid::new_v4();
    assert_eq!(
        registry.submit_turn(missing, "hello").await,
        Err(SessionError::NotFound(missing))
    );

    let (id, _) = registry.open().await;
    assert!(registry.close(id));
    assert!(!registry.close(id));
    assert!(registry.is_empty());
    assert_eq!(registry.step(id).await, Err(SessionError::NotFound(id)));
}
