//! Version checks under racing writers.

use crate::common::{builders::BookBodyBuilder, create_book, get_book, test_handler};
use book_server::BookOperationRequest;
use futures::future::join_all;
use serde_json::json;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_only_one_replacement_wins() {
    let handler = Arc::new(test_handler());
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let tasks = (0..8).map(|n| {
        let handler = Arc::clone(&handler);
        let id = id.clone();
        tokio::spawn(async move {
            let body = BookBodyBuilder::new()
                .title(&format!("Writer {n}"))
                .version(0)
                .build();
            handler
                .handle_operation(BookOperationRequest::replace(id, body))
                .await
        })
    });

    let responses: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let winners: Vec<_> = responses.iter().filter(|r| r.success).collect();
    assert_eq!(winners.len(), 1);
    assert!(
        responses
            .iter()
            .filter(|r| !r.success)
            .all(|r| r.status == 409 && r.error_code.as_deref() == Some("OPTIMISTIC_CONFLICT"))
    );

    let stored = get_book(&handler, &id).await;
    assert_eq!(stored.metadata.version, Some(1));
    assert_eq!(
        stored.data.unwrap()["title"],
        winners[0].data.as_ref().unwrap()["title"]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_unversioned_patches_never_lose_updates() {
    let handler = Arc::new(test_handler());
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let tasks = (1..=6).map(|n| {
        let handler = Arc::clone(&handler);
        let id = id.clone();
        tokio::spawn(async move {
            handler
                .handle_operation(BookOperationRequest::merge(id, json!({"pages": n})))
                .await
        })
    });

    let responses: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let successes = responses.iter().filter(|r| r.success).count() as u64;
    assert!(successes >= 1);
    assert!(responses.iter().all(|r| r.success || r.status == 409));

    // Each success committed exactly one version step.
    let stored = get_book(&handler, &id).await;
    assert_eq!(stored.metadata.version, Some(successes));
}

#[tokio::test]
async fn test_delete_during_update_is_reported_as_conflict_or_not_found() {
    let handler = Arc::new(test_handler());
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let patch = {
        let handler = Arc::clone(&handler);
        let id = id.clone();
        tokio::spawn(async move {
            handler
                .handle_operation(BookOperationRequest::merge(id, json!({"pages": 10})))
                .await
        })
    };
    let delete = handler
        .handle_operation(BookOperationRequest::delete(id.clone()))
        .await;
    let patch = patch.await.expect("task panicked");

    assert_eq!(delete.status, 204);
    assert!(
        [200, 404, 409].contains(&patch.status),
        "unexpected status {}",
        patch.status
    );
    assert_eq!(get_book(&handler, &id).await.status, 404);
}
