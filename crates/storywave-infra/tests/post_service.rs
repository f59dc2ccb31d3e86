//! PostService behaviour against the in-memory store.

use std::sync::Arc;

use storywave_core::domain::{Role, User};
use storywave_core::ports::{TransactionManager, TxMode};
use storywave_core::{DomainError, PostService};
use storywave_infra::InMemoryStore;
use storywave_shared::PostDto;

async fn setup() -> (InMemoryStore, PostService) {
    let store = InMemoryStore::new();
    store
        .put_user(User::new("alice", "Alice", "alice@example.com"))
        .await;
    store
        .put_user(User::new("bob", "Bob", "bob@example.com"))
        .await;
    store
        .put_user(User::new("root", "Root", "root@example.com").with_role(Role::Admin))
        .await;

    let service = PostService::new(Arc::new(store.clone()));
    (store, service)
}

async fn create(service: &PostService, title: &str, user: &str) -> i64 {
    service
        .create_post(PostDto::new(title, format!("{title} body")), user)
        .await
        .unwrap()
        .id
        .unwrap()
}

#[tokio::test]
async fn create_rejects_unknown_user() {
    let (store, service) = setup().await;

    let result = service.create_post(PostDto::new("t", "c"), "ghost").await;

    assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    assert_eq!(store.post_count().await, 0);
}

#[tokio::test]
async fn create_ignores_client_thumbs_and_timestamps() {
    let (store, service) = setup().await;

    let mut dto = PostDto::new("Hello", "World");
    dto.thumbs = 99;
    dto.id = Some(1234);
    dto.user_id = Some("bob".to_string());

    let created = service.create_post(dto, "alice").await.unwrap();

    assert_eq!(created.thumbs, 0);
    assert!(created.created_at.is_some());
    assert!(created.updated_at.is_none());
    assert_eq!(created.user_id.as_deref(), Some("alice"));
    assert_ne!(created.id, Some(1234));

    let tx = store.begin(TxMode::ReadOnly).await.unwrap();
    let owned = tx.posts().find_by_user_id("alice").await.unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].id, created.id);
}

#[tokio::test]
async fn get_post_by_id_round_trips() {
    let (_, service) = setup().await;

    assert!(service.get_post_by_id(1).await.unwrap().is_none());

    let id = create(&service, "Round", "alice").await;
    let found = service.get_post_by_id(id).await.unwrap().unwrap();

    assert_eq!(found.title, "Round");
    assert_eq!(found.content, "Round body");
}

#[tokio::test]
async fn get_all_posts_lists_everything_in_id_order() {
    let (_, service) = setup().await;
    let first = create(&service, "one", "alice").await;
    let second = create(&service, "two", "bob").await;

    let ids: Vec<_> = service
        .get_all_posts()
        .await
        .unwrap()
        .into_iter()
        .filter_map(|p| p.id)
        .collect();

    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn title_search_returns_only_matches() {
    let (_, service) = setup().await;
    create(&service, "Star Wars", "alice").await;
    create(&service, "Warehouse", "bob").await;
    create(&service, "Peace", "alice").await;

    let titles: Vec<_> = service
        .get_posts_by_title_containing("war")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();

    assert_eq!(titles, vec!["Star Wars", "Warehouse"]);
    assert!(
        service
            .get_posts_by_title_containing("zebra")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn owner_can_update() {
    let (_, service) = setup().await;
    let id = create(&service, "Draft", "alice").await;

    let updated = service
        .update_post(id, PostDto::new("Final", "Edited"), "alice")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.content, "Edited");
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn update_by_someone_else_looks_like_not_found() {
    let (_, service) = setup().await;
    let id = create(&service, "Draft", "alice").await;

    let by_bob = service
        .update_post(id, PostDto::new("Hijacked", "x"), "bob")
        .await
        .unwrap();
    let by_admin = service
        .update_post(id, PostDto::new("Hijacked", "x"), "root")
        .await
        .unwrap();
    let missing = service
        .update_post(id + 100, PostDto::new("x", "x"), "alice")
        .await
        .unwrap();

    assert!(by_bob.is_none());
    assert!(by_admin.is_none());
    assert!(missing.is_none());

    let unchanged = service.get_post_by_id(id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "Draft");
    assert!(unchanged.updated_at.is_none());
}

#[tokio::test]
async fn owner_can_delete() {
    let (_, service) = setup().await;
    let id = create(&service, "Bye", "alice").await;

    assert!(service.delete_post(id, "alice").await.unwrap());
    assert!(service.get_post_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn non_owner_cannot_delete() {
    let (_, service) = setup().await;
    let id = create(&service, "Stay", "alice").await;

    assert!(!service.delete_post(id, "bob").await.unwrap());
    assert!(service.get_post_by_id(id).await.unwrap().is_some());
}

#[tokio::test]
async fn admin_can_delete_any_post() {
    let (_, service) = setup().await;
    let id = create(&service, "Moderated", "alice").await;

    assert!(service.delete_post(id, "root").await.unwrap());
    assert!(service.get_post_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_requires_existing_user_and_post() {
    let (_, service) = setup().await;
    let id = create(&service, "Kept", "alice").await;

    let unknown_user = service.delete_post(id, "ghost").await;
    assert!(matches!(unknown_user, Err(DomainError::InvalidArgument(_))));

    assert!(!service.delete_post(id + 100, "alice").await.unwrap());
    assert!(service.get_post_by_id(id).await.unwrap().is_some());
}

#[tokio::test]
async fn find_paginated_is_one_based() {
    let (store, service) = setup().await;
    for n in 0..25 {
        create(&service, &format!("post {n}"), "alice").await;
    }

    let first = service.find_paginated(1, 10).await.unwrap();
    let tx = store.begin(TxMode::ReadOnly).await.unwrap();
    let direct = tx
        .posts()
        .find_all_paged(storywave_core::domain::PageRequest::of(0, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(first, direct);
    assert_eq!(first.total_items, 25);
    assert_eq!(first.total_pages, 3);

    let second = service.find_paginated(2, 10).await.unwrap();
    assert_eq!(second.page, 1);
    assert_eq!(second.items.first().map(|p| p.title.as_str()), Some("post 10"));

    let last = service.find_paginated(3, 10).await.unwrap();
    assert_eq!(last.items.len(), 5);
}

#[tokio::test]
async fn find_paginated_rejects_page_zero() {
    let (_, service) = setup().await;

    let result = service.find_paginated(0, 10).await;
    assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
}

#[tokio::test]
async fn posts_by_user_lists_the_collection() {
    let (_, service) = setup().await;
    create(&service, "a1", "alice").await;
    create(&service, "b1", "bob").await;
    create(&service, "a2", "alice").await;

    let titles: Vec<_> = service
        .get_posts_by_user("alice")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["a1", "a2"]);
}

#[tokio::test]
async fn find_paginated_rejects_out_of_range_offset() {
    let (_, service) = setup().await;

    let result = service.find_paginated(4, i64::MAX).await;
    assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_creates_all_persist() {
    let (store, service) = setup().await;

    let handles: Vec<_> = (0..200)
        .map(|n| {
            let service = service.clone();
            tokio::spawn(async move {
                let owner = if n % 2 == 0 { "alice" } else { "bob" };
                create(&service, &format!("post {n}"), owner).await
            })
        })
        .collect();

    let mut ids = std::collections::HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }

    assert_eq!(ids.len(), 200);
    assert_eq!(store.post_count().await, 200);
    assert_eq!(service.get_all_posts().await.unwrap().len(), 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_delete_and_create_both_stick() {
    let (_, service) = setup().await;
    let doomed = create(&service, "doomed", "alice").await;

    let deleter = {
        let service = service.clone();
        tokio::spawn(async move { service.delete_post(doomed, "alice").await.unwrap() })
    };
    let creator = {
        let service = service.clone();
        tokio::spawn(async move { create(&service, "fresh", "bob").await })
    };

    assert!(deleter.await.unwrap());
    let fresh = creator.await.unwrap();

    assert!(service.get_post_by_id(doomed).await.unwrap().is_none());
    assert!(service.get_post_by_id(fresh).await.unwrap().is_some());
}
