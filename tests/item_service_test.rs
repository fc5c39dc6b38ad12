//! Item service integration tests over a SQLite-in-memory store.

mod common;

use stash_api::domain::{CreateItem, UpdateItem};
use stash_api::errors::AppError;

use common::{create_random_item, create_random_user, test_services};

#[tokio::test]
async fn test_create_item() {
    let app = test_services().await;
    let (owner, _) = create_random_user(&app.users).await;

    let item = app
        .items
        .create(
            CreateItem {
                title: Some("Groceries".to_string()),
                description: Some("Saturday shopping".to_string()),
            },
            owner.id,
        )
        .await
        .unwrap();

    assert!(item.id > 0);
    assert_eq!(item.title.as_deref(), Some("Groceries"));
    assert_eq!(item.description.as_deref(), Some("Saturday shopping"));
    assert_eq!(item.owner_id, owner.id);
}

#[tokio::test]
async fn test_get_item() {
    let app = test_services().await;
    let (owner, _) = create_random_user(&app.users).await;
    let item = create_random_item(&app.items, owner.id).await;

    let stored = app.items.get_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(stored, item);

    assert!(app.items.get_by_id(item.id + 1000).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_item_partial_patch() {
    let app = test_services().await;
    let (owner, _) = create_random_user(&app.users).await;
    let item = create_random_item(&app.items, owner.id).await;

    let updated = app
        .items
        .update(
            item.id,
            UpdateItem {
                title: None,
                description: Some("rewritten".to_string()),
            },
            None,
        )
        .await
        .unwrap();

    // Only the patched field changes
    assert_eq!(updated.title, item.title);
    assert_eq!(updated.description.as_deref(), Some("rewritten"));

    let stored = app.items.get_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_update_item_not_found() {
    let app = test_services().await;

    let result = app.items.update(9999, UpdateItem::default(), None).await;
    assert!(matches!(result, Err(AppError::ItemNotFound)));
}

#[tokio::test]
async fn test_update_item_owner_mismatch_leaves_row_unchanged() {
    let app = test_services().await;
    let (owner, _) = create_random_user(&app.users).await;
    let (other, _) = create_random_user(&app.users).await;
    let item = create_random_item(&app.items, owner.id).await;

    let result = app
        .items
        .update(
            item.id,
            UpdateItem {
                title: Some("hijacked".to_string()),
                description: None,
            },
            Some(other.id),
        )
        .await;

    assert!(matches!(result, Err(AppError::ItemPermission)));

    let stored = app.items.get_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(stored, item);
}

#[tokio::test]
async fn test_update_item_without_owner_bypasses_check() {
    let app = test_services().await;
    let (owner, _) = create_random_user(&app.users).await;
    let item = create_random_item(&app.items, owner.id).await;

    // No owner supplied: the superuser path
    let updated = app
        .items
        .update(
            item.id,
            UpdateItem {
                title: Some("supervised".to_string()),
                description: None,
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(updated.title.as_deref(), Some("supervised"));
}

#[tokio::test]
async fn test_delete_item_returns_snapshot() {
    let app = test_services().await;
    let (owner, _) = create_random_user(&app.users).await;
    let item = create_random_item(&app.items, owner.id).await;

    let deleted = app.items.delete(item.id, None).await.unwrap();
    assert_eq!(deleted, item);

    assert!(app.items.get_by_id(item.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_item_not_found() {
    let app = test_services().await;

    let result = app.items.delete(9999, None).await;
    assert!(matches!(result, Err(AppError::ItemNotFound)));
}

#[tokio::test]
async fn test_delete_item_owner_mismatch() {
    let app = test_services().await;
    let (owner, _) = create_random_user(&app.users).await;
    let (other, _) = create_random_user(&app.users).await;
    let item = create_random_item(&app.items, owner.id).await;

    let result = app.items.delete(item.id, Some(other.id)).await;
    assert!(matches!(result, Err(AppError::ItemPermission)));

    // Row survives the rejected delete
    assert!(app.items.get_by_id(item.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_list_items_ordered_and_filtered_by_owner() {
    let app = test_services().await;
    let (first, _) = create_random_user(&app.users).await;
    let (second, _) = create_random_user(&app.users).await;

    let mut first_ids = Vec::new();
    for _ in 0..3 {
        first_ids.push(create_random_item(&app.items, first.id).await.id);
    }
    let second_item = create_random_item(&app.items, second.id).await;

    let all = app.items.get_list(0, 100).await.unwrap();
    let all_ids: Vec<i32> = all.iter().map(|i| i.id).collect();
    let mut expected = first_ids.clone();
    expected.push(second_item.id);
    assert_eq!(all_ids, expected);

    let owned = app
        .items
        .get_list_by_owner(first.id, 0, 100)
        .await
        .unwrap();
    let owned_ids: Vec<i32> = owned.iter().map(|i| i.id).collect();
    assert_eq!(owned_ids, first_ids);

    let page = app.items.get_list_by_owner(first.id, 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, first_ids[1]);
}

#[tokio::test]
async fn test_ownership_scenario() {
    let app = test_services().await;
    let (alice, password) = create_random_user(&app.users).await;
    let (bob, _) = create_random_user(&app.users).await;

    // Alice can log in with her password, and only her password
    assert!(app
        .users
        .authenticate(alice.email.clone(), password)
        .await
        .unwrap()
        .is_some());
    assert!(app
        .users
        .authenticate(alice.email.clone(), "wrong-password".to_string())
        .await
        .unwrap()
        .is_none());

    let item = app
        .items
        .create(
            CreateItem {
                title: Some("Foo".to_string()),
                description: Some("Fighters".to_string()),
            },
            alice.id,
        )
        .await
        .unwrap();

    let stored = app.items.get_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(stored.owner_id, alice.id);

    // Bob may not touch Alice's item
    let patch = UpdateItem {
        title: None,
        description: Some("Bar".to_string()),
    };
    let result = app
        .items
        .update(item.id, patch.clone(), Some(bob.id))
        .await;
    assert!(matches!(result, Err(AppError::ItemPermission)));

    // Alice may
    let updated = app
        .items
        .update(item.id, patch, Some(alice.id))
        .await
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("Bar"));

    let stored = app.items.get_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(stored.description.as_deref(), Some("Bar"));
}
