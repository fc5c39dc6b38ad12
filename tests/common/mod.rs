//! Shared test harness: SQLite-in-memory services and data helpers.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use stash_api::config::Config;
use stash_api::domain::{CreateItem, CreateUser, Item, User};
use stash_api::infra::{Migrator, Persistence};
use stash_api::jobs::Notifier;
use stash_api::services::{ItemManager, ItemService, UserManager, UserService};

/// Fresh SQLite-in-memory database with the full schema applied.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    // A single pooled connection keeps every session on the same
    // in-memory database
    options.max_connections(1);

    let conn = SeaDatabase::connect(options)
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&conn, None)
        .await
        .expect("Failed to run migrations");

    conn
}

/// Notifier double that records every dispatched message.
#[derive(Default)]
pub struct RecordingNotifier {
    pub account_created: Mutex<Vec<(String, String, String)>>,
    pub password_resets: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    /// Last reset token dispatched to the given email, if any
    pub fn last_reset_token(&self, email: &str) -> Option<String> {
        self.password_resets
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, token)| token.clone())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_account_created(&self, email: &str, username: &str, password: &str) {
        self.account_created.lock().unwrap().push((
            email.to_string(),
            username.to_string(),
            password.to_string(),
        ));
    }

    async fn send_password_reset(&self, email: &str, token: &str) {
        self.password_resets
            .lock()
            .unwrap()
            .push((email.to_string(), token.to_string()));
    }
}

/// Everything a service-level test needs.
pub struct TestServices {
    pub users: Arc<dyn UserService>,
    pub items: Arc<dyn ItemService>,
    pub notifier: Arc<RecordingNotifier>,
    pub config: Config,
    pub db: DatabaseConnection,
}

pub async fn test_services() -> TestServices {
    test_services_with(Config::test_defaults()).await
}

pub async fn test_services_with(config: Config) -> TestServices {
    let db = test_db().await;
    let uow = Arc::new(Persistence::new(db.clone()));
    let notifier = Arc::new(RecordingNotifier::default());

    let users = Arc::new(UserManager::new(
        uow.clone(),
        config.clone(),
        notifier.clone(),
    ));
    let items = Arc::new(ItemManager::new(uow));

    TestServices {
        users,
        items,
        notifier,
        config,
        db,
    }
}

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Unique email per call
pub fn random_email() -> String {
    format!(
        "user{}@example.com",
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

/// Unique password per call (always long enough to pass validation)
pub fn random_password() -> String {
    format!("password-{}", COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Create a user with random credentials; returns the user and the
/// plaintext password
pub async fn create_random_user(users: &Arc<dyn UserService>) -> (User, String) {
    let email = random_email();
    let password = random_password();
    let user = users
        .create(CreateUser::new(email, password.clone()))
        .await
        .expect("Failed to create user");

    (user, password)
}

/// Create an item with random content owned by the given user
pub async fn create_random_item(items: &Arc<dyn ItemService>, owner_id: i32) -> Item {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    items
        .create(
            CreateItem {
                title: Some(format!("title-{}", n)),
                description: Some(format!("description-{}", n)),
            },
            owner_id,
        )
        .await
        .expect("Failed to create item")
}
