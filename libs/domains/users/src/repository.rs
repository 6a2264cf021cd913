use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};

/// Repository trait for User persistence
///
/// Implementations must enforce email and username uniqueness atomically with the
/// write and report a violation as [`UserError::UniqueViolation`]. Lookups are
/// advisory; only the write decides.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; the store assigns `id` and `created_at`
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Exact match on email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Exact match on username
    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>>;

    /// Users in ascending id order
    async fn list(&self, skip: u64, limit: u64) -> UserResult<Vec<User>>;

    /// Apply the supplied fields and stamp `updated_at`.
    /// `Ok(None)` when no user has this id.
    async fn update(&self, id: i64, input: UpdateUser) -> UserResult<Option<User>>;

    /// Hard delete; `false` when no user has this id
    async fn delete(&self, id: i64) -> UserResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

impl Store {
    // Mirrors the unique indexes of the users table.
    fn check_unique(&self, id: Option<i64>, email: Option<&str>, username: Option<&str>) -> UserResult<()> {
        for user in self.users.values().filter(|u| Some(u.id) != id) {
            if email.is_some_and(|e| e == user.email) {
                return Err(UserError::UniqueViolation("users_email_key".to_string()));
            }
            if username.is_some_and(|u| u == user.username) {
                return Err(UserError::UniqueViolation("users_username_key".to_string()));
            }
        }
        Ok(())
    }
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let mut store = self.store.write().await;
        store.check_unique(None, Some(&input.email), Some(&input.username))?;

        store.last_id += 1;
        let user = User {
            id: store.last_id,
            email: input.email,
            username: input.username,
            full_name: input.full_name,
            is_active: input.is_active,
            created_at: Utc::now(),
            updated_at: None,
        };
        store.users.insert(user.id, user.clone());

        tracing::debug!(user_id = user.id, "Inserted user");
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.email == email).cloned())
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.username == username).cloned())
    }

    async fn list(&self, skip: u64, limit: u64) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(store.users.values().skip(skip).take(limit).cloned().collect())
    }

    async fn update(&self, id: i64, input: UpdateUser) -> UserResult<Option<User>> {
        let mut store = self.store.write().await;
        if !store.users.contains_key(&id) {
            return Ok(None);
        }

        store.check_unique(Some(id), input.email.as_deref(), input.username.as_deref())?;

        let Some(user) = store.users.get_mut(&id) else {
            return Ok(None);
        };
        input.apply_to(user, Utc::now());

        tracing::debug!(user_id = id, "Updated user row");
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let mut store = self.store.write().await;
        Ok(store.users.remove(&id).is_some())
    }
}
