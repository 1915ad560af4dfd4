use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
///
/// Implementations must enforce email uniqueness themselves on `create` and
/// `update`, reporting a clash as [`UserError::AlreadyExists`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by exact email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// All users, oldest first
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Users whose name contains `fragment`
    async fn search_by_name(&self, fragment: &str) -> UserResult<Vec<User>>;

    /// Overwrite an existing user
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by ID; `false` if it did not exist
    async fn delete(&self, id: Uuid) -> UserResult<bool>;

    /// Check if an email is already taken
    async fn email_exists(&self, email: &str) -> UserResult<bool>;

    /// Count all users
    async fn count(&self) -> UserResult<u64>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn oldest_first(mut users: Vec<User>) -> Vec<User> {
    users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    users
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::AlreadyExists(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(oldest_first(users.values().cloned().collect()))
    }

    async fn search_by_name(&self, fragment: &str) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        let matches = users
            .values()
            .filter(|u| u.name.contains(fragment))
            .cloned()
            .collect();
        Ok(oldest_first(matches))
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id));
        }

        if users.values().any(|u| u.id != user.id && u.email == user.email) {
            return Err(UserError::AlreadyExists(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }

    async fn count(&self) -> UserResult<u64> {
        let users = self.users.read().await;
        Ok(users.len() as u64)
    }
}
