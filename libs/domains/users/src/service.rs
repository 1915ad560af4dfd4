use std::sync::Arc;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{OrderSummary, User, UserInput};
use crate::order_client::OrderClient;
use crate::repository::UserRepository;

/// Service layer for User business logic
///
/// Field rules are checked before any write. The email pre-checks here are a
/// fast path; the repository has the final say on uniqueness.
pub struct UserService<R: UserRepository, O: OrderClient> {
    repository: Arc<R>,
    orders: Arc<O>,
}

impl<R: UserRepository, O: OrderClient> Clone for UserService<R, O> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            orders: Arc::clone(&self.orders),
        }
    }
}

impl<R: UserRepository, O: OrderClient> UserService<R, O> {
    pub fn new(repository: R, orders: O) -> Self {
        Self {
            repository: Arc::new(repository),
            orders: Arc::new(orders),
        }
    }

    /// Create a new user
    pub async fn create_user(&self, input: Option<UserInput>) -> UserResult<User> {
        let input = require_input(input)?;
        input.check()?;

        if self.repository.email_exists(&input.email).await? {
            return Err(UserError::AlreadyExists(input.email));
        }

        self.repository.create(User::new(input)).await
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Get a user by exact email
    pub async fn get_user_by_email(&self, email: &str) -> UserResult<User> {
        self.repository
            .get_by_email(email)
            .await?
            .ok_or_else(|| UserError::EmailNotFound(email.to_string()))
    }

    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    /// Replace name and email of an existing user
    pub async fn update_user(&self, id: Uuid, input: Option<UserInput>) -> UserResult<User> {
        let mut user = self.get_user(id).await?;

        let input = require_input(input)?;
        input.check()?;

        if input.email != user.email && self.repository.email_exists(&input.email).await? {
            return Err(UserError::AlreadyExists(input.email));
        }

        user.apply_update(input);
        self.repository.update(user).await
    }

    /// Delete a user permanently
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }

    /// Users whose name contains `name`
    pub async fn search_users_by_name(&self, name: Option<&str>) -> UserResult<Vec<User>> {
        let name = name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(UserError::InvalidField {
                field: "name".to_string(),
                reason: "Search term must not be empty".to_string(),
            });
        }

        self.repository.search_by_name(name).await
    }

    /// Orders of an existing user, as reported by the order service
    pub async fn get_user_orders(&self, user_id: Uuid) -> UserResult<Vec<OrderSummary>> {
        self.get_user(user_id).await?;

        let orders = self
            .orders
            .orders_for_user(user_id)
            .await
            .map_err(|source| UserError::OrderService { user_id, source })?;

        tracing::debug!(%user_id, count = orders.len(), "Fetched user orders");
        Ok(orders)
    }

    pub async fn total_users(&self) -> UserResult<u64> {
        self.repository.count().await
    }
}

fn require_input(input: Option<UserInput>) -> UserResult<UserInput> {
    input.ok_or_else(|| UserError::Validation("User data must not be null".to_string()))
}
