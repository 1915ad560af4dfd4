use async_trait::async_trait;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::User,
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository using SeaORM
///
/// Email uniqueness is enforced by the `users_email_key` constraint; a
/// violation surfaces as [`UserError::AlreadyExists`].
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Maps a unique-constraint violation to `AlreadyExists`, anything else to `Database`.
fn write_error(err: DbErr, email: &str) -> UserError {
    classify_write_error(err.sql_err(), err, email)
}

fn classify_write_error(sql_err: Option<SqlErr>, err: DbErr, email: &str) -> UserError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(%detail, "Unique constraint rejected write");
            UserError::AlreadyExists(email.to_string())
        }
        _ => err.into(),
    }
}

/// `%fragment%` with LIKE wildcards in `fragment` taken literally
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let email = user.email.clone();
        let active_model: entity::ActiveModel = user.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, &email))?;

        tracing::info!(user_id = %model.id, email = %model.email, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn search_by_name(&self, fragment: &str) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Name.like(LikeExpr::new(contains_pattern(fragment)).escape('\\')))
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let id = user.id;
        let email = user.email.clone();
        let active_model: entity::ActiveModel = user.into();

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => UserError::NotFound(id),
            other => write_error(other, &email),
        })?;

        tracing::info!(user_id = %id, "Updated user");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn count(&self) -> UserResult<u64> {
        Ok(entity::Entity::find().count(&self.db).await?)
    }
}
