use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::{
    entity,
    error::UserResult,
    models::{CreateUser, UpdateUser, User},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository.
///
/// Uniqueness is decided by the `users` table's unique indexes. A rejected insert or
/// update surfaces as [`UserError::UniqueViolation`](crate::UserError::UniqueViolation).
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn update_locked(
        txn: &DatabaseTransaction,
        id: i64,
        input: UpdateUser,
    ) -> UserResult<Option<User>> {
        let Some(model) = entity::Entity::find_by_id(id)
            .lock_exclusive()
            .one(txn)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::ActiveModel = model.into();
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(username) = input.username {
            active.username = Set(username);
        }
        if let Some(full_name) = input.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = active.update(txn).await?;
        Ok(Some(updated.into()))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::debug!(user_id = model.id, "Inserted user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
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

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, skip: u64, limit: u64) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, input: UpdateUser) -> UserResult<Option<User>> {
        let txn = self.db.begin().await?;

        match Self::update_locked(&txn, id, input).await {
            Ok(updated) => {
                txn.commit().await?;
                Ok(updated)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(user_id = id, error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
