use std::sync::Arc;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, ListParams, MAX_LIMIT, UpdateUser, User};
use crate::repository::UserRepository;

const CREATE_CONFLICT: &str = "User with this email or username already exists";
const UPDATE_CONFLICT: &str = "Email or username already exists";

/// Service layer for User business logic
///
/// Every write runs: structural validation, argument checks, uniqueness pre-checks
/// (for precise messages), then the store write, whose unique indexes have the final
/// say when concurrent writers race.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        input.validate()?;

        if self.repository.get_by_email(&input.email).await?.is_some() {
            tracing::info!(email = %input.email, "Create rejected: email taken");
            return Err(UserError::EmailTaken(input.email));
        }
        if self.repository.get_by_username(&input.username).await?.is_some() {
            tracing::info!(username = %input.username, "Create rejected: username taken");
            return Err(UserError::UsernameTaken(input.username));
        }

        let user = self
            .repository
            .create(input)
            .await
            .map_err(|e| conflict_or(e, CREATE_CONFLICT))?;

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        ensure_positive_id(id)?;

        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// List users in ascending id order
    pub async fn list_users(&self, params: ListParams) -> UserResult<Vec<User>> {
        if params.skip < 0 {
            return Err(UserError::invalid_argument("Parameter 'skip' must be >= 0"));
        }
        if !(1..=MAX_LIMIT).contains(&params.limit) {
            return Err(UserError::invalid_argument(
                "Parameter 'limit' must be between 1 and 1000",
            ));
        }

        // Both bounds were checked non-negative above.
        self.repository
            .list(params.skip.unsigned_abs(), params.limit.unsigned_abs())
            .await
    }

    /// Apply a partial update
    pub async fn update_user(&self, id: i64, input: UpdateUser) -> UserResult<User> {
        input.validate()?;
        ensure_positive_id(id)?;

        if input.is_empty() {
            return Err(UserError::invalid_argument(
                "At least one field must be provided for update",
            ));
        }

        if self.repository.get_by_id(id).await?.is_none() {
            return Err(UserError::NotFound(id));
        }

        if let Some(ref email) = input.email {
            if let Some(holder) = self.repository.get_by_email(email).await? {
                if holder.id != id {
                    tracing::info!(user_id = id, email = %email, "Update rejected: email taken");
                    return Err(UserError::EmailTaken(email.clone()));
                }
            }
        }
        if let Some(ref username) = input.username {
            if let Some(holder) = self.repository.get_by_username(username).await? {
                if holder.id != id {
                    tracing::info!(user_id = id, username = %username, "Update rejected: username taken");
                    return Err(UserError::UsernameTaken(username.clone()));
                }
            }
        }

        let user = self
            .repository
            .update(id, input)
            .await
            .map_err(|e| conflict_or(e, UPDATE_CONFLICT))?
            .ok_or(UserError::NotFound(id))?;

        tracing::info!(user_id = id, "Updated user");
        Ok(user)
    }

    /// Delete a user permanently
    pub async fn delete_user(&self, id: i64) -> UserResult<()> {
        ensure_positive_id(id)?;

        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }

        tracing::info!(user_id = id, "Deleted user");
        Ok(())
    }
}

fn ensure_positive_id(id: i64) -> UserResult<()> {
    if id <= 0 {
        return Err(UserError::invalid_argument(
            "User ID must be a positive integer",
        ));
    }
    Ok(())
}

// A unique index fired after the pre-checks passed: a concurrent writer won.
fn conflict_or(err: UserError, message: &str) -> UserError {
    match err {
        UserError::UniqueViolation(constraint) => {
            tracing::info!(constraint = %constraint, "Write lost a uniqueness race");
            UserError::Conflict(message.to_string())
        }
        other => other,
    }
}
