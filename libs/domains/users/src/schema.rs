//! Idempotent table creation run at start-up and by test fixtures.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id          BIGSERIAL PRIMARY KEY,
    email       VARCHAR NOT NULL UNIQUE,
    username    VARCHAR(50) NOT NULL UNIQUE,
    full_name   VARCHAR(100) NULL,
    is_active   BOOLEAN NOT NULL DEFAULT TRUE,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NULL
)
"#;

/// Create the `users` table and its unique indexes if they do not exist yet.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared(CREATE_USERS_TABLE).await?;
    tracing::info!("Users schema ready");
    Ok(())
}
