use sea_orm::{DbErr, SqlErr};

/// Coarse classification of a SeaORM error for callers that translate it into
/// their own domain error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbErrorKind {
    /// A unique index rejected the write. Carries the driver message.
    UniqueViolation(String),
    /// The pool could not hand out a connection or the connection dropped.
    Unavailable,
    Other,
}

/// Classify `err` without string-matching driver messages.
pub fn classify(err: &DbErr) -> DbErrorKind {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return DbErrorKind::UniqueViolation(detail);
    }

    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => DbErrorKind::Unavailable,
        _ => DbErrorKind::Other,
    }
}
