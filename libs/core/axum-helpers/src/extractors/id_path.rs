//! Integer path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::num::IntErrorKind;

/// Single integer path parameter, e.g. `/users/{id}`.
///
/// A token that is not an integer, or does not fit in `i64`, rejects with 422. Range checks (such as
/// positivity) are left to the handler's service so they can report their own message.
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidParameter(e.body_text()))?;

        raw.parse::<i64>().map(IdPath).map_err(|e| {
            let reason = match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => "must be a 64-bit integer",
                _ => "must be an integer",
            };
            AppError::InvalidParameter(format!("Invalid ID '{}': {}", raw, reason))
        })
    }
}
