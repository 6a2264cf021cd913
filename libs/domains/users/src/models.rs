use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_SKIP: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

/// A user record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Assigned by the store, positive and immutable
    pub id: i64,
    /// Unique across all users
    pub email: String,
    /// Unique across all users, 3 to 50 characters
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// `null` until the first update
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(email(message = "value is not a valid email address"))]
    #[schema(example = "ada@example.com")]
    pub email: String,

    #[validate(length(min = 3, max = 50, message = "must be between 3 and 50 characters"))]
    #[schema(example = "ada", min_length = 3, max_length = 50)]
    pub username: String,

    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    #[serde(default)]
    #[schema(max_length = 100)]
    pub full_name: Option<String>,

    /// Defaults to `true` when omitted
    #[serde(default = "default_active")]
    #[schema(default = true)]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CreateUser {
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            full_name: None,
            is_active: true,
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }
}

/// Partial update. Only the fields present in the payload are applied.
///
/// `email`, `username` and `is_active` cannot be set to `null`. `full_name: null`
/// clears the name, while omitting `full_name` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(email(message = "value is not a valid email address"))]
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,

    #[validate(length(min = 3, max = 50, message = "must be between 3 and 50 characters"))]
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(min_length = 3, max_length = 50)]
    pub username: Option<String>,

    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, nullable = true, max_length = 100)]
    pub full_name: Option<Option<String>>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_active: Option<bool>,
}

impl UpdateUser {
    /// True when the payload names no field at all
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.username.is_none()
            && self.full_name.is_none()
            && self.is_active.is_none()
    }

    /// Apply the supplied fields to `user` and stamp `updated_at`.
    pub fn apply_to(&self, user: &mut User, now: DateTime<Utc>) {
        if let Some(ref email) = self.email {
            user.email = email.clone();
        }
        if let Some(ref username) = self.username {
            user.username = username.clone();
        }
        if let Some(ref full_name) = self.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        user.updated_at = Some(now);
    }
}

// A key that is present must carry a value; `null` is a decoding error.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// A key that is present may carry `null`, which is kept distinct from "absent".
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Offset pagination for the list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Records to skip, must be >= 0
    #[serde(default = "default_skip")]
    #[param(default = 0, minimum = 0)]
    pub skip: i64,
    /// Maximum records to return, between 1 and 1000
    #[serde(default = "default_limit")]
    #[param(default = 100, minimum = 1, maximum = 1000)]
    pub limit: i64,
}

fn default_skip() -> i64 {
    DEFAULT_SKIP
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListParams {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }
}
