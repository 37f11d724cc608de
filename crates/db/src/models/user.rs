//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fitout_core::types::{DbId, Timestamp};

/// A row from the `users` table. Not serializable: it carries the password
/// hash and lockout bookkeeping. Convert to [`PublicUser`] before returning
/// from a handler.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The user fields safe to expose over the API.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a user. The handler hashes `password` before insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    /// Defaults to `coordinator` if omitted.
    pub role: Option<String>,
}

/// Insert parameters after password hashing.
#[derive(Debug, Clone)]
pub struct InsertUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: String,
}

/// DTO for updating a user. All fields are optional; `password` is hashed
/// by the handler when present.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
}
