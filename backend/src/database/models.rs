//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. They differ from the API-facing view models: the
//! password hash never leaves the service layer.

use sqlx::FromRow;

/// Row of the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// bcrypt digest, stored in the `password` column.
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

/// Data needed to insert a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
}
