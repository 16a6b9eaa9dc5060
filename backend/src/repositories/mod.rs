//! Data access layer.
//!
//! Repositories wrap the SQL for a single table and return plain models.

pub mod user_repository;
