//! Module for core business logic services.
//!
//! Services orchestrate repositories and helpers into user-level operations.

pub mod user_service;
