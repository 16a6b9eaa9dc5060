//! Page-level API surface.
//!
//! Holds the response envelope, the view models handed to the renderer,
//! and the landing page route. Authentication routes live in `auth`.

pub mod common;
pub mod home;
pub mod views;
