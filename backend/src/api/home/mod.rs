//! Landing page: dashboard for signed-in users, registration homepage otherwise.

pub mod handlers;
pub mod routes;
