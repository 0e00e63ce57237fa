//! API middleware.

mod auth;

pub use auth::{auth_context_middleware, role_of, CurrentUser};
