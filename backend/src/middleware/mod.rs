//! Request middleware

pub mod auth;

pub use auth::{auth_middleware, require_roles, role_allowed, AuthUser, CurrentUser};
