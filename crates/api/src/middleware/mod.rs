//! HTTP middleware.

pub mod auth;

pub use auth::{AuthProfile, auth_middleware};
