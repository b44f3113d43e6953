//! Shared types, errors, and configuration for Livro Caixa.
//!
//! This crate provides common types used across all other crates:
//! - Tax-ID (CNPJ/CPF) domain type
//! - Auth request/response payloads and JWT claims
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{Claims, JwtError, JwtService};
pub use types::TaxId;
