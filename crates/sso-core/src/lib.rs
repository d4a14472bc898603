//! # SSO Core
//! 
//! Domain entities, the login/logout flow, and the repository port it reads users through.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
