//! Domain services (business logic)

pub mod auth_service;
pub mod auth_state;

pub use auth_service::{AuthService, LoginResult};
pub use auth_state::{AuthEvent, AuthState, Rejection};
