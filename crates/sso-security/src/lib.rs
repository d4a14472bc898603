//! # SSO Security
//! 
//! Security primitives: password hashing and signed session tokens.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, IssuedToken, SigningSecret, TokenError, TokenService};
pub use password::{HashScheme, PasswordError, PasswordService};
