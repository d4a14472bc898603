//! # SSO Core - Domain Module
//! 
//! Domain entities for the SSO application.

pub mod user;

pub use user::{Credentials, UserInfo, UserRecord};
