//! # SSO Infrastructure
//! 
//! Database adapters for the core's repository ports.

pub mod database;

pub use database::{create_pool, run_migrations, PgUserRepository};
