//! # SSO API
//! 
//! HTTP handlers, extractors, the session cookie transport and the router.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use routes::router;
pub use session::SessionTransport;
pub use state::AppState;
