//! Domain errors

use sso_security::TokenError;
use sso_shared::constants::LOGIN_FAILED_MESSAGE;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Unknown email and wrong password collapse into this one variant.
    #[error("{}", LOGIN_FAILED_MESSAGE)]
    LoginFailed,

    /// Infrastructure failure; the message is passed through untouched.
    #[error("{0}")]
    RequestError(String),

    /// Fault inside the service itself; never shown to the client.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Invalid auth transition: {event} while {from}")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },
}
