//! Per-request authentication state machine.
//!
//! ```text
//! Anonymous | Rejected | Authenticated --LoginRequested--> Authenticating
//! Authenticating --CredentialsAccepted--> Authenticated
//! Authenticating --CredentialsRejected--> Rejected
//! any --LogoutRequested--> Anonymous
//! ```

use sso_security::Claims;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    LoginFailed,
    RequestError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated(Claims),
    Rejected(Rejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    LoginRequested,
    CredentialsAccepted(Claims),
    CredentialsRejected(Rejection),
    LogoutRequested,
}

impl AuthState {
    pub fn name(&self) -> &'static str {
        match self {
            AuthState::Anonymous => "anonymous",
            AuthState::Authenticating => "authenticating",
            AuthState::Authenticated(_) => "authenticated",
            AuthState::Rejected(_) => "rejected",
        }
    }

    pub fn transition(self, event: AuthEvent) -> Result<AuthState, DomainError> {
        match (self, event) {
            (_, AuthEvent::LogoutRequested) => Ok(AuthState::Anonymous),
            (
                AuthState::Anonymous | AuthState::Rejected(_) | AuthState::Authenticated(_),
                AuthEvent::LoginRequested,
            ) => Ok(AuthState::Authenticating),
            (AuthState::Authenticating, AuthEvent::CredentialsAccepted(claims)) => {
                Ok(AuthState::Authenticated(claims))
            }
            (AuthState::Authenticating, AuthEvent::CredentialsRejected(rejection)) => {
                Ok(AuthState::Rejected(rejection))
            }
            (state, event) => Err(DomainError::InvalidTransition {
                from: state.name(),
                event: event.name(),
            }),
        }
    }
}

impl AuthEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AuthEvent::LoginRequested => "login_requested",
            AuthEvent::CredentialsAccepted(_) => "credentials_accepted",
            AuthEvent::CredentialsRejected(_) => "credentials_rejected",
            AuthEvent::LogoutRequested => "logout_requested",
        }
    }
}
