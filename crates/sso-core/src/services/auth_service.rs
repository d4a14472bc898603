// ============================================================================
// SSO Core - Authentication Service
// File: crates/sso-core/src/services/auth_service.rs
// ============================================================================
//! Login, logout and session verification.
//!
//! Each call runs one full cycle of [`AuthState`]; nothing is kept between
//! requests apart from the shared, read-only password and token services.

use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{debug, error, info, warn};

use sso_security::{Claims, IssuedToken, PasswordService, TokenError, TokenService};
use sso_shared::utils::mask_email;

use crate::domain::{Credentials, UserInfo, UserRecord};
use crate::error::DomainError;
use crate::repositories::UserRepository;
use crate::services::auth_state::{AuthEvent, AuthState, Rejection};

/// Authentication service for handling user login/logout flows
pub struct AuthService<R: UserRepository + ?Sized> {
    user_repo: Arc<R>,
    passwords: Arc<PasswordService>,
    tokens: Arc<TokenService>,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(
        user_repo: Arc<R>,
        passwords: Arc<PasswordService>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            user_repo,
            passwords,
            tokens,
        }
    }

    /// Login with email and password
    pub async fn login(&self, credentials: Credentials) -> Result<LoginResult, DomainError> {
        let Credentials { email, password } = credentials;
        let masked = mask_email(&email);
        let state = AuthState::Anonymous.transition(AuthEvent::LoginRequested)?;
        debug!(email = %masked, state = state.name(), "Login attempt");

        // 1. Find user by email
        let user = match self.user_repo.find_by_email(&email).await {
            Ok(user) => user,
            Err(e) => {
                let message = match e {
                    DomainError::RequestError(message) => message,
                    other => other.to_string(),
                };
                error!(email = %masked, error = %message, "Login failed: user lookup error");
                Self::reject(state, Rejection::RequestError)?;
                return Err(DomainError::RequestError(message));
            }
        };

        // 2. Verify password. Unknown emails still pay for one verification.
        let user = match user {
            Some(user) => {
                let stored_hash = user.password_hash.clone();
                self.verify_password(password, Some(stored_hash))
                    .await?
                    .then_some(user)
            }
            None => {
                self.verify_password(password, None).await?;
                None
            }
        };

        let Some(user) = user else {
            warn!(email = %masked, "Login failed: invalid credentials");
            Self::reject(state, Rejection::LoginFailed)?;
            return Err(DomainError::LoginFailed);
        };

        // 3. Issue token
        let token = self.issue_for(&user)?;
        let state = state.transition(AuthEvent::CredentialsAccepted(token.claims.clone()))?;

        info!(email = %masked, user_id = %user.id, state = state.name(), "Login successful");

        Ok(LoginResult {
            user: UserInfo::from(&user),
            token,
        })
    }

    /// Always ends `Anonymous`, whether or not a session existed.
    pub fn logout(&self, current: Option<Claims>) -> AuthState {
        let state = match current {
            Some(claims) => {
                info!(user_id = %claims.sub, "Logout");
                AuthState::Authenticated(claims)
            }
            None => {
                debug!("Logout without an active session");
                AuthState::Anonymous
            }
        };
        state
            .transition(AuthEvent::LogoutRequested)
            .unwrap_or(AuthState::Anonymous)
    }

    /// Verifies a token presented by the session transport.
    pub fn authenticate(&self, token: &str) -> Result<Claims, TokenError> {
        self.tokens.verify(token).inspect_err(|e| {
            debug!(error = %e, "Session token rejected");
        })
    }

    pub fn token_max_age_seconds(&self) -> i64 {
        self.tokens.expiry().num_seconds()
    }

    fn issue_for(&self, user: &UserRecord) -> Result<IssuedToken, DomainError> {
        self.tokens
            .issue(&user.id.to_string(), user.role)
            .map_err(|e| {
                error!(user_id = %user.id, error = %e, "Token issuance failed");
                DomainError::from(e)
            })
    }

    async fn verify_password(
        &self,
        password: String,
        stored_hash: Option<String>,
    ) -> Result<bool, DomainError> {
        let passwords = Arc::clone(&self.passwords);
        tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => passwords.verify(&password, &hash),
            None => passwords.verify_decoy(&password),
        })
        .await
        .map_err(verification_aborted)
    }

    fn reject(state: AuthState, rejection: Rejection) -> Result<(), DomainError> {
        let state = state.transition(AuthEvent::CredentialsRejected(rejection))?;
        debug!(state = state.name(), rejection = ?rejection, "Login rejected");
        Ok(())
    }
}

fn verification_aborted(err: JoinError) -> DomainError {
    error!(error = %err, "Password verification task failed");
    DomainError::Internal(format!("password verification aborted: {}", err))
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: UserInfo,
    pub token: IssuedToken,
}
