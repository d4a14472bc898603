use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockall::mock;
use sso_core::repositories::UserRepository;
use sso_core::services::AuthService;
use sso_core::{DomainError, UserRecord};
use sso_security::{HashScheme, PasswordService, SigningSecret, TokenService};
use sso_shared::config::{CookieSettings, SameSite};
use sso_shared::UserRole;
use uuid::Uuid;

use crate::session::SessionTransport;
use crate::state::AppState;

pub const SECRET: &str = "sso-api-test-secret-0123456789abcdef";
pub const COOKIE_NAME: &str = "sso_session";

mock! {
    pub Users {}

    #[async_trait]
    impl UserRepository for Users {
        async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError>;
    }
}

pub fn passwords() -> Arc<PasswordService> {
    Arc::new(PasswordService::new(HashScheme::Bcrypt { cost: 4 }).unwrap())
}

pub fn tokens() -> Arc<TokenService> {
    let secret = SigningSecret::from_value(SECRET).unwrap();
    Arc::new(TokenService::new(&secret, Duration::hours(1)))
}

pub fn user(passwords: &PasswordService, email: &str, password: &str) -> UserRecord {
    UserRecord {
        id: Uuid::new_v4(),
        display_name: "john smith".into(),
        email: email.into(),
        role: UserRole::Standard,
        password_hash: passwords.hash(password).unwrap(),
    }
}

pub fn state_with(repo: MockUsers, passwords: Arc<PasswordService>) -> AppState {
    state_with_cookie_path(repo, passwords, "/")
}

pub fn state_with_cookie_path(
    repo: MockUsers,
    passwords: Arc<PasswordService>,
    cookie_path: &str,
) -> AppState {
    let tokens = tokens();
    let max_age = tokens.expiry().num_seconds();
    let repo: Arc<dyn UserRepository> = Arc::new(repo);
    let session = SessionTransport::new(
        &CookieSettings {
            name: COOKIE_NAME.into(),
            path: cookie_path.into(),
            secure: false,
            same_site: SameSite::Strict,
        },
        max_age,
    );
    AppState::new(AuthService::new(repo, passwords, tokens), session)
}
