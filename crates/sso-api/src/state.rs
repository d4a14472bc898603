use std::sync::Arc;

use sso_core::repositories::UserRepository;
use sso_core::services::AuthService;

use crate::session::SessionTransport;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<dyn UserRepository>>,
    pub session: Arc<SessionTransport>,
}

impl AppState {
    pub fn new(auth: AuthService<dyn UserRepository>, session: SessionTransport) -> Self {
        Self {
            auth: Arc::new(auth),
            session: Arc::new(session),
        }
    }
}
