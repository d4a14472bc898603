//! User repository trait (port)

use async_trait::async_trait;
use crate::domain::UserRecord;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `Ok(None)` means no such user; `Err` is reserved for infrastructure failures.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError>;
}
