// ============================================================================
// SSO Infrastructure - PostgreSQL User Repository
// File: crates/sso-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{error, warn};
use uuid::Uuid;

use sso_core::domain::UserRecord;
use sso_core::error::DomainError;
use sso_core::repositories::UserRepository;
use sso_shared::UserRole;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        let role = UserRole::from_str(&row.role).unwrap_or_else(|| {
            warn!(user_id = %row.id, role = %row.role, "Unknown role stored, treating as standard");
            UserRole::Standard
        });
        UserRecord {
            id: row.id,
            display_name: row.display_name,
            email: row.email,
            role,
            password_hash: row.password_hash,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, display_name, email, role, password_hash
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding user by email: {}", e);
            DomainError::RequestError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            display_name: "john smith".into(),
            email: "jsmith@gmail.com".into(),
            role: role.into(),
            password_hash: "$2b$04$hash".into(),
        }
    }

    #[test]
    fn test_row_maps_role() {
        let record: UserRecord = row("admin").into();
        assert_eq!(record.role, UserRole::Admin);
        assert_eq!(record.email, "jsmith@gmail.com");
    }

    #[test]
    fn test_unknown_role_falls_back_to_standard() {
        let record: UserRecord = row("superuser").into();
        assert_eq!(record.role, UserRole::Standard);
    }
}
