//! Postgres 사용자 저장소.
//!
//! 스키마는 `migrations/0001_create_users.sql` 참고.
//! username/email 유일성은 unique 제약으로 보장되며, 제약 위반은
//! [`StoreError`]의 Duplicate variant로 변환됩니다.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use auth_core::Role;

use super::{StoreError, User, UserStore};

/// DB에서 조회한 user row.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    enabled: bool,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        // 알 수 없는 역할 이름은 토큰 클레임과 같은 규칙으로 버린다
        let roles: HashSet<Role> = row.roles.iter().filter_map(|r| Role::parse(r)).collect();

        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            enabled: row.enabled,
            roles,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Postgres 구현.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// insert 에러를 저장소 에러로 변환.
///
/// unique 제약 위반이면 제약 이름으로 username/email을 구분합니다.
fn map_insert_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db) = e {
        if db.is_unique_violation() {
            return match db.constraint() {
                Some(name) if name.contains("email") => StoreError::DuplicateEmail,
                _ => StoreError::DuplicateUsername,
            };
        }
    }
    StoreError::Database(e)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, email, password_hash, enabled, roles, created_at, updated_at \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(row.0)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.0)
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let roles: Vec<String> = user.roles.iter().map(|r| r.as_str().to_string()).collect();

        sqlx::query(
            "INSERT INTO users \
             (id, username, email, password_hash, enabled, roles, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.enabled)
        .bind(&roles)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }
}
