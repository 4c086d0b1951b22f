//! 사용자 저장소.
//!
//! 저장소는 불투명한 협력자입니다. 핵심 로직은 [`UserStore`] 트레이트만
//! 바라보며, 구현은 두 가지입니다:
//!
//! - [`PgUserStore`]: Postgres (sqlx). username/email 유일성은
//!   DB unique 제약이 최종 권위입니다.
//! - [`MemoryUserStore`]: in-memory. `DATABASE_URL`이 없을 때의
//!   폴백이자 테스트용.

mod memory;
mod postgres;

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use auth_core::Role;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// 저장소 에러.
///
/// 중복 키는 별도 variant로 분리됩니다. check-then-insert 경합에서
/// 두 요청이 동시에 존재 검사를 통과해도, insert 단계에서 정확히
/// 하나만 성공하고 나머지는 Duplicate*로 떨어집니다.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("이미 사용 중인 username입니다")]
    DuplicateUsername,
    #[error("이미 사용 중인 email입니다")]
    DuplicateEmail,
    #[error("데이터베이스 오류: {0}")]
    Database(#[from] sqlx::Error),
}

/// 사용자 엔티티 (principal).
///
/// `password_hash`는 직렬화 대상에서 제외됩니다.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub enabled: bool,
    pub roles: HashSet<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 새 사용자 생성.
    ///
    /// 타임스탬프는 여기서 명시적으로 찍습니다 (persist 훅 없음).
    /// `enabled`는 true로 시작합니다.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        roles: HashSet<Role>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            enabled: true,
            roles,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 사용자 저장소 인터페이스.
///
/// 모든 호출은 I/O로 블로킹될 수 있으므로 async입니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// username으로 조회.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// username 사용 여부.
    async fn username_exists(&self, username: &str) -> Result<bool, StoreError>;

    /// email 사용 여부.
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// 신규 사용자 저장.
    ///
    /// # Errors
    ///
    /// username/email이 이미 존재하면 [`StoreError::DuplicateUsername`] /
    /// [`StoreError::DuplicateEmail`].
    async fn insert(&self, user: &User) -> Result<(), StoreError>;
}
