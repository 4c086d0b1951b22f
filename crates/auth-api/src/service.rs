//! 자격 증명 검증 서비스.
//!
//! 가입과 로그인. 저장소와 해시 함수 사이의 조율만 담당하며,
//! 토큰 발급은 핸들러에서 별도로 수행합니다.

use std::sync::Arc;

use tracing::info;

use auth_core::{hash_password, verify_password, PasswordError, Role};

use crate::store::{StoreError, User, UserStore};

/// 자격 증명 검증 에러.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("이미 사용 중인 username입니다")]
    UsernameTaken,
    #[error("이미 사용 중인 email입니다")]
    EmailTaken,
    #[error("자격 증명이 올바르지 않습니다")]
    InvalidCredentials,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// 가입/로그인 서비스.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    default_role: Role,
    /// 존재하지 않는 username에 대한 로그인에서도 해시 검증을 수행해
    /// 응답 시간으로 계정 존재 여부가 드러나지 않게 하기 위한 더미 해시.
    dummy_hash: String,
}

impl AuthService {
    /// 새 서비스 생성.
    pub fn new(store: Arc<dyn UserStore>, default_role: Role) -> Result<Self, PasswordError> {
        let dummy_hash = hash_password("timing-equalizer")?;
        Ok(Self {
            store,
            default_role,
            dummy_hash,
        })
    }

    /// 신규 principal 등록.
    ///
    /// 비밀번호는 호출마다 새 솔트로 해싱되어 저장되며, 평문은
    /// 반환값에 포함되지 않습니다. 기본 역할이 항상 부여되므로
    /// 등록된 사용자의 역할 집합은 비어 있지 않습니다.
    ///
    /// # Errors
    ///
    /// * [`AuthError::UsernameTaken`] / [`AuthError::EmailTaken`] -
    ///   사전 검사 또는 저장 시점의 unique 제약 위반 (경합 시 최종 권위)
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        if self.store.username_exists(username).await? {
            return Err(AuthError::UsernameTaken);
        }
        if self.store.email_exists(email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(password)?;
        let user = User::new(username, email, password_hash, [self.default_role].into());

        self.store.insert(&user).await.map_err(|e| match e {
            StoreError::DuplicateUsername => AuthError::UsernameTaken,
            StoreError::DuplicateEmail => AuthError::EmailTaken,
            other => AuthError::Store(other),
        })?;

        info!(username = %user.username, "user registered");
        Ok(user)
    }

    /// 자격 증명 검증 (로그인).
    ///
    /// 존재하지 않는 username과 틀린 비밀번호는 동일한
    /// [`AuthError::InvalidCredentials`]로 떨어집니다. 두 경우를
    /// 구분할 수 있는 신호를 호출자에게 주지 않습니다.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let Some(user) = self.store.find_by_username(username).await? else {
            let _ = verify_password(password, &self.dummy_hash);
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}
