//! In-memory 사용자 저장소.
//!
//! `DATABASE_URL`이 없을 때의 폴백이자 테스트용 구현.
//! 프로세스가 내려가면 데이터도 사라집니다.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, User, UserStore};

/// in-memory 구현.
///
/// insert는 단일 write 잠금 아래에서 존재 검사와 저장을 함께 수행하므로,
/// 같은 username/email로 경쟁하는 등록 요청은 정확히 하나만 성공합니다.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.users.read().await.contains_key(username))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|u| u.email == email))
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.username) {
            return Err(StoreError::DuplicateUsername);
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        users.insert(user.username.clone(), user.clone());
        Ok(())
    }
}
