//! 사용자 프로필 엔드포인트.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::anyhow;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use uuid::Uuid;

use auth_core::Role;

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// 프로필 응답.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// 토큰 클레임에서 추출한 역할 집합
    pub roles: HashSet<Role>,
}

/// GET /users/me
///
/// 프로필은 저장소에서, 역할은 검증된 토큰 컨텍스트에서 가져옵니다.
async fn me(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<UserResponse>, ApiError> {
    let record = state
        .store
        .find_by_username(&user.username)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
        .ok_or_else(|| {
            ApiError::Internal(anyhow!("토큰의 principal이 저장소에 없음: {}", user.username))
        })?;

    Ok(Json(UserResponse {
        id: record.id,
        username: record.username,
        email: record.email,
        roles: user.roles,
    }))
}

pub fn users_router() -> Router<Arc<AppState>> {
    Router::new().route("/users/me", get(me))
}
