//! 요청 인증 필터.
//!
//! 모든 인바운드 요청에 대해 비즈니스 로직보다 먼저 정확히 한 번
//! 실행됩니다. 요청별 상태 기계:
//!
//! 1. 토큰 없음 + 공개 경로 → Anonymous로 통과
//! 2. 토큰 없음 (그 외 경로) → 401
//! 3. 토큰 있음 → 검증. 실패하면 경로와 무관하게 401
//! 4. 검증 성공 → 인가 결정. 거부 → 403, 허용 → 컨텍스트를 싣고 통과

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use auth_core::{AuthContext, Decision, Requirement, Role};

use crate::error::ApiError;
use crate::state::AppState;

/// `Authorization: Bearer <token>` 헤더에서 토큰 추출.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// 인증/인가 미들웨어.
///
/// 성공 시 [`AuthContext`]를 request extension에 넣습니다.
/// 컨텍스트는 요청이 끝나면 함께 버려집니다.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    let ctx = match bearer_token(req.headers()) {
        None => {
            if state.policy.requirement_for(&path) != Requirement::Public {
                return ApiError::MissingToken.into_response();
            }
            AuthContext::Anonymous
        }
        Some(token) => match state.validator.validate(token) {
            Ok(ctx) => ctx,
            Err(e) => return ApiError::from(e).into_response(),
        },
    };

    if let Decision::Deny(reason) = state.policy.decide(&path, &ctx) {
        return ApiError::from(reason).into_response();
    }

    req.extensions_mut().insert(ctx);
    next.run(req).await
}

/// 인증된 principal 추출기.
///
/// 미들웨어가 심어둔 [`AuthContext`]에서 꺼냅니다. 인증이 필요한
/// 핸들러에서 사용하며, 컨텍스트가 없거나 Anonymous면 401입니다.
///
/// ```rust,ignore
/// async fn me(user: CurrentUser) -> impl IntoResponse {
///     format!("Hola, {}!", user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
    pub roles: HashSet<Role>,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthContext>() {
            Some(AuthContext::Authenticated { username, roles }) => Ok(CurrentUser {
                username: username.clone(),
                roles: roles.clone(),
            }),
            _ => Err(ApiError::MissingToken),
        }
    }
}
