//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `POST /auth/register` - 가입 (공개)
//! - `POST /auth/login` - 로그인 (공개)
//! - `GET /users/me` - 내 프로필 (인증 필요)
//! - `GET /admin/ping` - 관리자 확인용 (ADMIN 역할 필요)
//! - `GET /health` - 헬스 체크 (공개)
//!
//! 인증/인가는 라우터에 씌운 [`authenticate`] 미들웨어가 전담합니다.
//! 핸들러는 이미 허가된 요청만 받습니다.

pub mod admin;
pub mod auth;
pub mod health;
pub mod users;

use std::sync::Arc;

use axum::Router;

use crate::middleware::authenticate;
use crate::state::AppState;

pub use auth::{LoginRequest, RegisterRequest};
pub use health::HealthResponse;
pub use users::UserResponse;

/// 전체 API 라우터 구성.
///
/// 명시적 파이프라인: 라우트 → 인증 필터. DI 컨테이너나 암묵적
/// 필터 등록은 없습니다.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(auth::auth_router())
        .merge(users::users_router())
        .merge(admin::admin_router())
        .merge(health::health_router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            authenticate,
        ))
        .with_state(state)
}
