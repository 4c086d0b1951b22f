//! 인증 REST API 서버.
//!
//! Axum 기반 HTTP 경계층. 핵심 로직은 `auth-core`에 있고,
//! 이 크레이트는 다음을 제공합니다:
//!
//! - [`config`]: 환경변수 설정 로드
//! - [`state`]: 공유 애플리케이션 상태 (AppState)
//! - [`store`]: 사용자 저장소 (Postgres / in-memory)
//! - [`service`]: 자격 증명 검증 (가입/로그인)
//! - [`middleware`]: 요청 인증 필터
//! - [`routes`]: REST 엔드포인트

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::AuthConfig;
pub use error::{ApiError, AuthResponse};
pub use routes::create_api_router;
pub use service::{AuthError, AuthService};
pub use state::AppState;
pub use store::{MemoryUserStore, PgUserStore, StoreError, User, UserStore};
