//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! 서명 키, 접근 규칙, 역할 카탈로그는 프로세스 시작 시 한 번
//! 만들어지고 이후 읽기 전용입니다. `Arc`로 감싸 요청 간에 잠금 없이
//! 공유됩니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use auth_core::{AccessPolicy, AccessRule, Requirement, Role, TokenIssuer, TokenValidator};

use crate::config::AuthConfig;
use crate::service::AuthService;
use crate::store::UserStore;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
pub struct AppState {
    /// 사용자 저장소
    pub store: Arc<dyn UserStore>,
    /// 가입/로그인 서비스
    pub auth: AuthService,
    /// 토큰 발급기
    pub issuer: TokenIssuer,
    /// 토큰 검증기
    pub validator: TokenValidator,
    /// 접근 규칙 (순서 고정)
    pub policy: AccessPolicy,
    /// 서버 시작 시각 (업타임 계산용)
    pub started_at: DateTime<Utc>,
    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새 AppState 생성.
    pub fn new(config: &AuthConfig, store: Arc<dyn UserStore>) -> anyhow::Result<Self> {
        let auth = AuthService::new(store.clone(), config.default_role)?;

        Ok(Self {
            store,
            auth,
            issuer: TokenIssuer::new(
                &config.jwt_secret,
                config.issuer.as_str(),
                config.token_ttl_secs,
            ),
            validator: TokenValidator::new(&config.jwt_secret),
            policy: default_policy(),
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}

/// 기본 접근 규칙.
///
/// 위에서부터 첫 매칭이 이기며, 어느 규칙에도 걸리지 않는 경로는
/// 인증 필수로 처리됩니다.
pub fn default_policy() -> AccessPolicy {
    AccessPolicy::new(vec![
        AccessRule::new("/auth/**", Requirement::Public),
        AccessRule::new("/health", Requirement::Public),
        AccessRule::new("/users/me", Requirement::AuthenticatedAny),
        AccessRule::new("/admin/**", Requirement::RequiresRole(Role::Admin)),
    ])
}
