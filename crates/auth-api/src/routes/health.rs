//! 헬스 체크 엔드포인트.
//!
//! 로드밸런서/오케스트레이션에서 liveness 확인용으로 사용합니다.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

/// 헬스 체크 응답.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 서비스 상태
    pub status: String,
    /// API 버전
    pub version: String,
    /// 서버 업타임(초)
    pub uptime_secs: i64,
    /// 현재 시간 (ISO 8601)
    pub timestamp: String,
}

/// GET /health
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let now = Utc::now();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_secs: (now - state.started_at).num_seconds(),
        timestamp: now.to_rfc3339(),
    })
}

pub fn health_router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}
