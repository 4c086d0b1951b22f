//! 관리자 엔드포인트.
//!
//! `/admin/**`는 접근 규칙에서 ADMIN 역할을 요구하므로,
//! 여기 핸들러에 도달한 요청은 이미 인가된 상태입니다.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /admin/ping
async fn ping() -> Json<Value> {
    Json(json!({ "message": "Hola Admin, todo piola" }))
}

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new().route("/admin/ping", get(ping))
}
