//! 가입/로그인 엔드포인트.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use validator::Validate;

use crate::error::{ApiError, AuthResponse};
use crate::state::AppState;

/// 가입 요청.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email, length(max = 100))]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// 로그인 요청.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// POST /auth/register
///
/// 성공 시 201. 토큰은 발급하지 않습니다 (로그인에서 발급).
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    req.validate()
        .map_err(|_| ApiError::Validation("Datos de registro inválidos.".to_string()))?;

    state
        .auth
        .register(&req.username, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new("Usuario registrado exitosamente.", None)),
    ))
}

/// POST /auth/login
///
/// 자격 증명이 맞으면 서명된 토큰을 발급합니다.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    req.validate()
        .map_err(|_| ApiError::Validation("Datos de login inválidos.".to_string()))?;

    let user = state.auth.login(&req.username, &req.password).await?;
    let token = state.issuer.issue(&user.username, &user.roles)?;

    Ok(Json(AuthResponse::new("Login exitoso.", Some(token))))
}

pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}
