//! API 에러 타입 및 응답 변환.
//!
//! 모든 엔드포인트는 실패 시 `{message, token: null}` 형태의
//! 고정된 본문을 반환합니다. 내부 에러의 상세(저장소 예외 등)는
//! 로그에만 남고 응답 message에는 절대 노출되지 않습니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use auth_core::{DenyReason, TokenError};

use crate::service::AuthError;

/// 가입/로그인 및 에러 공통 응답 본문.
///
/// `token`은 항상 직렬화됩니다 (없으면 `null`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: Option<String>,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, token: Option<String>) -> Self {
        Self {
            message: message.into(),
            token,
        }
    }
}

/// API 에러 분류.
///
/// 표시 메시지는 원 서비스와 동일한 고정 문구를 사용합니다.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 가입/로그인 경로 (400 / 401)
    #[error("El nombre de usuario ingresado ya se encuentra en uso.")]
    UsernameTaken,
    #[error("El email ingresado ya se encuentra en uso.")]
    EmailTaken,
    #[error("Usuario o contraseña incorrectos.")]
    InvalidCredentials,
    #[error("{0}")]
    Validation(String),

    // 인증 경로 (401)
    #[error("Autenticación requerida.")]
    MissingToken,
    #[error("Token inválido.")]
    TokenMalformed,
    #[error("Token inválido.")]
    TokenSignatureInvalid,
    #[error("Token expirado.")]
    TokenExpired,

    // 인가 경로 (403)
    #[error("Acceso denegado.")]
    Forbidden,

    // 그 외 전부 (500) - 상세는 로그로만
    #[error("Error interno del servidor.")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UsernameTaken | ApiError::EmailTaken | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidCredentials
            | ApiError::MissingToken
            | ApiError::TokenMalformed
            | ApiError::TokenSignatureInvalid
            | ApiError::TokenExpired => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref source) = self {
            error!(error = %source, "internal error");
        }

        let status = self.status_code();
        let body = Json(AuthResponse::new(self.to_string(), None));
        (status, body).into_response()
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Malformed => ApiError::TokenMalformed,
            TokenError::SignatureInvalid => ApiError::TokenSignatureInvalid,
            TokenError::Expired => ApiError::TokenExpired,
            TokenError::Encoding(source) => ApiError::Internal(source.into()),
        }
    }
}

impl From<DenyReason> for ApiError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::AuthenticationRequired => ApiError::MissingToken,
            DenyReason::RoleRequired(_) => ApiError::Forbidden,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::UsernameTaken => ApiError::UsernameTaken,
            AuthError::EmailTaken => ApiError::EmailTaken,
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::Store(source) => ApiError::Internal(source.into()),
            AuthError::Password(source) => ApiError::Internal(source.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::UsernameTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::TokenExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_never_leaks_details() {
        let e = ApiError::Internal(anyhow::anyhow!("connection refused (db=users)"));
        assert_eq!(e.to_string(), "Error interno del servidor.");
    }

    #[test]
    fn test_error_body_has_null_token() {
        let body = AuthResponse::new("x", None);
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""token":null"#));
    }
}
