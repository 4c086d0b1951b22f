//! 서버 설정.
//!
//! 모든 설정은 환경변수에서 읽습니다 (`.env`는 main에서 dotenvy로 로드).
//!
//! # 환경변수
//!
//! - `API_HOST`: 바인딩 주소 (기본값: 127.0.0.1)
//! - `API_PORT`: 포트 (기본값: 8080)
//! - `DATABASE_URL`: Postgres 연결 문자열 (없으면 in-memory 저장소 사용)
//! - `JWT_SECRET`: HS256 서명 키 (필수)
//! - `TOKEN_TTL_SECS`: 토큰 수명 초 (기본값: 3600)
//! - `TOKEN_ISSUER`: iss 클레임 값 (기본값: http://localhost:8080)
//! - `DEFAULT_ROLE`: 가입 시 부여할 역할 (기본값: USER)

use std::net::SocketAddr;

use anyhow::{bail, Context};
use auth_core::{token::DEFAULT_TTL_SECS, Role};

/// 애플리케이션 설정.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// 바인딩할 호스트 주소
    pub host: String,
    /// 바인딩할 포트
    pub port: u16,
    /// Postgres 연결 문자열 (선택)
    pub database_url: Option<String>,
    /// JWT 서명 키
    pub jwt_secret: String,
    /// 토큰 수명 (초)
    pub token_ttl_secs: i64,
    /// iss 클레임에 기록할 발급자
    pub issuer: String,
    /// 가입 시 부여하는 기본 역할
    pub default_role: Role,
}

impl AuthConfig {
    /// 환경변수에서 설정 로드.
    ///
    /// # Errors
    ///
    /// `JWT_SECRET`이 없거나, `TOKEN_TTL_SECS`가 양수가 아니거나
    /// (`exp > iat` 불변식 위반), `DEFAULT_ROLE`이 알 수 없는 역할이면
    /// 에러를 반환합니다.
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let database_url = std::env::var("DATABASE_URL").ok();

        let jwt_secret =
            std::env::var("JWT_SECRET").context("JWT_SECRET 환경변수가 설정되지 않았습니다")?;

        let token_ttl_secs = match std::env::var("TOKEN_TTL_SECS") {
            Ok(raw) => raw
                .parse::<i64>()
                .with_context(|| format!("TOKEN_TTL_SECS 파싱 실패: {raw}"))?,
            Err(_) => DEFAULT_TTL_SECS,
        };
        if token_ttl_secs <= 0 {
            bail!("TOKEN_TTL_SECS는 양수여야 합니다: {token_ttl_secs}");
        }

        let issuer = std::env::var("TOKEN_ISSUER")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let default_role = match std::env::var("DEFAULT_ROLE") {
            Ok(raw) => {
                Role::parse(&raw).with_context(|| format!("알 수 없는 DEFAULT_ROLE: {raw}"))?
            }
            Err(_) => Role::User,
        };

        Ok(Self {
            host,
            port,
            database_url,
            jwt_secret,
            token_ttl_secs,
            issuer,
            default_role,
        })
    }

    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: None,
            jwt_secret: "secret".to_string(),
            token_ttl_secs: DEFAULT_TTL_SECS,
            issuer: "http://localhost:8080".to_string(),
            default_role: Role::User,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = test_config().socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_default_ttl_is_one_hour() {
        assert_eq!(test_config().token_ttl_secs, 3600);
    }
}
