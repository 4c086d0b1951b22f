//! JWT 발급 및 검증.
//!
//! 토큰은 자기완결형(stateless)이며 서버 측에 저장되지 않습니다.
//! HS256으로 서명된 compact JWT (header.claims.signature, 각각 base64url).

use std::collections::HashSet;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::authorize::AuthContext;
use crate::roles::Role;

/// 기본 토큰 수명 (초).
pub const DEFAULT_TTL_SECS: i64 = 3600;

/// 역할 클레임 표현.
///
/// 발급 시에는 공백으로 연결된 문자열을 쓰지만, 검증 시에는
/// 문자열/리스트 두 표현을 모두 받아들여 하나의 역할 집합으로
/// 정규화합니다 (타 발급자와의 호환 목적).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleClaim {
    /// `"ADMIN USER"` 형태의 공백 구분 문자열
    Delimited(String),
    /// `["ADMIN", "USER"]` 형태의 명시적 리스트
    ListOf(Vec<String>),
}

impl RoleClaim {
    /// 역할 이름 집합으로 정규화.
    ///
    /// 알 수 없는 역할 이름은 조용히 버립니다. 검증 실패가 아닙니다.
    pub fn normalize(&self) -> HashSet<Role> {
        match self {
            RoleClaim::Delimited(s) => s.split_whitespace().filter_map(Role::parse).collect(),
            RoleClaim::ListOf(names) => {
                names.iter().filter_map(|n| Role::parse(n)).collect()
            }
        }
    }
}

/// JWT 페이로드.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 발급자
    pub iss: String,
    /// Subject - username
    pub sub: String,
    /// 발급 시각 (Unix timestamp)
    pub iat: i64,
    /// 만료 시각 (Unix timestamp)
    pub exp: i64,
    /// 역할 클레임
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<RoleClaim>,
    /// 역할 클레임 별칭 (roles와 동일한 값으로 발급됨)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorities: Option<RoleClaim>,
}

impl Claims {
    /// 역할 집합 추출.
    ///
    /// `authorities`를 우선하고, 없으면 `roles`를 읽습니다.
    /// 둘 다 없으면 빈 집합입니다.
    pub fn role_set(&self) -> HashSet<Role> {
        self.authorities
            .as_ref()
            .or(self.roles.as_ref())
            .map(RoleClaim::normalize)
            .unwrap_or_default()
    }
}

/// 토큰 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("토큰 형식이 올바르지 않습니다")]
    Malformed,
    #[error("토큰 서명이 유효하지 않습니다")]
    SignatureInvalid,
    #[error("토큰이 만료되었습니다")]
    Expired,
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

/// 토큰 발급기.
///
/// 서명 키, 발급자, 수명은 프로세스 시작 시 한 번 정해지며
/// 이후 변경되지 않습니다. 발급 자체는 순수 CPU 연산입니다.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    ttl_secs: i64,
}

impl TokenIssuer {
    /// 새 발급기 생성.
    ///
    /// # Arguments
    ///
    /// * `secret` - HS256 서명 키
    /// * `issuer` - `iss` 클레임에 들어갈 고정 값
    /// * `ttl_secs` - 토큰 수명 (초). 양수여야 합니다 (`exp > iat`).
    pub fn new(secret: &str, issuer: impl Into<String>, ttl_secs: i64) -> Self {
        debug_assert!(ttl_secs > 0, "token TTL must be positive");
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            ttl_secs,
        }
    }

    /// 검증된 principal에 대한 토큰 발급.
    ///
    /// 역할 이름은 정렬 후 공백으로 연결되어 `roles`와 `authorities`
    /// 양쪽 클레임에 동일하게 기록됩니다.
    pub fn issue(&self, username: &str, roles: &HashSet<Role>) -> Result<String, TokenError> {
        let now = Utc::now();

        let mut names: Vec<&str> = roles.iter().map(Role::as_str).collect();
        names.sort_unstable();
        let joined = names.join(" ");

        let claims = Claims {
            iss: self.issuer.clone(),
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
            roles: Some(RoleClaim::Delimited(joined.clone())),
            authorities: Some(RoleClaim::Delimited(joined)),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::Encoding)
    }
}

/// 토큰 검증기.
///
/// 서명과 만료를 검사하고 클레임에서 [`AuthContext`]를 추출합니다.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// 새 검증기 생성.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // 만료는 exp 그대로 판정 (기본 60초 유예 제거)
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// 토큰 검증 및 컨텍스트 추출.
    ///
    /// # Errors
    ///
    /// * [`TokenError::Malformed`] - compact JWT 구조로 파싱 불가
    /// * [`TokenError::SignatureInvalid`] - 서명 검증 실패
    /// * [`TokenError::Expired`] - `now > exp`
    pub fn validate(&self, token: &str) -> Result<AuthContext, TokenError> {
        let data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        TokenError::SignatureInvalid
                    }
                    _ => TokenError::Malformed,
                }
            })?;

        let roles = data.claims.role_set();
        Ok(AuthContext::Authenticated {
            username: data.claims.sub,
            roles,
        })
    }
}
