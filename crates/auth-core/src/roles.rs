//! 역할 카탈로그.
//!
//! 시스템에 알려진 역할의 고정 집합. 계층 구조는 없으며,
//! 인가는 역할 집합의 포함 여부로만 결정됩니다.

use serde::{Deserialize, Serialize};

/// 사용자 역할.
///
/// 프로세스 전역에서 유효한 역할은 이 enum의 variant가 전부입니다.
/// 토큰 클레임에 들어있는 알 수 없는 역할 이름은 [`Role::parse`]에서
/// `None`으로 걸러집니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// 관리자 - `/admin/**` 접근 가능
    Admin,
    /// 일반 사용자 - 가입 시 기본 부여
    User,
}

impl Role {
    /// 알려진 모든 역할.
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    /// 클레임 문자열에서 역할 파싱.
    ///
    /// 대소문자를 구분하지 않으며, 알 수 없는 이름은 `None`을 반환합니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "USER" => Some(Role::User),
            _ => None,
        }
    }

    /// 토큰/응답에 쓰이는 고정 이름 반환.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
