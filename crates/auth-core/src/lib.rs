//! 인증 핵심 로직.
//!
//! 이 크레이트는 I/O가 없는 순수 인증 로직만 포함합니다:
//! - [`Role`]: 시스템에 알려진 역할 카탈로그
//! - 비밀번호 해싱/검증 (Argon2id)
//! - JWT 발급/검증 ([`TokenIssuer`], [`TokenValidator`])
//! - 경로 기반 인가 결정 ([`AccessPolicy`])
//!
//! 서명 키와 접근 규칙은 프로세스 시작 시 한 번 생성되어
//! 생성자를 통해 명시적으로 주입됩니다. 전역 상태는 없습니다.

pub mod authorize;
pub mod password;
pub mod roles;
pub mod token;

pub use authorize::{AccessPolicy, AccessRule, AuthContext, Decision, DenyReason, Requirement};
pub use password::{hash_password, verify_password, PasswordError};
pub use roles::Role;
pub use token::{Claims, RoleClaim, TokenError, TokenIssuer, TokenValidator};
