//! 경로 기반 인가 결정.
//!
//! 순서가 고정된 접근 규칙 목록을 위에서부터 훑고, 처음 매칭된
//! 규칙의 요구사항으로 허용/거부를 결정합니다. 어떤 규칙에도
//! 매칭되지 않으면 인증 필수(fail-safe)로 처리합니다.

use std::collections::HashSet;

use serde::Serialize;

use crate::roles::Role;

/// 요청 단위 인증 컨텍스트.
///
/// 요청마다 새로 만들어지고 요청이 끝나면 버려집니다.
/// 요청 간에 공유되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AuthContext {
    /// 토큰 없이 공개 경로에 접근한 요청
    Anonymous,
    /// 검증된 토큰에서 추출한 principal
    Authenticated {
        username: String,
        roles: HashSet<Role>,
    },
}

impl AuthContext {
    /// 인증 여부.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, AuthContext::Anonymous)
    }

    /// 특정 역할 보유 여부. Anonymous는 항상 false.
    pub fn has_role(&self, role: Role) -> bool {
        match self {
            AuthContext::Anonymous => false,
            AuthContext::Authenticated { roles, .. } => roles.contains(&role),
        }
    }

    /// principal의 username. Anonymous면 None.
    pub fn username(&self) -> Option<&str> {
        match self {
            AuthContext::Anonymous => None,
            AuthContext::Authenticated { username, .. } => Some(username),
        }
    }
}

/// 경로에 대한 접근 요구사항.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// 누구나 접근 가능
    Public,
    /// 인증된 principal이면 역할 무관 접근 가능
    AuthenticatedAny,
    /// 특정 역할 보유 필수
    RequiresRole(Role),
}

/// 단일 접근 규칙.
///
/// 패턴은 두 형태를 지원합니다:
/// - 정확히 일치: `/users/me`
/// - 접두 일치: `/admin/**` (`/admin` 자신과 그 하위 경로 전부)
#[derive(Debug, Clone)]
pub struct AccessRule {
    pattern: String,
    requirement: Requirement,
}

impl AccessRule {
    pub fn new(pattern: impl Into<String>, requirement: Requirement) -> Self {
        Self {
            pattern: pattern.into(),
            requirement,
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self.pattern.strip_suffix("/**") {
            Some(prefix) => path == prefix || path.starts_with(&format!("{prefix}/")),
            None => path == self.pattern,
        }
    }
}

/// 인가 결정 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny(DenyReason),
}

/// 거부 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// 인증되지 않은 요청
    AuthenticationRequired,
    /// 인증은 되었으나 필요한 역할이 없음
    RoleRequired(Role),
}

/// 접근 규칙 목록 (인가 결정 엔진).
///
/// 프로세스 시작 시 한 번 만들어 `Arc`로 공유합니다.
/// 읽기 전용이므로 잠금 없이 병렬로 평가할 수 있습니다.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

impl AccessPolicy {
    pub fn new(rules: Vec<AccessRule>) -> Self {
        Self { rules }
    }

    /// 경로에 적용되는 요구사항 조회.
    ///
    /// 첫 번째로 매칭되는 규칙이 결정하며, 매칭이 없으면
    /// [`Requirement::AuthenticatedAny`]입니다.
    pub fn requirement_for(&self, path: &str) -> Requirement {
        self.rules
            .iter()
            .find(|rule| rule.matches(path))
            .map(|rule| rule.requirement)
            .unwrap_or(Requirement::AuthenticatedAny)
    }

    /// 인가 결정.
    pub fn decide(&self, path: &str, ctx: &AuthContext) -> Decision {
        match self.requirement_for(path) {
            Requirement::Public => Decision::Permit,
            Requirement::AuthenticatedAny => {
                if ctx.is_anonymous() {
                    Decision::Deny(DenyReason::AuthenticationRequired)
                } else {
                    Decision::Permit
                }
            }
            Requirement::RequiresRole(role) => {
                if ctx.has_role(role) {
                    Decision::Permit
                } else if ctx.is_anonymous() {
                    Decision::Deny(DenyReason::AuthenticationRequired)
                } else {
                    Decision::Deny(DenyReason::RoleRequired(role))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> AccessPolicy {
        AccessPolicy::new(vec![
            AccessRule::new("/auth/**", Requirement::Public),
            AccessRule::new("/health", Requirement::Public),
            AccessRule::new("/users/me", Requirement::AuthenticatedAny),
            AccessRule::new("/admin/**", Requirement::RequiresRole(Role::Admin)),
        ])
    }

    fn user_ctx() -> AuthContext {
        AuthContext::Authenticated {
            username: "alice".to_string(),
            roles: [Role::User].into(),
        }
    }

    fn admin_ctx() -> AuthContext {
        AuthContext::Authenticated {
            username: "root".to_string(),
            roles: [Role::Admin].into(),
        }
    }

    #[test]
    fn test_public_permits_anonymous() {
        assert_eq!(
            policy().decide("/auth/login", &AuthContext::Anonymous),
            Decision::Permit
        );
        assert_eq!(
            policy().decide("/health", &AuthContext::Anonymous),
            Decision::Permit
        );
    }

    #[test]
    fn test_authenticated_any() {
        assert_eq!(policy().decide("/users/me", &user_ctx()), Decision::Permit);
        assert_eq!(
            policy().decide("/users/me", &AuthContext::Anonymous),
            Decision::Deny(DenyReason::AuthenticationRequired)
        );
    }

    #[test]
    fn test_requires_role() {
        assert_eq!(policy().decide("/admin/ping", &admin_ctx()), Decision::Permit);
        assert_eq!(
            policy().decide("/admin/ping", &user_ctx()),
            Decision::Deny(DenyReason::RoleRequired(Role::Admin))
        );
        assert_eq!(
            policy().decide("/admin/ping", &AuthContext::Anonymous),
            Decision::Deny(DenyReason::AuthenticationRequired)
        );
    }

    #[test]
    fn test_unmatched_path_defaults_to_authenticated() {
        assert_eq!(policy().decide("/unknown", &user_ctx()), Decision::Permit);
        assert_eq!(
            policy().decide("/unknown", &AuthContext::Anonymous),
            Decision::Deny(DenyReason::AuthenticationRequired)
        );
    }

    #[test]
    fn test_first_match_wins() {
        // 같은 경로에 더 구체적인 규칙이 앞에 있으면 그 규칙이 이긴다
        let p = AccessPolicy::new(vec![
            AccessRule::new("/api/public", Requirement::Public),
            AccessRule::new("/api/**", Requirement::RequiresRole(Role::Admin)),
        ]);

        assert_eq!(
            p.decide("/api/public", &AuthContext::Anonymous),
            Decision::Permit
        );
        assert_eq!(
            p.decide("/api/other", &user_ctx()),
            Decision::Deny(DenyReason::RoleRequired(Role::Admin))
        );
    }

    #[test]
    fn test_prefix_pattern_matching() {
        let rule = AccessRule::new("/admin/**", Requirement::Public);

        assert!(rule.matches("/admin"));
        assert!(rule.matches("/admin/ping"));
        assert!(rule.matches("/admin/users/1"));
        assert!(!rule.matches("/administrator"));
    }

    #[test]
    fn test_exact_pattern_matching() {
        let rule = AccessRule::new("/users/me", Requirement::Public);

        assert!(rule.matches("/users/me"));
        assert!(!rule.matches("/users/me/settings"));
        assert!(!rule.matches("/users"));
    }

    #[test]
    fn test_anonymous_has_no_roles() {
        assert!(!AuthContext::Anonymous.has_role(Role::Admin));
        assert!(!AuthContext::Anonymous.has_role(Role::User));
        assert_eq!(AuthContext::Anonymous.username(), None);
    }
}
