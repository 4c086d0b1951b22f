//! 비밀번호 해싱 및 검증.
//!
//! Argon2id 기반. 평문 비밀번호는 해시 직후 버려지며,
//! 해시는 솔트를 포함한 PHC 문자열로 저장됩니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
    #[error("저장된 해시 형식이 올바르지 않습니다")]
    InvalidHashFormat,
}

/// 비밀번호를 Argon2id로 해싱.
///
/// 호출마다 `OsRng`에서 새 솔트를 생성하므로 같은 비밀번호라도
/// 결과 해시는 매번 다릅니다.
///
/// # Arguments
///
/// * `password` - 평문 비밀번호
///
/// # Returns
///
/// PHC 형식 해시 문자열 (`$argon2id$v=19$...`)
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::HashingFailed)
}

/// 저장된 해시에 대해 비밀번호 검증.
///
/// 비교는 argon2 내부에서 해시 내용에 대해 상수 시간으로 수행됩니다.
///
/// # Returns
///
/// * `Ok(true)` - 일치
/// * `Ok(false)` - 불일치
/// * `Err(InvalidHashFormat)` - 저장된 해시가 PHC 형식이 아님
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("pw123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "pw123");

        assert!(verify_password("pw123", &hash).unwrap());
        assert!(!verify_password("pw124", &hash).unwrap());
    }

    #[test]
    fn test_salt_is_unique_per_call() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same-password", &first).unwrap());
        assert!(verify_password("same-password", &second).unwrap());
    }

    #[test]
    fn test_invalid_stored_hash() {
        let result = verify_password("pw123", "not-a-phc-hash");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }

    #[test]
    fn test_empty_password_still_hashes() {
        let hash = hash_password("").unwrap();
        assert!(verify_password("", &hash).unwrap());
        assert!(!verify_password("x", &hash).unwrap());
    }
}
