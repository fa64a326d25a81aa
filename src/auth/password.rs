//! Password hashing, verification and strength policy

use crate::{config::SecurityConfig, error::AppError};
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// Set of characters counted as "special" by the strength policy
const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Password hasher wrapping Argon2id
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create hasher with OWASP recommended parameters
    pub fn new() -> Self {
        // m=64MiB, t=3 iterations, p=4 lanes
        let params = Params::new(65536, 3, 4, None).expect("Invalid Argon2 params");

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        Self { argon2 }
    }

    /// Hash a password
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {:?}", e);
                AppError::Internal(format!("Failed to hash password: {}", e))
            })?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a password against a stored hash
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), AppError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            tracing::debug!("Failed to parse password hash: {:?}", e);
            AppError::Internal(format!("Failed to parse password hash: {}", e))
        })?;

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::Unauthorized)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a candidate password against the strength policy.
///
/// Returns every rule the password breaks, not just the first one, so
/// the caller can report them all in a single response.
pub fn policy_violations(password: &str, policy: &SecurityConfig) -> Vec<String> {
    let mut violations = Vec::new();

    if password.chars().count() < policy.password_min_length {
        violations.push(format!(
            "Password must be at least {} characters long",
            policy.password_min_length
        ));
    }

    if policy.password_require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push("Password must contain at least 1 uppercase letter".to_string());
    }

    if policy.password_require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push("Password must contain at least 1 number".to_string());
    }

    if policy.password_require_special && !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        violations.push("Password must contain at least 1 special character".to_string());
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn test_policy() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: Secret::new("test_secret_key_32_characters_long!".to_string()),
            token_exp_secs: 86400,
            password_max_age_days: 30,
            password_min_length: 8,
            password_require_uppercase: true,
            password_require_digit: true,
            password_require_special: true,
            secure_cookies: false,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "TestPassword123!";

        let hash = hasher.hash(password).unwrap();
        hasher.verify(password, &hash).unwrap();
    }

    #[test]
    fn test_verify_fails_with_wrong_password() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("TestPassword123!").unwrap();
        assert!(hasher.verify("WrongPassword", &hash).is_err());
    }

    #[test]
    fn test_hash_is_different_each_time() {
        let hasher = PasswordHasher::new();
        let password = "TestPassword123!";

        let hash1 = hasher.hash(password).unwrap();
        let hash2 = hasher.hash(password).unwrap();

        // Salts differ per hash
        assert_ne!(hash1, hash2);

        hasher.verify(password, &hash1).unwrap();
        hasher.verify(password, &hash2).unwrap();
    }

    #[test]
    fn test_policy_accepts_strong_password() {
        assert!(policy_violations("Str0ng!Pass", &test_policy()).is_empty());
    }

    #[test]
    fn test_policy_accumulates_all_violations() {
        let violations = policy_violations("short", &test_policy());
        assert_eq!(violations.len(), 4);
        assert!(violations[0].contains("at least 8 characters"));
        assert!(violations[1].contains("uppercase"));
        assert!(violations[2].contains("number"));
        assert!(violations[3].contains("special"));
    }

    #[test]
    fn test_policy_single_violation() {
        let violations = policy_violations("NoSpecial1", &test_policy());
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("special"));
    }
}
