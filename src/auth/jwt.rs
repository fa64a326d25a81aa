//! JWT session token generation and validation
//! Single HS256 token carried in the session cookie

use crate::{config::SecurityConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (admin record ID)
    pub sub: String,

    /// Login user ID
    pub user_id: String,

    /// Whether the password had exceeded its max age when the token was issued.
    /// Snapshot at issue time, not re-evaluated on verify.
    pub password_expired: bool,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into an admin ID
    pub fn admin_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::Unauthorized)
    }
}

/// Session token service
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_exp_secs: u64,
}

impl TokenService {
    /// Create token service from security config
    pub fn from_config(config: &SecurityConfig) -> Result<Self, AppError> {
        let secret = config.jwt_secret.expose_secret();

        // HS256 needs a secret of at least 32 bytes
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_exp_secs: config.token_exp_secs,
        })
    }

    /// Token lifetime in seconds, also used as the cookie Max-Age
    pub fn token_exp_secs(&self) -> u64 {
        self.token_exp_secs
    }

    /// Issue a session token for an admin
    pub fn issue(
        &self,
        admin_id: &Uuid,
        user_id: &str,
        password_expired: bool,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.token_exp_secs as i64);

        let claims = Claims {
            sub: admin_id.to_string(),
            user_id: user_id.to_string(),
            password_expired,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode session token: {:?}", e);
            AppError::Internal(format!("Failed to encode session token: {}", e))
        })
    }

    /// Validate and decode a session token
    ///
    /// Every failure mode (malformed, bad signature, expired) collapses
    /// into Unauthorized so callers cannot distinguish them.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        Ok(decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                AppError::Unauthorized
            })?
            .claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn test_security_config() -> SecurityConfig {
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
    fn test_issue_and_verify() {
        let service = TokenService::from_config(&test_security_config()).unwrap();
        let admin_id = Uuid::new_v4();

        let token = service.issue(&admin_id, "admin", false).unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, admin_id.to_string());
        assert_eq!(claims.user_id, "admin");
        assert!(!claims.password_expired);
        assert_eq!(claims.admin_id().unwrap(), admin_id);
    }

    #[test]
    fn test_password_expired_flag_round_trips() {
        let service = TokenService::from_config(&test_security_config()).unwrap();
        let admin_id = Uuid::new_v4();

        let token = service.issue(&admin_id, "admin", true).unwrap();
        let claims = service.verify(&token).unwrap();
        assert!(claims.password_expired);
    }

    #[test]
    fn test_invalid_token_fails() {
        let service = TokenService::from_config(&test_security_config()).unwrap();
        let err = service.verify("invalid_token").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_wrong_signature_fails() {
        let service = TokenService::from_config(&test_security_config()).unwrap();
        let other = TokenService::from_config(&SecurityConfig {
            jwt_secret: Secret::new("another_secret_key_32_characters_x!".to_string()),
            ..test_security_config()
        })
        .unwrap();

        let token = other.issue(&Uuid::new_v4(), "admin", false).unwrap();
        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = SecurityConfig {
            jwt_secret: Secret::new("short".to_string()),
            ..test_security_config()
        };
        assert!(TokenService::from_config(&config).is_err());
    }
}
