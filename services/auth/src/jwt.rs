//! JWT service for token issuance and verification
//!
//! Tokens are signed with HS256 using a shared secret. A token carries the
//! user id, email, and role plus issued-at and expiry claims; possession of
//! a valid, unexpired token is the sole authorization proof.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::models::User;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret for signing and verifying tokens
    pub secret: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: signing secret (required, fatal when missing)
    /// - `JWT_EXPIRES_IN`: token lifetime in seconds (default: 86400)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let expires_in = std::env::var("JWT_EXPIRES_IN")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86400);

        Ok(JwtConfig { secret, expires_in })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// User email
    pub email: String,
    /// User role
    pub rol: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: u64,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // An expired token must be rejected immediately, without clock leeway.
        validation.leeway = 0;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            expires_in: config.expires_in,
        }
    }

    /// Issue a signed token for a user
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            rol: user.rol.clone(),
            iat: now,
            exp: now + self.expires_in,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify a token and return its claims
    ///
    /// Fails when the signature does not match the secret or the expiry has
    /// passed.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_requires_secret() {
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
        assert!(JwtConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_config_defaults_expiry() {
        unsafe {
            std::env::set_var("JWT_SECRET", "test-secret");
            std::env::remove_var("JWT_EXPIRES_IN");
        }
        let config = JwtConfig::from_env().expect("config should load");
        assert_eq!(config.secret, "test-secret");
        assert_eq!(config.expires_in, 86400);
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
    }

    fn test_service(secret: &str) -> JwtService {
        JwtService::new(&JwtConfig {
            secret: secret.to_string(),
            expires_in: 3600,
        })
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            nombre: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            password_hash: "irrelevant".to_string(),
            rol: "operador".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_issued_token_round_trips_claims() {
        let service = test_service("test-secret");
        let user = test_user();

        let token = service.issue(&user).expect("token should be issued");
        let claims = service.verify(&token).expect("token should verify");

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.rol, "operador");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = test_service("test-secret");
        let user = test_user();

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            rol: user.rol.clone(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = test_service("secret-a");
        let verifier = test_service("secret-b");
        let user = test_user();

        let token = issuer.issue(&user).expect("token should be issued");
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = test_service("test-secret");
        let user = test_user();

        let mut token = service.issue(&user).expect("token should be issued");
        token.pop();
        token.push('A');

        assert!(service.verify(&token).is_err());
    }
}
