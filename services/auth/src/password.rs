//! Password hashing with argon2
//!
//! Hashing is deliberately CPU-costly, so both hashing and verification run
//! on the blocking thread pool to keep the request-handling threads free.

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

/// Hash a plaintext password with a fresh random salt
pub async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
            .to_string();
        Ok(hash)
    })
    .await?
}

/// Verify a plaintext candidate against a stored hash
pub async fn verify_password(candidate: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&hash)
            .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

        let argon2 = Argon2::default();
        Ok(argon2
            .verify_password(candidate.as_bytes(), &parsed_hash)
            .is_ok())
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify_round_trip() {
        let hash = hash_password("secret1".to_string())
            .await
            .expect("hashing should succeed");

        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$argon2"));

        let ok = verify_password("secret1".to_string(), hash.clone())
            .await
            .expect("verification should succeed");
        assert!(ok);
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let hash = hash_password("secret1".to_string())
            .await
            .expect("hashing should succeed");

        let ok = verify_password("secret2".to_string(), hash)
            .await
            .expect("verification should succeed");
        assert!(!ok);
    }

    #[tokio::test]
    async fn test_same_password_hashes_differently() {
        let first = hash_password("secret1".to_string()).await.unwrap();
        let second = hash_password("secret1".to_string()).await.unwrap();

        // Random salts make the hashes distinct
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_garbage_hash_fails_verification() {
        let result = verify_password("secret1".to_string(), "not-a-hash".to_string()).await;
        assert!(result.is_err());
    }
}
