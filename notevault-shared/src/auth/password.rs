/// Password hashing with a SHA-256 pre-hash in front of Argon2id
///
/// Passwords are digested with SHA-256 and hex-encoded before they reach the
/// slow hash. The pre-hash gives every input a fixed 64-byte shape, so
/// Unicode passwords and passwords of arbitrary length are accepted without
/// running into any input ceiling of the underlying primitive (the previous
/// deployment of this system relied on bcrypt, whose 72-byte truncation is
/// exactly the failure mode this guards against). The Argon2id output is a
/// PHC string that embeds its own random salt and cost parameters, so
/// verification needs nothing beyond the stored string itself.
///
/// # Parameters
///
/// - **Algorithm**: Argon2id, version 0x13
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash
///
/// Hashing is intentionally CPU-expensive. Request handlers must run both
/// [`hash_password`] and [`verify_password`] via `tokio::task::spawn_blocking`
/// so a login burst cannot stall the async request loop.
///
/// # Example
///
/// ```
/// use notevault_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("correct horse battery staple")?;
/// assert!(verify_password("correct horse battery staple", &hash));
/// assert!(!verify_password("wrong password", &hash));
/// # Ok(())
/// # }
/// ```
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};
use sha2::{Digest, Sha256};

/// Error type for password hashing
///
/// Only hashing has a failure path. Verification never errors toward the
/// caller: a hash that cannot be parsed is treated as a non-match, because
/// the caller-visible outcome of "wrong password" and "corrupt stored hash"
/// must be indistinguishable.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// Reduces a password of any length to a fixed-size hex digest.
///
/// 64 ASCII characters, comfortably inside the limits of any slow-hash
/// primitive and stable across Unicode input.
fn prehash(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Hashes a password
///
/// Applies the SHA-256 pre-hash, then Argon2id with a fresh random salt from
/// the OS RNG. Two calls with the same password produce different strings.
///
/// # Returns
///
/// PHC string format hash, e.g.:
///
/// ```text
/// $argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHQ$hash...
/// ```
///
/// # Errors
///
/// Returns [`PasswordError::Hash`] if the primitive rejects its parameters
/// or the hash cannot be computed. Neither happens with the fixed parameters
/// used here; callers should treat this as an internal error.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(65536) // 64 MB
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::Hash(format!("invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(prehash(password).as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(format!("hash generation failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored hash string
///
/// Comparison is delegated to the primitive's own verification entry point,
/// which is constant-time with respect to mismatch position; the password is
/// never re-derived and compared manually. Cost parameters and salt are read
/// out of the PHC string, so verification works across parameter upgrades.
///
/// A hash string that fails to parse yields `false` exactly like a wrong
/// password does, but is additionally logged with a distinct reason code so
/// corrupt rows can be found in the logs without changing what the caller
/// observes.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(reason = "corrupt_password_hash", error = %e, "stored password hash failed to parse");
            return false;
        }
    };

    match Argon2::default().verify_password(prehash(password).as_bytes(), &parsed) {
        Ok(()) => true,
        Err(argon2::password_hash::Error::Password) => false,
        Err(e) => {
            tracing::warn!(reason = "corrupt_password_hash", error = %e, "stored password hash is not verifiable");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_embeds_algorithm_and_parameters() {
        let hash = hash_password("test_password_123").expect("hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let password = "same_password";

        let hash1 = hash_password(password).expect("hash 1 should succeed");
        let hash2 = hash_password(password).expect("hash 2 should succeed");

        // Fresh salt per call
        assert_ne!(hash1, hash2);
        assert!(verify_password(password, &hash1));
        assert!(verify_password(password, &hash2));
    }

    #[test]
    fn test_verify_correct_password() {
        let hash = hash_password("correct_password").expect("hash should succeed");
        assert!(verify_password("correct_password", &hash));
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("correct_password").expect("hash should succeed");
        assert!(!verify_password("wrong_password", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_verify_malformed_hash_is_a_rejection_not_an_error() {
        assert!(!verify_password("password", "not-a-phc-string"));
        assert!(!verify_password("password", "$argon2id$truncated"));
        assert!(!verify_password("password", ""));
    }

    #[test]
    fn test_unicode_and_long_passwords() {
        // The pre-hash removes any input-length ceiling, so passwords well
        // past bcrypt's historical 72-byte limit must round-trip.
        let long = "x".repeat(300);
        let passwords = vec!["simple", "with spaces", "unicode-密码-パスワード-🔐", &long];

        for password in passwords {
            let hash = hash_password(password).expect("hash should succeed");
            assert!(
                verify_password(password, &hash),
                "password {:?} should verify",
                password
            );
        }
    }

    #[test]
    fn test_long_passwords_are_not_truncated() {
        // bcrypt-style truncation would make these two collide.
        let a = format!("{}A", "x".repeat(100));
        let b = format!("{}B", "x".repeat(100));

        let hash = hash_password(&a).expect("hash should succeed");
        assert!(verify_password(&a, &hash));
        assert!(!verify_password(&b, &hash));
    }
}
