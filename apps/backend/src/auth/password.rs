//! Credential hasher: Argon2id with a per-hash random salt.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use rand::TryRngCore;
use thiserror::Error;

use crate::error::AppError;

const SALT_LEN: usize = 16;

/// Argon2 work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashCost {
    /// Smallest cost Argon2 accepts. Tests only.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }

    pub fn params(&self) -> Result<Params, argon2::Error> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("entropy source unavailable: {0}")]
    Entropy(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("stored password hash is malformed")]
    MalformedHash,
    #[error("password verification failed: {0}")]
    Verify(String),
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        AppError::internal(e.to_string())
    }
}

/// Hash `plaintext` into a PHC string using a fresh salt from the OS RNG.
pub fn hash_password(plaintext: &str, cost: HashCost) -> Result<String, PasswordError> {
    hash_password_with_rng(plaintext, cost, &mut OsRng)
}

/// Same as [`hash_password`] with an injected salt source. A failing source
/// yields `PasswordError::Entropy`.
pub fn hash_password_with_rng<R>(
    plaintext: &str,
    cost: HashCost,
    rng: &mut R,
) -> Result<String, PasswordError>
where
    R: TryRngCore + ?Sized,
{
    let mut salt_bytes = [0u8; SALT_LEN];
    rng.try_fill_bytes(&mut salt_bytes)
        .map_err(|e| PasswordError::Entropy(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Hash(e.to_string()))?;

    let params = cost.params().map_err(|e| PasswordError::Hash(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check `plaintext` against a stored PHC string in constant time.
///
/// `Ok(false)` on mismatch; an error only when `stored` cannot be parsed or verified.
pub fn verify_password(plaintext: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(|_| PasswordError::MalformedHash)?;

    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verify(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use proptest::prelude::*;

    use super::*;

    struct FailingRng;

    impl TryRngCore for FailingRng {
        type Error = io::Error;

        fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
            Err(io::Error::other("entropy unavailable"))
        }

        fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
            Err(io::Error::other("entropy unavailable"))
        }

        fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> Result<(), Self::Error> {
            Err(io::Error::other("entropy unavailable"))
        }
    }

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("correct horse", HashCost::minimal()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("correct horsf", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("pw-12345678", HashCost::minimal()).unwrap();
        let b = hash_password("pw-12345678", HashCost::minimal()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn entropy_failure_is_an_error_not_a_panic() {
        let err = hash_password_with_rng("pw-12345678", HashCost::minimal(), &mut FailingRng)
            .unwrap_err();
        assert!(matches!(err, PasswordError::Entropy(_)));

        let app: AppError = err.into();
        assert_eq!(
            app.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn malformed_stored_hash() {
        assert_eq!(
            verify_password("anything", "not-a-phc-string"),
            Err(PasswordError::MalformedHash)
        );
    }

    #[test]
    fn invalid_cost_is_rejected() {
        let cost = HashCost {
            memory_kib: 8,
            iterations: 0,
            parallelism: 1,
        };
        assert!(matches!(
            hash_password("pw-12345678", cost),
            Err(PasswordError::Hash(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn only_the_original_password_verifies(p in ".{0,24}", q in ".{0,24}") {
            let hash = hash_password(&p, HashCost::minimal()).unwrap();
            prop_assert!(verify_password(&p, &hash).unwrap());
            prop_assert_eq!(verify_password(&q, &hash).unwrap(), p == q);
        }
    }
}
