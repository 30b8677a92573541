//! bcrypt password hashing.
//!
//! bcrypt is CPU bound, so both hashing and verification run on the blocking pool.

use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Clone)]
pub struct PasswordEncoder {
    cost: u32,
    // unknown email の場合もこれに対して verify する
    dummy_hash: Arc<str>,
}

impl std::fmt::Debug for PasswordEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordEncoder")
            .field("cost", &self.cost)
            .finish()
    }
}

impl PasswordEncoder {
    /// `cost` must be within bcrypt's 4..=31.
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        let dummy_hash = bcrypt::hash("subway-api-dummy-password", cost)?;
        Ok(Self {
            cost,
            dummy_hash: dummy_hash.into(),
        })
    }

    pub async fn encode(&self, raw: &str) -> Result<String, PasswordError> {
        let raw = raw.to_owned();
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(raw, cost)).await??;
        Ok(hash)
    }

    pub async fn matches(&self, raw: &str, hash: &str) -> Result<bool, PasswordError> {
        let raw = raw.to_owned();
        let hash = hash.to_owned();
        let ok = tokio::task::spawn_blocking(move || bcrypt::verify(raw, &hash)).await??;
        Ok(ok)
    }

    /// Verifies against a fixed hash and discards the result.
    pub async fn burn(&self, raw: &str) -> Result<(), PasswordError> {
        let dummy = self.dummy_hash.clone();
        self.matches(raw, &dummy).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn encoded_password_matches_only_the_original() {
        let encoder = PasswordEncoder::new(4).unwrap();
        let hash = encoder.encode("password").await.unwrap();

        assert_ne!(hash, "password");
        assert!(encoder.matches("password", &hash).await.unwrap());
        assert!(!encoder.matches("Password", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn burn_never_fails_for_ordinary_input() {
        let encoder = PasswordEncoder::new(4).unwrap();
        assert!(encoder.burn("whatever").await.is_ok());
    }

    #[test]
    fn out_of_range_cost_is_rejected() {
        assert!(PasswordEncoder::new(3).is_err());
    }
}
