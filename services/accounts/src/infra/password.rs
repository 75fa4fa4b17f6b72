use std::sync::Arc;

use anyhow::Context as _;

/// Input of the decoy hash checked for unknown usernames.
const DECOY_PASSWORD: &str = "warden-decoy-password";

/// bcrypt hashing run on the blocking pool so a high cost does not stall the
/// runtime.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    pub cost: u32,
    decoy_hash: Arc<str>,
}

impl BcryptHasher {
    /// Build a hasher for `cost`, hashing the decoy once up front so every
    /// later check costs the same.
    pub async fn new(cost: u32) -> anyhow::Result<Self> {
        let decoy = Self::hash_with(DECOY_PASSWORD, cost).await?;
        Ok(Self {
            cost,
            decoy_hash: decoy.into(),
        })
    }

    pub async fn hash(&self, password: &str) -> anyhow::Result<String> {
        Self::hash_with(password, self.cost).await
    }

    pub async fn verify(&self, password: &str, hash: &str) -> anyhow::Result<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .context("join password verify task")?
            .context("verify password")
    }

    /// Full-cost check against the decoy hash. Always `false`.
    pub async fn verify_decoy(&self, password: &str) -> anyhow::Result<bool> {
        self.verify(password, &self.decoy_hash).await?;
        Ok(false)
    }

    async fn hash_with(password: &str, cost: u32) -> anyhow::Result<String> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("join password hash task")?
            .context("hash password")
    }
}
