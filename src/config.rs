use std::str::FromStr;

use anyhow::{Context, Result};
use solana_sdk::commitment_config::CommitmentLevel;

use crate::{
    connection::{Connection, Owner},
    constants::DEVNET_RPC_URL,
    utils::parse_keypair,
};

pub const RPC_URL_ENV: &str = "RPC_URL";
pub const COMMITMENT_LEVEL_ENV: &str = "COMMITMENT_LEVEL";
pub const OWNER_PRIVATE_KEY_ENV: &str = "OWNER_PRIVATE_KEY";

/// Client settings, read from the environment (and a `.env` file when present)
#[derive(Clone)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub commitment: CommitmentLevel,
    /// base58 or JSON byte array
    pub owner_private_key: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, falling back to devnet with `confirmed` commitment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_url = lookup(RPC_URL_ENV).unwrap_or_else(|| DEVNET_RPC_URL.to_string());

        let commitment = match lookup(COMMITMENT_LEVEL_ENV) {
            Some(level) => CommitmentLevel::from_str(&level)
                .map_err(|_| anyhow::anyhow!("Invalid {}: {}", COMMITMENT_LEVEL_ENV, level))?,
            None => CommitmentLevel::Confirmed,
        };

        Ok(Self {
            rpc_url,
            commitment,
            owner_private_key: lookup(OWNER_PRIVATE_KEY_ENV).filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn connection(&self) -> Connection {
        Connection::new(&self.rpc_url, self.commitment)
    }

    pub fn owner(&self) -> Result<Owner> {
        let secret = self
            .owner_private_key
            .as_deref()
            .with_context(|| format!("{} not set", OWNER_PRIVATE_KEY_ENV))?;

        Ok(Owner::from(parse_keypair(secret)?))
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("rpc_url", &self.rpc_url)
            .field("commitment", &self.commitment)
            .field("owner_private_key", &self.owner_private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
