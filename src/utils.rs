use anyhow::{Context, Result};
use solana_sdk::signature::Keypair;

/// Parse a secret key given either as base58 or as a JSON byte array (`[1,2,...]`)
pub fn parse_keypair(secret: &str) -> Result<Keypair> {
    let secret = secret.trim();

    let bytes: Vec<u8> = if secret.starts_with('[') {
        serde_json::from_str(secret).context("Failed to parse secret key byte array")?
    } else {
        bs58::decode(secret)
            .into_vec()
            .context("Failed to decode base58 secret key")?
    };

    Keypair::from_bytes(&bytes).map_err(|e| anyhow::anyhow!("Invalid secret key: {}", e))
}
