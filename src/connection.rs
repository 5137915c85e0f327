use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use solana_rpc_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::VersionedTransaction,
};

/// Shared handle to a Solana RPC endpoint.
///
/// Cloning is cheap, every clone talks through the same `RpcClient`.
#[derive(Clone)]
pub struct Connection {
    rpc_client: Arc<RpcClient>,
    endpoint: String,
    commitment: CommitmentConfig,
}

impl Connection {
    pub fn new(rpc_endpoint: &str, commitment_level: CommitmentLevel) -> Self {
        let commitment = CommitmentConfig {
            commitment: commitment_level,
        };

        Self {
            rpc_client: Arc::new(RpcClient::new_with_commitment(
                rpc_endpoint.to_string(),
                commitment,
            )),
            endpoint: rpc_endpoint.to_string(),
            commitment,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.commitment
    }

    pub fn rpc_client(&self) -> &RpcClient {
        &self.rpc_client
    }

    /// Fetch raw account data, `None` when the account does not exist
    pub async fn get_account_data(&self, key: &Pubkey) -> Result<Option<Vec<u8>>> {
        let account = self
            .rpc_client
            .get_account_with_commitment(key, self.commitment)
            .await
            .with_context(|| format!("Failed to get account {}", key))?
            .value;

        Ok(account.map(|account| account.data))
    }

    /// Sign a built transaction with a fresh blockhash and send it
    ///
    /// # Arguments
    /// * `transaction` - The unsigned transaction produced by a builder
    /// * `signers` - Fee payer first, then any extra signers the builder asked for
    ///
    /// # Returns
    /// Returns the confirmed transaction signature
    pub async fn send_transaction(
        &self,
        transaction: VersionedTransaction,
        signers: &[&Keypair],
    ) -> Result<Signature> {
        let mut message = transaction.message;

        let recent_blockhash = self
            .rpc_client
            .get_latest_blockhash()
            .await
            .context("Failed to get latest blockhash")?;
        message.set_recent_blockhash(recent_blockhash);

        let signed_transaction = VersionedTransaction::try_new(message, signers)
            .context("Failed to sign transaction")?;

        let signature = self
            .rpc_client
            .send_and_confirm_transaction(&signed_transaction)
            .await
            .context("Failed to send transaction")?;

        log::debug!("Transaction {} confirmed on {}", signature, self.endpoint);

        Ok(signature)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("endpoint", &self.endpoint)
            .field("commitment", &self.commitment.commitment)
            .finish()
    }
}

/// Identity a session acts for: a bare public key (read-only) or a full keypair
#[derive(Clone)]
pub enum Owner {
    PublicKey(Pubkey),
    Keypair(Arc<Keypair>),
}

impl Owner {
    pub fn pubkey(&self) -> Pubkey {
        match self {
            Owner::PublicKey(pubkey) => *pubkey,
            Owner::Keypair(keypair) => keypair.pubkey(),
        }
    }

    /// The signing keypair, if this owner carries one
    pub fn signer(&self) -> Option<&Keypair> {
        match self {
            Owner::PublicKey(_) => None,
            Owner::Keypair(keypair) => Some(keypair),
        }
    }
}

impl From<Pubkey> for Owner {
    fn from(pubkey: Pubkey) -> Self {
        Owner::PublicKey(pubkey)
    }
}

impl From<Keypair> for Owner {
    fn from(keypair: Keypair) -> Self {
        Owner::Keypair(Arc::new(keypair))
    }
}

impl fmt::Debug for Owner {
    // never print secret key bytes
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::PublicKey(pubkey) => f.debug_tuple("PublicKey").field(pubkey).finish(),
            Owner::Keypair(keypair) => f.debug_tuple("Keypair").field(&keypair.pubkey()).finish(),
        }
    }
}
