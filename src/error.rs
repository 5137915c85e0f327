use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Domain failures raised before anything is handed to the SDK builders.
///
/// Operations return `anyhow::Result`; callers that need to branch on the
/// failure kind can `downcast_ref::<DexError>()`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DexError {
    #[error("Pool {0} not found")]
    PoolNotFound(Pubkey),

    #[error("No pool found for mint pair {0} / {1}")]
    NoPoolForMints(Pubkey, Pubkey),

    #[error("Farm {0} not found")]
    FarmNotFound(Pubkey),

    #[error("No farm found for mint pair {0} / {1}")]
    NoFarmForMints(Pubkey, Pubkey),

    #[error("No swap route from {0} to {1}")]
    NoRoute(Pubkey, Pubkey),

    #[error("Token {0} is not in the token list")]
    TokenNotFound(Pubkey),

    #[error("Mint {mint} is not part of pool {pool}")]
    MintNotInPool { pool: Pubkey, mint: Pubkey },

    #[error("Cannot swap {0} for itself")]
    SameMint(Pubkey),

    #[error("Pools {0} and {1} do not form a route for the requested mints")]
    DisjointRoute(Pubkey, Pubkey),

    #[error("Session has no signing owner")]
    MissingSigner,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid slippage: {0}")]
    InvalidSlippage(String),

    #[error("Invalid reward schedule: {0}")]
    InvalidRewardSchedule(String),
}
