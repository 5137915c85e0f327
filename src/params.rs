// Request records of the exported operations. Every request names the
// connection and owner it acts with; both are only used when the session
// cache has to build a session.

use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;

use crate::{
    connection::{Connection, Owner},
    constants::DEFAULT_INIT_POOL_AMOUNT,
    token::TokenAmount,
};

/// Swap parameters (`swap` and `direct_swap`)
#[derive(Debug, Clone)]
pub struct SwapRequest {
    pub connection: Connection,
    pub owner: Owner,
    pub in_token: Pubkey,
    pub out_token: Pubkey,
    pub amount: Decimal,
}

/// Swap through one known pool
#[derive(Debug, Clone)]
pub struct AmmSwapRequest {
    pub connection: Connection,
    pub owner: Owner,
    pub in_token: Pubkey,
    pub out_token: Pubkey,
    pub pool_id: Pubkey,
    pub amount: Decimal,
}

/// Swap through two known pools
#[derive(Debug, Clone)]
pub struct RouteSwapRequest {
    pub connection: Connection,
    pub owner: Owner,
    pub in_token: Pubkey,
    pub out_token: Pubkey,
    pub from_pool_id: Pubkey,
    pub out_pool_id: Pubkey,
    pub amount: Decimal,
}

/// Add liquidity parameters
#[derive(Debug, Clone)]
pub struct AddLiquidityRequest {
    pub connection: Connection,
    pub owner: Owner,
    pub pool_id: Pubkey,
    pub input_token_amount: TokenAmount,
}

/// Remove liquidity parameters
#[derive(Debug, Clone)]
pub struct RemoveLiquidityRequest {
    pub connection: Connection,
    pub owner: Owner,
    pub pool_id: Pubkey,
    pub lp_amount: Decimal, // lp to burn
}

/// Create pool parameters
#[derive(Debug, Clone)]
pub struct CreatePoolRequest {
    pub connection: Connection,
    pub owner: Owner,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub market_id: Pubkey,
    pub base_amount: Decimal,
    pub quote_amount: Decimal,
}

impl CreatePoolRequest {
    /// Seeds the new pool with 20 base and 20 quote tokens
    pub fn new(
        connection: Connection,
        owner: Owner,
        base_mint: Pubkey,
        quote_mint: Pubkey,
        market_id: Pubkey,
    ) -> Self {
        Self {
            connection,
            owner,
            base_mint,
            quote_mint,
            market_id,
            base_amount: Decimal::from(DEFAULT_INIT_POOL_AMOUNT),
            quote_amount: Decimal::from(DEFAULT_INIT_POOL_AMOUNT),
        }
    }
}

/// Farm deposit / withdraw parameters
#[derive(Debug, Clone)]
pub struct FarmRequest {
    pub connection: Connection,
    pub owner: Owner,
    pub farm_id: Pubkey,
    pub lp_amount: Decimal,
}

/// Harvest parameters
#[derive(Debug, Clone)]
pub struct HarvestRequest {
    pub connection: Connection,
    pub owner: Owner,
    pub farm_id: Pubkey,
}

/// Create farm parameters
#[derive(Debug, Clone)]
pub struct CreateFarmRequest {
    pub connection: Connection,
    pub owner: Owner,
    pub pool_id: Pubkey,
    pub reward_mint: Pubkey, // Pubkey::default() means SOL
    pub reward_per_second: u64,
    pub reward_open_time: u64, // unix seconds
    pub reward_end_time: u64,  // unix seconds
}
