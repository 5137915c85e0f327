use anyhow::{Context, Result};
use solana_sdk::{program_pack::Pack, pubkey::Pubkey};
use spl_token::state::Mint;

use crate::constants::{
    AMM_ASSOCIATED_SEED, AMM_AUTHORITY_SEED, COIN_VAULT_ASSOCIATED_SEED, LP_MINT_ASSOCIATED_SEED,
    OPEN_ORDER_ASSOCIATED_SEED, PC_VAULT_ASSOCIATED_SEED, TARGET_ASSOCIATED_SEED,
};

/// Accounts of an AMM v4 pool, all derived from the program and its market
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociatedPoolKeys {
    pub id: Pubkey,
    pub authority: Pubkey,
    pub lp_mint: Pubkey,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub target_orders: Pubkey,
    pub open_orders: Pubkey,
    pub market_id: Pubkey,
    pub program_id: Pubkey,
}

pub fn get_associated_pool_keys(program_id: &Pubkey, market_id: &Pubkey) -> AssociatedPoolKeys {
    AssociatedPoolKeys {
        id: get_associated_address(program_id, market_id, AMM_ASSOCIATED_SEED),
        authority: Pubkey::find_program_address(&[AMM_AUTHORITY_SEED], program_id).0,
        lp_mint: get_associated_address(program_id, market_id, LP_MINT_ASSOCIATED_SEED),
        base_vault: get_associated_address(program_id, market_id, COIN_VAULT_ASSOCIATED_SEED),
        quote_vault: get_associated_address(program_id, market_id, PC_VAULT_ASSOCIATED_SEED),
        target_orders: get_associated_address(program_id, market_id, TARGET_ASSOCIATED_SEED),
        open_orders: get_associated_address(program_id, market_id, OPEN_ORDER_ASSOCIATED_SEED),
        market_id: *market_id,
        program_id: *program_id,
    }
}

fn get_associated_address(program_id: &Pubkey, market_id: &Pubkey, seed: &[u8]) -> Pubkey {
    Pubkey::find_program_address(&[program_id.as_ref(), market_id.as_ref(), seed], program_id).0
}

/// Supply of an SPL mint account
pub fn get_mint_supply(mint_data: &[u8]) -> Result<u64> {
    let mint = Mint::unpack_unchecked(mint_data).context("Failed to decode mint account")?;
    Ok(mint.supply)
}

/// Pool accounts are already created when the LP mint exists and nothing is minted yet
pub fn is_pool_created(lp_mint_data: Option<&[u8]>) -> bool {
    match lp_mint_data {
        Some(data) if !data.is_empty() => matches!(get_mint_supply(data), Ok(0)),
        _ => false,
    }
}
