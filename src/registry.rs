use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use solana_sdk::pubkey::Pubkey;

use crate::{
    amm::LiquiditySide,
    constants::{SOL_MINT, WSOL_MINT},
    token::Token,
};

/// A liquidity pool registry entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolInfo {
    #[serde(deserialize_with = "pubkey_from_str")]
    pub id: Pubkey,
    #[serde(deserialize_with = "pubkey_from_str")]
    pub base_mint: Pubkey,
    #[serde(deserialize_with = "pubkey_from_str")]
    pub quote_mint: Pubkey,
    #[serde(deserialize_with = "pubkey_from_str")]
    pub lp_mint: Pubkey,
    pub base_decimals: u8,
    pub quote_decimals: u8,
    pub lp_decimals: u8,
    pub version: u8,
    #[serde(deserialize_with = "pubkey_from_str")]
    pub program_id: Pubkey,
    #[serde(deserialize_with = "pubkey_from_str")]
    pub market_id: Pubkey,
}

impl PoolInfo {
    pub fn has_mint(&self, mint: &Pubkey) -> bool {
        same_mint(&self.base_mint, mint) || same_mint(&self.quote_mint, mint)
    }

    /// True when the pool trades exactly this pair, in either order
    pub fn matches_mints(&self, mint_a: &Pubkey, mint_b: &Pubkey) -> bool {
        pair_matches(&self.base_mint, &self.quote_mint, mint_a, mint_b)
    }

    /// The counterpart of `mint` in this pool, as listed
    pub fn other_mint(&self, mint: &Pubkey) -> Option<Pubkey> {
        if same_mint(&self.base_mint, mint) {
            Some(self.quote_mint)
        } else if same_mint(&self.quote_mint, mint) {
            Some(self.base_mint)
        } else {
            None
        }
    }

    /// Side held fixed when liquidity is added with `input_mint`
    pub fn fixed_side(&self, input_mint: &Pubkey) -> Option<LiquiditySide> {
        if same_mint(&self.base_mint, input_mint) {
            Some(LiquiditySide::A)
        } else if same_mint(&self.quote_mint, input_mint) {
            Some(LiquiditySide::B)
        } else {
            None
        }
    }

    pub fn lp_token(&self) -> Token {
        Token::new(self.lp_mint, self.lp_decimals)
    }
}

/// A yield farm registry entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmInfo {
    pub id: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub lp_decimals: u8,
    pub reward_mints: Vec<Pubkey>,
}

impl FarmInfo {
    pub fn matches_mints(&self, mint_a: &Pubkey, mint_b: &Pubkey) -> bool {
        pair_matches(&self.base_mint, &self.quote_mint, mint_a, mint_b)
    }

    pub fn lp_token(&self) -> Token {
        Token::new(self.lp_mint, self.lp_decimals)
    }
}

/// Pool lists name native SOL by its wrapped mint
pub fn canonical_mint(mint: &Pubkey) -> Pubkey {
    if *mint == SOL_MINT { WSOL_MINT } else { *mint }
}

/// Mint equality with `Pubkey::default()` and WSOL treated as the same token
pub fn same_mint(a: &Pubkey, b: &Pubkey) -> bool {
    canonical_mint(a) == canonical_mint(b)
}

fn pair_matches(base: &Pubkey, quote: &Pubkey, mint_a: &Pubkey, mint_b: &Pubkey) -> bool {
    (same_mint(base, mint_a) && same_mint(quote, mint_b))
        || (same_mint(quote, mint_a) && same_mint(base, mint_b))
}

pub fn find_pool_by_mints<'a>(
    pools: impl IntoIterator<Item = &'a PoolInfo>,
    mint_a: &Pubkey,
    mint_b: &Pubkey,
) -> Option<&'a PoolInfo> {
    pools
        .into_iter()
        .find(|pool| pool.matches_mints(mint_a, mint_b))
}

pub fn find_farm_by_mints<'a>(
    farms: impl IntoIterator<Item = &'a FarmInfo>,
    mint_a: &Pubkey,
    mint_b: &Pubkey,
) -> Option<&'a FarmInfo> {
    farms
        .into_iter()
        .find(|farm| farm.matches_mints(mint_a, mint_b))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoolList {
    #[serde(default)]
    official: Vec<PoolInfo>,
    #[serde(default)]
    un_official: Vec<PoolInfo>,
}

/// Parse the public liquidity pool list (official pools first)
pub fn parse_pool_list(json: &str) -> Result<Vec<PoolInfo>> {
    let list: PoolList = serde_json::from_str(json).context("Failed to parse pool list")?;

    let mut pools = list.official;
    pools.extend(list.un_official);

    Ok(pools)
}

fn pubkey_from_str<'de, D>(deserializer: D) -> std::result::Result<Pubkey, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Pubkey::from_str(&value).map_err(serde::de::Error::custom)
}
