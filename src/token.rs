use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use solana_sdk::pubkey::Pubkey;

use crate::{
    amm::Dex,
    constants::{DEFAULT_SLIPPAGE_DENOMINATOR, DEFAULT_SLIPPAGE_NUMERATOR},
    error::DexError,
};

/// Token metadata as known to the session's token list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub mint: Pubkey,
    pub decimals: u8,
    pub symbol: Option<String>,
}

impl Token {
    pub fn new(mint: Pubkey, decimals: u8) -> Self {
        Self {
            mint,
            decimals,
            symbol: None,
        }
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }
}

/// An amount of a token expressed in raw (smallest) units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAmount {
    pub token: Token,
    pub raw: u64,
}

impl TokenAmount {
    pub fn new(token: Token, raw: u64) -> Self {
        Self { token, raw }
    }

    pub fn zero(token: Token) -> Self {
        Self { token, raw: 0 }
    }

    /// Build from a human-readable amount, e.g. `10.5` RAY
    ///
    /// Fractional digits beyond the token's decimals are truncated toward zero.
    pub fn from_ui(token: Token, amount: Decimal) -> Result<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DexError::InvalidAmount(format!("{} is negative", amount)).into());
        }

        let multiplier = 10u64
            .checked_pow(token.decimals as u32)
            .ok_or_else(|| {
                DexError::InvalidAmount(format!("{} decimals is out of range", token.decimals))
            })?;

        let raw = amount
            .checked_mul(Decimal::from(multiplier))
            .map(|scaled| scaled.trunc())
            .and_then(|scaled| scaled.to_u64())
            .ok_or_else(|| {
                DexError::InvalidAmount(format!(
                    "{} does not fit in raw units of {}",
                    amount, token.mint
                ))
            })?;

        Ok(Self { token, raw })
    }

    pub fn mint(&self) -> Pubkey {
        self.token.mint
    }

    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// Human-readable value of this amount
    pub fn to_exact(&self) -> Result<Decimal> {
        Decimal::try_from_i128_with_scale(self.raw as i128, self.token.decimals as u32)
            .map_err(|e| DexError::InvalidAmount(e.to_string()).into())
    }
}

/// A ratio used for slippage tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percent {
    numerator: u64,
    denominator: u64,
}

impl Percent {
    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        if denominator == 0 {
            return Err(DexError::InvalidSlippage("denominator is zero".to_string()).into());
        }
        if numerator > denominator {
            return Err(
                DexError::InvalidSlippage(format!("{}/{} exceeds 100%", numerator, denominator))
                    .into(),
            );
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.numerator) / Decimal::from(self.denominator)
    }

    /// Lowest raw amount still accepted after applying this tolerance
    pub fn min_amount(&self, raw: u64) -> u64 {
        let kept = (raw as u128) * ((self.denominator - self.numerator) as u128);
        (kept / self.denominator as u128) as u64
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self {
            numerator: DEFAULT_SLIPPAGE_NUMERATOR,
            denominator: DEFAULT_SLIPPAGE_DENOMINATOR,
        }
    }
}

/// Token metadata for `mint` through the session's token list
pub fn mint_to_token<D: Dex>(session: &D, mint: &Pubkey) -> Result<Token> {
    session
        .mint_to_token(mint)
        .ok_or_else(|| DexError::TokenNotFound(*mint).into())
}

/// Amount descriptor for a human-readable `amount` of `mint`
pub fn mint_to_token_amount<D: Dex>(
    session: &D,
    mint: &Pubkey,
    amount: Decimal,
) -> Result<TokenAmount> {
    TokenAmount::from_ui(mint_to_token(session, mint)?, amount)
}
