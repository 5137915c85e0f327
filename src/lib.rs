//! # Raydium SDK Examples
//!
//! Usage examples for the Raydium DEX SDK on Solana: swaps, adding and removing
//! liquidity, pool creation and farm deposits/withdrawals. Every operation follows
//! the same shape:
//!
//! 1. Get the shared session from a [`SessionCache`]
//! 2. Resolve the target pool or farm from the session's registry (a miss is an error, nothing is submitted)
//! 3. Build an amount from a human-readable number and a mint
//! 4. Ask the SDK for the transaction and execute it
//!
//! Pool pricing, routing and transaction building are done by the SDK, which this
//! crate reaches through the [`Dex`] trait and its sub-clients.
//!
//! ## 🚀 Quick Start
//!
//! ```rust,ignore
//! use raydium_sdk_examples::{ClientConfig, SessionCache, SwapRequest, direct_swap};
//! use raydium_sdk_examples::constants::{RAY_MINT, USDC_MINT};
//! use rust_decimal::Decimal;
//!
//! // RPC_URL, COMMITMENT_LEVEL and OWNER_PRIVATE_KEY come from the environment or `.env`
//! let config = ClientConfig::from_env()?;
//! let connection = config.connection();
//! let owner = config.owner()?;
//!
//! // `loader` is the SDK binding, it builds a session on first use
//! let cache = SessionCache::new(loader);
//!
//! let signature = direct_swap(
//!     &cache,
//!     &SwapRequest {
//!         connection,
//!         owner,
//!         in_token: RAY_MINT,
//!         out_token: USDC_MINT,
//!         amount: Decimal::from(10),
//!     },
//! )
//! .await?;
//! println!("Swap signature: {}", signature);
//! ```
//!
//! ## Session handling
//!
//! - **`SessionCache::get(connection, owner, reload)`**: returns the cached session, ignoring
//!   `connection` and `owner` unless no session exists yet or `reload` is set
//! - **`SessionCache::refresh(connection, owner)`**: rebuilds the session
//! - Construction is serialized, concurrent first requests share a single session
//!
//! ## 📖 Operations
//!
//! - **Swaps**: [`swap`], [`direct_swap`], [`amm_swap`], [`route_swap`]
//! - **Liquidity**: [`add_liquidity`], [`remove_liquidity`], [`create_pool`]
//! - **Farms**: [`deposit`], [`withdraw`], [`harvest`], [`create_farm`]
//!
//! All of them return the transaction signature (`create_pool` returns one per
//! submitted transaction). Swapping a mint for itself is rejected. Failures are `anyhow::Error`s; lookup misses carry a
//! [`DexError`] that can be recovered with `downcast_ref`.
//!
//! ## ⚠️ SOL handling
//!
//! `Pubkey::default()` stands for native SOL wherever a mint is expected. Registry
//! lookups treat it and the wrapped SOL mint (`constants::WSOL_MINT`) as the same token.
//!
//! **Note**: Always test on devnet before using mainnet.

pub mod amm;
pub mod client_example;
mod config;
mod connection;
pub mod constants;
mod error;
mod farm;
mod liquidity;
mod params;
pub mod pool_keys;
pub mod registry;
mod session;
mod swap;
mod token;
mod utils;

pub use amm::{AccountClient, Dex, FarmClient, LiquidityClient, MakeTxData, TradeClient};
pub use config::ClientConfig;
pub use connection::{Connection, Owner};
pub use error::DexError;
pub use session::{InitParams, SessionCache, SessionLoader};
pub use token::{Percent, Token, TokenAmount, mint_to_token, mint_to_token_amount};
pub use utils::parse_keypair;

pub use farm::{create_farm, deposit, harvest, withdraw};
pub use liquidity::{add_liquidity, create_pool, remove_liquidity};
pub use swap::{amm_swap, direct_swap, route_swap, swap};

pub use params::{
    AddLiquidityRequest, AmmSwapRequest, CreateFarmRequest, CreatePoolRequest, FarmRequest,
    HarvestRequest, RemoveLiquidityRequest, RouteSwapRequest, SwapRequest,
};
