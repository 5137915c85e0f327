use lazy_static::lazy_static;
use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

pub const LIQUIDITY_PROGRAM_ID_V4: Pubkey = pubkey!("675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8");
pub const DEVNET_LIQUIDITY_PROGRAM_ID_V4: Pubkey =
    pubkey!("HWy1jotHpo6UqeQxx49dpYYdQB8wj9Qk9MdxwjLvDHB8");

pub const AMM_V4_VERSION: u8 = 4;

// Pubkey::default() stands for native SOL throughout the SDK
pub const SOL_MINT: Pubkey = Pubkey::new_from_array([0u8; 32]);
pub const SOL_DECIMALS: u8 = 9;
// wrapped SOL, the mint pool lists use for the SOL side
pub const WSOL_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

pub const RAY_MINT: Pubkey = pubkey!("4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R");
pub const USDC_MINT: Pubkey = pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");

pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

// 1 / 100
pub const DEFAULT_SLIPPAGE_NUMERATOR: u64 = 1;
pub const DEFAULT_SLIPPAGE_DENOMINATOR: u64 = 100;

// amounts seeded into a freshly created pool by `create_pool`
pub const DEFAULT_INIT_POOL_AMOUNT: u64 = 20;

// SEEDS
pub const AMM_AUTHORITY_SEED: &[u8] = b"amm authority";
pub const AMM_ASSOCIATED_SEED: &[u8] = b"amm_associated_seed";
pub const LP_MINT_ASSOCIATED_SEED: &[u8] = b"lp_mint_associated_seed";
pub const COIN_VAULT_ASSOCIATED_SEED: &[u8] = b"coin_vault_associated_seed";
pub const PC_VAULT_ASSOCIATED_SEED: &[u8] = b"pc_vault_associated_seed";
pub const TARGET_ASSOCIATED_SEED: &[u8] = b"target_associated_seed";
pub const OPEN_ORDER_ASSOCIATED_SEED: &[u8] = b"open_order_associated_seed";

lazy_static! {
    pub static ref AMM_AUTHORITY: Pubkey =
        Pubkey::find_program_address(&[AMM_AUTHORITY_SEED], &LIQUIDITY_PROGRAM_ID_V4).0;
}
