use std::future::Future;

use anyhow::Result;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::VersionedTransaction,
};

use crate::{
    connection::{Connection, Owner},
    error::DexError,
    registry::{FarmInfo, PoolInfo},
    token::{Percent, Token, TokenAmount},
};

/// A loaded DEX client session
///
/// Bundles the connection, the owner identity and the trade, liquidity, farm and
/// account sub-clients. Pool pricing, routing and transaction building live
/// behind the sub-client traits; this crate only forwards to them.
pub trait Dex: Send + Sync + 'static {
    type Trade: TradeClient;
    type Liquidity: LiquidityClient;
    type Farm: FarmClient;
    type Account: AccountClient;

    fn connection(&self) -> &Connection;

    fn owner(&self) -> Option<&Owner>;

    fn trade(&self) -> &Self::Trade;

    fn liquidity(&self) -> &Self::Liquidity;

    fn farm(&self) -> &Self::Farm;

    fn account(&self) -> &Self::Account;

    /// Token metadata for a mint, if the token list knows it
    fn mint_to_token(&self, mint: &Pubkey) -> Option<Token>;

    /// Raw account data, `None` when the account does not exist
    fn get_account_data(
        &self,
        key: &Pubkey,
    ) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send {
        async move { self.connection().get_account_data(key).await }
    }

    /// Sign a built transaction with the owner and the builder's extra signers, then send it
    fn execute<T: Send>(
        &self,
        tx_data: MakeTxData<T>,
    ) -> impl Future<Output = Result<Signature>> + Send {
        async move {
            let payer = self
                .owner()
                .and_then(Owner::signer)
                .ok_or(DexError::MissingSigner)?;

            let mut signers = vec![payer];
            signers.extend(tx_data.signers.iter());

            self.connection()
                .send_transaction(tx_data.transaction, &signers)
                .await
        }
    }
}

/// Swap routing and swap transaction building
pub trait TradeClient: Send + Sync {
    /// All pools able to trade `input_mint` for `output_mint`
    fn get_available_pools(
        &self,
        input_mint: &Pubkey,
        output_mint: &Pubkey,
    ) -> impl Future<Output = Result<AvailablePools>> + Send;

    /// Best output across the candidate pools, with the slippage-adjusted minimum
    fn get_best_amount_out(
        &self,
        params: BestAmountOutParams,
    ) -> impl Future<Output = Result<BestAmountOut>> + Send;

    fn swap(
        &self,
        params: TradeSwapParams,
    ) -> impl Future<Output = Result<MakeTxData<SwapExtInfo>>> + Send;

    fn direct_swap(
        &self,
        params: DirectSwapParams,
    ) -> impl Future<Output = Result<MakeTxData<SwapExtInfo>>> + Send;
}

/// Liquidity pool registry and liquidity transaction building
pub trait LiquidityClient: Send + Sync {
    /// The AMM program pools are created under
    fn program_id(&self) -> Pubkey;

    fn pools(&self) -> Vec<PoolInfo>;

    fn pool(&self, pool_id: &Pubkey) -> Option<PoolInfo> {
        self.pools().into_iter().find(|pool| pool.id == *pool_id)
    }

    /// Amount of the other token needed to pair with `params.amount`
    fn compute_pair_amount(
        &self,
        params: ComputePairAmountParams,
    ) -> impl Future<Output = Result<PairAmount>> + Send;

    fn add_liquidity(
        &self,
        params: AddLiquidityParams,
    ) -> impl Future<Output = Result<MakeTxData<()>>> + Send;

    fn remove_liquidity(
        &self,
        params: RemoveLiquidityParams,
    ) -> impl Future<Output = Result<MakeTxData<()>>> + Send;

    fn create_pool(
        &self,
        params: CreatePoolParams,
    ) -> impl Future<Output = Result<MakeTxData<()>>> + Send;

    fn init_pool(
        &self,
        params: InitPoolParams,
    ) -> impl Future<Output = Result<MakeTxData<()>>> + Send;
}

/// Farm registry and farm transaction building
pub trait FarmClient: Send + Sync {
    /// Load and parse on-chain farm state
    fn load(&self) -> impl Future<Output = Result<()>> + Send;

    fn farms(&self) -> Vec<FarmInfo>;

    fn farm(&self, farm_id: &Pubkey) -> Option<FarmInfo> {
        self.farms().into_iter().find(|farm| farm.id == *farm_id)
    }

    fn deposit(
        &self,
        params: FarmDepositParams,
    ) -> impl Future<Output = Result<MakeTxData<()>>> + Send;

    fn withdraw(
        &self,
        params: FarmWithdrawParams,
    ) -> impl Future<Output = Result<MakeTxData<()>>> + Send;

    fn create(
        &self,
        params: CreateFarmParams,
    ) -> impl Future<Output = Result<MakeTxData<()>>> + Send;
}

/// Owner token accounts tracked by the session
pub trait AccountClient: Send + Sync {
    fn token_accounts(&self) -> Vec<TokenAccount>;

    /// Total raw balance of `mint` across the owner's token accounts
    fn balance(&self, mint: &Pubkey) -> u64 {
        self.token_accounts()
            .iter()
            .filter(|account| account.mint == *mint)
            .fold(0u64, |total, account| total.saturating_add(account.amount))
    }
}

/// An unsigned transaction returned by a builder
pub struct MakeTxData<T = ()> {
    pub transaction: VersionedTransaction,
    /// Signers required besides the owner (e.g. freshly created accounts)
    pub signers: Vec<Keypair>,
    pub ext_info: T,
}

impl<T> MakeTxData<T> {
    pub fn new(transaction: VersionedTransaction, ext_info: T) -> Self {
        Self {
            transaction,
            signers: vec![],
            ext_info,
        }
    }
}

/// Which side of a swap is fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedSide {
    In,
    Out,
}

/// Which pool token is fixed when adding liquidity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquiditySide {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteType {
    /// Single pool
    Amm,
    /// Two pools through an intermediate mint
    Route,
}

/// One hop of a swap route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRoute {
    pub pool_id: Pubkey,
    pub input_mint: Pubkey,
    pub output_mint: Pubkey,
}

/// Candidate pools for a mint pair
#[derive(Debug, Clone, Default)]
pub struct AvailablePools {
    pub available_pools: Vec<PoolInfo>,
    pub best: Option<PoolInfo>,
    /// Candidate paths, each one or two pools long
    pub routed_pools: Vec<Vec<PoolInfo>>,
}

impl AvailablePools {
    pub fn is_empty(&self) -> bool {
        self.available_pools.is_empty() && self.routed_pools.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct BestAmountOutParams {
    /// Restrict the search to these paths; `None` searches every pool
    pub pools: Option<Vec<Vec<PoolInfo>>>,
    pub amount_in: TokenAmount,
    pub input_token: Token,
    pub output_token: Token,
    pub slippage: Percent,
}

#[derive(Debug, Clone)]
pub struct BestAmountOut {
    pub amount_out: TokenAmount,
    pub min_amount_out: TokenAmount,
    pub routes: Vec<PoolRoute>,
    pub route_type: RouteType,
}

#[derive(Debug, Clone)]
pub struct TradeSwapParams {
    pub routes: Vec<PoolRoute>,
    pub route_type: RouteType,
    pub amount_in: TokenAmount,
    pub amount_out: TokenAmount,
    pub fixed_side: FixedSide,
}

#[derive(Debug, Clone)]
pub struct DirectSwapParams {
    pub amount_in: TokenAmount,
    pub amount_out: TokenAmount,
    pub fixed_side: FixedSide,
    pub slippage: Percent,
}

#[derive(Debug, Clone)]
pub struct SwapExtInfo {
    pub amount_out: TokenAmount,
}

#[derive(Debug, Clone)]
pub struct ComputePairAmountParams {
    pub pool_id: Pubkey,
    pub amount: TokenAmount,
    pub another_token: Token,
    pub slippage: Percent,
}

#[derive(Debug, Clone)]
pub struct PairAmount {
    pub another_amount: TokenAmount,
    pub max_another_amount: TokenAmount,
}

#[derive(Debug, Clone)]
pub struct AddLiquidityParams {
    pub pool_id: Pubkey,
    pub amount_in_a: TokenAmount,
    pub amount_in_b: TokenAmount,
    pub fixed_side: LiquiditySide,
}

#[derive(Debug, Clone)]
pub struct RemoveLiquidityParams {
    pub pool_id: Pubkey,
    pub amount_in: TokenAmount,
}

#[derive(Debug, Clone)]
pub struct CreatePoolParams {
    pub version: u8,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub market_id: Pubkey,
}

#[derive(Debug, Clone)]
pub struct InitPoolParams {
    pub version: u8,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub market_id: Pubkey,
    pub base_amount: TokenAmount,
    pub quote_amount: TokenAmount,
}

#[derive(Debug, Clone)]
pub struct FarmDepositParams {
    pub farm_id: Pubkey,
    pub amount: TokenAmount,
}

#[derive(Debug, Clone)]
pub struct FarmWithdrawParams {
    pub farm_id: Pubkey,
    pub amount: TokenAmount,
}

#[derive(Debug, Clone)]
pub struct RewardInfo {
    /// `Pubkey::default()` for native SOL rewards
    pub reward_mint: Pubkey,
    pub reward_per_second: u64,
    pub reward_open_time: u64,
    pub reward_end_time: u64,
}

#[derive(Debug, Clone)]
pub struct CreateFarmParams {
    pub pool_id: Pubkey,
    pub reward_infos: Vec<RewardInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAccount {
    pub address: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}
