use anyhow::Result;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{
    amm::{
        AddLiquidityParams, ComputePairAmountParams, CreatePoolParams, Dex, InitPoolParams,
        LiquidityClient, LiquiditySide, RemoveLiquidityParams,
    },
    constants::AMM_V4_VERSION,
    error::DexError,
    params::{AddLiquidityRequest, CreatePoolRequest, RemoveLiquidityRequest},
    pool_keys::{get_associated_pool_keys, is_pool_created},
    registry::PoolInfo,
    session::{SessionCache, SessionLoader},
    token::{Percent, TokenAmount, mint_to_token, mint_to_token_amount},
};

/// Add liquidity to a pool, pairing the input with the amount of the other token
///
/// # Arguments
/// * `params.input_token_amount` - Amount of either pool token; its side is kept fixed
///
/// # Returns
/// Returns the signature of the executed transaction
pub async fn add_liquidity<L: SessionLoader>(
    cache: &SessionCache<L>,
    params: &AddLiquidityRequest,
) -> Result<Signature> {
    let session = cache
        .get(&params.connection, Some(&params.owner), false)
        .await?;

    let pool = resolve_pool(session.liquidity(), &params.pool_id)?;
    let input_mint = params.input_token_amount.mint();

    let fixed_side = pool
        .fixed_side(&input_mint)
        .ok_or(DexError::MintNotInPool {
            pool: pool.id,
            mint: input_mint,
        })?;
    let another_mint = match fixed_side {
        LiquiditySide::A => pool.quote_mint,
        LiquiditySide::B => pool.base_mint,
    };

    let pair_amount = session
        .liquidity()
        .compute_pair_amount(ComputePairAmountParams {
            pool_id: pool.id,
            amount: params.input_token_amount.clone(),
            another_token: mint_to_token(&*session, &another_mint)?,
            slippage: Percent::default(),
        })
        .await?;

    let (amount_in_a, amount_in_b) = match fixed_side {
        LiquiditySide::A => (
            params.input_token_amount.clone(),
            pair_amount.max_another_amount,
        ),
        LiquiditySide::B => (
            pair_amount.max_another_amount,
            params.input_token_amount.clone(),
        ),
    };

    let tx_data = session
        .liquidity()
        .add_liquidity(AddLiquidityParams {
            pool_id: pool.id,
            amount_in_a,
            amount_in_b,
            fixed_side,
        })
        .await?;

    let signature = session.execute(tx_data).await?;
    log::info!("Added liquidity to pool {}: {}", pool.id, signature);

    Ok(signature)
}

/// Burn LP tokens of a pool for its underlying tokens
pub async fn remove_liquidity<L: SessionLoader>(
    cache: &SessionCache<L>,
    params: &RemoveLiquidityRequest,
) -> Result<Signature> {
    let session = cache
        .get(&params.connection, Some(&params.owner), false)
        .await?;

    let pool = resolve_pool(session.liquidity(), &params.pool_id)?;
    let amount_in = TokenAmount::from_ui(pool.lp_token(), params.lp_amount)?;

    let tx_data = session
        .liquidity()
        .remove_liquidity(RemoveLiquidityParams {
            pool_id: pool.id,
            amount_in,
        })
        .await?;

    let signature = session.execute(tx_data).await?;
    log::info!(
        "Removed {} LP from pool {}: {}",
        params.lp_amount,
        pool.id,
        signature
    );

    Ok(signature)
}

/// Create an AMM v4 pool on an existing market and seed it
///
/// The create step is skipped when the pool's LP mint already exists with zero
/// supply, so an interrupted creation can be resumed with the init step alone.
///
/// # Returns
/// Returns the signatures of the executed transactions, in order
pub async fn create_pool<L: SessionLoader>(
    cache: &SessionCache<L>,
    params: &CreatePoolRequest,
) -> Result<Vec<Signature>> {
    let session = cache
        .get(&params.connection, Some(&params.owner), false)
        .await?;

    // validate both tokens before anything is submitted
    let base_amount = mint_to_token_amount(&*session, &params.base_mint, params.base_amount)?;
    let quote_amount = mint_to_token_amount(&*session, &params.quote_mint, params.quote_amount)?;

    let program_id = session.liquidity().program_id();
    let pool_keys = get_associated_pool_keys(&program_id, &params.market_id);
    log::debug!(
        "Pool {} on market {} uses lp mint {}",
        pool_keys.id,
        params.market_id,
        pool_keys.lp_mint
    );

    let lp_mint_data = session.get_account_data(&pool_keys.lp_mint).await?;
    let mut signatures = Vec::with_capacity(2);

    if is_pool_created(lp_mint_data.as_deref()) {
        log::info!("Pool {} already created, initializing only", pool_keys.id);
    } else {
        let tx_data = session
            .liquidity()
            .create_pool(CreatePoolParams {
                version: AMM_V4_VERSION,
                base_mint: params.base_mint,
                quote_mint: params.quote_mint,
                market_id: params.market_id,
            })
            .await?;
        signatures.push(session.execute(tx_data).await?);
    }

    let tx_data = session
        .liquidity()
        .init_pool(InitPoolParams {
            version: AMM_V4_VERSION,
            base_mint: params.base_mint,
            quote_mint: params.quote_mint,
            market_id: params.market_id,
            base_amount,
            quote_amount,
        })
        .await?;
    signatures.push(session.execute(tx_data).await?);

    log::info!("Pool {} initialized: {:?}", pool_keys.id, signatures);

    Ok(signatures)
}

pub(crate) fn resolve_pool<C: LiquidityClient>(
    liquidity: &C,
    pool_id: &Pubkey,
) -> Result<PoolInfo> {
    liquidity
        .pool(pool_id)
        .ok_or_else(|| DexError::PoolNotFound(*pool_id).into())
}
