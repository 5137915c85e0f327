use anyhow::Result;
use rust_decimal::Decimal;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{
    amm::{
        BestAmountOutParams, DirectSwapParams, Dex, FixedSide, LiquidityClient, TradeClient,
        TradeSwapParams,
    },
    error::DexError,
    liquidity::resolve_pool,
    params::{AmmSwapRequest, RouteSwapRequest, SwapRequest},
    registry::{PoolInfo, find_pool_by_mints, same_mint},
    session::{SessionCache, SessionLoader},
    token::{Percent, mint_to_token, mint_to_token_amount},
};

/// Swap along the best route the trade client finds
///
/// # Returns
/// Returns the signature of the executed swap transaction
pub async fn swap<L: SessionLoader>(
    cache: &SessionCache<L>,
    params: &SwapRequest,
) -> Result<Signature> {
    let session = cache
        .get(&params.connection, Some(&params.owner), false)
        .await?;
    ensure_distinct_mints(&params.in_token, &params.out_token)?;

    // Pubkey::default() means SOL
    let available = session
        .trade()
        .get_available_pools(&params.in_token, &params.out_token)
        .await?;
    if available.is_empty() {
        return Err(DexError::NoRoute(params.in_token, params.out_token).into());
    }

    let amount_in = mint_to_token_amount(&*session, &params.in_token, params.amount)?;

    let best = session
        .trade()
        .get_best_amount_out(BestAmountOutParams {
            pools: Some(available.routed_pools).filter(|paths| !paths.is_empty()),
            amount_in: amount_in.clone(),
            input_token: mint_to_token(&*session, &params.in_token)?,
            output_token: mint_to_token(&*session, &params.out_token)?,
            slippage: Percent::default(),
        })
        .await?;

    let tx_data = session
        .trade()
        .swap(TradeSwapParams {
            routes: best.routes,
            route_type: best.route_type,
            amount_in,
            amount_out: best.min_amount_out,
            fixed_side: FixedSide::In,
        })
        .await?;

    let signature = session.execute(tx_data).await?;
    log::info!(
        "Swapped {} {} -> {}: {}",
        params.amount,
        params.in_token,
        params.out_token,
        signature
    );

    Ok(signature)
}

/// Swap through the pool registered for the mint pair, letting the SDK pick the output
pub async fn direct_swap<L: SessionLoader>(
    cache: &SessionCache<L>,
    params: &SwapRequest,
) -> Result<Signature> {
    let session = cache
        .get(&params.connection, Some(&params.owner), false)
        .await?;
    ensure_distinct_mints(&params.in_token, &params.out_token)?;

    let pools = session.liquidity().pools();
    if find_pool_by_mints(&pools, &params.in_token, &params.out_token).is_none() {
        return Err(DexError::NoPoolForMints(params.in_token, params.out_token).into());
    }

    let amount_in = mint_to_token_amount(&*session, &params.in_token, params.amount)?;
    let amount_out = mint_to_token_amount(&*session, &params.out_token, Decimal::ZERO)?;

    let tx_data = session
        .trade()
        .direct_swap(DirectSwapParams {
            amount_in,
            amount_out,
            fixed_side: FixedSide::In,
            slippage: Percent::default(),
        })
        .await?;

    // ext_info.amount_out holds the expected output
    log::debug!("Direct swap expects {:?}", tx_data.ext_info.amount_out.to_exact().ok());

    let signature = session.execute(tx_data).await?;
    log::info!(
        "Direct swapped {} {} -> {}: {}",
        params.amount,
        params.in_token,
        params.out_token,
        signature
    );

    Ok(signature)
}

/// Swap through a single, caller-chosen pool
pub async fn amm_swap<L: SessionLoader>(
    cache: &SessionCache<L>,
    params: &AmmSwapRequest,
) -> Result<Signature> {
    let session = cache
        .get(&params.connection, Some(&params.owner), false)
        .await?;
    ensure_distinct_mints(&params.in_token, &params.out_token)?;

    let pool = resolve_pool(session.liquidity(), &params.pool_id)?;
    for mint in [&params.in_token, &params.out_token] {
        if !pool.has_mint(mint) {
            return Err(DexError::MintNotInPool {
                pool: pool.id,
                mint: *mint,
            }
            .into());
        }
    }

    execute_on_path(
        &*session,
        vec![pool],
        &params.in_token,
        &params.out_token,
        params.amount,
    )
    .await
}

/// Swap through two caller-chosen pools sharing an intermediate mint
pub async fn route_swap<L: SessionLoader>(
    cache: &SessionCache<L>,
    params: &RouteSwapRequest,
) -> Result<Signature> {
    let session = cache
        .get(&params.connection, Some(&params.owner), false)
        .await?;
    ensure_distinct_mints(&params.in_token, &params.out_token)?;

    let from_pool = resolve_pool(session.liquidity(), &params.from_pool_id)?;
    let out_pool = resolve_pool(session.liquidity(), &params.out_pool_id)?;

    let middle_mint = from_pool.other_mint(&params.in_token);
    let reaches_out = middle_mint
        .and_then(|mint| out_pool.other_mint(&mint))
        .is_some_and(|mint| same_mint(&mint, &params.out_token));
    if !reaches_out {
        return Err(DexError::DisjointRoute(from_pool.id, out_pool.id).into());
    }

    execute_on_path(
        &*session,
        vec![from_pool, out_pool],
        &params.in_token,
        &params.out_token,
        params.amount,
    )
    .await
}

fn ensure_distinct_mints(in_token: &Pubkey, out_token: &Pubkey) -> Result<()> {
    if same_mint(in_token, out_token) {
        return Err(DexError::SameMint(*in_token).into());
    }
    Ok(())
}

async fn execute_on_path<D: Dex>(
    session: &D,
    path: Vec<PoolInfo>,
    in_token: &Pubkey,
    out_token: &Pubkey,
    amount: Decimal,
) -> Result<Signature> {
    let amount_in = mint_to_token_amount(session, in_token, amount)?;
    let hops = path.len();

    let best = session
        .trade()
        .get_best_amount_out(BestAmountOutParams {
            pools: Some(vec![path]),
            amount_in: amount_in.clone(),
            input_token: mint_to_token(session, in_token)?,
            output_token: mint_to_token(session, out_token)?,
            slippage: Percent::default(),
        })
        .await?;

    let tx_data = session
        .trade()
        .swap(TradeSwapParams {
            routes: best.routes,
            route_type: best.route_type,
            amount_in,
            amount_out: best.min_amount_out,
            fixed_side: FixedSide::In,
        })
        .await?;

    let signature = session.execute(tx_data).await?;
    log::info!(
        "Swapped {} {} -> {} over {} pool(s): {}",
        amount,
        in_token,
        out_token,
        hops,
        signature
    );

    Ok(signature)
}
