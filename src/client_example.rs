// End-to-end walkthrough: one session shared by a swap, a liquidity round trip
// and a farm round trip on the RAY-USDC pair.

use anyhow::Result;
use rust_decimal::Decimal;
use solana_sdk::signature::Signature;

use crate::{
    amm::{AccountClient, Dex, FarmClient, LiquidityClient},
    connection::{Connection, Owner},
    constants::{RAY_MINT, USDC_MINT},
    error::DexError,
    farm::{deposit, withdraw},
    liquidity::{add_liquidity, remove_liquidity},
    params::{AddLiquidityRequest, FarmRequest, RemoveLiquidityRequest, SwapRequest},
    registry::{find_farm_by_mints, find_pool_by_mints},
    session::{SessionCache, SessionLoader},
    swap::direct_swap,
    token::mint_to_token_amount,
};

/// Signatures of every step of the walkthrough
#[derive(Debug, Clone)]
pub struct ExampleReport {
    pub swap: Signature,
    pub add_liquidity: Signature,
    pub remove_liquidity: Signature,
    pub farm_deposit: Signature,
    pub farm_withdraw: Signature,
}

pub async fn run<L: SessionLoader>(
    cache: &SessionCache<L>,
    connection: Connection,
    owner: Owner,
) -> Result<ExampleReport> {
    // only needs to be built once, every step below reuses it
    let session = cache.get(&connection, Some(&owner), false).await?;

    for account in session.account().token_accounts() {
        log::debug!(
            "Token account {} holds {} of {}",
            account.address,
            account.amount,
            account.mint
        );
    }
    log::info!(
        "Owner {} holds {} raw RAY",
        owner.pubkey(),
        session.account().balance(&RAY_MINT)
    );

    let swap = direct_swap(
        cache,
        &SwapRequest {
            connection: connection.clone(),
            owner: owner.clone(),
            in_token: RAY_MINT,
            out_token: USDC_MINT,
            amount: Decimal::from(10),
        },
    )
    .await?;

    let pools = session.liquidity().pools();
    let ray_usdc_pool_id = find_pool_by_mints(&pools, &RAY_MINT, &USDC_MINT)
        .map(|pool| pool.id)
        .ok_or(DexError::NoPoolForMints(RAY_MINT, USDC_MINT))?;

    let add_liquidity = add_liquidity(
        cache,
        &AddLiquidityRequest {
            connection: connection.clone(),
            owner: owner.clone(),
            pool_id: ray_usdc_pool_id,
            // 10 RAY, paired with the matching amount of USDC
            input_token_amount: mint_to_token_amount(&*session, &RAY_MINT, Decimal::from(10))?,
        },
    )
    .await?;

    let remove_liquidity = remove_liquidity(
        cache,
        &RemoveLiquidityRequest {
            connection: connection.clone(),
            owner: owner.clone(),
            pool_id: ray_usdc_pool_id,
            lp_amount: Decimal::new(2222, 4),
        },
    )
    .await?;

    session.farm().load().await?;
    let farms = session.farm().farms();
    let farm_id = find_farm_by_mints(&farms, &RAY_MINT, &USDC_MINT)
        .map(|farm| farm.id)
        .ok_or(DexError::NoFarmForMints(RAY_MINT, USDC_MINT))?;

    let farm_request = FarmRequest {
        connection,
        owner,
        farm_id,
        lp_amount: Decimal::ONE,
    };
    let farm_deposit = deposit(cache, &farm_request).await?;
    let farm_withdraw = withdraw(cache, &farm_request).await?;

    Ok(ExampleReport {
        swap,
        add_liquidity,
        remove_liquidity,
        farm_deposit,
        farm_withdraw,
    })
}
