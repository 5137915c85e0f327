use anyhow::Result;
use rust_decimal::Decimal;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{
    amm::{
        CreateFarmParams, Dex, FarmClient, FarmDepositParams, FarmWithdrawParams, RewardInfo,
    },
    error::DexError,
    liquidity::resolve_pool,
    params::{CreateFarmRequest, FarmRequest, HarvestRequest},
    registry::FarmInfo,
    session::{SessionCache, SessionLoader},
    token::TokenAmount,
};

/// Stake LP tokens into a farm
pub async fn deposit<L: SessionLoader>(
    cache: &SessionCache<L>,
    params: &FarmRequest,
) -> Result<Signature> {
    let session = cache
        .get(&params.connection, Some(&params.owner), false)
        .await?;
    session.farm().load().await?;

    let farm = resolve_farm(session.farm(), &params.farm_id)?;
    let amount = TokenAmount::from_ui(farm.lp_token(), params.lp_amount)?;

    let tx_data = session
        .farm()
        .deposit(FarmDepositParams {
            farm_id: farm.id,
            amount,
        })
        .await?;

    let signature = session.execute(tx_data).await?;
    log::info!(
        "Deposited {} LP into farm {}: {}",
        params.lp_amount,
        farm.id,
        signature
    );

    Ok(signature)
}

/// Unstake LP tokens from a farm, harvesting pending rewards on the way
pub async fn withdraw<L: SessionLoader>(
    cache: &SessionCache<L>,
    params: &FarmRequest,
) -> Result<Signature> {
    let session = cache
        .get(&params.connection, Some(&params.owner), false)
        .await?;
    session.farm().load().await?;

    let farm = resolve_farm(session.farm(), &params.farm_id)?;
    let amount = TokenAmount::from_ui(farm.lp_token(), params.lp_amount)?;

    let tx_data = session
        .farm()
        .withdraw(FarmWithdrawParams {
            farm_id: farm.id,
            amount,
        })
        .await?;

    let signature = session.execute(tx_data).await?;
    log::info!(
        "Withdrew {} LP from farm {}: {}",
        params.lp_amount,
        farm.id,
        signature
    );

    Ok(signature)
}

/// Claim pending rewards without unstaking
pub async fn harvest<L: SessionLoader>(
    cache: &SessionCache<L>,
    params: &HarvestRequest,
) -> Result<Signature> {
    // a withdraw always pays out rewards, so harvest is a zero withdraw
    withdraw(
        cache,
        &FarmRequest {
            connection: params.connection.clone(),
            owner: params.owner.clone(),
            farm_id: params.farm_id,
            lp_amount: Decimal::ZERO,
        },
    )
    .await
}

/// Create a farm rewarding stakers of a pool's LP token
pub async fn create_farm<L: SessionLoader>(
    cache: &SessionCache<L>,
    params: &CreateFarmRequest,
) -> Result<Signature> {
    let session = cache
        .get(&params.connection, Some(&params.owner), false)
        .await?;

    let pool = resolve_pool(session.liquidity(), &params.pool_id)?;

    let reward_info = RewardInfo {
        reward_mint: params.reward_mint,
        reward_per_second: params.reward_per_second,
        reward_open_time: params.reward_open_time,
        reward_end_time: params.reward_end_time,
    };
    validate_reward_info(&reward_info)?;

    let tx_data = session
        .farm()
        .create(CreateFarmParams {
            pool_id: pool.id,
            reward_infos: vec![reward_info],
        })
        .await?;

    let signature = session.execute(tx_data).await?;
    log::info!("Created farm for pool {}: {}", pool.id, signature);

    Ok(signature)
}

fn resolve_farm<C: FarmClient>(farm: &C, farm_id: &Pubkey) -> Result<FarmInfo> {
    farm.farm(farm_id)
        .ok_or_else(|| DexError::FarmNotFound(*farm_id).into())
}

fn validate_reward_info(reward_info: &RewardInfo) -> Result<()> {
    if reward_info.reward_per_second == 0 {
        return Err(
            DexError::InvalidRewardSchedule("reward per second must be positive".to_string())
                .into(),
        );
    }
    if reward_info.reward_open_time >= reward_info.reward_end_time {
        return Err(DexError::InvalidRewardSchedule(format!(
            "open time {} is not before end time {}",
            reward_info.reward_open_time, reward_info.reward_end_time
        ))
        .into());
    }

    Ok(())
}
