#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::{config::PausableOp, pool::Pool};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub native_asset: Address,
    pub reward_token: Address,
    pub reward_per_block: i128,
    pub start_block: u32,
    pub end_block: u32,
    pub block: u32,
}

/// Fired when a pool is appended to the registry.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub asset: Address,
    pub weight: u32,
    pub min_deposit: i128,
    pub unstake_lock_blocks: u32,
    pub block: u32,
}

/// Fired when the admin reconfigures a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfiguredEvent {
    pub pool_id: u32,
    pub weight: u32,
    pub min_deposit: i128,
    pub unstake_lock_blocks: u32,
    pub total_weight: u64,
    pub block: u32,
}

/// Fired when a pool's accumulator is written back outside a stake change.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdatedEvent {
    pub pool_id: u32,
    pub acc_reward_per_stake: i128,
    pub total_staked: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub pool_id: u32,
    pub account: Address,
    pub amount: i128,
    pub staked: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeRequestedEvent {
    pub pool_id: u32,
    pub account: Address,
    pub amount: i128,
    pub unlock_block: u32,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub pool_id: u32,
    pub account: Address,
    pub amount: i128,
    pub block: u32,
}

/// `owed` is what the account had earned; `paid` is what the treasury
/// could cover.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub pool_id: u32,
    pub account: Address,
    pub owed: i128,
    pub paid: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateSetEvent {
    pub reward_per_block: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IssuanceEndSetEvent {
    pub end_block: u32,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseSetEvent {
    pub operation: PausableOp,
    pub paused: bool,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsFundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub block: u32,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub block: u32,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub block: u32,
}

/// Fired when a pending admin transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub block: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    native_asset: Address,
    reward_token: Address,
    reward_per_block: i128,
    start_block: u32,
    end_block: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            native_asset,
            reward_token,
            reward_per_block,
            start_block,
            end_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_added(env: &Env, pool_id: u32, pool: &Pool) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool_id),
        PoolAddedEvent {
            pool_id,
            asset: pool.asset.clone(),
            weight: pool.weight,
            min_deposit: pool.min_deposit,
            unstake_lock_blocks: pool.unstake_lock_blocks,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_configured(env: &Env, pool_id: u32, pool: &Pool, total_weight: u64) {
    env.events().publish(
        (symbol_short!("POOL_SET"), pool_id),
        PoolConfiguredEvent {
            pool_id,
            weight: pool.weight,
            min_deposit: pool.min_deposit,
            unstake_lock_blocks: pool.unstake_lock_blocks,
            total_weight,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_updated(env: &Env, pool_id: u32, pool: &Pool) {
    env.events().publish(
        (symbol_short!("POOL_UPD"), pool_id),
        PoolUpdatedEvent {
            pool_id,
            acc_reward_per_stake: pool.acc_reward_per_stake,
            total_staked: pool.total_staked,
            block: pool.last_update_block,
        },
    );
}

pub fn publish_deposited(env: &Env, pool_id: u32, account: Address, amount: i128, staked: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), pool_id, account.clone()),
        DepositedEvent {
            pool_id,
            account,
            amount,
            staked,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_unstake_requested(
    env: &Env,
    pool_id: u32,
    account: Address,
    amount: i128,
    unlock_block: u32,
) {
    env.events().publish(
        (symbol_short!("UNSTK_REQ"), pool_id, account.clone()),
        UnstakeRequestedEvent {
            pool_id,
            account,
            amount,
            unlock_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, pool_id: u32, account: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), pool_id, account.clone()),
        WithdrawnEvent {
            pool_id,
            account,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, pool_id: u32, account: Address, owed: i128, paid: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), pool_id, account.clone()),
        RewardClaimedEvent {
            pool_id,
            account,
            owed,
            paid,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_rate_set(env: &Env, reward_per_block: i128) {
    env.events().publish(
        (symbol_short!("RWD_RATE"),),
        RewardRateSetEvent {
            reward_per_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_issuance_end_set(env: &Env, end_block: u32) {
    env.events().publish(
        (symbol_short!("ISS_END"),),
        IssuanceEndSetEvent {
            end_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pause_set(env: &Env, operation: PausableOp, paused: bool) {
    env.events().publish(
        (symbol_short!("PAUSE_SET"),),
        PauseSetEvent {
            operation,
            paused,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_rewards_funded(env: &Env, funder: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("FUNDED"), funder.clone()),
        RewardsFundedEvent {
            funder,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            block: env.ledger().sequence(),
        },
    );
}
