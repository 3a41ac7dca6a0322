use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::{config, errors::ContractError, events, rewards, schedule::Schedule};

// ── Storage key constants ────────────────────────────────────────────────────

const POOL: Symbol = symbol_short!("POOL");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const POOL_ASSET: Symbol = symbol_short!("POOL_AST");

/// Upper bound on the registry so `mass_update_pools` has a fixed worst case.
///
/// A batch touches every pool entry plus the instance, the contract code and
/// at most one new pool, each counted with its TTL entry. 32 pools keep that
/// under the host's 100-entry footprint limit.
pub const MAX_POOLS: u32 = 32;

// ── Types ────────────────────────────────────────────────────────────────────

/// What a pool holds. Pool 0 is always `Native`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AssetKind {
    Native,
    Token,
}

/// Admin-supplied settings for a pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolParams {
    pub weight: u32,
    pub min_deposit: i128,
    pub unstake_lock_blocks: u32,
}

impl PoolParams {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.min_deposit < 0 {
            return Err(ContractError::InvalidInput);
        }
        Ok(())
    }
}

/// A weighted bucket of one staked asset with its own reward accumulator.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub asset: Address,
    pub kind: AssetKind,
    /// Relative share of issuance; see `Schedule::total_weight`.
    pub weight: u32,
    pub last_update_block: u32,
    /// Cumulative reward per staked unit, scaled by `ACC_PRECISION`.
    /// Never decreases.
    pub acc_reward_per_stake: i128,
    pub total_staked: i128,
    /// Unstaked but not yet withdrawn.
    pub total_locked: i128,
    pub min_deposit: i128,
    pub unstake_lock_blocks: u32,
}

impl Pool {
    pub fn new(asset: Address, kind: AssetKind, params: &PoolParams, now: u32) -> Self {
        Pool {
            asset,
            kind,
            weight: params.weight,
            last_update_block: now,
            acc_reward_per_stake: 0,
            total_staked: 0,
            total_locked: 0,
            min_deposit: params.min_deposit,
            unstake_lock_blocks: params.unstake_lock_blocks,
        }
    }

    /// The pool with its accumulator brought forward to `now`.
    ///
    /// Pure: `self` is left as it was, so a failure here never leaves a
    /// half-updated pool behind and read-only queries can project freely.
    ///
    /// `last_update_block` moves to `now` even when nothing is staked, so a
    /// stretch with no stakers is never credited to whoever stakes next.
    pub fn advanced(&self, schedule: &Schedule, now: u32) -> Result<Pool, ContractError> {
        if now <= self.last_update_block {
            return Ok(self.clone());
        }

        let share = schedule.pool_share(self.last_update_block, now, self.weight)?;
        let delta = rewards::acc_increment(share, self.total_staked)?;

        let mut next = self.clone();
        next.acc_reward_per_stake = self
            .acc_reward_per_stake
            .checked_add(delta)
            .ok_or(ContractError::ArithmeticOverflow)?;
        next.last_update_block = now;
        Ok(next)
    }

    /// Replaces the admin-controlled settings, leaving accounting untouched.
    pub fn configure(&mut self, params: &PoolParams) {
        self.weight = params.weight;
        self.min_deposit = params.min_deposit;
        self.unstake_lock_blocks = params.unstake_lock_blocks;
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn pool_key(id: u32) -> (Symbol, u32) {
    (POOL, id)
}

fn asset_key(asset: &Address) -> (Symbol, Address) {
    (POOL_ASSET, asset.clone())
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

/// Fails with `InvalidPool` unless `id` names a registered pool.
pub fn require_exists(env: &Env, id: u32) -> Result<(), ContractError> {
    if id >= count(env) {
        return Err(ContractError::InvalidPool);
    }
    Ok(())
}

pub fn load(env: &Env, id: u32) -> Result<Pool, ContractError> {
    require_exists(env, id)?;
    env.storage()
        .persistent()
        .get(&pool_key(id))
        .ok_or(ContractError::InvalidPool)
}

pub fn store(env: &Env, id: u32, pool: &Pool) {
    let key = pool_key(id);
    env.storage().persistent().set(&key, pool);
    config::extend_persistent_ttl(env, &key);
}

/// Id the next pool will receive, or `PoolLimitReached` when full.
pub fn next_id(env: &Env) -> Result<u32, ContractError> {
    let id = count(env);
    if id >= MAX_POOLS {
        return Err(ContractError::PoolLimitReached);
    }
    Ok(id)
}

/// Appends `pool` at `id`, which must come from `next_id`.
pub fn push(env: &Env, id: u32, pool: &Pool) {
    store(env, id, pool);
    env.storage().instance().set(&asset_key(&pool.asset), &id);
    env.storage().instance().set(&POOL_COUNT, &(id + 1));
}

/// Asset index lookup. Lives in instance storage so it adds no footprint
/// entries and shares the instance TTL.
pub fn contains_asset(env: &Env, asset: &Address) -> bool {
    env.storage().instance().has(&asset_key(asset))
}

// ── Batch update ─────────────────────────────────────────────────────────────

/// Every pool in registry order, advanced in memory next to its stored copy.
pub struct Staged {
    stored: Vec<Pool>,
    pub pools: Vec<Pool>,
}

/// Every pool advanced to `now` without writing any of them. One failing
/// pool fails the batch.
pub fn stage_all(env: &Env, schedule: &Schedule, now: u32) -> Result<Staged, ContractError> {
    let mut stored = Vec::new(env);
    let mut pools = Vec::new(env);
    for id in 0..count(env) {
        let pool = load(env, id)?;
        pools.push_back(pool.advanced(schedule, now)?);
        stored.push_back(pool);
    }
    Ok(Staged { stored, pools })
}

/// Writes back the pools of a batch that differ from storage.
pub fn commit_all(env: &Env, staged: &Staged) {
    for id in 0..staged.pools.len() {
        let pool = staged.pools.get_unchecked(id);
        if pool == staged.stored.get_unchecked(id) {
            continue;
        }
        store(env, id, &pool);
        events::publish_pool_updated(env, id, &pool);
    }
}
