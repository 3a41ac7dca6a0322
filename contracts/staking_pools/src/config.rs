use soroban_sdk::{contracttype, symbol_short, Address, Env, IntoVal, Symbol, Val};

use crate::{errors::ContractError, schedule::Schedule};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const INITIALIZED: Symbol = symbol_short!("INIT");
const NATIVE_ASSET: Symbol = symbol_short!("NATIVE");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const SCHEDULE: Symbol = symbol_short!("SCHED");
const PAUSED: Symbol = symbol_short!("PAUSED");

// About 30 and 60 days of ledgers at 5s each.
pub(crate) const TTL_THRESHOLD: u32 = 518_400;
pub(crate) const TTL_EXTEND_TO: u32 = 1_036_800;

/// Operations that can be switched off independently of the rest of the
/// contract. Deposits and unstake requests are never paused.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PausableOp {
    Withdraw,
    Claim,
}

impl PausableOp {
    pub fn paused_error(&self) -> ContractError {
        match self {
            PausableOp::Withdraw => ContractError::WithdrawPaused,
            PausableOp::Claim => ContractError::ClaimPaused,
        }
    }
}

// ── TTL ──────────────────────────────────────────────────────────────────────

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn extend_persistent_ttl<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn mark_initialized(env: &Env) {
    env.storage().instance().set(&INITIALIZED, &true);
}

// ── Admin ────────────────────────────────────────────────────────────────────

pub fn admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN, admin);
}

pub fn pending_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_ADMIN)
}

pub fn set_pending_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&PENDING_ADMIN, admin);
}

pub fn clear_pending_admin(env: &Env) {
    env.storage().instance().remove(&PENDING_ADMIN);
}

// ── Assets ───────────────────────────────────────────────────────────────────

pub fn native_asset(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&NATIVE_ASSET)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_native_asset(env: &Env, asset: &Address) {
    env.storage().instance().set(&NATIVE_ASSET, asset);
}

pub fn reward_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&REWARD_TOKEN)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_reward_token(env: &Env, token: &Address) {
    env.storage().instance().set(&REWARD_TOKEN, token);
}

// ── Issuance schedule ────────────────────────────────────────────────────────

pub fn schedule(env: &Env) -> Result<Schedule, ContractError> {
    env.storage()
        .instance()
        .get(&SCHEDULE)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_schedule(env: &Env, schedule: &Schedule) {
    env.storage().instance().set(&SCHEDULE, schedule);
}

// ── Pause switches ───────────────────────────────────────────────────────────

fn pause_key(op: &PausableOp) -> (Symbol, PausableOp) {
    (PAUSED, op.clone())
}

pub fn is_paused(env: &Env, op: &PausableOp) -> bool {
    env.storage()
        .instance()
        .get(&pause_key(op))
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, op: &PausableOp, paused: bool) {
    env.storage().instance().set(&pause_key(op), &paused);
}

/// Fails with the operation's paused error while its switch is on.
pub fn require_not_paused(env: &Env, op: &PausableOp) -> Result<(), ContractError> {
    if is_paused(env, op) {
        return Err(op.paused_error());
    }
    Ok(())
}
