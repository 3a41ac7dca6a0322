use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::{config, errors::ContractError};

// ── Storage key constants ───────────────────────────────────────────────────

const QUEUE: Symbol = symbol_short!("USTK_Q");

/// Outstanding requests allowed per (pool, account).
pub const MAX_UNSTAKE_REQUESTS: u32 = 32;

// ── Types ───────────────────────────────────────────────────────────────────

/// Stake that has left the pool and is waiting out the lock.
///
/// The amount stopped earning at request time. It becomes withdrawable at
/// `unlock_block` and stays queued until `withdraw` removes it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeRequest {
    pub amount: i128,
    pub unlock_block: u32,
}

/// Totals reported by `get_withdraw_amount`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawAmount {
    /// Everything still queued.
    pub requested: i128,
    /// What `withdraw` would release at the current block.
    pub matured: i128,
}

// ── Queue operations ────────────────────────────────────────────────────────

/// Inserts `request` keeping the queue ordered by `unlock_block`.
///
/// Equal unlock blocks keep arrival order. A request made after the pool's
/// lock was shortened can therefore land ahead of older ones, which keeps
/// `drain_matured`'s front-only scan from stranding it.
pub fn enqueue(queue: &mut Vec<UnstakeRequest>, request: UnstakeRequest) -> Result<(), ContractError> {
    if queue.len() >= MAX_UNSTAKE_REQUESTS {
        return Err(ContractError::TooManyUnstakeRequests);
    }

    let mut at = queue.len();
    while at > 0 && queue.get_unchecked(at - 1).unlock_block > request.unlock_block {
        at -= 1;
    }
    queue.insert(at, request);
    Ok(())
}

/// Length and sum of the matured prefix: entries from the front with
/// `unlock_block <= now`, stopping at the first one still locked.
pub fn matured_prefix(queue: &Vec<UnstakeRequest>, now: u32) -> Result<(u32, i128), ContractError> {
    let mut len = 0u32;
    let mut sum = 0i128;
    for request in queue.iter() {
        if request.unlock_block > now {
            break;
        }
        sum = sum
            .checked_add(request.amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        len += 1;
    }
    Ok((len, sum))
}

/// Removes the matured prefix and returns its total.
pub fn drain_matured(queue: &mut Vec<UnstakeRequest>, now: u32) -> Result<i128, ContractError> {
    let (len, sum) = matured_prefix(queue, now)?;
    if len > 0 {
        *queue = queue.slice(len..);
    }
    Ok(sum)
}

pub fn withdraw_amount(queue: &Vec<UnstakeRequest>, now: u32) -> Result<WithdrawAmount, ContractError> {
    let mut requested = 0i128;
    for request in queue.iter() {
        requested = requested
            .checked_add(request.amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
    }
    let (_, matured) = matured_prefix(queue, now)?;
    Ok(WithdrawAmount { requested, matured })
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn queue_key(pool_id: u32, account: &Address) -> (Symbol, u32, Address) {
    (QUEUE, pool_id, account.clone())
}

pub fn load_queue(env: &Env, pool_id: u32, account: &Address) -> Vec<UnstakeRequest> {
    env.storage()
        .persistent()
        .get(&queue_key(pool_id, account))
        .unwrap_or(Vec::new(env))
}

/// Persists the queue; an empty queue deletes the entry.
pub fn store_queue(env: &Env, pool_id: u32, account: &Address, queue: &Vec<UnstakeRequest>) {
    let key = queue_key(pool_id, account);
    if queue.is_empty() {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, queue);
    config::extend_persistent_ttl(env, &key);
}
