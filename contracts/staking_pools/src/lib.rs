#![no_std]

pub mod config;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod pool;
pub mod rewards;
pub mod schedule;
pub mod timelock;
pub mod transfer;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

pub use config::PausableOp;
pub use errors::ContractError;
pub use ledger::UserInfo;
pub use pool::{AssetKind, Pool, PoolParams, MAX_POOLS};
pub use schedule::Schedule;
pub use timelock::{UnstakeRequest, WithdrawAmount, MAX_UNSTAKE_REQUESTS};

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPoolsContract;

#[contractimpl]
impl StakingPoolsContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract and create pool 0 for the native asset.
    ///
    /// * `native_asset`     – SAC address of the native asset staked in pool 0.
    /// * `reward_token`     – SAC address of the token paid out as rewards.
    /// * `reward_per_block` – reward issued per ledger across all pools.
    /// * `start_block`, `end_block` – issuance window `[start, end)`.
    pub fn initialize(
        env: Env,
        admin: Address,
        native_asset: Address,
        reward_token: Address,
        reward_per_block: i128,
        start_block: u32,
        end_block: u32,
        native_pool: PoolParams,
    ) -> Result<(), ContractError> {
        if config::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_token == native_asset {
            return Err(ContractError::TokensIdentical);
        }
        if reward_per_block < 0 || start_block > end_block {
            return Err(ContractError::InvalidInput);
        }
        native_pool.validate()?;

        let now = env.ledger().sequence();
        let schedule = Schedule {
            reward_per_block,
            start_block,
            end_block,
            total_weight: u64::from(native_pool.weight),
        };
        let pool = Pool::new(native_asset.clone(), AssetKind::Native, &native_pool, now);
        let pool_id = pool::next_id(&env)?;

        config::set_admin(&env, &admin);
        config::set_native_asset(&env, &native_asset);
        config::set_reward_token(&env, &reward_token);
        config::set_schedule(&env, &schedule);
        config::mark_initialized(&env);
        pool::push(&env, pool_id, &pool);
        config::extend_instance_ttl(&env);

        events::publish_initialized(
            &env,
            admin,
            native_asset,
            reward_token,
            reward_per_block,
            start_block,
            end_block,
        );
        events::publish_pool_added(&env, pool_id, &pool);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stake `amount` of the pool's asset.
    ///
    /// The pool accumulator is brought up to date first, then whatever the
    /// old stake earned is banked before the stake grows, so the new tokens
    /// never earn retroactively. Returns the account's new staked balance.
    pub fn deposit(
        env: Env,
        account: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();

        let pool = pool::load(&env, pool_id)?;
        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }
        if amount < pool.min_deposit {
            return Err(ContractError::DepositTooSmall);
        }

        // 1. Flush the accumulator.
        let schedule = config::schedule(&env)?;
        let now = env.ledger().sequence();
        let mut pool = pool.advanced(&schedule, now)?;

        // 2. Bank, grow, re-snapshot.
        let mut user = ledger::load(&env, pool_id, &account);
        user.bank_owed(pool.acc_reward_per_stake)?;
        user.add_stake(amount)?;
        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        user.resnapshot(pool.acc_reward_per_stake)?;

        // 3. Tokens in before anything is committed.
        transfer::transfer_in(&env, &pool.asset, &account, amount);

        pool::store(&env, pool_id, &pool);
        ledger::store(&env, pool_id, &account, &user);
        config::extend_instance_ttl(&env);

        events::publish_deposited(&env, pool_id, account, amount, user.staked);

        Ok(user.staked)
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Move `amount` from staked to locked-pending-withdrawal.
    ///
    /// The amount stops earning immediately and can be withdrawn once
    /// `unstake_lock_blocks` ledgers have passed. Returns the unlock block.
    pub fn request_unstake(
        env: Env,
        account: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();

        let pool = pool::load(&env, pool_id)?;
        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        let mut user = ledger::load(&env, pool_id, &account);
        if amount > user.staked {
            return Err(ContractError::InsufficientBalance);
        }

        // 1. Flush rewards before reducing stake.
        let schedule = config::schedule(&env)?;
        let now = env.ledger().sequence();
        let mut pool = pool.advanced(&schedule, now)?;
        user.bank_owed(pool.acc_reward_per_stake)?;

        // 2. Shrink the stake and lock the amount.
        user.remove_stake(amount)?;
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool.total_locked = pool
            .total_locked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        user.resnapshot(pool.acc_reward_per_stake)?;

        // 3. Queue the timelock entry.
        let unlock_block = now
            .checked_add(pool.unstake_lock_blocks)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let mut queue = timelock::load_queue(&env, pool_id, &account);
        timelock::enqueue(
            &mut queue,
            UnstakeRequest {
                amount,
                unlock_block,
            },
        )?;

        pool::store(&env, pool_id, &pool);
        ledger::store(&env, pool_id, &account, &user);
        timelock::store_queue(&env, pool_id, &account, &queue);
        config::extend_instance_ttl(&env);

        events::publish_unstake_requested(&env, pool_id, account, amount, unlock_block);

        Ok(unlock_block)
    }

    /// Release every matured unstake request at the front of the queue.
    ///
    /// Stops at the first request still locked. Returns the amount sent,
    /// which is 0 when nothing has matured.
    pub fn withdraw(env: Env, account: Address, pool_id: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        config::require_not_paused(&env, &PausableOp::Withdraw)?;

        let mut pool = pool::load(&env, pool_id)?;
        let now = env.ledger().sequence();

        let mut queue = timelock::load_queue(&env, pool_id, &account);
        let released = timelock::drain_matured(&mut queue, now)?;
        if released == 0 {
            return Ok(0);
        }
        pool.total_locked = pool
            .total_locked
            .checked_sub(released)
            .ok_or(ContractError::ArithmeticOverflow)?;
        transfer::require_liquidity(&env, &pool.asset, released)?;

        pool::store(&env, pool_id, &pool);
        timelock::store_queue(&env, pool_id, &account, &queue);
        config::extend_instance_ttl(&env);

        // Interactions last.
        transfer::transfer_out(&env, &pool.asset, &account, released);

        events::publish_withdrawn(&env, pool_id, account, released);

        Ok(released)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out everything `account` has earned in `pool_id`.
    ///
    /// Payment is capped at the treasury's reward-token balance; any shortfall
    /// is forfeited, not carried to a later claim. Returns the amount paid.
    pub fn claim(env: Env, account: Address, pool_id: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        config::require_not_paused(&env, &PausableOp::Claim)?;

        let pool = pool::load(&env, pool_id)?;
        let schedule = config::schedule(&env)?;
        let now = env.ledger().sequence();
        let pool = pool.advanced(&schedule, now)?;

        let mut user = ledger::load(&env, pool_id, &account);
        let owed = user.pending(pool.acc_reward_per_stake)?;
        if owed <= 0 {
            pool::store(&env, pool_id, &pool);
            config::extend_instance_ttl(&env);
            return Ok(0);
        }
        user.banked_reward = 0;
        user.resnapshot(pool.acc_reward_per_stake)?;
        let reward_token = config::reward_token(&env)?;

        pool::store(&env, pool_id, &pool);
        ledger::store(&env, pool_id, &account, &user);
        config::extend_instance_ttl(&env);

        let paid = transfer::transfer_out_capped(&env, &reward_token, &account, owed);

        events::publish_reward_claimed(&env, pool_id, account, owed, paid);

        Ok(paid)
    }

    /// Send `amount` reward tokens from `funder` into the treasury.
    pub fn fund_rewards(env: Env, funder: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        funder.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        let reward_token = config::reward_token(&env)?;
        transfer::transfer_in(&env, &reward_token, &funder, amount);

        events::publish_rewards_funded(&env, funder, amount);

        Ok(())
    }

    // ── Accumulator maintenance ─────────────────────────────────────────────

    /// Bring one pool's accumulator up to the current block.
    pub fn update_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        Self::require_initialized(&env)?;

        let pool = pool::load(&env, pool_id)?;
        let schedule = config::schedule(&env)?;
        let next = pool.advanced(&schedule, env.ledger().sequence())?;
        if next != pool {
            pool::store(&env, pool_id, &next);
            events::publish_pool_updated(&env, pool_id, &next);
        }

        Ok(next)
    }

    /// Bring every pool up to the current block. All or nothing.
    /// Returns the number of pools in the registry.
    pub fn mass_update_pools(env: Env) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;

        let schedule = config::schedule(&env)?;
        let staged = pool::stage_all(&env, &schedule, env.ledger().sequence())?;
        pool::commit_all(&env, &staged);
        config::extend_instance_ttl(&env);

        Ok(staged.pools.len())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn pool_count(env: Env) -> u32 {
        pool::count(&env)
    }

    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        pool::load(&env, pool_id)
    }

    pub fn get_user_info(
        env: Env,
        pool_id: u32,
        account: Address,
    ) -> Result<UserInfo, ContractError> {
        pool::require_exists(&env, pool_id)?;
        Ok(ledger::load(&env, pool_id, &account))
    }

    pub fn get_unstake_queue(
        env: Env,
        pool_id: u32,
        account: Address,
    ) -> Result<Vec<UnstakeRequest>, ContractError> {
        pool::require_exists(&env, pool_id)?;
        Ok(timelock::load_queue(&env, pool_id, &account))
    }

    /// Total queued for withdrawal and the part that has matured.
    pub fn get_withdraw_amount(
        env: Env,
        pool_id: u32,
        account: Address,
    ) -> Result<WithdrawAmount, ContractError> {
        pool::require_exists(&env, pool_id)?;
        let queue = timelock::load_queue(&env, pool_id, &account);
        timelock::withdraw_amount(&queue, env.ledger().sequence())
    }

    /// Reward `claim` would pay right now, treasury permitting.
    pub fn get_pending_reward(
        env: Env,
        pool_id: u32,
        account: Address,
    ) -> Result<i128, ContractError> {
        let now = env.ledger().sequence();
        Self::get_pending_reward_at(env, pool_id, account, now)
    }

    /// Reward `claim` would pay at `at_block`, assuming no other activity in
    /// the pool until then. Does not mutate state.
    pub fn get_pending_reward_at(
        env: Env,
        pool_id: u32,
        account: Address,
        at_block: u32,
    ) -> Result<i128, ContractError> {
        let pool = pool::load(&env, pool_id)?;
        let schedule = config::schedule(&env)?;
        let projected = pool.advanced(&schedule, at_block)?;

        ledger::load(&env, pool_id, &account).pending(projected.acc_reward_per_stake)
    }

    /// Total reward issued across all pools over `[from, to)`.
    pub fn get_multiplier(env: Env, from: u32, to: u32) -> Result<i128, ContractError> {
        config::schedule(&env)?.multiplier(from, to)
    }

    pub fn get_schedule(env: Env) -> Result<Schedule, ContractError> {
        config::schedule(&env)
    }

    pub fn is_paused(env: Env, operation: PausableOp) -> bool {
        config::is_paused(&env, &operation)
    }

    /// Reward tokens currently available to claims.
    pub fn treasury_balance(env: Env) -> Result<i128, ContractError> {
        let reward_token = config::reward_token(&env)?;
        Ok(transfer::balance(&env, &reward_token))
    }

    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        config::reward_token(&env)
    }

    pub fn get_native_asset(env: Env) -> Result<Address, ContractError> {
        config::native_asset(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        config::is_initialized(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        config::admin(&env)
    }

    // ── Admin: pools and issuance ────────────────────────────────────────────

    /// Append a pool for `asset`.
    ///
    /// All existing pools are flushed at the old total weight first, so the
    /// new pool only dilutes issuance from this block on.
    pub fn add_pool(
        env: Env,
        admin: Address,
        asset: Address,
        params: PoolParams,
    ) -> Result<u32, ContractError> {
        Self::require_admin(&env, &admin)?;
        params.validate()?;

        if asset == config::reward_token(&env)? {
            return Err(ContractError::TokensIdentical);
        }
        if pool::contains_asset(&env, &asset) {
            return Err(ContractError::PoolExists);
        }
        let pool_id = pool::next_id(&env)?;

        let now = env.ledger().sequence();
        let mut schedule = config::schedule(&env)?;
        let staged = pool::stage_all(&env, &schedule, now)?;
        schedule.total_weight = schedule
            .total_weight
            .checked_add(u64::from(params.weight))
            .ok_or(ContractError::ArithmeticOverflow)?;
        let pool = Pool::new(asset, AssetKind::Token, &params, now);

        pool::commit_all(&env, &staged);
        pool::push(&env, pool_id, &pool);
        config::set_schedule(&env, &schedule);
        config::extend_instance_ttl(&env);

        events::publish_pool_added(&env, pool_id, &pool);

        Ok(pool_id)
    }

    /// Change a pool's weight, minimum deposit and unstake lock.
    ///
    /// A new lock only applies to requests made afterwards.
    pub fn set_pool(
        env: Env,
        admin: Address,
        pool_id: u32,
        params: PoolParams,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &admin)?;
        pool::require_exists(&env, pool_id)?;
        params.validate()?;

        let now = env.ledger().sequence();
        let mut schedule = config::schedule(&env)?;
        let mut staged = pool::stage_all(&env, &schedule, now)?;

        let mut target = staged.pools.get(pool_id).ok_or(ContractError::InvalidPool)?;
        schedule.total_weight = schedule
            .total_weight
            .checked_sub(u64::from(target.weight))
            .and_then(|rest| rest.checked_add(u64::from(params.weight)))
            .ok_or(ContractError::ArithmeticOverflow)?;
        target.configure(&params);
        staged.pools.set(pool_id, target.clone());

        pool::commit_all(&env, &staged);
        config::set_schedule(&env, &schedule);
        config::extend_instance_ttl(&env);

        events::publish_pool_configured(&env, pool_id, &target, schedule.total_weight);

        Ok(())
    }

    /// Change the issuance rate. Rewards up to this block are settled at the
    /// old rate.
    pub fn set_reward_per_block(
        env: Env,
        admin: Address,
        reward_per_block: i128,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &admin)?;
        if reward_per_block < 0 {
            return Err(ContractError::InvalidInput);
        }

        let mut schedule = config::schedule(&env)?;
        let staged = pool::stage_all(&env, &schedule, env.ledger().sequence())?;
        schedule.reward_per_block = reward_per_block;

        pool::commit_all(&env, &staged);
        config::set_schedule(&env, &schedule);
        config::extend_instance_ttl(&env);

        events::publish_reward_rate_set(&env, reward_per_block);

        Ok(())
    }

    /// Move the end of the issuance window.
    pub fn set_issuance_end(env: Env, admin: Address, end_block: u32) -> Result<(), ContractError> {
        Self::require_admin(&env, &admin)?;

        let mut schedule = config::schedule(&env)?;
        if end_block < schedule.start_block {
            return Err(ContractError::InvalidInput);
        }
        let staged = pool::stage_all(&env, &schedule, env.ledger().sequence())?;
        schedule.end_block = end_block;

        pool::commit_all(&env, &staged);
        config::set_schedule(&env, &schedule);
        config::extend_instance_ttl(&env);

        events::publish_issuance_end_set(&env, end_block);

        Ok(())
    }

    /// Switch withdrawals or claims off (or back on).
    pub fn set_paused(
        env: Env,
        admin: Address,
        operation: PausableOp,
        paused: bool,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &admin)?;

        config::set_paused(&env, &operation, paused);
        config::extend_instance_ttl(&env);

        events::publish_pause_set(&env, operation, paused);

        Ok(())
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    /// The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &current_admin)?;

        config::set_pending_admin(&env, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed new admin can call this.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending = config::pending_admin(&env).ok_or(ContractError::InvalidInput)?;
        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }
        let old_admin = config::admin(&env)?;

        config::set_admin(&env, &new_admin);
        config::clear_pending_admin(&env);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_admin(&env, &current_admin)?;

        let pending = config::pending_admin(&env).ok_or(ContractError::InvalidInput)?;
        config::clear_pending_admin(&env);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        config::pending_admin(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !config::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: `caller` must be the stored admin and must have signed.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        if *caller != config::admin(env)? {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
