use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{config, errors::ContractError, rewards};

const USER: Symbol = symbol_short!("USER");

/// One account's position in one pool.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserInfo {
    pub staked: i128,
    /// `staked × acc / ACC_PRECISION` as of the last mutation.
    pub settled_reward: i128,
    /// Earned under an earlier stake size and not yet paid.
    pub banked_reward: i128,
}

impl UserInfo {
    pub fn pending(&self, acc: i128) -> Result<i128, ContractError> {
        rewards::pending(self.staked, acc, self.settled_reward, self.banked_reward)
    }

    /// Moves what the current stake earned since the last snapshot into
    /// `banked_reward`. Must run before `staked` changes.
    pub fn bank_owed(&mut self, acc: i128) -> Result<(), ContractError> {
        if self.staked == 0 {
            return Ok(());
        }
        let owed = rewards::accrued(self.staked, acc)?
            .checked_sub(self.settled_reward)
            .ok_or(ContractError::ArithmeticOverflow)?;
        self.banked_reward = self
            .banked_reward
            .checked_add(owed)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Prices the current stake in at `acc`. Must run after `staked` changes.
    pub fn resnapshot(&mut self, acc: i128) -> Result<(), ContractError> {
        self.settled_reward = rewards::accrued(self.staked, acc)?;
        Ok(())
    }

    pub fn add_stake(&mut self, amount: i128) -> Result<(), ContractError> {
        self.staked = self
            .staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn remove_stake(&mut self, amount: i128) -> Result<(), ContractError> {
        if amount > self.staked {
            return Err(ContractError::InsufficientBalance);
        }
        self.staked = self
            .staked
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(())
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn user_key(pool_id: u32, account: &Address) -> (Symbol, u32, Address) {
    (USER, pool_id, account.clone())
}

/// Account record, or an empty one if the account never deposited.
pub fn load(env: &Env, pool_id: u32, account: &Address) -> UserInfo {
    env.storage()
        .persistent()
        .get(&user_key(pool_id, account))
        .unwrap_or_default()
}

pub fn store(env: &Env, pool_id: u32, account: &Address, info: &UserInfo) {
    let key = user_key(pool_id, account);
    env.storage().persistent().set(&key, info);
    config::extend_persistent_ttl(env, &key);
}
