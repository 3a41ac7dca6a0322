use soroban_sdk::{token, Address, Env};

use crate::errors::ContractError;

/// Pulls `amount` of `asset` from `from` into the contract.
///
/// The token contract traps on insufficient balance or missing auth, which
/// aborts the whole invocation before any staged state is written.
pub fn transfer_in(env: &Env, asset: &Address, from: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    token::Client::new(env, asset).transfer(from, &env.current_contract_address(), &amount);
}

/// Contract's own balance of `asset`.
pub fn balance(env: &Env, asset: &Address) -> i128 {
    token::Client::new(env, asset).balance(&env.current_contract_address())
}

/// Fails with `InsufficientLiquidity` unless the contract can pay `amount`
/// of `asset` in full.
pub fn require_liquidity(env: &Env, asset: &Address, amount: i128) -> Result<(), ContractError> {
    if balance(env, asset) < amount {
        return Err(ContractError::InsufficientLiquidity);
    }
    Ok(())
}

/// Sends exactly `amount`. Callers check `require_liquidity` first.
pub fn transfer_out(env: &Env, asset: &Address, to: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    token::Client::new(env, asset).transfer(&env.current_contract_address(), to, &amount);
}

/// Sends `min(amount, balance)` and returns what was sent.
///
/// Whatever the balance cannot cover is not recorded anywhere.
pub fn transfer_out_capped(env: &Env, asset: &Address, to: &Address, amount: i128) -> i128 {
    let sent = amount.min(balance(env, asset));
    transfer_out(env, asset, to, sent);
    sent.max(0)
}
