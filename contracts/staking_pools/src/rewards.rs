use crate::errors::ContractError;

/// Fixed-point scaling factor for `acc_reward_per_stake`.
///
/// Accumulator values are stored multiplied by this constant so that a
/// pool with a large stake still records sub-unit reward per staked unit.
pub const ACC_PRECISION: i128 = 1_000_000_000_000_000_000;

// ── Fixed-point helpers ─────────────────────────────────────────────────────

/// `a * b / denom`, rounded down.
///
/// All callers pass non-negative operands, so truncating division is a floor.
/// Overflow and a zero denominator both surface as `ArithmeticOverflow`.
pub fn mul_div_floor(a: i128, b: i128, denom: i128) -> Result<i128, ContractError> {
    a.checked_mul(b)
        .and_then(|product| product.checked_div(denom))
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Reward priced into a stake of `staked` units at accumulator `acc`.
///
/// ```text
/// accrued = staked × acc / ACC_PRECISION
/// ```
pub fn accrued(staked: i128, acc: i128) -> Result<i128, ContractError> {
    mul_div_floor(staked, acc, ACC_PRECISION)
}

/// Accumulator increment for distributing `share` over `total_staked` units.
///
/// ```text
/// Δacc = share × ACC_PRECISION / total_staked
/// ```
///
/// An empty pool receives no increment; the share for that range is
/// forfeited rather than credited to the next staker.
pub fn acc_increment(share: i128, total_staked: i128) -> Result<i128, ContractError> {
    if total_staked <= 0 {
        return Ok(0);
    }
    mul_div_floor(share, ACC_PRECISION, total_staked)
}

/// Reward owed to an account right now.
///
/// ```text
/// pending = staked × acc / ACC_PRECISION − settled + banked
/// ```
///
/// `settled` is the snapshot taken at the account's last mutation, so only
/// accumulation since then is counted.
pub fn pending(
    staked: i128,
    acc: i128,
    settled: i128,
    banked: i128,
) -> Result<i128, ContractError> {
    accrued(staked, acc)?
        .checked_sub(settled)
        .and_then(|fresh| fresh.checked_add(banked))
        .ok_or(ContractError::ArithmeticOverflow)
}
