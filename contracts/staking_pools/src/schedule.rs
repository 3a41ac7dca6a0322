use soroban_sdk::contracttype;

use crate::errors::ContractError;

/// Global issuance parameters.
///
/// Reward accrues only for blocks in `[start_block, end_block)`, at
/// `reward_per_block` shared across all pools by weight.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schedule {
    pub reward_per_block: i128,
    pub start_block: u32,
    pub end_block: u32,
    /// Sum of every pool's weight.
    pub total_weight: u64,
}

impl Schedule {
    /// Total reward issued over `[from, to)` after clamping to the issuance
    /// window.
    ///
    /// Returns `InvalidInput` when `from > to` and `ArithmeticOverflow` when
    /// the product does not fit.
    pub fn multiplier(&self, from: u32, to: u32) -> Result<i128, ContractError> {
        if from > to {
            return Err(ContractError::InvalidInput);
        }
        let from = from.max(self.start_block);
        let to = to.min(self.end_block);
        if from >= to {
            return Ok(0);
        }

        i128::from(to - from)
            .checked_mul(self.reward_per_block)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Portion of `multiplier(from, to)` that belongs to a pool of `weight`.
    ///
    /// ```text
    /// share = multiplier × weight / total_weight
    /// ```
    ///
    /// The division rounds down and the remainder is not carried forward.
    pub fn pool_share(&self, from: u32, to: u32, weight: u32) -> Result<i128, ContractError> {
        let issued = self.multiplier(from, to)?;
        if self.total_weight == 0 {
            return Ok(0);
        }

        issued
            .checked_mul(i128::from(weight))
            .and_then(|scaled| scaled.checked_div(i128::from(self.total_weight)))
            .ok_or(ContractError::ArithmeticOverflow)
    }
}
