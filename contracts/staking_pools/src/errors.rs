/// Errors surfaced by every contract entry point.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 3   | Lifecycle / authorisation      |
/// | 4 – 8   | Input and accounting failures  |
/// | 9 – 10  | Paused operations              |
/// | 11 – 15 | Registry, queue and treasury   |
///
/// Discriminants are part of the public interface and must never be
/// renumbered.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    /// Pool id is outside the registry.
    InvalidPool = 5,
    /// Unstake amount exceeds the staked balance.
    InsufficientBalance = 6,
    /// Deposit is below the pool's `min_deposit`.
    DepositTooSmall = 7,
    /// A checked add, multiply or divide would overflow. Nothing is written.
    ArithmeticOverflow = 8,
    WithdrawPaused = 9,
    ClaimPaused = 10,
    /// The asset already backs another pool.
    PoolExists = 11,
    PoolLimitReached = 12,
    TooManyUnstakeRequests = 13,
    /// The reward token cannot also be a staked asset.
    TokensIdentical = 14,
    /// The contract does not hold enough of the pool asset to release a withdrawal.
    InsufficientLiquidity = 15,
}
