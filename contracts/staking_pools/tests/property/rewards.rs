#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for reward accrual.
//!
//! Invariants tested:
//! - A pool's `acc_reward_per_stake` never decreases
//! - Paid plus pending rewards never exceed what the schedule issued
//! - `claim` pays exactly `get_pending_reward`, and a second claim pays 0

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env};
use staking_pools::{
    PoolParams, StakingPoolsContract, StakingPoolsContractClient, MAX_UNSTAKE_REQUESTS,
};

const START: u32 = 1_000;
const RATE: i128 = 100;
const STAKERS: usize = 3;

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    Deposit {
        #[proptest(strategy = "0..STAKERS")]
        who: usize,
        #[proptest(strategy = "1i128..=10_000")]
        amount: i128,
    },
    Unstake {
        #[proptest(strategy = "0..STAKERS")]
        who: usize,
        #[proptest(strategy = "1i128..=10_000")]
        amount: i128,
    },
    Claim {
        #[proptest(strategy = "0..STAKERS")]
        who: usize,
    },
    Update,
    Advance {
        #[proptest(strategy = "1u32..=40")]
        blocks: u32,
    },
}

// ── Helpers ───────────────────────────────────────────────────────────────────

struct World {
    env: Env,
    client: StakingPoolsContractClient<'static>,
    stakers: Vec<Address>,
}

fn setup() -> World {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(START);

    let asset = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract = env.register(StakingPoolsContract, ());
    let client = StakingPoolsContractClient::new(&env, &contract);

    let admin = Address::generate(&env);
    client.initialize(
        &admin,
        &asset,
        &reward,
        &RATE,
        &START,
        &(START + 100_000),
        &PoolParams {
            weight: 1,
            min_deposit: 0,
            unstake_lock_blocks: 5,
        },
    );
    StellarAssetClient::new(&env, &reward).mint(&contract, &1_000_000_000);

    let sac = StellarAssetClient::new(&env, &asset);
    let stakers = (0..STAKERS)
        .map(|_| {
            let staker = Address::generate(&env);
            sac.mint(&staker, &1_000_000);
            staker
        })
        .collect();

    World {
        env,
        client,
        stakers,
    }
}

impl World {
    /// Applies `op` and returns the reward it paid out.
    fn apply(&self, op: &Op) -> i128 {
        match *op {
            Op::Deposit { who, amount } => {
                self.client.deposit(&self.stakers[who], &0, &amount);
                0
            }
            Op::Unstake { who, amount } => {
                let staker = &self.stakers[who];
                let amount = amount.min(self.client.get_user_info(&0, staker).staked);
                let queued = self.client.get_unstake_queue(&0, staker).len();
                if amount > 0 && queued < MAX_UNSTAKE_REQUESTS {
                    self.client.request_unstake(staker, &0, &amount);
                }
                0
            }
            Op::Claim { who } => self.client.claim(&self.stakers[who], &0),
            Op::Update => {
                self.client.mass_update_pools();
                0
            }
            Op::Advance { blocks } => {
                let now = self.env.ledger().sequence();
                self.env.ledger().set_sequence_number(now + blocks);
                0
            }
        }
    }

    fn pending_total(&self) -> i128 {
        self.stakers
            .iter()
            .map(|staker| self.client.get_pending_reward(&0, staker))
            .sum()
    }
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The accumulator only ever moves forward, whatever the stakers do.
    #[test]
    fn prop_accumulator_is_monotonic(ops in prop::collection::vec(any::<Op>(), 1..30)) {
        let world = setup();
        let mut last = world.client.get_pool(&0).acc_reward_per_stake;

        for op in &ops {
            world.apply(op);
            let acc = world.client.get_pool(&0).acc_reward_per_stake;
            prop_assert!(acc >= last);
            last = acc;
        }
    }

    /// Rounding only ever shortchanges stakers, never the treasury.
    #[test]
    fn prop_rewards_never_exceed_issuance(ops in prop::collection::vec(any::<Op>(), 1..30)) {
        let world = setup();
        let mut paid = 0i128;

        for op in &ops {
            paid += world.apply(op);

            let elapsed = i128::from(world.env.ledger().sequence() - START);
            prop_assert!(paid + world.pending_total() <= RATE * elapsed);
        }
    }

    /// Whatever `get_pending_reward` reports is exactly what `claim` pays,
    /// and claiming again in the same block pays nothing.
    #[test]
    fn prop_claim_matches_pending(
        ops in prop::collection::vec(any::<Op>(), 1..30),
        tail in 1u32..=40,
    ) {
        let world = setup();
        for op in &ops {
            world.apply(op);
        }
        world.apply(&Op::Advance { blocks: tail });

        for staker in &world.stakers {
            let pending = world.client.get_pending_reward(&0, staker);
            prop_assert_eq!(world.client.claim(staker, &0), pending);
            prop_assert_eq!(world.client.claim(staker, &0), 0);
            prop_assert_eq!(world.client.get_pending_reward(&0, staker), 0);
        }
    }
}
