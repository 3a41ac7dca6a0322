#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking_pools::{PausableOp, PoolParams, StakingPoolsContract, StakingPoolsContractClient};

const STAKERS: usize = 4;
const FUNDS: i128 = 1_000_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { who: u8, pool: u8, amount: u32 },
    RequestUnstake { who: u8, pool: u8, amount: u32 },
    Withdraw { who: u8, pool: u8 },
    Claim { who: u8, pool: u8 },
    MassUpdate,
    SetPool { pool: u8, weight: u16, lock: u8 },
    SetRewardPerBlock { rate: u64 },
    TogglePause { claim: bool, paused: bool },
    Advance { blocks: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(1);

    let admin = Address::generate(&env);
    let reward = env
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    let assets = [
        env.register_stellar_asset_contract_v2(admin.clone()).address(),
        env.register_stellar_asset_contract_v2(admin.clone()).address(),
    ];

    let contract_id = env.register(StakingPoolsContract, ());
    let client = StakingPoolsContractClient::new(&env, &contract_id);

    let params = |weight: u32, lock: u32| PoolParams {
        weight,
        min_deposit: 0,
        unstake_lock_blocks: lock,
    };
    client.initialize(&admin, &assets[0], &reward, &1_000, &1, &2_000, &params(10, 5));
    client.add_pool(&admin, &assets[1], &params(30, 20));
    StellarAssetClient::new(&env, &reward).mint(&contract_id, &FUNDS);

    let users: Vec<Address> = (0..STAKERS)
        .map(|_| {
            let user = Address::generate(&env);
            for asset in &assets {
                StellarAssetClient::new(&env, asset).mint(&user, &FUNDS);
            }
            user
        })
        .collect();

    // Failed calls are fine; host panics and broken books are not.
    for action in actions.into_iter().take(64) {
        match action {
            FuzzAction::Deposit { who, pool, amount } => {
                let user = &users[usize::from(who) % STAKERS];
                let _ = client.try_deposit(user, &u32::from(pool % 3), &i128::from(amount));
            }
            FuzzAction::RequestUnstake { who, pool, amount } => {
                let user = &users[usize::from(who) % STAKERS];
                let _ = client.try_request_unstake(user, &u32::from(pool % 3), &i128::from(amount));
            }
            FuzzAction::Withdraw { who, pool } => {
                let _ = client.try_withdraw(&users[usize::from(who) % STAKERS], &u32::from(pool % 3));
            }
            FuzzAction::Claim { who, pool } => {
                let _ = client.try_claim(&users[usize::from(who) % STAKERS], &u32::from(pool % 3));
            }
            FuzzAction::MassUpdate => {
                let _ = client.try_mass_update_pools();
            }
            FuzzAction::SetPool { pool, weight, lock } => {
                let _ = client.try_set_pool(
                    &admin,
                    &u32::from(pool % 3),
                    &params(u32::from(weight), u32::from(lock)),
                );
            }
            FuzzAction::SetRewardPerBlock { rate } => {
                let _ = client.try_set_reward_per_block(&admin, &i128::from(rate));
            }
            FuzzAction::TogglePause { claim, paused } => {
                let op = if claim { PausableOp::Claim } else { PausableOp::Withdraw };
                let _ = client.try_set_paused(&admin, &op, &paused);
            }
            FuzzAction::Advance { blocks } => {
                // Kept short so test-env storage never reaches its TTL.
                let now = env.ledger().sequence();
                env.ledger().set_sequence_number(now + u32::from(blocks % 32));
            }
        }
    }

    // Every staked or queued unit is still held by the contract.
    for (id, asset) in assets.iter().enumerate() {
        let pool = client.get_pool(&(id as u32));
        let held = TokenClient::new(&env, asset).balance(&contract_id);
        assert_eq!(held, pool.total_staked + pool.total_locked);

        let mut staked = 0i128;
        let mut queued = 0i128;
        for user in &users {
            staked += client.get_user_info(&(id as u32), user).staked;
            queued += client.get_withdraw_amount(&(id as u32), user).requested;
        }
        assert_eq!(staked, pool.total_staked);
        assert_eq!(queued, pool.total_locked);
    }
});
