extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Env,
};

use crate::{
    ContractError, PausableOp, PoolParams, StakingPoolsContract, StakingPoolsContractClient,
    MAX_POOLS,
};

fn params(weight: u32) -> PoolParams {
    PoolParams {
        weight,
        min_deposit: 0,
        unstake_lock_blocks: 10,
    }
}

fn setup() -> (Env, StakingPoolsContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(StakingPoolsContract, ());
    let client = StakingPoolsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let native = Address::generate(&env);
    let reward = Address::generate(&env);
    client.initialize(&admin, &native, &reward, &100, &0, &1_000, &params(5));

    (env, client, admin)
}

// ── Admin-only entry points ──────────────────────────────────────────────────

#[test]
fn test_non_admin_is_rejected() {
    let (env, client, _admin) = setup();
    let intruder = Address::generate(&env);
    let asset = Address::generate(&env);

    assert_eq!(
        client
            .try_add_pool(&intruder, &asset, &params(1))
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );
    assert_eq!(
        client
            .try_set_pool(&intruder, &0, &params(1))
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );
    assert_eq!(
        client
            .try_set_reward_per_block(&intruder, &1)
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );
    assert_eq!(
        client
            .try_set_issuance_end(&intruder, &10)
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );
    assert_eq!(
        client
            .try_set_paused(&intruder, &PausableOp::Claim, &true)
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );
    assert_eq!(
        client
            .try_propose_admin(&intruder, &intruder)
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );

    assert_eq!(client.pool_count(), 1);
    assert!(!client.is_paused(&PausableOp::Claim));
}

#[test]
fn test_admin_calls_require_signature() {
    let env = Env::default();
    let contract_id = env.register(StakingPoolsContract, ());
    let client = StakingPoolsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let native = Address::generate(&env);
    let reward = Address::generate(&env);
    client.initialize(&admin, &native, &reward, &100, &0, &1_000, &params(5));

    // No auths mocked: the admin's signature is missing.
    let result = client.try_set_paused(&admin, &PausableOp::Withdraw, &true);
    assert!(result.is_err());
    assert!(!client.is_paused(&PausableOp::Withdraw));
}

#[test]
fn test_invalid_admin_parameters() {
    let (_env, client, admin) = setup();

    assert_eq!(
        client
            .try_set_reward_per_block(&admin, &-1)
            .unwrap_err()
            .unwrap(),
        ContractError::InvalidInput
    );
    assert_eq!(client.get_schedule().reward_per_block, 100);

    assert_eq!(
        client.try_set_pool(&admin, &3, &params(1)).unwrap_err().unwrap(),
        ContractError::InvalidPool
    );
}

#[test]
fn test_issuance_end_cannot_precede_start() {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(StakingPoolsContract, ());
    let client = StakingPoolsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let native = Address::generate(&env);
    let reward = Address::generate(&env);
    client.initialize(&admin, &native, &reward, &100, &50, &1_000, &params(5));

    match client.try_set_issuance_end(&admin, &49) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
    assert_eq!(client.get_schedule().end_block, 1_000);

    client.set_issuance_end(&admin, &50);
    assert_eq!(client.get_schedule().end_block, 50);
}

#[test]
fn test_pool_registry_is_bounded() {
    let (env, client, admin) = setup();

    for expected in 1..MAX_POOLS {
        let asset = Address::generate(&env);
        assert_eq!(client.add_pool(&admin, &asset, &params(1)), expected);
    }
    assert_eq!(client.pool_count(), MAX_POOLS);
    assert_eq!(
        client.get_schedule().total_weight,
        5 + u64::from(MAX_POOLS - 1)
    );

    let asset = Address::generate(&env);
    match client.try_add_pool(&admin, &asset, &params(1)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::PoolLimitReached),
        _ => unreachable!("Expected PoolLimitReached error"),
    }
    assert_eq!(client.pool_count(), MAX_POOLS);
}

#[test]
fn test_full_registry_batch_updates_succeed() {
    let (env, client, admin) = setup();
    for _ in 1..MAX_POOLS {
        client.add_pool(&admin, &Address::generate(&env), &params(1));
    }
    let last = MAX_POOLS - 1;

    // Each call below rewrites every pool.
    env.ledger().set_sequence_number(10);
    assert_eq!(client.mass_update_pools(), MAX_POOLS);
    assert_eq!(client.get_pool(&last).last_update_block, 10);

    env.ledger().set_sequence_number(20);
    client.set_pool(&admin, &last, &params(3));
    assert_eq!(client.get_pool(&0).last_update_block, 20);
    assert_eq!(client.get_pool(&last).weight, 3);

    env.ledger().set_sequence_number(30);
    client.set_reward_per_block(&admin, &50);
    assert_eq!(client.get_pool(&last).last_update_block, 30);

    env.ledger().set_sequence_number(40);
    client.set_issuance_end(&admin, &500);
    assert_eq!(client.get_pool(&last).last_update_block, 40);
    assert_eq!(client.get_schedule().end_block, 500);
}

#[test]
fn test_duplicate_asset_rejected_among_several_pools() {
    let (env, client, admin) = setup();
    let asset = Address::generate(&env);
    client.add_pool(&admin, &asset, &params(1));
    client.add_pool(&admin, &Address::generate(&env), &params(1));

    assert_eq!(
        client
            .try_add_pool(&admin, &asset, &params(9))
            .unwrap_err()
            .unwrap(),
        ContractError::PoolExists
    );
    assert_eq!(client.pool_count(), 3);
}

#[test]
fn test_set_pool_updates_total_weight() {
    let (env, client, admin) = setup();
    let asset = Address::generate(&env);
    let id = client.add_pool(&admin, &asset, &params(20));
    assert_eq!(client.get_schedule().total_weight, 25);

    client.set_pool(&admin, &id, &params(7));
    assert_eq!(client.get_schedule().total_weight, 12);

    client.set_pool(&admin, &0, &params(0));
    assert_eq!(client.get_schedule().total_weight, 7);
    assert_eq!(client.get_pool(&0).weight, 0);
    assert_eq!(client.get_pool(&id).weight, 7);
}

#[test]
fn test_pause_toggles_are_independent() {
    let (_env, client, admin) = setup();

    client.set_paused(&admin, &PausableOp::Withdraw, &true);
    assert!(client.is_paused(&PausableOp::Withdraw));
    assert!(!client.is_paused(&PausableOp::Claim));

    client.set_paused(&admin, &PausableOp::Claim, &true);
    client.set_paused(&admin, &PausableOp::Withdraw, &false);
    assert!(!client.is_paused(&PausableOp::Withdraw));
    assert!(client.is_paused(&PausableOp::Claim));
}

// ── Two-step admin handover ──────────────────────────────────────────────────

#[test]
fn test_admin_transfer() {
    let (env, client, admin) = setup();
    let successor = Address::generate(&env);
    let stranger = Address::generate(&env);

    client.propose_admin(&admin, &successor);
    assert_eq!(client.get_pending_admin(), Some(successor.clone()));
    // Proposal alone changes nothing.
    assert_eq!(client.get_admin(), admin);

    assert_eq!(
        client.try_accept_admin(&stranger).unwrap_err().unwrap(),
        ContractError::Unauthorized
    );

    client.accept_admin(&successor);
    assert_eq!(client.get_admin(), successor);
    assert_eq!(client.get_pending_admin(), None);

    // Old admin lost its powers; the new one has them.
    assert_eq!(
        client
            .try_set_reward_per_block(&admin, &5)
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );
    client.set_reward_per_block(&successor, &5);
    assert_eq!(client.get_schedule().reward_per_block, 5);
}

#[test]
fn test_admin_transfer_cancel() {
    let (env, client, admin) = setup();
    let successor = Address::generate(&env);

    assert_eq!(
        client.try_cancel_admin_transfer(&admin).unwrap_err().unwrap(),
        ContractError::InvalidInput
    );

    client.propose_admin(&admin, &successor);
    client.cancel_admin_transfer(&admin);
    assert_eq!(client.get_pending_admin(), None);

    assert_eq!(
        client.try_accept_admin(&successor).unwrap_err().unwrap(),
        ContractError::InvalidInput
    );
    assert_eq!(client.get_admin(), admin);
}
