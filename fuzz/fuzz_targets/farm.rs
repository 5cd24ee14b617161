#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};

use farm::{FarmContract, FarmContractClient};

const UNIT: i128 = 10_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { amount: u64 },
    Withdraw,
    ForceSettle { target: u8 },
    SetPause { paused: bool },
    SetDepositPeriod { start: u32, end: u32 },
    SetRewardPeriod { start: u32, end: u32 },
    SetMaxUserDeposit { amount: u64 },
    SetMaxTotalDeposit { amount: u64 },
    AdvanceTime { by: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let token_id = token.address();

    let contract_id = env.register(FarmContract, ());
    let client = FarmContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let vault = Address::generate(&env);
    let _ = client.try_initialize(&owner, &token_id, &vault);
    let _ = client.try_set_deposit_period(&owner, &0, &u64::MAX);
    let _ = client.try_set_reward_period(&owner, &0, &u64::MAX);

    StellarAssetClient::new(&env, &token_id).mint(&vault, &(1_000_000_000 * UNIT));
    TokenClient::new(&env, &token_id).approve(
        &vault,
        &contract_id,
        &(1_000_000_000 * UNIT),
        &1_000_000,
    );

    let mut users = Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &token_id).mint(&user, &(1_000_000 * UNIT));
        users.push(user);
    }

    // Drive the contract with arbitrary parameters looking for unhandled
    // panics (e.g. overflow from missing math protection). Guard rejections
    // are expected; try_* swallows them.
    let mut now: u64 = 0;
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Deposit { amount } => {
                let amt = amount as i128;
                let _ = client.try_deposit(caller, &amt);
            }
            FuzzAction::Withdraw => {
                let _ = client.try_withdraw(caller);
            }
            FuzzAction::ForceSettle { target } => {
                let recipient = &users[target as usize % users.len()];
                let _ = client.try_transfer_asset_by_owner(&owner, recipient);
            }
            FuzzAction::SetPause { paused } => {
                let _ = client.try_set_pause_deposit(&owner, &paused);
            }
            FuzzAction::SetDepositPeriod { start, end } => {
                let _ = client.try_set_deposit_period(&owner, &(start as u64), &(end as u64));
            }
            FuzzAction::SetRewardPeriod { start, end } => {
                let _ = client.try_set_reward_period(&owner, &(start as u64), &(end as u64));
            }
            FuzzAction::SetMaxUserDeposit { amount } => {
                let _ = client.try_set_max_user_deposit(&owner, &(amount as i128));
            }
            FuzzAction::SetMaxTotalDeposit { amount } => {
                let _ = client.try_set_max_total_deposit(&owner, &(amount as i128));
            }
            FuzzAction::AdvanceTime { by } => {
                now = now.saturating_add(by as u64);
                env.ledger().set_timestamp(now);
            }
        }

        // Aggregate bookkeeping must hold after every action.
        let sum: i128 = users
            .iter()
            .map(|user| client.get_position(user).principal)
            .sum();
        assert_eq!(client.get_total_deposited(), sum);
    }
});
