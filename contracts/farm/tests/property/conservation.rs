//! Property-based conservation test: across any sequence of deposits,
//! withdrawals, and forced settlements, `get_total_deposited` equals the sum
//! of all open positions' principal.

use farm::{FarmContract, FarmContractClient};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};

const UNIT: i128 = 10_000_000;
const N_USERS: usize = 4;

/// One step of the generated operation sequence. Raw `u8` fields are mapped
/// into user indices and whole-token amounts at the point of use.
#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Deposit { user: u8, tokens: u8 },
    Withdraw { user: u8 },
    ForceSettle { user: u8 },
}

fn setup() -> (
    Env,
    FarmContractClient<'static>,
    Address,
    Vec<Address>,
) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let token_id = token.address();

    let contract_id = env.register(FarmContract, ());
    let client = FarmContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let vault = Address::generate(&env);
    client.initialize(&owner, &token_id, &vault);
    client.set_deposit_period(&owner, &0, &u64::MAX);
    client.set_reward_period(&owner, &0, &u64::MAX);
    client.set_max_user_deposit(&owner, &(1_000_000 * UNIT));
    client.set_max_total_deposit(&owner, &(10_000_000 * UNIT));

    StellarAssetClient::new(&env, &token_id).mint(&vault, &(100_000_000 * UNIT));
    TokenClient::new(&env, &token_id).approve(
        &vault,
        &contract_id,
        &(100_000_000 * UNIT),
        &100_000,
    );

    let users: Vec<Address> = (0..N_USERS)
        .map(|_| {
            let user = Address::generate(&env);
            StellarAssetClient::new(&env, &token_id).mint(&user, &(1_000_000 * UNIT));
            user
        })
        .collect();

    (env, client, owner, users)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// After every operation, the aggregate equals the sum over positions.
    #[test]
    fn prop_total_deposited_equals_position_sum(
        ops in prop::collection::vec(any::<Op>(), 1..40),
    ) {
        let (env, client, owner, users) = setup();

        for (step, op) in ops.into_iter().enumerate() {
            // Advance time a little each step so rewards actually accrue.
            env.ledger().set_timestamp(step as u64 * 3_600);

            match op {
                Op::Deposit { user, tokens } => {
                    let amount = (tokens as i128 + 1) * UNIT;
                    let _ = client.try_deposit(&users[user as usize % N_USERS], &amount);
                }
                Op::Withdraw { user } => {
                    let _ = client.try_withdraw(&users[user as usize % N_USERS]);
                }
                Op::ForceSettle { user } => {
                    let _ = client
                        .try_transfer_asset_by_owner(&owner, &users[user as usize % N_USERS]);
                }
            }

            let sum: i128 = users
                .iter()
                .map(|user| client.get_position(user).principal)
                .sum();
            prop_assert_eq!(client.get_total_deposited(), sum);
        }
    }

    /// A rejected deposit leaves both the position and the aggregate untouched.
    #[test]
    fn prop_rejected_deposit_changes_nothing(
        initial in 1i128..=500i128,
        excess in 1i128..=500i128,
    ) {
        let (env, client, owner, users) = setup();
        let _ = env;
        let staker = &users[0];

        let cap = 500 * UNIT;
        client.set_max_user_deposit(&owner, &cap);

        let initial = initial * UNIT;
        let initial = initial.min(cap);
        client.deposit(staker, &initial);

        // Push past the user cap.
        let over = cap - initial + excess * UNIT;
        let result = client.try_deposit(staker, &over);
        prop_assert!(result.is_err());

        prop_assert_eq!(client.get_position(staker).principal, initial);
        prop_assert_eq!(client.get_total_deposited(), initial);
    }
}
