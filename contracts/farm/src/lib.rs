#![no_std]

pub mod events;
pub mod rewards;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");
const TOTAL_DEP: Symbol = symbol_short!("TOT_DEP");

// Per-user persistent storage uses tuple keys:  (prefix, user_address)
const POSITION: Symbol = symbol_short!("POS");

// ── Pool constants ───────────────────────────────────────────────────────────

/// Annual reward rate, as an integer percentage. Fixed for the contract's
/// lifetime; changing it requires a redeploy.
pub const APR_PERCENT: u32 = 10;

/// One whole token at the 7-decimal SAC convention.
const TOKEN_UNIT: i128 = 10_000_000;

/// Per-user principal cap applied at `initialize`.
pub const DEFAULT_MAX_USER_DEPOSIT: i128 = 1_000 * TOKEN_UNIT;

/// Pool-wide principal cap applied at `initialize`.
pub const DEFAULT_MAX_TOTAL_DEPOSIT: i128 = 50_000 * TOKEN_UNIT;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    DepositsPaused = 4,
    DepositClosed = 5,
    InvalidAmount = 6,
    UserCapExceeded = 7,
    TotalCapExceeded = 8,
    NoDeposit = 9,
    InvalidRecipient = 10,
    InvalidVault = 11,
    NoPendingOwner = 12,
    Overflow = 13,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Singleton pool configuration, held in instance storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FarmConfig {
    /// Address authorised to call the privileged operations.
    pub owner: Address,
    /// SAC address of the token users deposit. Fixed at `initialize`.
    pub deposit_token: Address,
    /// External account whose allowance to this contract funds reward payouts.
    pub rewards_vault: Address,
    /// Per-user principal cap, in the token's smallest unit.
    pub max_user_deposit: i128,
    /// Pool-wide principal cap, in the token's smallest unit.
    pub max_total_deposit: i128,
    /// Deposits are accepted in the half-open window `[deposit_start, deposit_end)`.
    pub deposit_start: u64,
    pub deposit_end: u64,
    /// Rewards accrue over the half-open window `[reward_start, reward_end)`.
    pub reward_start: u64,
    pub reward_end: u64,
    /// Deposit kill-switch. Withdrawals stay enabled regardless.
    pub paused: bool,
}

/// A user's open position. Absent from storage ⇔ principal of zero.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub principal: i128,
    /// Timestamp of the *most recent* deposit. Overwritten on every deposit,
    /// so topping up restarts reward accrual for the entire principal.
    pub deposited_at: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct FarmContract;

#[contractimpl]
impl FarmContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `owner`         – address allowed to configure the pool and force-settle.
    /// * `deposit_token` – SAC address of the token users deposit (also the
    ///   reward currency).
    /// * `rewards_vault` – account funding reward payouts via allowance.
    ///
    /// Caps start at the defaults; both time windows start empty (`0, 0`), so
    /// deposits are rejected until the owner calls `set_deposit_period`.
    pub fn initialize(
        env: Env,
        owner: Address,
        deposit_token: Address,
        rewards_vault: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }

        let config = FarmConfig {
            owner: owner.clone(),
            deposit_token: deposit_token.clone(),
            rewards_vault: rewards_vault.clone(),
            max_user_deposit: DEFAULT_MAX_USER_DEPOSIT,
            max_total_deposit: DEFAULT_MAX_TOTAL_DEPOSIT,
            deposit_start: 0,
            deposit_end: 0,
            reward_start: 0,
            reward_end: 0,
            paused: false,
        };
        env.storage().instance().set(&CONFIG, &config);
        // TOTAL_DEP starts at zero; unwrap_or(0) handles the absent key.

        events::publish_initialized(&env, owner, deposit_token, rewards_vault);

        Ok(())
    }

    // ── Deposits ────────────────────────────────────────────────────────────

    /// Deposit `amount` tokens into the pool.
    ///
    /// Guards, in order: pause flag, deposit window, positive amount, per-user
    /// cap, pool cap. The first failing guard aborts the call.
    ///
    /// `deposited_at` is overwritten on *every* deposit: a second deposit into
    /// an open position resets the reward clock for the whole principal, not
    /// just the increment. Callers who want to keep accruing on an existing
    /// stake must withdraw first or accept the reset.
    pub fn deposit(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let config = Self::config(&env)?;
        staker.require_auth();

        if config.paused {
            return Err(ContractError::DepositsPaused);
        }
        let now = env.ledger().timestamp();
        if now < config.deposit_start || now >= config.deposit_end {
            return Err(ContractError::DepositClosed);
        }
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut position = Self::load_position(&env, &staker).unwrap_or(Position {
            principal: 0,
            deposited_at: 0,
        });
        let new_principal = position
            .principal
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        if new_principal > config.max_user_deposit {
            return Err(ContractError::UserCapExceeded);
        }

        let total: i128 = env.storage().instance().get(&TOTAL_DEP).unwrap_or(0);
        let new_total = total.checked_add(amount).ok_or(ContractError::Overflow)?;
        if new_total > config.max_total_deposit {
            return Err(ContractError::TotalCapExceeded);
        }

        // Pull tokens from the staker into the pool.
        token::Client::new(&env, &config.deposit_token).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        position.principal = new_principal;
        position.deposited_at = now;
        env.storage()
            .persistent()
            .set(&(POSITION, staker.clone()), &position);
        env.storage().instance().set(&TOTAL_DEP, &new_total);

        events::publish_deposit(&env, staker, amount, new_total);

        Ok(())
    }

    // ── Withdrawal ──────────────────────────────────────────────────────────

    /// Close the caller's position: pay out principal plus the reward accrued
    /// over the reward window, then zero the position.
    ///
    /// Works even while deposits are paused. Accrual is capped at
    /// `reward_end`; withdrawing later pays no more than withdrawing at the
    /// window's end.
    pub fn withdraw(env: Env, staker: Address) -> Result<(), ContractError> {
        let config = Self::config(&env)?;
        staker.require_auth();

        let (principal, reward) = Self::settle(&env, &config, &staker)?;

        events::publish_withdraw(&env, staker, principal, reward);

        Ok(())
    }

    /// Force-settle `recipient`'s position on their behalf. Owner only.
    ///
    /// Settlement is identical to `withdraw`: principal plus accrued reward
    /// are paid to `recipient`, but the emitted event marks the operation as
    /// owner-initiated.
    pub fn transfer_asset_by_owner(
        env: Env,
        caller: Address,
        recipient: Address,
    ) -> Result<(), ContractError> {
        let config = Self::config(&env)?;
        caller.require_auth();
        Self::require_owner(&config, &caller)?;

        // The pool itself is never a valid settlement target.
        if recipient == env.current_contract_address() {
            return Err(ContractError::InvalidRecipient);
        }

        let (principal, reward) = Self::settle(&env, &config, &recipient)?;

        events::publish_asset_transferred(&env, recipient, principal, reward);

        Ok(())
    }

    // ── Owner configuration ─────────────────────────────────────────────────

    /// Toggle the deposit kill-switch. Owner only.
    pub fn set_pause_deposit(env: Env, caller: Address, paused: bool) -> Result<(), ContractError> {
        let mut config = Self::config(&env)?;
        caller.require_auth();
        Self::require_owner(&config, &caller)?;

        config.paused = paused;
        env.storage().instance().set(&CONFIG, &config);

        events::publish_pause_set(&env, paused);

        Ok(())
    }

    /// Update the per-user principal cap. Owner only.
    ///
    /// Not reconciled against existing positions: lowering the cap below a
    /// user's current principal only blocks further deposits.
    pub fn set_max_user_deposit(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let mut config = Self::config(&env)?;
        caller.require_auth();
        Self::require_owner(&config, &caller)?;

        config.max_user_deposit = amount;
        env.storage().instance().set(&CONFIG, &config);

        events::publish_caps_set(&env, config.max_user_deposit, config.max_total_deposit);

        Ok(())
    }

    /// Update the pool-wide principal cap. Owner only.
    pub fn set_max_total_deposit(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let mut config = Self::config(&env)?;
        caller.require_auth();
        Self::require_owner(&config, &caller)?;

        config.max_total_deposit = amount;
        env.storage().instance().set(&CONFIG, &config);

        events::publish_caps_set(&env, config.max_user_deposit, config.max_total_deposit);

        Ok(())
    }

    /// Update the deposit window `[start, end)`. Owner only.
    ///
    /// `start < end` is deliberately not enforced: an empty or inverted window
    /// simply rejects all deposits.
    pub fn set_deposit_period(
        env: Env,
        caller: Address,
        start: u64,
        end: u64,
    ) -> Result<(), ContractError> {
        let mut config = Self::config(&env)?;
        caller.require_auth();
        Self::require_owner(&config, &caller)?;

        config.deposit_start = start;
        config.deposit_end = end;
        env.storage().instance().set(&CONFIG, &config);

        events::publish_deposit_period_set(&env, start, end);

        Ok(())
    }

    /// Update the reward window `[start, end)`. Owner only.
    ///
    /// Applies to open positions too: accrual for an existing deposit is
    /// always computed against the window in force at settlement time. As
    /// with the deposit window, an inverted interval is stored as-is and the
    /// calculator degrades to zero reward.
    pub fn set_reward_period(
        env: Env,
        caller: Address,
        start: u64,
        end: u64,
    ) -> Result<(), ContractError> {
        let mut config = Self::config(&env)?;
        caller.require_auth();
        Self::require_owner(&config, &caller)?;

        config.reward_start = start;
        config.reward_end = end;
        env.storage().instance().set(&CONFIG, &config);

        events::publish_reward_period_set(&env, start, end);

        Ok(())
    }

    /// Repoint the rewards vault. Owner only.
    ///
    /// The pool's own address is rejected: rewards must never be paid out of
    /// pooled principal.
    pub fn transfer_rewards_vault(
        env: Env,
        caller: Address,
        new_vault: Address,
    ) -> Result<(), ContractError> {
        let mut config = Self::config(&env)?;
        caller.require_auth();
        Self::require_owner(&config, &caller)?;

        if new_vault == env.current_contract_address() {
            return Err(ContractError::InvalidVault);
        }

        let old_vault = config.rewards_vault.clone();
        config.rewards_vault = new_vault.clone();
        env.storage().instance().set(&CONFIG, &config);

        events::publish_vault_transferred(&env, old_vault, new_vault);

        Ok(())
    }

    // ── Ownership transfer (two-step) ───────────────────────────────────────

    /// Propose a new owner. Only the current owner can call this; the new
    /// owner must call `accept_owner` to complete the transfer.
    pub fn propose_owner(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        let config = Self::config(&env)?;
        caller.require_auth();
        Self::require_owner(&config, &caller)?;

        env.storage().instance().set(&PENDING_OWNER, &new_owner);

        events::publish_owner_transfer_proposed(&env, caller, new_owner);

        Ok(())
    }

    /// Accept a pending ownership transfer. Only the proposed owner can call
    /// this.
    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        let mut config = Self::config(&env)?;
        new_owner.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_OWNER)
            .ok_or(ContractError::NoPendingOwner)?;
        if new_owner != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_owner = config.owner.clone();
        config.owner = new_owner.clone();
        env.storage().instance().set(&CONFIG, &config);
        env.storage().instance().remove(&PENDING_OWNER);

        events::publish_owner_transfer_accepted(&env, old_owner, new_owner);

        Ok(())
    }

    /// Cancel a pending ownership transfer. Only the current owner can call
    /// this.
    pub fn cancel_owner_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        let config = Self::config(&env)?;
        caller.require_auth();
        Self::require_owner(&config, &caller)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_OWNER)
            .ok_or(ContractError::NoPendingOwner)?;

        env.storage().instance().remove(&PENDING_OWNER);

        events::publish_owner_transfer_cancelled(&env, caller, pending);

        Ok(())
    }

    /// Get the pending owner address, if any.
    pub fn get_pending_owner(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_OWNER)
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// Return the full pool configuration.
    pub fn get_config(env: Env) -> Result<FarmConfig, ContractError> {
        Self::config(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        Ok(Self::config(&env)?.owner)
    }

    pub fn get_deposit_token(env: Env) -> Result<Address, ContractError> {
        Ok(Self::config(&env)?.deposit_token)
    }

    pub fn get_rewards_vault(env: Env) -> Result<Address, ContractError> {
        Ok(Self::config(&env)?.rewards_vault)
    }

    pub fn get_max_user_deposit(env: Env) -> Result<i128, ContractError> {
        Ok(Self::config(&env)?.max_user_deposit)
    }

    pub fn get_max_total_deposit(env: Env) -> Result<i128, ContractError> {
        Ok(Self::config(&env)?.max_total_deposit)
    }

    /// Return the deposit window as `(start, end)`.
    pub fn get_deposit_period(env: Env) -> Result<(u64, u64), ContractError> {
        let config = Self::config(&env)?;
        Ok((config.deposit_start, config.deposit_end))
    }

    /// Return the reward window as `(start, end)`.
    pub fn get_reward_period(env: Env) -> Result<(u64, u64), ContractError> {
        let config = Self::config(&env)?;
        Ok((config.reward_start, config.reward_end))
    }

    pub fn is_paused(env: Env) -> Result<bool, ContractError> {
        Ok(Self::config(&env)?.paused)
    }

    /// Return a user's position. A user with no open position reads as a
    /// zeroed position, matching the storage convention that absent ⇔ zero.
    pub fn get_position(env: Env, account: Address) -> Position {
        Self::load_position(&env, &account).unwrap_or(Position {
            principal: 0,
            deposited_at: 0,
        })
    }

    /// Return the sum of all open positions' principal.
    pub fn get_total_deposited(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_DEP).unwrap_or(0)
    }

    /// Return the reward `account` would receive if it withdrew right now,
    /// without mutating state.
    pub fn current_reward(env: Env, account: Address) -> Result<i128, ContractError> {
        let config = Self::config(&env)?;
        let position = match Self::load_position(&env, &account) {
            Some(position) => position,
            None => return Ok(0),
        };

        let now = env.ledger().timestamp();
        rewards::accrued(
            position.principal,
            position.deposited_at,
            now,
            config.reward_start,
            config.reward_end,
            APR_PERCENT,
        )
        .ok_or(ContractError::Overflow)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&CONFIG)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Load the config, or fail if the contract was never initialized.
    fn config(env: &Env) -> Result<FarmConfig, ContractError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }

    /// Guard: revert if `caller` is not the stored owner.
    fn require_owner(config: &FarmConfig, caller: &Address) -> Result<(), ContractError> {
        if *caller != config.owner {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn load_position(env: &Env, account: &Address) -> Option<Position> {
        env.storage().persistent().get(&(POSITION, account.clone()))
    }

    /// Close `account`'s position, paying principal and accrued reward back
    /// to `account`.
    ///
    /// The reward is pulled from the vault via `transfer_from` against the
    /// allowance the vault granted this contract; the principal comes out of
    /// the pool's own balance. Either transfer trapping in the token host
    /// rolls back the whole invocation, so no partial settlement is
    /// observable.
    fn settle(
        env: &Env,
        config: &FarmConfig,
        account: &Address,
    ) -> Result<(i128, i128), ContractError> {
        let position = Self::load_position(env, account).ok_or(ContractError::NoDeposit)?;
        if position.principal <= 0 {
            return Err(ContractError::NoDeposit);
        }

        let now = env.ledger().timestamp();
        let reward = rewards::accrued(
            position.principal,
            position.deposited_at,
            now,
            config.reward_start,
            config.reward_end,
            APR_PERCENT,
        )
        .ok_or(ContractError::Overflow)?;

        let client = token::Client::new(env, &config.deposit_token);
        if reward > 0 {
            client.transfer_from(
                &env.current_contract_address(),
                &config.rewards_vault,
                account,
                &reward,
            );
        }
        client.transfer(&env.current_contract_address(), account, &position.principal);

        env.storage()
            .persistent()
            .remove(&(POSITION, account.clone()));

        let total: i128 = env.storage().instance().get(&TOTAL_DEP).unwrap_or(0);
        env.storage()
            .instance()
            .set(&TOTAL_DEP, &total.saturating_sub(position.principal));

        Ok((position.principal, reward))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
