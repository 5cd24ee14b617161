use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub deposit_token: Address,
    pub rewards_vault: Address,
    pub timestamp: u64,
}

/// Fired when a user deposits into the pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_deposited: i128,
    pub timestamp: u64,
}

/// Fired when a user withdraws principal plus accrued reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub staker: Address,
    pub principal: i128,
    pub reward: i128,
    pub timestamp: u64,
}

/// Fired when the owner force-settles a position on behalf of a user.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetTransferredEvent {
    pub recipient: Address,
    pub principal: i128,
    pub reward: i128,
    pub timestamp: u64,
}

/// Fired when the deposit kill-switch is toggled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseSetEvent {
    pub paused: bool,
    pub timestamp: u64,
}

/// Fired when either deposit cap changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapSetEvent {
    pub max_user_deposit: i128,
    pub max_total_deposit: i128,
    pub timestamp: u64,
}

/// Fired when the deposit window changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositPeriodSetEvent {
    pub start: u64,
    pub end: u64,
    pub timestamp: u64,
}

/// Fired when the reward window changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPeriodSetEvent {
    pub start: u64,
    pub end: u64,
    pub timestamp: u64,
}

/// Fired when the rewards vault is repointed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultTransferredEvent {
    pub old_vault: Address,
    pub new_vault: Address,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

/// Fired when a pending ownership transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, deposit_token: Address, rewards_vault: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            deposit_token,
            rewards_vault,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit(env: &Env, staker: Address, amount: i128, new_total_deposited: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), staker.clone()),
        DepositEvent {
            staker,
            amount,
            new_total_deposited,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw(env: &Env, staker: Address, principal: i128, reward: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), staker.clone()),
        WithdrawEvent {
            staker,
            principal,
            reward,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_asset_transferred(env: &Env, recipient: Address, principal: i128, reward: i128) {
    env.events().publish(
        (symbol_short!("ASSET_TRF"), recipient.clone()),
        AssetTransferredEvent {
            recipient,
            principal,
            reward,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pause_set(env: &Env, paused: bool) {
    env.events().publish(
        (symbol_short!("PAUSE_SET"),),
        PauseSetEvent {
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_caps_set(env: &Env, max_user_deposit: i128, max_total_deposit: i128) {
    env.events().publish(
        (symbol_short!("CAPS_SET"),),
        CapSetEvent {
            max_user_deposit,
            max_total_deposit,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit_period_set(env: &Env, start: u64, end: u64) {
    env.events().publish(
        (symbol_short!("DEP_PRD"),),
        DepositPeriodSetEvent {
            start,
            end,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_period_set(env: &Env, start: u64, end: u64) {
    env.events().publish(
        (symbol_short!("RWD_PRD"),),
        RewardPeriodSetEvent {
            start,
            end,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_vault_transferred(env: &Env, old_vault: Address, new_vault: Address) {
    env.events().publish(
        (symbol_short!("VAULT_TRF"),),
        VaultTransferredEvent {
            old_vault,
            new_vault,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerTransferProposedEvent {
            current_owner,
            proposed_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferAcceptedEvent {
            old_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
