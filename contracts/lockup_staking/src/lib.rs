//! Lockup Staking Contract
//!
//! Holders lock the managed token for a tier of 1 to 12 thirty-day months.
//! Only the bound balance ledger opens and closes positions on their behalf.
//! At close the engine settles one of three ways:
//!
//! - **Early** (before the term ends): principal minus a tier penalty; the
//!   penalty stays in escrow as excess.
//! - **OnTime** (term up to term + 180 days): principal plus a tier reward
//!   drawn from the recovery account, plus the tier's bonus grants.
//! - **Expired** (after the grace window): principal forfeited to the
//!   recovery account.
//!
//! ## Key design decisions
//!
//! - **Many positions per holder**: a dense list with swap-remove on close,
//!   capped at `MAX_POSITIONS_PER_HOLDER`.
//! - **Storage rent**: every entry point bumps the instance; positions and
//!   tier configuration are bumped whenever they are touched.
//! - **Checks-Effects-Interactions**: a position leaves the ledger before any
//!   token transfer; the reward funding check runs before removal.
//! - **Reentrancy lock** around every call that moves funds.
//! - **Best-effort grants**: issuer failures are logged and replayable, never
//!   roll back a settlement.
//! - **Solvency**: escrow balance never drops below `total_staked`; only the
//!   excess above it can be skimmed.

#![no_std]

mod admin;
mod events;
mod grants;
mod ledger;
mod pausable;
mod policy;
mod reentrancy;
mod settlement;
mod token_integration;
mod ttl;
pub mod types;

pub use grants::{GrantIssuer, GrantIssuerClient};
pub use ledger::MAX_POSITIONS_PER_HOLDER;
pub use lockup_errors::ContractError;
pub use policy::{GRACE_PERIOD_SECS, MAX_BONUS_GRANTS, MAX_TIER, MIN_TIER, SECONDS_PER_MONTH};
pub use types::{
    DurationPolicy, MissedGrant, Outcome, Position, RateSchedule, SettlementRecord, TierRates,
};

use reentrancy::with_reentrancy_guard;
use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};
use types::DataKey;


#[cfg(test)]
mod test_ledger;

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct LockupStaking;

#[contractimpl]
impl LockupStaking {
    // ── Setup ──────────────────────────────────────────────────────────────

    /// One-time initialization. Binds the admin, the balance ledger allowed to
    /// open/close positions, the managed token and the grant issuer.
    /// The default rate schedule applies until `set_rate_schedule` is called.
    pub fn initialize(
        e: Env,
        admin: Address,
        balance_ledger: Address,
        token: Address,
        grant_issuer: Address,
    ) -> Result<(), ContractError> {
        ttl::extend_instance(&e);
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        if balance_ledger == e.current_contract_address() {
            return Err(ContractError::InvalidAddress);
        }
        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage()
            .instance()
            .set(&DataKey::BalanceLedger, &balance_ledger);
        e.storage().instance().set(&DataKey::Token, &token);
        e.storage()
            .instance()
            .set(&DataKey::GrantIssuer, &grant_issuer);

        events::emit_initialized(&e, &admin, &balance_ledger, &token, &grant_issuer);
        Ok(())
    }

    // ── Positions ──────────────────────────────────────────────────────────

    /// Lock `amount` of the managed token for `holder` at `tier` months.
    ///
    /// `caller` must be the bound balance ledger. The holder must have
    /// approved this contract to spend `amount`. Returns the new position's
    /// index in the holder's list.
    pub fn open_position(
        e: Env,
        caller: Address,
        holder: Address,
        amount: i128,
        tier: u32,
    ) -> Result<u32, ContractError> {
        ttl::extend_instance(&e);
        with_reentrancy_guard(&e, || {
            settlement::open_position(&e, &caller, &holder, amount, tier)
        })
    }

    /// Close `holder`'s position at `index` and settle it.
    ///
    /// Indexes are invalidated by every close: the last position takes the
    /// closed one's slot. Re-read them with `get_positions` after a close.
    pub fn close_position(
        e: Env,
        caller: Address,
        holder: Address,
        index: u32,
    ) -> Result<SettlementRecord, ContractError> {
        ttl::extend_instance(&e);
        with_reentrancy_guard(&e, || {
            settlement::close_position(&e, &caller, &holder, index)
        })
    }

    pub fn get_position_count(e: Env, holder: Address) -> u32 {
        ttl::extend_instance(&e);
        ledger::count(&e, &holder)
    }

    pub fn get_position(e: Env, holder: Address, index: u32) -> Result<Position, ContractError> {
        ttl::extend_instance(&e);
        ledger::get(&e, &holder, index)
    }

    pub fn get_positions(e: Env, holder: Address) -> Vec<Position> {
        ttl::extend_instance(&e);
        ledger::positions(&e, &holder)
    }

    /// How the position would settle if closed at the current ledger time.
    pub fn get_outcome(e: Env, holder: Address, index: u32) -> Result<Outcome, ContractError> {
        ttl::extend_instance(&e);
        settlement::outcome_of(&e, &holder, index)
    }

    pub fn get_total_staked(e: Env) -> i128 {
        ttl::extend_instance(&e);
        ledger::total_staked(&e)
    }

    pub fn get_escrow_balance(e: Env) -> Result<i128, ContractError> {
        ttl::extend_instance(&e);
        token_integration::escrow_balance(&e)
    }

    /// Escrow balance above `total_staked`; the most `skim_excess` can take.
    pub fn get_excess(e: Env) -> Result<i128, ContractError> {
        ttl::extend_instance(&e);
        token_integration::excess(&e)
    }

    pub fn get_settlement(e: Env, id: u64) -> Option<SettlementRecord> {
        ttl::extend_instance(&e);
        settlement::get_settlement(&e, id)
    }

    pub fn get_latest_settlement_id(e: Env) -> u64 {
        ttl::extend_instance(&e);
        settlement::latest_settlement_id(&e)
    }

    // ── Policy ─────────────────────────────────────────────────────────────

    /// Configure the bonus grants for `tier`.
    pub fn set_duration_policy(
        e: Env,
        admin: Address,
        tier: u32,
        bonus_grant_count: u32,
        bonus_grant_discount: u32,
    ) -> Result<(), ContractError> {
        ttl::extend_instance(&e);
        admin::require_admin(&e, &admin)?;
        let row = DurationPolicy {
            bonus_grant_count,
            bonus_grant_discount,
        };
        policy::set_policy(&e, tier, &row)?;
        events::emit_policy_set(&e, tier, &row);
        Ok(())
    }

    pub fn get_duration_policy(e: Env, tier: u32) -> Result<DurationPolicy, ContractError> {
        ttl::extend_instance(&e);
        if !policy::is_valid_tier(tier) {
            return Err(ContractError::BadTier);
        }
        Ok(policy::get_policy(&e, tier))
    }

    /// Set the endpoints of the tier rate curve. Reward runs from
    /// `reward_min_pct` at tier 1 to `reward_max_pct` at tier 12; penalty from
    /// `penalty_max_pct` at tier 1 down to `penalty_min_pct` at tier 12.
    pub fn set_rate_schedule(
        e: Env,
        admin: Address,
        reward_min_pct: u32,
        reward_max_pct: u32,
        penalty_min_pct: u32,
        penalty_max_pct: u32,
    ) -> Result<(), ContractError> {
        ttl::extend_instance(&e);
        admin::require_admin(&e, &admin)?;
        let schedule = RateSchedule {
            reward_min_pct,
            reward_max_pct,
            penalty_min_pct,
            penalty_max_pct,
        };
        policy::set_schedule(&e, &schedule)?;
        events::emit_schedule_set(&e, &schedule);
        Ok(())
    }

    pub fn get_rate_schedule(e: Env) -> RateSchedule {
        ttl::extend_instance(&e);
        policy::get_schedule(&e)
    }

    /// Pin `tier` to explicit rates, overriding the schedule.
    pub fn set_tier_rates(
        e: Env,
        admin: Address,
        tier: u32,
        reward_pct: u32,
        penalty_pct: u32,
    ) -> Result<(), ContractError> {
        ttl::extend_instance(&e);
        admin::require_admin(&e, &admin)?;
        let rates = TierRates {
            reward_pct,
            penalty_pct,
        };
        policy::set_tier_override(&e, tier, &rates)?;
        events::emit_rates_set(&e, tier, Some(rates));
        Ok(())
    }

    /// Drop the override for `tier`; the schedule applies again.
    pub fn clear_tier_rates(e: Env, admin: Address, tier: u32) -> Result<(), ContractError> {
        ttl::extend_instance(&e);
        admin::require_admin(&e, &admin)?;
        policy::clear_tier_override(&e, tier)?;
        events::emit_rates_set(&e, tier, None);
        Ok(())
    }

    /// Effective reward and penalty percentages for `tier`.
    pub fn get_tier_rates(e: Env, tier: u32) -> Result<TierRates, ContractError> {
        ttl::extend_instance(&e);
        if !policy::is_valid_tier(tier) {
            return Err(ContractError::BadTier);
        }
        Ok(policy::tier_rates(&e, tier))
    }

    // ── Administration ─────────────────────────────────────────────────────

    pub fn set_recovery_account(
        e: Env,
        admin: Address,
        account: Address,
    ) -> Result<(), ContractError> {
        ttl::extend_instance(&e);
        admin::set_recovery_account(&e, &admin, &account)
    }

    pub fn get_recovery_account(e: Env) -> Option<Address> {
        ttl::extend_instance(&e);
        admin::get_recovery_account(&e)
    }

    pub fn set_balance_ledger(
        e: Env,
        admin: Address,
        ledger: Address,
    ) -> Result<(), ContractError> {
        ttl::extend_instance(&e);
        admin::set_balance_ledger(&e, &admin, &ledger)
    }

    pub fn get_balance_ledger(e: Env) -> Result<Address, ContractError> {
        ttl::extend_instance(&e);
        admin::get_balance_ledger(&e)
    }

    pub fn set_grant_issuer(e: Env, admin: Address, issuer: Address) -> Result<(), ContractError> {
        ttl::extend_instance(&e);
        admin::set_grant_issuer(&e, &admin, &issuer)
    }

    /// Metadata reference passed to the issuer with every grant.
    pub fn set_grant_metadata(
        e: Env,
        admin: Address,
        metadata: String,
    ) -> Result<(), ContractError> {
        ttl::extend_instance(&e);
        admin::require_admin(&e, &admin)?;
        grants::set_metadata(&e, &metadata);
        events::emit_metadata_set(&e, &metadata);
        Ok(())
    }

    pub fn get_admin(e: Env) -> Result<Address, ContractError> {
        ttl::extend_instance(&e);
        admin::get_admin(&e)
    }

    pub fn transfer_admin(e: Env, admin: Address, new_admin: Address) -> Result<(), ContractError> {
        ttl::extend_instance(&e);
        admin::transfer_admin(&e, &admin, &new_admin)
    }

    /// Reject `open_position` and `close_position` until `resume`.
    pub fn pause(e: Env, admin: Address) -> Result<(), ContractError> {
        ttl::extend_instance(&e);
        pausable::pause(&e, &admin)
    }

    pub fn resume(e: Env, admin: Address) -> Result<(), ContractError> {
        ttl::extend_instance(&e);
        pausable::resume(&e, &admin)
    }

    pub fn is_paused(e: Env) -> bool {
        ttl::extend_instance(&e);
        pausable::is_paused(&e)
    }

    /// Check if the reentrancy lock is currently held.
    pub fn is_locked(e: Env) -> bool {
        ttl::extend_instance(&e);
        reentrancy::is_locked(&e)
    }

    /// Move `amount` of excess escrow to the recovery account.
    /// Returns the excess remaining.
    pub fn skim_excess(e: Env, admin: Address, amount: i128) -> Result<i128, ContractError> {
        ttl::extend_instance(&e);
        with_reentrancy_guard(&e, || admin::skim_excess(&e, &admin, amount))
    }

    /// Send a stranded balance of any token except the managed one.
    pub fn rescue_foreign_balance(
        e: Env,
        admin: Address,
        token: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        ttl::extend_instance(&e);
        with_reentrancy_guard(&e, || {
            admin::rescue_foreign_balance(&e, &admin, &token, &to, amount)
        })
    }

    // ── Grants ─────────────────────────────────────────────────────────────

    /// Replay a grant the issuer rejected during settlement.
    pub fn reissue_missed_grant(
        e: Env,
        admin: Address,
        missed_id: u64,
    ) -> Result<u64, ContractError> {
        ttl::extend_instance(&e);
        admin::require_admin(&e, &admin)?;
        grants::reissue(&e, missed_id)
    }

    /// Issue a grant outside of settlement.
    pub fn issue_manual_grant(
        e: Env,
        admin: Address,
        to: Address,
        discount_percent: u32,
    ) -> Result<u64, ContractError> {
        ttl::extend_instance(&e);
        admin::require_admin(&e, &admin)?;
        if discount_percent > policy::MAX_DISCOUNT_PCT {
            return Err(ContractError::DiscountOutOfRange);
        }
        grants::issue_strict(&e, &to, discount_percent)
    }

    pub fn get_missed_grant(e: Env, missed_id: u64) -> Result<MissedGrant, ContractError> {
        ttl::extend_instance(&e);
        grants::get_missed(&e, missed_id)
    }

    /// Missed grants still waiting to be replayed.
    pub fn get_missed_grant_count(e: Env) -> u32 {
        ttl::extend_instance(&e);
        grants::missed_count(&e)
    }

    pub fn get_latest_missed_grant_id(e: Env) -> u64 {
        ttl::extend_instance(&e);
        grants::latest_missed_id(&e)
    }
}
