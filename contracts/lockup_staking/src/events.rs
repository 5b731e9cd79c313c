use soroban_sdk::{Address, Env, String, Symbol};

use crate::types::{DurationPolicy, RateSchedule, SettlementRecord, TierRates};

/// Emitted once when the engine is initialized.
///
/// # Topics
/// * `Symbol` - "initialized"
///
/// # Data
/// * `Address` - Admin
/// * `Address` - Bound balance ledger
/// * `Address` - Managed token
/// * `Address` - Grant issuer
pub fn emit_initialized(
    e: &Env,
    admin: &Address,
    ledger: &Address,
    token: &Address,
    issuer: &Address,
) {
    e.events().publish(
        (Symbol::new(e, "initialized"),),
        (admin.clone(), ledger.clone(), token.clone(), issuer.clone()),
    );
}

/// Emitted when a position is opened.
///
/// # Topics
/// * `Symbol` - "position_opened"
/// * `Address` - The holder
///
/// # Data
/// * `u32` - Index of the new position
/// * `i128` - Principal
/// * `u32` - Tier
/// * `u64` - Start timestamp
pub fn emit_position_opened(
    e: &Env,
    holder: &Address,
    index: u32,
    principal: i128,
    tier: u32,
    start_time: u64,
) {
    let topics = (Symbol::new(e, "position_opened"), holder.clone());
    e.events().publish(topics, (index, principal, tier, start_time));
}

/// Emitted when a position is closed. The data is the full settlement record.
pub fn emit_settled(e: &Env, record: &SettlementRecord) {
    let topics = (Symbol::new(e, "settled"), record.holder.clone());
    e.events().publish(topics, record.clone());
}

/// Emitted for every bonus grant the issuer minted.
pub fn emit_grant_issued(e: &Env, holder: &Address, grant_id: u64, discount_percent: u32) {
    let topics = (Symbol::new(e, "grant_issued"), holder.clone());
    e.events().publish(topics, (grant_id, discount_percent));
}

/// Emitted when the issuer rejected a bonus grant; `missed_id` keys the
/// replayable record.
pub fn emit_grant_missed(
    e: &Env,
    holder: &Address,
    missed_id: u64,
    discount_percent: u32,
    settlement_id: u64,
) {
    let topics = (Symbol::new(e, "grant_missed"), holder.clone());
    e.events()
        .publish(topics, (missed_id, discount_percent, settlement_id));
}

pub fn emit_policy_set(e: &Env, tier: u32, policy: &DurationPolicy) {
    e.events()
        .publish((Symbol::new(e, "policy_set"), tier), policy.clone());
}

pub fn emit_schedule_set(e: &Env, schedule: &RateSchedule) {
    e.events()
        .publish((Symbol::new(e, "schedule_set"),), schedule.clone());
}

/// `rates` is `None` when the override was cleared.
pub fn emit_rates_set(e: &Env, tier: u32, rates: Option<TierRates>) {
    e.events().publish((Symbol::new(e, "rates_set"), tier), rates);
}

pub fn emit_recovery_set(e: &Env, account: &Address) {
    e.events()
        .publish((Symbol::new(e, "recovery_set"),), account.clone());
}

/// Emitted when the balance ledger or the grant issuer is rebound.
///
/// # Topics
/// * `Symbol` - "collaborator_set"
/// * `Symbol` - Which role changed
pub fn emit_collaborator_set(e: &Env, role: &str, address: &Address) {
    e.events().publish(
        (Symbol::new(e, "collaborator_set"), Symbol::new(e, role)),
        address.clone(),
    );
}

pub fn emit_metadata_set(e: &Env, metadata: &String) {
    e.events()
        .publish((Symbol::new(e, "metadata_set"),), metadata.clone());
}

pub fn emit_admin_transferred(e: &Env, old_admin: &Address, new_admin: &Address) {
    e.events().publish(
        (Symbol::new(e, "admin_transferred"),),
        (old_admin.clone(), new_admin.clone()),
    );
}

pub fn emit_paused(e: &Env, admin: &Address) {
    e.events()
        .publish((Symbol::new(e, "paused"),), admin.clone());
}

pub fn emit_resumed(e: &Env, admin: &Address) {
    e.events()
        .publish((Symbol::new(e, "resumed"),), admin.clone());
}

/// Emitted when excess escrow is swept to the recovery account.
///
/// # Data
/// * `Address` - Recovery account
/// * `i128` - Amount skimmed
/// * `i128` - Excess remaining
pub fn emit_excess_skimmed(e: &Env, recovery: &Address, amount: i128, remaining: i128) {
    e.events().publish(
        (Symbol::new(e, "excess_skimmed"),),
        (recovery.clone(), amount, remaining),
    );
}

pub fn emit_foreign_rescued(e: &Env, token: &Address, to: &Address, amount: i128) {
    e.events().publish(
        (Symbol::new(e, "foreign_rescued"), token.clone()),
        (to.clone(), amount),
    );
}
