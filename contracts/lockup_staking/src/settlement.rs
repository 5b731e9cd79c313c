//! Settlement Engine
//!
//! Orchestrates `open_position` / `close_position` on behalf of the bound
//! balance ledger.
//!
//! ## Ordering on close
//! 1. Checks: caller, pause, index, funding for the outcome.
//! 2. Effects: the position leaves the ledger and `TotalStaked` drops.
//! 3. Interactions: token transfers, then best-effort grant issuance.
//!
//! Funding is checked before the position is removed so an unfunded on-time
//! close fails with `InsufficientTreasury` and leaves the position open for a
//! later retry.

use lockup_errors::ContractError;
use soroban_sdk::{Address, Env};

use crate::types::{DataKey, Outcome, Position, SettlementRecord};
use crate::{admin, events, grants, ledger, pausable, policy, token_integration, ttl};

/// Amounts a close moves, computed before anything is mutated.
struct Disbursement {
    payout: i128,
    reward: i128,
    penalty: i128,
    forfeited: bool,
}

fn disbursement(
    e: &Env,
    position: &Position,
    outcome: Outcome,
) -> Result<Disbursement, ContractError> {
    let pct = policy::rate(e, position.tier, outcome);
    let principal = position.principal;
    let plan = match outcome {
        Outcome::Early => {
            let penalty = policy::apply_pct(principal, pct)?;
            Disbursement {
                payout: principal - penalty,
                reward: 0,
                penalty,
                forfeited: false,
            }
        }
        Outcome::OnTime => {
            let reward = policy::apply_pct(principal, pct)?;
            Disbursement {
                payout: principal.checked_add(reward).ok_or(ContractError::Overflow)?,
                reward,
                penalty: 0,
                forfeited: false,
            }
        }
        Outcome::Expired => Disbursement {
            payout: 0,
            reward: 0,
            penalty: 0,
            forfeited: true,
        },
    };
    Ok(plan)
}

#[must_use]
pub fn elapsed(e: &Env, position: &Position) -> u64 {
    e.ledger().timestamp().saturating_sub(position.start_time)
}

/// Outcome a close of `holder`'s position at `index` would get right now.
pub fn outcome_of(e: &Env, holder: &Address, index: u32) -> Result<Outcome, ContractError> {
    let position = ledger::get(e, holder, index)?;
    Ok(policy::classify(position.tier, elapsed(e, &position)))
}

pub fn open_position(
    e: &Env,
    caller: &Address,
    holder: &Address,
    amount: i128,
    tier: u32,
) -> Result<u32, ContractError> {
    admin::require_balance_ledger(e, caller)?;
    pausable::require_not_paused(e)?;
    ledger::validate_open(e, holder, amount, tier)?;

    token_integration::transfer_in(e, holder, amount)?;
    let index = ledger::open(e, holder, amount, tier)?;

    events::emit_position_opened(e, holder, index, amount, tier, e.ledger().timestamp());
    Ok(index)
}

pub fn close_position(
    e: &Env,
    caller: &Address,
    holder: &Address,
    index: u32,
) -> Result<SettlementRecord, ContractError> {
    admin::require_balance_ledger(e, caller)?;
    pausable::require_not_paused(e)?;

    // Checks
    let position = ledger::get(e, holder, index)?;
    let outcome = policy::classify(position.tier, elapsed(e, &position));
    let plan = disbursement(e, &position, outcome)?;

    let recovery = match outcome {
        Outcome::Early => None,
        Outcome::OnTime | Outcome::Expired => Some(admin::require_recovery_account(e)?),
    };
    if let Some(recovery) = &recovery {
        if !token_integration::can_pull(e, recovery, plan.reward)? {
            return Err(ContractError::InsufficientTreasury);
        }
    }

    // Effects
    ledger::close(e, holder, index)?;
    let settlement_id = next_settlement_id(e)?;

    // Interactions
    let mut grants_issued = 0;
    let mut grants_missed = 0;
    match (outcome, &recovery) {
        (Outcome::Early, _) => {
            token_integration::transfer_out(e, holder, plan.payout)?;
        }
        (Outcome::OnTime, Some(recovery)) => {
            token_integration::pull_from(e, recovery, plan.reward)?;
            token_integration::transfer_out(e, holder, plan.payout)?;
            let bonus = policy::get_policy(e, position.tier);
            (grants_issued, grants_missed) =
                grants::issue_bonus(e, holder, &bonus, settlement_id)?;
        }
        (Outcome::Expired, Some(recovery)) => {
            token_integration::transfer_out(e, recovery, position.principal)?;
        }
        (_, None) => return Err(ContractError::RecoveryAccountNotSet),
    }

    let record = SettlementRecord {
        id: settlement_id,
        holder: holder.clone(),
        tier: position.tier,
        outcome,
        principal: position.principal,
        payout: plan.payout,
        reward_paid: plan.reward,
        penalty_retained: plan.penalty,
        grants_issued,
        grants_missed,
        forfeited: plan.forfeited,
        timestamp: e.ledger().timestamp(),
    };
    let key = DataKey::Settlement(settlement_id);
    e.storage().persistent().set(&key, &record);
    ttl::extend_record(e, &key);
    events::emit_settled(e, &record);

    Ok(record)
}

// ── Audit trail ───────────────────────────────────────────────────────────

fn next_settlement_id(e: &Env) -> Result<u64, ContractError> {
    let next = latest_settlement_id(e)
        .checked_add(1)
        .ok_or(ContractError::Overflow)?;
    e.storage().instance().set(&DataKey::SettlementSeq, &next);
    Ok(next)
}

/// Latest settlement id, or 0 if nothing has settled.
#[must_use]
pub fn latest_settlement_id(e: &Env) -> u64 {
    e.storage()
        .instance()
        .get(&DataKey::SettlementSeq)
        .unwrap_or(0)
}

pub fn get_settlement(e: &Env, id: u64) -> Option<SettlementRecord> {
    let key = DataKey::Settlement(id);
    let record = e.storage().persistent().get(&key)?;
    ttl::extend_record(e, &key);
    Some(record)
}
