//! Bonus grant issuance.
//!
//! Grants are a best-effort side effect of an on-time settlement: the fund
//! transfer has already happened when they are requested, so an issuer
//! failure is recorded as a [`MissedGrant`] instead of aborting the close.
//! The admin replays missed grants with `reissue_missed_grant`.

use lockup_errors::ContractError;
use soroban_sdk::{contractclient, log, Address, Env, String};

use crate::{events, ttl};
use crate::types::{DataKey, DurationPolicy, MissedGrant};

/// Interface of the external collectible-grant issuer.
#[contractclient(name = "GrantIssuerClient")]
pub trait GrantIssuer {
    /// Mint one non-transferable grant to `to`; returns the grant id.
    fn issue_grant(env: Env, to: Address, discount_percent: u32, metadata: String) -> u64;
}

pub fn get_issuer(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::GrantIssuer)
        .ok_or(ContractError::NotInitialized)
}

#[must_use]
pub fn get_metadata(e: &Env) -> String {
    e.storage()
        .instance()
        .get(&DataKey::GrantMetadata)
        .unwrap_or_else(|| String::from_str(e, ""))
}

pub fn set_metadata(e: &Env, metadata: &String) {
    e.storage().instance().set(&DataKey::GrantMetadata, metadata);
}

/// Ask the issuer for one grant. `None` when the issuer call failed; its own
/// state changes are rolled back by the host.
fn try_issue(e: &Env, issuer: &Address, to: &Address, discount_percent: u32) -> Option<u64> {
    let metadata = get_metadata(e);
    match GrantIssuerClient::new(e, issuer).try_issue_grant(to, &discount_percent, &metadata) {
        Ok(Ok(grant_id)) => Some(grant_id),
        _ => None,
    }
}

/// Issue one grant and fail loudly; used by the admin escape hatches.
pub fn issue_strict(e: &Env, to: &Address, discount_percent: u32) -> Result<u64, ContractError> {
    let issuer = get_issuer(e)?;
    let grant_id =
        try_issue(e, &issuer, to, discount_percent).ok_or(ContractError::GrantIssuanceFailed)?;
    events::emit_grant_issued(e, to, grant_id, discount_percent);
    Ok(grant_id)
}

/// Issue every bonus grant `policy` calls for. Returns `(issued, missed)`.
pub fn issue_bonus(
    e: &Env,
    holder: &Address,
    policy: &DurationPolicy,
    settlement_id: u64,
) -> Result<(u32, u32), ContractError> {
    if policy.bonus_grant_count == 0 {
        return Ok((0, 0));
    }
    let issuer = get_issuer(e)?;
    let discount = policy.bonus_grant_discount;

    let mut issued = 0_u32;
    let mut missed = 0_u32;
    for _ in 0..policy.bonus_grant_count {
        match try_issue(e, &issuer, holder, discount) {
            Some(grant_id) => {
                issued += 1;
                events::emit_grant_issued(e, holder, grant_id, discount);
            }
            None => {
                let missed_id = record_missed(e, holder, discount, settlement_id)?;
                log!(
                    e,
                    "bonus grant issuance failed",
                    holder.clone(),
                    missed_id,
                    settlement_id
                );
                events::emit_grant_missed(e, holder, missed_id, discount, settlement_id);
                missed += 1;
            }
        }
    }
    Ok((issued, missed))
}

// ─── Missed grant log ──────────────────────────────────────────────────────

fn record_missed(
    e: &Env,
    holder: &Address,
    discount_percent: u32,
    settlement_id: u64,
) -> Result<u64, ContractError> {
    let id = latest_missed_id(e)
        .checked_add(1)
        .ok_or(ContractError::Overflow)?;
    let record = MissedGrant {
        id,
        holder: holder.clone(),
        discount_percent,
        settlement_id,
        timestamp: e.ledger().timestamp(),
    };
    let key = DataKey::MissedGrant(id);
    e.storage().instance().set(&DataKey::MissedGrantSeq, &id);
    e.storage().persistent().set(&key, &record);
    ttl::extend_record(e, &key);
    e.storage()
        .instance()
        .set(&DataKey::MissedGrantCount, &missed_count(e).saturating_add(1));
    Ok(id)
}

#[must_use]
pub fn latest_missed_id(e: &Env) -> u64 {
    e.storage()
        .instance()
        .get(&DataKey::MissedGrantSeq)
        .unwrap_or(0)
}

/// Number of missed grants not yet replayed.
#[must_use]
pub fn missed_count(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&DataKey::MissedGrantCount)
        .unwrap_or(0)
}

pub fn get_missed(e: &Env, id: u64) -> Result<MissedGrant, ContractError> {
    let key = DataKey::MissedGrant(id);
    let missed = e
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::MissedGrantNotFound)?;
    ttl::extend_record(e, &key);
    Ok(missed)
}

/// Replay a missed grant. The record is dropped only once the issuer succeeds.
pub fn reissue(e: &Env, id: u64) -> Result<u64, ContractError> {
    let missed = get_missed(e, id)?;
    let grant_id = issue_strict(e, &missed.holder, missed.discount_percent)?;
    e.storage().persistent().remove(&DataKey::MissedGrant(id));
    e.storage()
        .instance()
        .set(&DataKey::MissedGrantCount, &missed_count(e).saturating_sub(1));
    Ok(grant_id)
}
