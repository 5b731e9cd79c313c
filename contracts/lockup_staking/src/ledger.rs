//! Position Ledger
//!
//! Per-holder dense list of open positions plus the `TotalStaked` aggregate.
//! Closing swap-removes: the last position moves into the freed slot, so an
//! index is only valid until the holder's next close.
//!
//! A holder's list is one persistent entry, so it is capped at
//! [`MAX_POSITIONS_PER_HOLDER`] to stay well inside the host's entry size
//! limit.

use lockup_errors::ContractError;
use soroban_sdk::{Address, Env, Vec};

use crate::types::{DataKey, Position};
use crate::{policy, ttl};

/// Open positions one holder may have at a time.
pub const MAX_POSITIONS_PER_HOLDER: u32 = 100;

pub fn validate_open(
    e: &Env,
    holder: &Address,
    amount: i128,
    tier: u32,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    if !policy::is_valid_tier(tier) {
        return Err(ContractError::InvalidTier);
    }
    if count(e, holder) >= MAX_POSITIONS_PER_HOLDER {
        return Err(ContractError::TooManyPositions);
    }
    Ok(())
}

#[must_use]
pub fn positions(e: &Env, holder: &Address) -> Vec<Position> {
    let key = DataKey::Positions(holder.clone());
    match e.storage().persistent().get(&key) {
        Some(list) => {
            ttl::extend_lifetime(e, &key);
            list
        }
        None => Vec::new(e),
    }
}

fn store_positions(e: &Env, holder: &Address, list: &Vec<Position>) {
    let key = DataKey::Positions(holder.clone());
    if list.is_empty() {
        e.storage().persistent().remove(&key);
    } else {
        e.storage().persistent().set(&key, list);
        ttl::extend_lifetime(e, &key);
    }
}

#[must_use]
pub fn count(e: &Env, holder: &Address) -> u32 {
    positions(e, holder).len()
}

pub fn get(e: &Env, holder: &Address, index: u32) -> Result<Position, ContractError> {
    positions(e, holder)
        .get(index)
        .ok_or(ContractError::InvalidIndex)
}

#[must_use]
pub fn total_staked(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::TotalStaked)
        .unwrap_or(0)
}

fn set_total_staked(e: &Env, value: i128) {
    e.storage().instance().set(&DataKey::TotalStaked, &value);
}

/// Append a position starting now and return its index.
pub fn open(e: &Env, holder: &Address, amount: i128, tier: u32) -> Result<u32, ContractError> {
    validate_open(e, holder, amount, tier)?;

    let total = total_staked(e)
        .checked_add(amount)
        .ok_or(ContractError::Overflow)?;

    let mut list = positions(e, holder);
    let index = list.len();
    list.push_back(Position {
        owner: holder.clone(),
        principal: amount,
        start_time: e.ledger().timestamp(),
        tier,
    });
    store_positions(e, holder, &list);
    set_total_staked(e, total);

    Ok(index)
}

/// Remove the position at `index` and return it.
pub fn close(e: &Env, holder: &Address, index: u32) -> Result<Position, ContractError> {
    let mut list = positions(e, holder);
    let removed = list.get(index).ok_or(ContractError::InvalidIndex)?;

    let total = total_staked(e)
        .checked_sub(removed.principal)
        .ok_or(ContractError::Underflow)?;

    let last = list.pop_back().ok_or(ContractError::InvalidIndex)?;
    if index < list.len() {
        list.set(index, last);
    }
    store_positions(e, holder, &list);
    set_total_staked(e, total);

    Ok(removed)
}
