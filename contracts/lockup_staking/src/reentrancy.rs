//! Global reentrancy lock for calls that move funds.
//!
//! The lock lives in instance storage. A failed invocation rolls back its
//! storage writes, so the flag can never be left set by an aborted call.

use lockup_errors::ContractError;
use soroban_sdk::Env;

use crate::types::DataKey;

#[must_use]
pub fn is_locked(e: &Env) -> bool {
    e.storage().instance().get(&DataKey::Lock).unwrap_or(false)
}

fn acquire_lock(e: &Env) -> Result<(), ContractError> {
    if is_locked(e) {
        return Err(ContractError::ReentrancyDetected);
    }
    e.storage().instance().set(&DataKey::Lock, &true);
    Ok(())
}

fn release_lock(e: &Env) {
    e.storage().instance().set(&DataKey::Lock, &false);
}

/// Run `f` with the lock held. The lock is released whether `f` succeeds or not.
pub fn with_reentrancy_guard<T, F>(e: &Env, f: F) -> Result<T, ContractError>
where
    F: FnOnce() -> Result<T, ContractError>,
{
    acquire_lock(e)?;
    let result = f();
    release_lock(e);
    result
}
