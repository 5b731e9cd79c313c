use lockup_errors::ContractError;
use soroban_sdk::{Address, Env};

use crate::admin::require_admin;
use crate::events;
use crate::types::DataKey;

#[must_use]
pub fn is_paused(e: &Env) -> bool {
    e.storage().instance().get(&DataKey::Paused).unwrap_or(false)
}

pub fn require_not_paused(e: &Env) -> Result<(), ContractError> {
    if is_paused(e) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

pub fn pause(e: &Env, admin: &Address) -> Result<(), ContractError> {
    require_admin(e, admin)?;
    e.storage().instance().set(&DataKey::Paused, &true);
    events::emit_paused(e, admin);
    Ok(())
}

pub fn resume(e: &Env, admin: &Address) -> Result<(), ContractError> {
    require_admin(e, admin)?;
    e.storage().instance().set(&DataKey::Paused, &false);
    events::emit_resumed(e, admin);
    Ok(())
}
