//! Administrative surface: access control, collaborator bindings, recovery
//! account, and the two ways funds leave escrow outside settlement.

use lockup_errors::ContractError;
use soroban_sdk::{Address, Env};

use crate::types::DataKey;
use crate::{events, token_integration};

pub fn get_admin(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ContractError::NotInitialized)
}

/// Caller must be the stored admin and must have authorized the call.
pub fn require_admin(e: &Env, caller: &Address) -> Result<(), ContractError> {
    let stored = get_admin(e)?;
    if stored != *caller {
        return Err(ContractError::NotAdmin);
    }
    caller.require_auth();
    Ok(())
}

pub fn transfer_admin(e: &Env, admin: &Address, new_admin: &Address) -> Result<(), ContractError> {
    require_admin(e, admin)?;
    e.storage().instance().set(&DataKey::Admin, new_admin);
    events::emit_admin_transferred(e, admin, new_admin);
    Ok(())
}

// ── Balance ledger ────────────────────────────────────────────────────────

pub fn get_balance_ledger(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::BalanceLedger)
        .ok_or(ContractError::NotInitialized)
}

/// Only the bound balance ledger may open or close positions for a holder.
pub fn require_balance_ledger(e: &Env, caller: &Address) -> Result<(), ContractError> {
    let bound = get_balance_ledger(e)?;
    if bound != *caller {
        return Err(ContractError::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}

pub fn set_balance_ledger(e: &Env, admin: &Address, ledger: &Address) -> Result<(), ContractError> {
    require_admin(e, admin)?;
    if *ledger == e.current_contract_address() {
        return Err(ContractError::InvalidAddress);
    }
    e.storage().instance().set(&DataKey::BalanceLedger, ledger);
    events::emit_collaborator_set(e, "balance_ledger", ledger);
    Ok(())
}

pub fn set_grant_issuer(e: &Env, admin: &Address, issuer: &Address) -> Result<(), ContractError> {
    require_admin(e, admin)?;
    e.storage().instance().set(&DataKey::GrantIssuer, issuer);
    events::emit_collaborator_set(e, "grant_issuer", issuer);
    Ok(())
}

// ── Recovery account ──────────────────────────────────────────────────────

pub fn get_recovery_account(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::RecoveryAccount)
}

pub fn require_recovery_account(e: &Env) -> Result<Address, ContractError> {
    get_recovery_account(e).ok_or(ContractError::RecoveryAccountNotSet)
}

/// The escrow itself is the only address refused: Soroban has no zero
/// address, and forfeitures sent to the engine would silently become excess.
pub fn set_recovery_account(
    e: &Env,
    admin: &Address,
    account: &Address,
) -> Result<(), ContractError> {
    require_admin(e, admin)?;
    if *account == e.current_contract_address() {
        return Err(ContractError::InvalidAddress);
    }
    e.storage().instance().set(&DataKey::RecoveryAccount, account);
    events::emit_recovery_set(e, account);
    Ok(())
}

// ── Escrow recovery ───────────────────────────────────────────────────────

/// Sweep `amount` of excess escrow (balance above total staked) to the
/// recovery account. Returns the excess left afterwards.
pub fn skim_excess(e: &Env, admin: &Address, amount: i128) -> Result<i128, ContractError> {
    require_admin(e, admin)?;
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    let recovery = require_recovery_account(e)?;
    let excess = token_integration::excess(e)?;
    if amount > excess {
        return Err(ContractError::AmountExceedsExcess);
    }

    token_integration::transfer_out(e, &recovery, amount)?;

    let remaining = excess - amount;
    events::emit_excess_skimmed(e, &recovery, amount, remaining);
    Ok(remaining)
}

/// Forward stranded balances of any token other than the managed one.
pub fn rescue_foreign_balance(
    e: &Env,
    admin: &Address,
    token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    require_admin(e, admin)?;
    if *token == token_integration::get_token(e)? {
        return Err(ContractError::CannotRescueCoreBalance);
    }
    token_integration::transfer_foreign(e, token, to, amount)?;
    events::emit_foreign_rescued(e, token, to, amount);
    Ok(())
}
