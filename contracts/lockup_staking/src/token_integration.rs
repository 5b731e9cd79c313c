//! Balance mover integration.
//! Centralizes the managed token, escrow accounting, and every transfer the
//! engine makes. Transfer failures trap inside the token contract and abort
//! the whole invocation.

use lockup_errors::ContractError;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{Address, Env};

use crate::ledger;
use crate::types::DataKey;

/// @notice Returns the managed token address.
pub fn get_token(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(ContractError::NotInitialized)
}

fn token_client(e: &Env) -> Result<TokenClient<'_>, ContractError> {
    let token = get_token(e)?;
    Ok(TokenClient::new(e, &token))
}

/// @notice Managed-token balance held by the engine.
pub fn escrow_balance(e: &Env) -> Result<i128, ContractError> {
    Ok(token_client(e)?.balance(&e.current_contract_address()))
}

/// @notice Escrow balance beyond the staked principal.
/// @dev Negative would mean staked principal is missing from escrow.
pub fn excess(e: &Env) -> Result<i128, ContractError> {
    escrow_balance(e)?
        .checked_sub(ledger::total_staked(e))
        .filter(|excess| *excess >= 0)
        .ok_or(ContractError::Underflow)
}

/// @notice true when `account` holds `amount` and has approved the engine to
///         spend it.
pub fn can_pull(e: &Env, account: &Address, amount: i128) -> Result<bool, ContractError> {
    if amount <= 0 {
        return Ok(true);
    }
    let client = token_client(e)?;
    let contract = e.current_contract_address();
    Ok(client.balance(account) >= amount && client.allowance(account, &contract) >= amount)
}

/// @notice Moves `amount` from `from` into escrow.
/// @dev Requires prior approval for the engine as spender.
pub fn transfer_in(e: &Env, from: &Address, amount: i128) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    if amount == 0 {
        return Ok(());
    }
    let contract = e.current_contract_address();
    token_client(e)?.transfer_from(&contract, from, &contract, &amount);
    Ok(())
}

/// @notice Pays `amount` out of escrow to `to`.
pub fn transfer_out(e: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    if amount == 0 {
        return Ok(());
    }
    let contract = e.current_contract_address();
    token_client(e)?.transfer(&contract, to, &amount);
    Ok(())
}

/// @notice Draws reward funding from `account` under its prior approval.
pub fn pull_from(e: &Env, account: &Address, amount: i128) -> Result<(), ContractError> {
    transfer_in(e, account, amount)
}

/// @notice Sends `amount` of an arbitrary token out of the engine.
pub fn transfer_foreign(
    e: &Env,
    token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    TokenClient::new(e, token).transfer(&e.current_contract_address(), to, &amount);
    Ok(())
}
