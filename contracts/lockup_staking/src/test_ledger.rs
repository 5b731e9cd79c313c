//! Position ledger: append, swap-remove, and the total-staked aggregate.

use crate::ledger;
use crate::test_helpers::*;
use crate::ContractError;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

#[test]
fn test_open_appends_and_returns_index() {
    let e = Env::default();
    let s = setup(&e);

    assert_eq!(s.client.open_position(&s.ledger, &s.holder, &100, &3), 0);
    assert_eq!(s.client.open_position(&s.ledger, &s.holder, &200, &6), 1);
    assert_eq!(s.client.open_position(&s.ledger, &s.holder, &300, &12), 2);

    assert_eq!(s.client.get_position_count(&s.holder), 3);
    let p = s.client.get_position(&s.holder, &1);
    assert_eq!(p.owner, s.holder);
    assert_eq!(p.principal, 200);
    assert_eq!(p.tier, 6);
    assert_eq!(p.start_time, T0);
    assert_eq!(s.client.get_total_staked(), 600);
}

#[test]
fn test_open_pulls_principal_into_escrow() {
    let e = Env::default();
    let s = setup(&e);

    s.client.open_position(&s.ledger, &s.holder, &1_000, &1);

    assert_eq!(s.token.balance(&s.contract_id), 1_000);
    assert_eq!(s.token.balance(&s.holder), DEFAULT_MINT - 1_000);
    assert_eq!(s.client.get_excess(), 0);
}

#[test]
fn test_open_rejects_zero_and_negative_amount() {
    let e = Env::default();
    let s = setup(&e);

    assert_eq!(
        s.client.try_open_position(&s.ledger, &s.holder, &0, &3),
        Err(Ok(ContractError::InvalidAmount))
    );
    assert_eq!(
        s.client.try_open_position(&s.ledger, &s.holder, &-5, &3),
        Err(Ok(ContractError::InvalidAmount))
    );
    assert_eq!(s.client.get_position_count(&s.holder), 0);
}

#[test]
fn test_open_rejects_tier_out_of_range() {
    let e = Env::default();
    let s = setup(&e);

    assert_eq!(
        s.client.try_open_position(&s.ledger, &s.holder, &100, &0),
        Err(Ok(ContractError::InvalidTier))
    );
    assert_eq!(
        s.client.try_open_position(&s.ledger, &s.holder, &100, &13),
        Err(Ok(ContractError::InvalidTier))
    );
    assert_eq!(s.client.get_total_staked(), 0);
    assert_eq!(s.token.balance(&s.contract_id), 0);
}

#[test]
fn test_get_out_of_bounds_is_invalid_index() {
    let e = Env::default();
    let s = setup(&e);

    assert_eq!(
        s.client.try_get_position(&s.holder, &0),
        Err(Ok(ContractError::InvalidIndex))
    );
    s.client.open_position(&s.ledger, &s.holder, &100, &3);
    assert_eq!(
        s.client.try_get_position(&s.holder, &1),
        Err(Ok(ContractError::InvalidIndex))
    );
}

#[test]
fn test_close_swaps_last_into_slot() {
    let e = Env::default();
    let s = setup(&e);

    s.client.open_position(&s.ledger, &s.holder, &100, &1);
    s.client.open_position(&s.ledger, &s.holder, &200, &2);
    s.client.open_position(&s.ledger, &s.holder, &300, &3);

    s.client.close_position(&s.ledger, &s.holder, &0);

    assert_eq!(s.client.get_position_count(&s.holder), 2);
    assert_eq!(s.client.get_position(&s.holder, &0).principal, 300);
    assert_eq!(s.client.get_position(&s.holder, &1).principal, 200);
    assert_eq!(s.client.get_total_staked(), 500);
}

#[test]
fn test_closed_index_invalid_until_reused() {
    let e = Env::default();
    let s = setup(&e);

    s.client.open_position(&s.ledger, &s.holder, &100, &1);
    s.client.close_position(&s.ledger, &s.holder, &0);

    assert_eq!(
        s.client.try_get_position(&s.holder, &0),
        Err(Ok(ContractError::InvalidIndex))
    );
    assert_eq!(
        s.client.try_close_position(&s.ledger, &s.holder, &0),
        Err(Ok(ContractError::InvalidIndex))
    );

    assert_eq!(s.client.open_position(&s.ledger, &s.holder, &50, &2), 0);
    assert_eq!(s.client.get_position(&s.holder, &0).principal, 50);
}

#[test]
fn test_positions_are_per_holder() {
    let e = Env::default();
    let s = setup(&e);
    let other = Address::generate(&e);
    fund_and_approve(&e, &s.token_id, &s.contract_id, &other, 10_000);

    s.client.open_position(&s.ledger, &s.holder, &100, &1);
    s.client.open_position(&s.ledger, &other, &700, &4);

    assert_eq!(s.client.get_position_count(&s.holder), 1);
    assert_eq!(s.client.get_position_count(&other), 1);
    assert_eq!(s.client.get_position(&other, &0).owner, other);

    s.client.close_position(&s.ledger, &other, &0);
    assert_eq!(s.client.get_position_count(&other), 0);
    assert_eq!(s.client.get_position(&s.holder, &0).principal, 100);
    assert_solvent(&s, &[&s.holder, &other]);
}

#[test]
fn test_total_staked_tracks_mixed_sequence() {
    let e = Env::default();
    let s = setup(&e);
    let other = Address::generate(&e);
    fund_and_approve(&e, &s.token_id, &s.contract_id, &other, 10_000);
    let holders = [&s.holder, &other];

    s.client.open_position(&s.ledger, &s.holder, &1_000, &3);
    assert_solvent(&s, &holders);
    s.client.open_position(&s.ledger, &other, &2_500, &12);
    assert_solvent(&s, &holders);
    s.client.open_position(&s.ledger, &s.holder, &40, &1);
    assert_solvent(&s, &holders);

    // early close of the 3-month position
    advance(&s, &[&other], 10 * ONE_DAY);
    s.client.close_position(&s.ledger, &s.holder, &0);
    assert_solvent(&s, &holders);

    // on-time close of the 1-month position, now at index 0
    advance(&s, &[&other], 40 * ONE_DAY);
    s.client.close_position(&s.ledger, &s.holder, &0);
    assert_solvent(&s, &holders);

    // expired close
    advance(&s, &[&other], 360 * ONE_DAY + 181 * ONE_DAY);
    s.client.close_position(&s.ledger, &other, &0);
    assert_solvent(&s, &holders);

    assert_eq!(s.client.get_total_staked(), 0);
}

#[test]
fn test_ledger_functions_directly() {
    let e = Env::default();
    let s = setup(&e);
    let holder = s.holder.clone();

    e.as_contract(&s.contract_id, || {
        assert_eq!(ledger::open(&e, &holder, 10, 1), Ok(0));
        assert_eq!(ledger::open(&e, &holder, 20, 2), Ok(1));
        assert_eq!(ledger::total_staked(&e), 30);

        let removed = ledger::close(&e, &holder, 1).unwrap();
        assert_eq!(removed.principal, 20);
        assert_eq!(ledger::count(&e, &holder), 1);
        assert_eq!(ledger::total_staked(&e), 10);

        assert_eq!(ledger::close(&e, &holder, 5), Err(ContractError::InvalidIndex));
        assert_eq!(ledger::open(&e, &holder, 1, 0), Err(ContractError::InvalidTier));
        assert_eq!(ledger::open(&e, &holder, 0, 1), Err(ContractError::InvalidAmount));
    });
}

#[test]
fn test_open_capped_per_holder() {
    let e = Env::default();
    let s = setup(&e);
    let holder = s.holder.clone();

    for _ in 0..crate::MAX_POSITIONS_PER_HOLDER {
        e.as_contract(&s.contract_id, || ledger::open(&e, &holder, 1, 1).unwrap());
    }
    assert_eq!(s.client.get_position_count(&s.holder), crate::MAX_POSITIONS_PER_HOLDER);

    assert_eq!(
        s.client.try_open_position(&s.ledger, &s.holder, &100, &1),
        Err(Ok(ContractError::TooManyPositions))
    );
    assert_eq!(s.token.balance(&s.holder), DEFAULT_MINT);

    // another holder is unaffected
    let other = Address::generate(&e);
    fund_and_approve(&e, &s.token_id, &s.contract_id, &other, 100);
    assert_eq!(s.client.open_position(&s.ledger, &other, &100, &1), 0);

    // closing one frees a slot
    e.as_contract(&s.contract_id, || {
        ledger::close(&e, &holder, 0).unwrap();
    });
    assert_eq!(
        s.client.open_position(&s.ledger, &s.holder, &100, &1),
        crate::MAX_POSITIONS_PER_HOLDER - 1
    );
}
