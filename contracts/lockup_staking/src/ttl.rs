//! Storage rent.
//!
//! | Key                                 | Tier           | Bump              |
//! |-------------------------------------|----------------|-------------------|
//! | globals                             | `instance()`   | every entry point |
//! | `Positions(holder)`                 | `persistent()` | open, close, read |
//! | `Policy(tier)`, `TierRates(tier)`   | `persistent()` | write, read       |
//! | `Settlement(id)`, `MissedGrant(id)` | `persistent()` | write, read       |
//!
//! Positions, tier configuration and the instance must outlive the longest
//! lock (12 months plus the grace window). The host clamps a persistent bump
//! to the network's maximum TTL; past that an untouched entry is archived and
//! has to be restored before the engine can settle it.

use soroban_sdk::{Env, IntoVal, Val};

/// Ledgers per day at 5 s/ledger.
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// Target TTL for state a position depends on: 360-day term, 180-day grace,
/// 30 days of slack.
pub const LIFETIME_BUMP_TARGET: u32 = 570 * DAY_IN_LEDGERS;
/// Bump again once less than this remains.
pub const LIFETIME_BUMP_THRESHOLD: u32 = LIFETIME_BUMP_TARGET - DAY_IN_LEDGERS;

/// Minimum TTL before an audit record is bumped (~1 day).
pub const RECORD_BUMP_THRESHOLD: u32 = DAY_IN_LEDGERS;
/// Target TTL for audit records (~30 days).
pub const RECORD_BUMP_TARGET: u32 = 30 * DAY_IN_LEDGERS;

pub fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(LIFETIME_BUMP_THRESHOLD, LIFETIME_BUMP_TARGET);
}

/// Bump a persistent entry that backs open positions. The key must exist.
pub fn extend_lifetime<K>(e: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    e.storage()
        .persistent()
        .extend_ttl(key, LIFETIME_BUMP_THRESHOLD, LIFETIME_BUMP_TARGET);
}

/// Bump an audit record. The key must exist.
pub fn extend_record<K>(e: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    e.storage()
        .persistent()
        .extend_ttl(key, RECORD_BUMP_THRESHOLD, RECORD_BUMP_TARGET);
}
