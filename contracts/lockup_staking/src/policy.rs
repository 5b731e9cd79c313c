//! Reward/Penalty Policy
//!
//! Maps a duration tier and elapsed lock time to an [`Outcome`] and the
//! percentage applied to the principal for that outcome.
//!
//! ## Timing
//! A tier is a number of 30-day months, not calendar months. Positions already
//! opened depend on this convention, so `SECONDS_PER_MONTH` must not change.
//!
//! | elapsed                                 | outcome   |
//! |-----------------------------------------|-----------|
//! | `< term`                                | `Early`   |
//! | `term ..= term + GRACE_PERIOD_SECS`     | `OnTime`  |
//! | `> term + GRACE_PERIOD_SECS`            | `Expired` |
//!
//! ## Rates
//! Reward rises and penalty falls with the tier. Both come from a
//! [`RateSchedule`] whose endpoints the admin sets; a single tier can be pinned
//! to explicit values with a [`TierRates`] override.

use lockup_errors::ContractError;
use soroban_sdk::Env;

use crate::ttl;
use crate::types::{DataKey, DurationPolicy, Outcome, RateSchedule, TierRates};

// ============================================================================
// Constants
// ============================================================================

/// Shortest duration tier (months).
pub const MIN_TIER: u32 = 1;
/// Longest duration tier (months).
pub const MAX_TIER: u32 = 12;

/// One day in seconds.
pub const SECONDS_PER_DAY: u64 = 86_400;
/// Fixed 30-day month.
pub const SECONDS_PER_MONTH: u64 = 30 * SECONDS_PER_DAY;
/// Window after the term during which a close still counts as on time.
pub const GRACE_PERIOD_SECS: u64 = 180 * SECONDS_PER_DAY;

/// Upper bound on grants issued per settlement.
pub const MAX_BONUS_GRANTS: u32 = 10;
/// Upper bound on a grant discount.
pub const MAX_DISCOUNT_PCT: u32 = 100;
/// Upper bound on a reward rate.
pub const MAX_REWARD_PCT: u32 = 100;
/// Upper bound on a penalty rate (whole principal).
pub const MAX_PENALTY_PCT: u32 = 100;

/// Default reward at tier 1 (1%).
pub const DEFAULT_REWARD_MIN_PCT: u32 = 1;
/// Default reward at tier 12 (12%).
pub const DEFAULT_REWARD_MAX_PCT: u32 = 12;
/// Default penalty at tier 12 (1%).
pub const DEFAULT_PENALTY_MIN_PCT: u32 = 1;
/// Default penalty at tier 1 (12%).
pub const DEFAULT_PENALTY_MAX_PCT: u32 = 12;

const PCT_DENOMINATOR: i128 = 100;

// ============================================================================
// Pure functions
// ============================================================================

#[must_use]
pub fn is_valid_tier(tier: u32) -> bool {
    (MIN_TIER..=MAX_TIER).contains(&tier)
}

/// Lock term for `tier`, in seconds.
#[must_use]
pub fn term_length(tier: u32) -> u64 {
    u64::from(tier) * SECONDS_PER_MONTH
}

/// Classify a close `elapsed` seconds after the position was opened.
#[must_use]
pub fn classify(tier: u32, elapsed: u64) -> Outcome {
    let term = term_length(tier);
    if elapsed < term {
        Outcome::Early
    } else if elapsed <= term.saturating_add(GRACE_PERIOD_SECS) {
        Outcome::OnTime
    } else {
        Outcome::Expired
    }
}

/// Value at `tier` on a line from `at_first` (tier 1) to `at_last` (tier 12).
/// Rounds toward `at_first`.
#[must_use]
pub fn interpolate(at_first: u32, at_last: u32, tier: u32) -> u32 {
    let steps = MAX_TIER - MIN_TIER;
    let step = tier.clamp(MIN_TIER, MAX_TIER) - MIN_TIER;
    if at_last >= at_first {
        at_first + (at_last - at_first) * step / steps
    } else {
        at_first - (at_first - at_last) * step / steps
    }
}

#[must_use]
pub fn schedule_reward_pct(schedule: &RateSchedule, tier: u32) -> u32 {
    interpolate(schedule.reward_min_pct, schedule.reward_max_pct, tier)
}

#[must_use]
pub fn schedule_penalty_pct(schedule: &RateSchedule, tier: u32) -> u32 {
    interpolate(schedule.penalty_max_pct, schedule.penalty_min_pct, tier)
}

#[must_use]
pub fn default_schedule() -> RateSchedule {
    RateSchedule {
        reward_min_pct: DEFAULT_REWARD_MIN_PCT,
        reward_max_pct: DEFAULT_REWARD_MAX_PCT,
        penalty_min_pct: DEFAULT_PENALTY_MIN_PCT,
        penalty_max_pct: DEFAULT_PENALTY_MAX_PCT,
    }
}

pub fn validate_schedule(schedule: &RateSchedule) -> Result<(), ContractError> {
    if schedule.reward_min_pct > schedule.reward_max_pct
        || schedule.reward_max_pct > MAX_REWARD_PCT
        || schedule.penalty_min_pct > schedule.penalty_max_pct
        || schedule.penalty_max_pct > MAX_PENALTY_PCT
    {
        return Err(ContractError::InvalidRateSchedule);
    }
    Ok(())
}

pub fn validate_tier_rates(rates: &TierRates) -> Result<(), ContractError> {
    if rates.reward_pct > MAX_REWARD_PCT || rates.penalty_pct > MAX_PENALTY_PCT {
        return Err(ContractError::RateOutOfRange);
    }
    Ok(())
}

pub fn validate_policy(tier: u32, policy: &DurationPolicy) -> Result<(), ContractError> {
    if !is_valid_tier(tier) {
        return Err(ContractError::BadTier);
    }
    if policy.bonus_grant_count > MAX_BONUS_GRANTS {
        return Err(ContractError::GrantCountTooLarge);
    }
    if policy.bonus_grant_discount > MAX_DISCOUNT_PCT {
        return Err(ContractError::DiscountOutOfRange);
    }
    Ok(())
}

/// `amount * pct / 100`, rounded down.
pub fn apply_pct(amount: i128, pct: u32) -> Result<i128, ContractError> {
    amount
        .checked_mul(i128::from(pct))
        .map(|scaled| scaled / PCT_DENOMINATOR)
        .ok_or(ContractError::Overflow)
}

// ============================================================================
// Stored configuration
// ============================================================================

#[must_use]
pub fn get_schedule(e: &Env) -> RateSchedule {
    e.storage()
        .instance()
        .get(&DataKey::RateSchedule)
        .unwrap_or_else(default_schedule)
}

pub fn set_schedule(e: &Env, schedule: &RateSchedule) -> Result<(), ContractError> {
    validate_schedule(schedule)?;
    e.storage().instance().set(&DataKey::RateSchedule, schedule);
    Ok(())
}

#[must_use]
pub fn get_tier_override(e: &Env, tier: u32) -> Option<TierRates> {
    let key = DataKey::TierRates(tier);
    let rates = e.storage().persistent().get(&key)?;
    ttl::extend_lifetime(e, &key);
    Some(rates)
}

pub fn set_tier_override(e: &Env, tier: u32, rates: &TierRates) -> Result<(), ContractError> {
    if !is_valid_tier(tier) {
        return Err(ContractError::BadTier);
    }
    validate_tier_rates(rates)?;
    let key = DataKey::TierRates(tier);
    e.storage().persistent().set(&key, rates);
    ttl::extend_lifetime(e, &key);
    Ok(())
}

pub fn clear_tier_override(e: &Env, tier: u32) -> Result<(), ContractError> {
    if !is_valid_tier(tier) {
        return Err(ContractError::BadTier);
    }
    e.storage().persistent().remove(&DataKey::TierRates(tier));
    Ok(())
}

/// Effective rates for `tier`: the override if present, else the schedule.
#[must_use]
pub fn tier_rates(e: &Env, tier: u32) -> TierRates {
    get_tier_override(e, tier).unwrap_or_else(|| {
        let schedule = get_schedule(e);
        TierRates {
            reward_pct: schedule_reward_pct(&schedule, tier),
            penalty_pct: schedule_penalty_pct(&schedule, tier),
        }
    })
}

/// Percentage of principal applied for `outcome`: penalty when early, reward
/// when on time, the whole principal when expired.
#[must_use]
pub fn rate(e: &Env, tier: u32, outcome: Outcome) -> u32 {
    match outcome {
        Outcome::Early => tier_rates(e, tier).penalty_pct,
        Outcome::OnTime => tier_rates(e, tier).reward_pct,
        Outcome::Expired => MAX_PENALTY_PCT,
    }
}

#[must_use]
pub fn get_policy(e: &Env, tier: u32) -> DurationPolicy {
    let key = DataKey::Policy(tier);
    match e.storage().persistent().get(&key) {
        Some(row) => {
            ttl::extend_lifetime(e, &key);
            row
        }
        None => DurationPolicy::default(),
    }
}

pub fn set_policy(e: &Env, tier: u32, policy: &DurationPolicy) -> Result<(), ContractError> {
    validate_policy(tier, policy)?;
    let key = DataKey::Policy(tier);
    e.storage().persistent().set(&key, policy);
    ttl::extend_lifetime(e, &key);
    Ok(())
}
