use soroban_sdk::{contracttype, Address};

// ─── Positions ─────────────────────────────────────────────────────────────

/// One open lock. Immutable after creation; removed on close.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    /// Holder the principal belongs to.
    pub owner: Address,
    /// Amount committed, strictly positive.
    pub principal: i128,
    /// Ledger timestamp at the moment the position was opened.
    pub start_time: u64,
    /// Duration tier in months, 1-12.
    pub tier: u32,
}

/// How a close is settled, decided from elapsed time against the tier term.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Closed before the term ended: penalty deducted, no reward.
    Early,
    /// Closed within the term plus grace window: reward and bonus grants.
    OnTime,
    /// Closed after the grace window: principal forfeited.
    Expired,
}

// ─── Policy ────────────────────────────────────────────────────────────────

/// Per-tier bonus configuration.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DurationPolicy {
    /// Collectible grants issued on an on-time settlement.
    pub bonus_grant_count: u32,
    /// Discount percentage encoded into each grant.
    pub bonus_grant_discount: u32,
}

/// Endpoints of the tier → rate curve. Rates are interpolated linearly
/// between tier 1 and tier 12.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateSchedule {
    /// Reward percentage at tier 1.
    pub reward_min_pct: u32,
    /// Reward percentage at tier 12.
    pub reward_max_pct: u32,
    /// Penalty percentage at tier 12.
    pub penalty_min_pct: u32,
    /// Penalty percentage at tier 1.
    pub penalty_max_pct: u32,
}

/// Explicit rates for a single tier, replacing the schedule value.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierRates {
    pub reward_pct: u32,
    pub penalty_pct: u32,
}

// ─── Audit records ─────────────────────────────────────────────────────────

/// Immutable record of one `close_position` settlement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettlementRecord {
    pub id: u64,
    pub holder: Address,
    pub tier: u32,
    pub outcome: Outcome,
    pub principal: i128,
    /// Total amount sent to the holder.
    pub payout: i128,
    /// Reward pulled from the recovery account (0 unless on time).
    pub reward_paid: i128,
    /// Penalty left in escrow as excess (0 unless early).
    pub penalty_retained: i128,
    pub grants_issued: u32,
    /// Grants the issuer rejected; replayable through `reissue_missed_grant`.
    pub grants_missed: u32,
    /// true when the principal went to the recovery account.
    pub forfeited: bool,
    pub timestamp: u64,
}

/// A bonus grant the issuer failed to mint during settlement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MissedGrant {
    pub id: u64,
    pub holder: Address,
    pub discount_percent: u32,
    pub settlement_id: u64,
    pub timestamp: u64,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract admin address.
    Admin,
    /// The only address allowed to open/close positions.
    BalanceLedger,
    /// Managed SEP-41 token held in escrow.
    Token,
    /// Bonus grant issuer contract.
    GrantIssuer,
    /// Metadata reference passed with every grant.
    GrantMetadata,
    /// Receives forfeitures and excess, funds rewards.
    RecoveryAccount,
    Paused,
    /// Sum of principal over all open positions.
    TotalStaked,
    RateSchedule,
    /// Reentrancy lock flag.
    Lock,
    SettlementSeq,
    MissedGrantSeq,
    MissedGrantCount,
    /// Per-holder dense list of open positions.
    Positions(Address),
    /// Per-tier DurationPolicy.
    Policy(u32),
    /// Per-tier TierRates override.
    TierRates(u32),
    Settlement(u64),
    MissedGrant(u64),
}
