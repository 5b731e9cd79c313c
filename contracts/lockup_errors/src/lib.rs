#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by how a caller should react to them.
/// @dev    The balance ledger front-end switches on this value first to decide
///         between a user-facing message and an internal fault, then on the
///         specific `ContractError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and initialization errors (codes 1-99).
    Initialization,
    /// Wrong caller, paused engine, or re-entered call (codes 100-199).
    Authorization,
    /// Caller-fixable bad input: amount, tier, index, address (codes 200-299).
    Precondition,
    /// Recovery account funding and escrow excess errors (codes 300-399).
    Funding,
    /// Bonus grant issuance errors; never abort a settlement (codes 400-499).
    Grant,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
}

/// @title  ContractError
/// @notice Canonical error enum shared by the lockup staking contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Precondition
///   300 - 399 : Funding
///   400 - 499 : Grant
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller is not the bound balance ledger.
    Unauthorized = 100,

    /// Caller is not the admin.
    NotAdmin = 101,

    /// Engine is paused; open/close are rejected.
    Paused = 102,

    /// A guarded call was entered while another was still in progress.
    ReentrancyDetected = 103,

    // --- Precondition (200-299) ---
    /// Position amount must be strictly positive.
    InvalidAmount = 200,

    /// Position tier is outside 1-12.
    InvalidTier = 201,

    /// Position index is out of bounds for the holder.
    InvalidIndex = 202,

    /// Admin-supplied tier is outside 1-12.
    BadTier = 203,

    /// Bonus grant count exceeds the per-settlement cap.
    GrantCountTooLarge = 204,

    /// Discount percentage is above 100.
    DiscountOutOfRange = 205,

    /// Reward or penalty percentage is above its cap.
    RateOutOfRange = 206,

    /// Rate schedule endpoints are inverted or out of range.
    InvalidRateSchedule = 207,

    /// Address cannot be used for this role.
    InvalidAddress = 208,

    /// The managed token must leave escrow through `skim_excess`.
    CannotRescueCoreBalance = 209,

    /// Holder already has the maximum number of open positions.
    TooManyPositions = 210,

    // --- Funding (300-399) ---
    /// Recovery account has not been configured.
    RecoveryAccountNotSet = 300,

    /// Recovery account lacks balance or allowance for the reward.
    InsufficientTreasury = 301,

    /// Requested skim is larger than escrow balance minus total staked.
    AmountExceedsExcess = 302,

    // --- Grant (400-499) ---
    /// No missed grant is recorded under the given id.
    MissedGrantNotFound = 400,

    /// The grant issuer rejected an admin-driven issuance.
    GrantIssuanceFailed = 401,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    Overflow = 700,

    /// Integer underflow detected during a checked arithmetic operation.
    Underflow = 701,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every ContractError variant.
/// @dev    Use this for structured logging, monitoring, and off-chain display.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;

    /// @return true when the same call may succeed later without the caller
    ///         changing its arguments (funding restored, issuer back online).
    fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Funding | ErrorCategory::Grant
        )
    }
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Initialization
            }

            ContractError::Unauthorized
            | ContractError::NotAdmin
            | ContractError::Paused
            | ContractError::ReentrancyDetected => ErrorCategory::Authorization,

            ContractError::InvalidAmount
            | ContractError::InvalidTier
            | ContractError::InvalidIndex
            | ContractError::BadTier
            | ContractError::GrantCountTooLarge
            | ContractError::DiscountOutOfRange
            | ContractError::RateOutOfRange
            | ContractError::InvalidRateSchedule
            | ContractError::InvalidAddress
            | ContractError::CannotRescueCoreBalance
            | ContractError::TooManyPositions => ErrorCategory::Precondition,

            ContractError::RecoveryAccountNotSet
            | ContractError::InsufficientTreasury
            | ContractError::AmountExceedsExcess => ErrorCategory::Funding,

            ContractError::MissedGrantNotFound | ContractError::GrantIssuanceFailed => {
                ErrorCategory::Grant
            }

            ContractError::Overflow | ContractError::Underflow => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract has already been initialized",
            ContractError::Unauthorized => "Caller is not the bound balance ledger",
            ContractError::NotAdmin => "Caller is not the admin",
            ContractError::Paused => "Engine is paused",
            ContractError::ReentrancyDetected => "Reentrancy detected; call rejected",
            ContractError::InvalidAmount => "Amount must be strictly positive (> 0)",
            ContractError::InvalidTier => "Position tier must be in range 1-12",
            ContractError::InvalidIndex => "Position index is out of bounds",
            ContractError::BadTier => "Policy tier must be in range 1-12",
            ContractError::GrantCountTooLarge => "Bonus grant count exceeds the maximum",
            ContractError::DiscountOutOfRange => "Discount percentage must be <= 100",
            ContractError::RateOutOfRange => "Rate percentage exceeds its maximum",
            ContractError::InvalidRateSchedule => {
                "Rate schedule endpoints are inverted or out of range"
            }
            ContractError::InvalidAddress => "Address is not valid for this role",
            ContractError::CannotRescueCoreBalance => {
                "Managed token cannot be rescued; use skim_excess"
            }
            ContractError::TooManyPositions => "Holder has too many open positions",
            ContractError::RecoveryAccountNotSet => "Recovery account has not been configured",
            ContractError::InsufficientTreasury => {
                "Recovery account balance or allowance is insufficient for the reward"
            }
            ContractError::AmountExceedsExcess => "Amount exceeds escrow excess",
            ContractError::MissedGrantNotFound => "No missed grant found for the given id",
            ContractError::GrantIssuanceFailed => "Grant issuer rejected the issuance",
            ContractError::Overflow => "Integer overflow in checked arithmetic",
            ContractError::Underflow => "Integer underflow in checked arithmetic",
        }
    }
}

#[cfg(test)]
mod test_errors;
