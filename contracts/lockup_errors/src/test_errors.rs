#[cfg(test)]
mod tests {
    extern crate std;
    use crate::{ContractError, ErrorCategory, ErrorExt};
    use std::vec::Vec;

    fn all_variants() -> Vec<ContractError> {
        std::vec![
            ContractError::NotInitialized,
            ContractError::AlreadyInitialized,
            ContractError::Unauthorized,
            ContractError::NotAdmin,
            ContractError::Paused,
            ContractError::ReentrancyDetected,
            ContractError::InvalidAmount,
            ContractError::InvalidTier,
            ContractError::InvalidIndex,
            ContractError::BadTier,
            ContractError::GrantCountTooLarge,
            ContractError::DiscountOutOfRange,
            ContractError::RateOutOfRange,
            ContractError::InvalidRateSchedule,
            ContractError::InvalidAddress,
            ContractError::CannotRescueCoreBalance,
            ContractError::TooManyPositions,
            ContractError::RecoveryAccountNotSet,
            ContractError::InsufficientTreasury,
            ContractError::AmountExceedsExcess,
            ContractError::MissedGrantNotFound,
            ContractError::GrantIssuanceFailed,
            ContractError::Overflow,
            ContractError::Underflow,
        ]
    }

    // --- Wire code tests ---

    #[test]
    fn test_codes_initialization() {
        assert_eq!(ContractError::NotInitialized as u32, 1);
        assert_eq!(ContractError::AlreadyInitialized as u32, 2);
    }

    #[test]
    fn test_codes_authorization() {
        assert_eq!(ContractError::Unauthorized as u32, 100);
        assert_eq!(ContractError::NotAdmin as u32, 101);
        assert_eq!(ContractError::Paused as u32, 102);
        assert_eq!(ContractError::ReentrancyDetected as u32, 103);
    }

    #[test]
    fn test_codes_precondition() {
        assert_eq!(ContractError::InvalidAmount as u32, 200);
        assert_eq!(ContractError::InvalidTier as u32, 201);
        assert_eq!(ContractError::InvalidIndex as u32, 202);
        assert_eq!(ContractError::BadTier as u32, 203);
        assert_eq!(ContractError::GrantCountTooLarge as u32, 204);
        assert_eq!(ContractError::DiscountOutOfRange as u32, 205);
        assert_eq!(ContractError::RateOutOfRange as u32, 206);
        assert_eq!(ContractError::InvalidRateSchedule as u32, 207);
        assert_eq!(ContractError::InvalidAddress as u32, 208);
        assert_eq!(ContractError::CannotRescueCoreBalance as u32, 209);
        assert_eq!(ContractError::TooManyPositions as u32, 210);
    }

    #[test]
    fn test_codes_funding() {
        assert_eq!(ContractError::RecoveryAccountNotSet as u32, 300);
        assert_eq!(ContractError::InsufficientTreasury as u32, 301);
        assert_eq!(ContractError::AmountExceedsExcess as u32, 302);
    }

    #[test]
    fn test_codes_grant() {
        assert_eq!(ContractError::MissedGrantNotFound as u32, 400);
        assert_eq!(ContractError::GrantIssuanceFailed as u32, 401);
    }

    #[test]
    fn test_codes_arithmetic() {
        assert_eq!(ContractError::Overflow as u32, 700);
        assert_eq!(ContractError::Underflow as u32, 701);
    }

    // --- Category mapping tests ---

    #[test]
    fn test_category_matches_code_range() {
        for e in all_variants() {
            let code = e as u32;
            let expected = match code {
                1..=99 => ErrorCategory::Initialization,
                100..=199 => ErrorCategory::Authorization,
                200..=299 => ErrorCategory::Precondition,
                300..=399 => ErrorCategory::Funding,
                400..=499 => ErrorCategory::Grant,
                700..=799 => ErrorCategory::Arithmetic,
                _ => panic!("code {} outside every range", code),
            };
            assert_eq!(e.category(), expected, "{:?}", e);
        }
    }

    #[test]
    fn test_category_authorization() {
        assert_eq!(
            ContractError::Unauthorized.category(),
            ErrorCategory::Authorization
        );
        assert_eq!(ContractError::Paused.category(), ErrorCategory::Authorization);
    }

    #[test]
    fn test_category_funding() {
        assert_eq!(
            ContractError::InsufficientTreasury.category(),
            ErrorCategory::Funding
        );
        assert_eq!(
            ContractError::RecoveryAccountNotSet.category(),
            ErrorCategory::Funding
        );
    }

    // --- Retry classification ---

    #[test]
    fn test_retryable_only_funding_and_grant() {
        for e in all_variants() {
            let expected = matches!(
                e.category(),
                ErrorCategory::Funding | ErrorCategory::Grant
            );
            assert_eq!(e.is_retryable(), expected, "{:?}", e);
        }
        assert!(ContractError::InsufficientTreasury.is_retryable());
        assert!(!ContractError::InvalidIndex.is_retryable());
        assert!(!ContractError::Unauthorized.is_retryable());
    }

    // --- Description tests ---

    #[test]
    fn test_descriptions_non_empty() {
        for e in all_variants() {
            assert!(!e.description().is_empty(), "{:?} has empty description", e);
        }
    }

    #[test]
    fn test_descriptions_unique() {
        let variants = all_variants();
        for i in 0..variants.len() {
            for j in (i + 1)..variants.len() {
                assert_ne!(variants[i].description(), variants[j].description());
            }
        }
    }

    // --- Variant count guard ---

    #[test]
    fn test_all_variants_count() {
        assert_eq!(
            all_variants().len(),
            24,
            "Update all_variants() and this count when adding new errors"
        );
    }

    #[test]
    fn test_copy_semantics() {
        let a = ContractError::InvalidIndex;
        let b = a;
        assert_eq!(a, b);
    }

    // --- Result integration tests (mirrors real contract call sites) ---

    fn mock_open(amount: i128, tier: u32) -> Result<(), ContractError> {
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if !(1..=12).contains(&tier) {
            return Err(ContractError::InvalidTier);
        }
        Ok(())
    }

    fn mock_skim(amount: i128, excess: i128) -> Result<i128, ContractError> {
        if amount > excess {
            return Err(ContractError::AmountExceedsExcess);
        }
        excess.checked_sub(amount).ok_or(ContractError::Underflow)
    }

    #[test]
    fn test_open_preconditions() {
        assert_eq!(mock_open(0, 3), Err(ContractError::InvalidAmount));
        assert_eq!(mock_open(-5, 3), Err(ContractError::InvalidAmount));
        assert_eq!(mock_open(10, 0), Err(ContractError::InvalidTier));
        assert_eq!(mock_open(10, 13), Err(ContractError::InvalidTier));
        assert!(mock_open(10, 12).is_ok());
    }

    #[test]
    fn test_skim_excess_bound() {
        assert_eq!(mock_skim(11, 10), Err(ContractError::AmountExceedsExcess));
        assert_eq!(mock_skim(10, 10), Ok(0));
    }
}
