//! Fee handler types and the percentage fee calculation
//!
//! The source chain routes every (destination domain, asset) pair to one fee
//! handler pallet:
//! - basic: a flat fee per pair, independent of the amount
//! - percentage: `amount * rate / 10_000`, clamped to optional bounds

use serde::{Deserialize, Serialize};
use std::fmt;
use sygma_core::{Balance, DomainId, XcmMultiAssetId};

/// Divisor for fee rates expressed in basis points
pub const FEE_RATE_DIVISOR: u128 = 10_000;

/// Fee handler strategy registered for a (domain, asset) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeHandlerKind {
    Basic,
    Percentage,
}

impl FeeHandlerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Percentage => "percentage",
        }
    }
}

impl fmt::Display for FeeHandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percentage fee configuration read from chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentageFeeRate {
    /// Fee rate in basis points (100 = 1%)
    pub rate_bps: u32,
    /// Lower bound on the computed fee
    pub min_fee: Option<Balance>,
    /// Upper bound on the computed fee
    pub max_fee: Option<Balance>,
}

impl PercentageFeeRate {
    pub fn unbounded(rate_bps: u32) -> Self {
        Self {
            rate_bps,
            min_fee: None,
            max_fee: None,
        }
    }
}

/// Transfer details needed to price a percentage fee
#[derive(Debug, Clone, PartialEq)]
pub struct TransferDetails {
    pub destination_domain_id: DomainId,
    pub asset: XcmMultiAssetId,
    pub amount: Balance,
    pub recipient: String,
}

/// A computed transfer fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    /// Fee in the resource's base unit
    pub fee: Balance,
    /// Strategy that produced the fee
    pub handler: FeeHandlerKind,
    /// Asset the fee is charged in
    pub asset: XcmMultiAssetId,
}

/// Compute a percentage fee and clamp it to the configured bounds.
///
/// Rounds down. The split into quotient and remainder keeps the
/// multiplication from overflowing for any `rate_bps <= 10_000`.
pub fn calculate_percentage_fee(amount: Balance, rate: &PercentageFeeRate) -> Balance {
    let bps = rate.rate_bps as u128;
    let whole = (amount / FEE_RATE_DIVISOR).saturating_mul(bps);
    let part = (amount % FEE_RATE_DIVISOR) * bps / FEE_RATE_DIVISOR;
    let mut fee = whole.saturating_add(part);

    if let Some(min) = rate.min_fee {
        fee = fee.max(min);
    }
    if let Some(max) = rate.max_fee {
        fee = fee.min(max);
    }
    fee
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_percent() {
        let fee = calculate_percentage_fee(10_000, &PercentageFeeRate::unbounded(100));
        assert_eq!(fee, 100);
    }

    #[test]
    fn test_rounds_down() {
        // 0.5% of 999 = 4.995
        let fee = calculate_percentage_fee(999, &PercentageFeeRate::unbounded(50));
        assert_eq!(fee, 4);
    }

    #[test]
    fn test_matches_direct_formula() {
        let rate = PercentageFeeRate::unbounded(37);
        for amount in [0u128, 1, 9_999, 10_000, 123_456_789, 5_000_000_000_000_000_000] {
            assert_eq!(calculate_percentage_fee(amount, &rate), amount * 37 / 10_000);
        }
    }

    #[test]
    fn test_clamped_to_bounds() {
        let rate = PercentageFeeRate {
            rate_bps: 100,
            min_fee: Some(50),
            max_fee: Some(1_000),
        };
        assert_eq!(calculate_percentage_fee(1_000, &rate), 50);
        assert_eq!(calculate_percentage_fee(20_000, &rate), 200);
        assert_eq!(calculate_percentage_fee(1_000_000, &rate), 1_000);
    }

    #[test]
    fn test_monotonic_up_to_max() {
        let rate = PercentageFeeRate {
            rate_bps: 250,
            min_fee: Some(10),
            max_fee: Some(5_000),
        };
        let mut previous = 0;
        for amount in (0..1_000_000u128).step_by(7_919) {
            let fee = calculate_percentage_fee(amount, &rate);
            assert!(fee >= previous);
            assert!(fee <= 5_000);
            previous = fee;
        }
    }

    #[test]
    fn test_no_overflow_on_huge_amount() {
        let fee = calculate_percentage_fee(u128::MAX, &PercentageFeeRate::unbounded(10_000));
        assert_eq!(fee, u128::MAX);
    }
}
