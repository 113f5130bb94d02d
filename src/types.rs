//! Value types passed into and out of the fee engine.
//!
//! Everything here is constructed fresh per call; the engine holds no state
//! beyond its configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Optional teacher-standing inputs used for discount eligibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherStanding {
    /// Completed transactions so far (new-teacher discount below threshold).
    pub transaction_count: u32,
    /// Identity-verified teachers earn the verified discount.
    pub is_verified: bool,
    /// Average rating in `[0, 5]`; top-rated discount at 4.8 and above.
    pub rating: f64,
}

/// Itemized discount amounts, in yen.
///
/// These are informational figures for display: they are never subtracted
/// from [`FeeBreakdown::net_amount`]. Components the teacher does not qualify
/// for are zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountBreakdown {
    pub new_teacher: i64,
    pub verified: i64,
    pub top_rated: i64,
    pub total: i64,
}

/// Full fee breakdown for one gross amount.
///
/// Invariant: `amount == commission_fee + stripe_fee + net_amount`, exact
/// integer arithmetic with no rounding at the subtraction step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Gross transaction amount, in yen.
    pub amount: i64,
    /// Tier-resolved base commission rate (discounts not folded in).
    pub fee_rate: Decimal,
    /// Marketplace commission, rounded half away from zero.
    pub commission_fee: i64,
    /// Card-processor fee: percentage component (rounded) plus flat fee.
    pub stripe_fee: i64,
    pub total_fees: i64,
    /// Authoritative payout owed to the teacher.
    pub net_amount: i64,
    /// Present when standing was supplied and at least one discount applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounts: Option<DiscountBreakdown>,
}

/// Display metadata for the tier containing a given amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierInfo {
    pub label: String,
    pub rate: Decimal,
    pub min: i64,
    pub max: Option<i64>,
}

/// One row of an earnings estimate table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRow {
    pub amount: i64,
    pub fee_rate: Decimal,
    pub total_fees: i64,
    pub net_amount: i64,
}

/// Outcome of request-amount validation.
///
/// Returned as data rather than an error so callers can render inline field
/// messages without exception paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}
