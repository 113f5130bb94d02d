//! Fee engine configuration.
//!
//! All business constants live here: the volume-tier commission table, the
//! card-processor fee components, request amount bounds, and the named
//! discount rates. The engine takes a [`FeeConfig`] at construction, so
//! tests (and any future admin surface) can swap in a synthetic table
//! without touching algorithm code.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{FeeError, Result};

/// A teacher is "new" while their completed transaction count is below this.
pub const NEW_TEACHER_TRANSACTION_THRESHOLD: u32 = 5;

/// Minimum rating for the top-rated discount.
pub const TOP_RATED_MIN_RATING: f64 = 4.8;

/// One volume tier of the commission table.
///
/// Bounds are inclusive on both ends; `max = None` means unbounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTier {
    pub min: i64,
    /// Omitted in JSON for the unbounded last tier.
    #[serde(default)]
    pub max: Option<i64>,
    /// Commission fraction in `[0, 1)`.
    pub rate: Decimal,
    /// Human label for pricing-page display (e.g. "Under ¥30,000").
    pub label: String,
}

impl RateTier {
    /// Whether `amount` falls within this tier's inclusive bounds.
    pub fn contains(&self, amount: i64) -> bool {
        amount >= self.min && self.max.map_or(true, |max| amount <= max)
    }
}

/// The three named teacher-standing discount rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountRates {
    pub new_teacher: Decimal,
    pub verified_teacher: Decimal,
    pub top_rated: Decimal,
}

/// Complete fee configuration: tier table, processor pricing, amount bounds,
/// and discount rates.
///
/// Use [`FeeConfig::default`] for the production table, or deserialize an
/// alternate table from JSON. Either way the table must pass
/// [`FeeConfig::validate`] before an engine is built on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeConfig {
    /// Ordered volume tiers, ascending by `min`, covering `[0, ∞)`.
    pub tiers: Vec<RateTier>,
    /// Percentage component of the card-processor fee.
    pub stripe_fee_rate: Decimal,
    /// Flat per-transaction component of the card-processor fee, in yen.
    pub stripe_fixed_fee: i64,
    /// Smallest request amount accepted, in yen.
    pub min_request_amount: i64,
    /// Largest request amount accepted, in yen.
    pub max_request_amount: i64,
    pub discounts: DiscountRates,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                RateTier {
                    min: 0,
                    max: Some(29_999),
                    rate: dec!(0.20),
                    label: "Under ¥30,000".to_string(),
                },
                RateTier {
                    min: 30_000,
                    max: Some(49_999),
                    rate: dec!(0.18),
                    label: "¥30,000 – ¥49,999".to_string(),
                },
                RateTier {
                    min: 50_000,
                    max: Some(99_999),
                    rate: dec!(0.15),
                    label: "¥50,000 – ¥99,999".to_string(),
                },
                RateTier {
                    min: 100_000,
                    max: None,
                    rate: dec!(0.12),
                    label: "¥100,000 and above".to_string(),
                },
            ],
            // Domestic card pricing: 3.6% with no flat component. The fixed
            // fee stays configurable for pricing models that carry one.
            stripe_fee_rate: dec!(0.036),
            stripe_fixed_fee: 0,
            min_request_amount: 1_000,
            max_request_amount: 1_000_000,
            discounts: DiscountRates {
                new_teacher: dec!(0.02),
                verified_teacher: dec!(0.01),
                top_rated: dec!(0.01),
            },
        }
    }
}

impl FeeConfig {
    /// Startup self-check: verify the table is well-formed before any
    /// per-request calculation runs.
    ///
    /// Checks, in order:
    /// - at least one tier, starting at 0, last tier unbounded
    /// - tiers contiguous and non-overlapping (`next.min == prev.max + 1`)
    /// - every rate in `[0, 1)`, non-increasing as amount grows (keeps net
    ///   payout almost monotone in gross amount; independent per-step
    ///   rounding can still dent it by one yen, which the inverse solver's
    ///   downward walk tolerates)
    /// - combined worst-case rate (highest tier + processor) at most 50%,
    ///   which bounds the inverse solver's search range and the depth of
    ///   its walk
    /// - sane amount bounds and discount rates
    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(FeeError::InvalidConfig("tier table is empty".into()));
        }

        let first = &self.tiers[0];
        if first.min != 0 {
            return Err(FeeError::InvalidConfig(format!(
                "first tier must start at 0, starts at {}",
                first.min
            )));
        }

        let last = self.tiers.len() - 1;
        let mut prev_max: Option<i64> = None;
        let mut prev_rate: Option<Decimal> = None;
        for (i, tier) in self.tiers.iter().enumerate() {
            if let Some(prev) = prev_max {
                if tier.min != prev + 1 {
                    return Err(FeeError::InvalidConfig(format!(
                        "tier starting at {} is not contiguous with previous tier ending at {}",
                        tier.min, prev
                    )));
                }
            }
            if tier.max.is_none() && i != last {
                return Err(FeeError::InvalidConfig(format!(
                    "only the last tier may be unbounded (tier starting at {})",
                    tier.min
                )));
            }
            if let Some(max) = tier.max {
                if max < tier.min {
                    return Err(FeeError::InvalidConfig(format!(
                        "tier [{}, {}] has max below min",
                        tier.min, max
                    )));
                }
            }
            if tier.rate < Decimal::ZERO || tier.rate >= Decimal::ONE {
                return Err(FeeError::InvalidConfig(format!(
                    "tier rate {} is outside [0, 1)",
                    tier.rate
                )));
            }
            if let Some(prev) = prev_rate {
                if tier.rate > prev {
                    return Err(FeeError::InvalidConfig(format!(
                        "tier rates must not increase with amount ({} follows {})",
                        tier.rate, prev
                    )));
                }
            }
            prev_max = tier.max;
            prev_rate = Some(tier.rate);
        }

        // The last tier must extend to infinity so every amount matches
        // exactly one tier. prev_max holds the final tier's max here.
        if prev_max.is_some() {
            return Err(FeeError::InvalidConfig(
                "last tier must be unbounded".into(),
            ));
        }

        if self.stripe_fee_rate < Decimal::ZERO || self.stripe_fee_rate >= Decimal::ONE {
            return Err(FeeError::InvalidConfig(format!(
                "processor fee rate {} is outside [0, 1)",
                self.stripe_fee_rate
            )));
        }
        if self.stripe_fixed_fee < 0 {
            return Err(FeeError::InvalidConfig(
                "processor fixed fee is negative".into(),
            ));
        }

        // The inverse solver searches up to 2×(target + fixed + 1), which is
        // only a valid upper bound while total percentage fees stay ≤ 50%.
        let max_rate = self.tiers[0].rate;
        if max_rate + self.stripe_fee_rate > dec!(0.5) {
            return Err(FeeError::InvalidConfig(format!(
                "combined commission + processor rate {} exceeds 50%",
                max_rate + self.stripe_fee_rate
            )));
        }

        if self.min_request_amount < 0 || self.min_request_amount > self.max_request_amount {
            return Err(FeeError::InvalidConfig(format!(
                "amount bounds [{}, {}] are malformed",
                self.min_request_amount, self.max_request_amount
            )));
        }

        for (name, rate) in [
            ("new_teacher", self.discounts.new_teacher),
            ("verified_teacher", self.discounts.verified_teacher),
            ("top_rated", self.discounts.top_rated),
        ] {
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(FeeError::InvalidConfig(format!(
                    "discount rate {name} = {rate} is outside [0, 1)"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(FeeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_table() {
        let cfg = FeeConfig {
            tiers: vec![],
            ..FeeConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_nonzero_start() {
        let mut cfg = FeeConfig::default();
        cfg.tiers[0].min = 1_000;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_gap_between_tiers() {
        let mut cfg = FeeConfig::default();
        // Leave [30_000, 30_999] uncovered.
        cfg.tiers[1].min = 31_000;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_overlap_between_tiers() {
        let mut cfg = FeeConfig::default();
        cfg.tiers[1].min = 29_000;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_bounded_last_tier() {
        let mut cfg = FeeConfig::default();
        let last = cfg.tiers.len() - 1;
        cfg.tiers[last].max = Some(10_000_000);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_rate_of_one_or_more() {
        let mut cfg = FeeConfig::default();
        cfg.tiers[0].rate = Decimal::ONE;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_increasing_rates() {
        let mut cfg = FeeConfig::default();
        // 20% followed by 25% would let net payout fall as gross rises.
        cfg.tiers[1].rate = dec!(0.25);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_combined_rate_above_half() {
        let mut cfg = FeeConfig::default();
        cfg.tiers[0].rate = dec!(0.48); // 0.48 + 0.036 > 0.5
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_amount_bounds() {
        let cfg = FeeConfig {
            min_request_amount: 2_000_000,
            ..FeeConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_discount_rate() {
        let mut cfg = FeeConfig::default();
        cfg.discounts.top_rated = dec!(-0.01);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_tier_contains_inclusive_bounds() {
        let tier = RateTier {
            min: 30_000,
            max: Some(49_999),
            rate: dec!(0.18),
            label: String::new(),
        };
        assert!(tier.contains(30_000));
        assert!(tier.contains(49_999));
        assert!(!tier.contains(29_999));
        assert!(!tier.contains(50_000));
    }

    #[test]
    fn test_unbounded_tier_contains_large_amounts() {
        let tier = RateTier {
            min: 100_000,
            max: None,
            rate: dec!(0.12),
            label: String::new(),
        };
        assert!(tier.contains(100_000));
        assert!(tier.contains(i64::MAX));
        assert!(!tier.contains(99_999));
    }

    #[test]
    fn test_config_json_round_trip() {
        let cfg = FeeConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: FeeConfig = serde_json::from_str(&json).unwrap();
        assert!(back.validate().is_ok());
        assert_eq!(back.tiers.len(), cfg.tiers.len());
        assert_eq!(back.stripe_fee_rate, cfg.stripe_fee_rate);
    }
}
