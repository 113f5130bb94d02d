//! Fee calculation engine.
//!
//! Pure arithmetic over [`rust_decimal::Decimal`] for deterministic results:
//! tier-based commission lookup, processor fee, informational discounts, and
//! a binary-search inverse solver (target net payout → required gross).
//!
//! Every monetary figure rounds half away from zero at the step where it is
//! computed, never at the final subtraction, so
//! `amount == commission_fee + stripe_fee + net_amount` holds exactly.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{FeeConfig, NEW_TEACHER_TRANSACTION_THRESHOLD, TOP_RATED_MIN_RATING};
use crate::error::{FeeError, Result};
use crate::types::{
    AmountValidation, DiscountBreakdown, EstimateRow, FeeBreakdown, TeacherStanding, TierInfo,
};

/// Stateless fee calculator over a validated [`FeeConfig`].
///
/// Construction runs the configuration self-check once; per-call code then
/// assumes a well-formed tier table. The engine holds no other state and is
/// safe to share across threads.
#[derive(Debug, Clone)]
pub struct FeeEngine {
    config: FeeConfig,
}

impl Default for FeeEngine {
    /// Engine over the production rate table.
    fn default() -> Self {
        // The default table is known-good (pinned by a config test).
        Self {
            config: FeeConfig::default(),
        }
    }
}

impl FeeEngine {
    /// Build an engine over an injected configuration.
    ///
    /// Fails loudly with [`FeeError::InvalidConfig`] if the table does not
    /// pass the startup self-check; a broken table must never reach
    /// per-request calculation.
    pub fn new(config: FeeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this engine was built over.
    pub fn config(&self) -> &FeeConfig {
        &self.config
    }

    /// Resolve the base commission rate for `amount` via tier lookup.
    ///
    /// Discounts are not applied here; they are a separate informational
    /// layer computed by [`fee_breakdown`](Self::fee_breakdown). A missing
    /// tier is a configuration defect, unreachable on a validated table.
    pub fn commission_rate(&self, amount: i64) -> Result<Decimal> {
        self.config
            .tiers
            .iter()
            .find(|tier| tier.contains(amount))
            .map(|tier| tier.rate)
            .ok_or(FeeError::NoMatchingTier(amount))
    }

    /// Compute the full fee breakdown for a gross `amount`.
    ///
    /// Performs no bounds checking: callers validate with
    /// [`validate_amount`](Self::validate_amount) before showing the result
    /// to a user or authorizing a payment. Within the validated range the
    /// function is total and never errors.
    pub fn fee_breakdown(
        &self,
        amount: i64,
        standing: Option<&TeacherStanding>,
    ) -> Result<FeeBreakdown> {
        let fee_rate = self.commission_rate(amount)?;
        let gross = Decimal::from(amount);

        let commission_fee = round_yen(gross * fee_rate);
        let stripe_fee = round_yen(gross * self.config.stripe_fee_rate) + self.config.stripe_fixed_fee;
        let total_fees = commission_fee + stripe_fee;
        let net_amount = amount - total_fees;

        let discounts = standing.and_then(|s| self.discount_breakdown(gross, s));

        Ok(FeeBreakdown {
            amount,
            fee_rate,
            commission_fee,
            stripe_fee,
            total_fees,
            net_amount,
            discounts,
        })
    }

    /// Itemized discounts for a teacher's standing, or `None` when no
    /// discount applies.
    ///
    /// Informational only: amounts are reported for display transparency and
    /// never reduce the authoritative `net_amount`.
    fn discount_breakdown(&self, gross: Decimal, standing: &TeacherStanding) -> Option<DiscountBreakdown> {
        let rates = &self.config.discounts;

        let new_teacher = if standing.transaction_count < NEW_TEACHER_TRANSACTION_THRESHOLD {
            round_yen(gross * rates.new_teacher)
        } else {
            0
        };
        let verified = if standing.is_verified {
            round_yen(gross * rates.verified_teacher)
        } else {
            0
        };
        let top_rated = if standing.rating >= TOP_RATED_MIN_RATING {
            round_yen(gross * rates.top_rated)
        } else {
            0
        };

        let eligible = standing.transaction_count < NEW_TEACHER_TRANSACTION_THRESHOLD
            || standing.is_verified
            || standing.rating >= TOP_RATED_MIN_RATING;
        if !eligible {
            return None;
        }

        Some(DiscountBreakdown {
            new_teacher,
            verified,
            top_rated,
            total: new_teacher + verified + top_rated,
        })
    }

    /// Inverse solver: the minimal gross amount whose net payout reaches
    /// `target_net`.
    ///
    /// Binary search over `[target_net, 2 × (target_net + fixed_fee + 1)]`
    /// followed by a short downward walk. The upper bound is sound because
    /// the self-check caps combined percentage fees at 50% (the
    /// `+ fixed + 1` term absorbs the flat processor fee and per-step
    /// rounding; the arithmetic saturates rather than overflowing on
    /// degenerate targets).
    ///
    /// Net payout is only almost monotone in gross amount: commission and
    /// the processor percentage round independently, so both can increment
    /// at the same yen and dent net by one (e.g. net(1097) = 839 but
    /// net(1098) = 838 under the default table). The binary search can
    /// therefore land just above the true minimum; the walk scans downward
    /// until four consecutive amounts miss the target. Four misses are
    /// conclusive: with combined rates capped at 50%, net never falls over
    /// any span of four yen, so no smaller solution can hide below them.
    pub fn required_amount(
        &self,
        target_net: i64,
        standing: Option<&TeacherStanding>,
    ) -> Result<i64> {
        let target = target_net.max(0);
        let mut lo = target;
        let mut hi = target
            .saturating_add(self.config.stripe_fixed_fee)
            .saturating_add(1)
            .saturating_mul(2);

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.fee_breakdown(mid, standing)?.net_amount >= target_net {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }

        // The search lands on a satisfying amount; a rounding dip may hide a
        // smaller one just below it.
        let mut best = lo;
        let mut misses = 0;
        let mut amount = lo - 1;
        while amount >= 0 && misses < 4 {
            if self.fee_breakdown(amount, standing)?.net_amount >= target_net {
                best = amount;
                misses = 0;
            } else {
                misses += 1;
            }
            amount -= 1;
        }
        Ok(best)
    }

    /// Check `amount` against the configured request bounds.
    ///
    /// Pure predicate returning accumulated human-readable messages; both
    /// bounds are checked independently.
    pub fn validate_amount(&self, amount: i64) -> AmountValidation {
        let mut errors = Vec::new();
        if amount < self.config.min_request_amount {
            errors.push(format!(
                "amount must be at least ¥{}",
                self.config.min_request_amount
            ));
        }
        if amount > self.config.max_request_amount {
            errors.push(format!(
                "amount must be at most ¥{}",
                self.config.max_request_amount
            ));
        }
        AmountValidation {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Display metadata for the tier containing `amount`, or `None` if no
    /// tier matches (callers such as the pricing page must handle `None`).
    pub fn tier_info(&self, amount: i64) -> Option<TierInfo> {
        self.config
            .tiers
            .iter()
            .find(|tier| tier.contains(amount))
            .map(|tier| TierInfo {
                label: tier.label.clone(),
                rate: tier.rate,
                min: tier.min,
                max: tier.max,
            })
    }

    /// Map [`fee_breakdown`](Self::fee_breakdown) over candidate amounts,
    /// producing display rows for an earnings-estimate table.
    pub fn earnings_estimate(
        &self,
        amounts: &[i64],
        standing: Option<&TeacherStanding>,
    ) -> Result<Vec<EstimateRow>> {
        amounts
            .iter()
            .map(|&amount| {
                let b = self.fee_breakdown(amount, standing)?;
                Ok(EstimateRow {
                    amount: b.amount,
                    fee_rate: b.fee_rate,
                    total_fees: b.total_fees,
                    net_amount: b.net_amount,
                })
            })
            .collect()
    }
}

/// Round a yen figure half away from zero to a whole integer.
///
/// The rounding rule is load-bearing for financial correctness: banker's
/// rounding is explicitly not used.
fn round_yen(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .expect("fee amount exceeds i64 range")
}
