//! Human-readable rendering of fee calculations.
//!
//! Used by the CLI and by any caller that wants the same fee-preview text a
//! form displays while a user types an amount.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::FeeBreakdown;

/// Format a yen amount with thousands separators, e.g. `¥1,234,567`.
pub fn format_yen(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    out.push('¥');
    if negative {
        out.push('-');
    }
    let first_group = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - first_group) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a rate fraction as a percentage, e.g. `0.20` → `20%`.
pub fn format_rate(rate: Decimal) -> String {
    let pct = (rate * dec!(100)).normalize();
    format!("{pct}%")
}

/// Render a breakdown as the multi-line fee preview shown to teachers.
pub fn format_breakdown(b: &FeeBreakdown) -> String {
    let mut out = String::new();
    out.push_str(&format!("Amount:          {}\n", format_yen(b.amount)));
    out.push_str(&format!(
        "Commission:      {} ({})\n",
        format_yen(b.commission_fee),
        format_rate(b.fee_rate)
    ));
    out.push_str(&format!("Processing fee:  {}\n", format_yen(b.stripe_fee)));
    out.push_str(&format!("Total fees:      {}\n", format_yen(b.total_fees)));
    out.push_str(&format!("Net payout:      {}\n", format_yen(b.net_amount)));

    if let Some(d) = &b.discounts {
        out.push_str("Eligible discounts (informational):\n");
        if d.new_teacher > 0 {
            out.push_str(&format!("  New teacher:   {}\n", format_yen(d.new_teacher)));
        }
        if d.verified > 0 {
            out.push_str(&format!("  Verified:      {}\n", format_yen(d.verified)));
        }
        if d.top_rated > 0 {
            out.push_str(&format!("  Top rated:     {}\n", format_yen(d.top_rated)));
        }
        out.push_str(&format!("  Total:         {}\n", format_yen(d.total)));
    }

    out
}
