//! TeachBid fee and commission engine.
//!
//! Pure, stateless calculation of marketplace commission, processor fees,
//! informational teacher discounts, and net payouts, plus an inverse solver
//! (target net payout → required gross amount). All arithmetic is integer
//! yen with `rust_decimal` rate fractions; rounding is half away from zero
//! at each fee step.
//!
//! The engine performs no I/O and holds no shared mutable state; it can be
//! called concurrently from any number of request handlers.

pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod types;

// ---- Top-level re-exports for ergonomic usage ----

// Engine
pub use engine::FeeEngine;

// Configuration
pub use config::{
    DiscountRates, FeeConfig, RateTier, NEW_TEACHER_TRANSACTION_THRESHOLD, TOP_RATED_MIN_RATING,
};

// Errors
pub use error::{FeeError, Result};

// Value types
pub use types::{
    AmountValidation, DiscountBreakdown, EstimateRow, FeeBreakdown, TeacherStanding, TierInfo,
};

// Display helpers
pub use format::{format_breakdown, format_rate, format_yen};
