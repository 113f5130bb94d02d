use clap::{Args, Parser, Subcommand};

/// fees — TeachBid commission and payout calculator.
#[derive(Parser, Debug)]
#[command(name = "fees", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Load an alternate fee configuration from a JSON file
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the fee breakdown for a gross amount
    Breakdown(BreakdownArgs),

    /// Find the minimal gross amount reaching a target net payout
    Required(RequiredArgs),

    /// Print the commission tier table
    Tiers {
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Earnings estimate rows for several candidate amounts
    Estimate(EstimateArgs),

    /// Check an amount against the configured request bounds
    Validate(ValidateArgs),
}

/// Teacher-standing flags shared by the calculation subcommands.
#[derive(Args, Debug)]
pub struct StandingArgs {
    /// Teacher's completed transaction count
    #[arg(long)]
    pub transactions: Option<u32>,

    /// Teacher is identity-verified
    #[arg(long)]
    pub verified: bool,

    /// Teacher's average rating (0–5)
    #[arg(long)]
    pub rating: Option<f64>,
}

#[derive(Args, Debug)]
pub struct BreakdownArgs {
    /// Gross transaction amount in yen
    pub amount: i64,

    #[command(flatten)]
    pub standing: StandingArgs,

    /// Output as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RequiredArgs {
    /// Target net payout in yen
    pub target_net: i64,

    #[command(flatten)]
    pub standing: StandingArgs,

    /// Output as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Gross transaction amount in yen
    pub amount: i64,

    /// Output as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Candidate gross amounts in yen
    #[arg(required = true)]
    pub amounts: Vec<i64>,

    #[command(flatten)]
    pub standing: StandingArgs,

    /// Output as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl StandingArgs {
    /// Build a `TeacherStanding` when any standing flag was given.
    pub fn to_standing(&self) -> Option<teachbid_fees::TeacherStanding> {
        if self.transactions.is_none() && !self.verified && self.rating.is_none() {
            return None;
        }
        Some(teachbid_fees::TeacherStanding {
            // Absent count is treated as an established teacher.
            transaction_count: self
                .transactions
                .unwrap_or(teachbid_fees::NEW_TEACHER_TRANSACTION_THRESHOLD),
            is_verified: self.verified,
            rating: self.rating.unwrap_or(0.0),
        })
    }
}
