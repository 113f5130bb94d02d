mod cli;

use clap::Parser;
use cli::Command;
use tracing::{debug, info};

use teachbid_fees::{format_breakdown, format_rate, format_yen, FeeConfig, FeeEngine, Result};

fn main() {
    let cli = cli::Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "fees command failed");
        std::process::exit(1);
    }
}

fn run(cli: cli::Cli) -> Result<()> {
    let engine = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "loading fee configuration");
            let raw = std::fs::read_to_string(path)?;
            let config: FeeConfig = serde_json::from_str(&raw)?;
            // Fails here, at the load boundary, if the table is malformed.
            FeeEngine::new(config)?
        }
        None => FeeEngine::default(),
    };

    match cli.command {
        Command::Breakdown(args) => {
            bail_on_invalid(&invalid_amount_errors(&engine, &[args.amount]));

            let standing = args.standing.to_standing();
            debug!(amount = args.amount, standing = ?standing, "computing breakdown");
            let breakdown = engine.fee_breakdown(args.amount, standing.as_ref())?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
            } else {
                print!("{}", format_breakdown(&breakdown));
            }
        }

        Command::Required(args) => {
            let standing = args.standing.to_standing();
            let amount = engine.required_amount(args.target_net, standing.as_ref())?;

            // The gross the student would be charged must itself be a valid
            // request amount before it is shown or used for a payment.
            bail_on_invalid(&invalid_amount_errors(&engine, &[amount]));

            let breakdown = engine.fee_breakdown(amount, standing.as_ref())?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
            } else {
                println!(
                    "Charge {} to net {} (target {})",
                    format_yen(amount),
                    format_yen(breakdown.net_amount),
                    format_yen(args.target_net)
                );
            }
        }

        Command::Tiers { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&engine.config().tiers)?);
            } else {
                for tier in &engine.config().tiers {
                    println!("{:20} {}", tier.label, format_rate(tier.rate));
                }
            }
        }

        Command::Estimate(args) => {
            bail_on_invalid(&invalid_amount_errors(&engine, &args.amounts));

            let standing = args.standing.to_standing();
            let rows = engine.earnings_estimate(&args.amounts, standing.as_ref())?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!(
                        "{:>12}  rate {:>6}  fees {:>12}  net {:>12}",
                        format_yen(row.amount),
                        format_rate(row.fee_rate),
                        format_yen(row.total_fees),
                        format_yen(row.net_amount)
                    );
                }
            }
        }

        Command::Validate(args) => {
            let validation = engine.validate_amount(args.amount);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&validation)?);
            } else if validation.is_valid {
                println!("{} is within the accepted range", format_yen(args.amount));
            } else {
                for msg in &validation.errors {
                    println!("invalid: {msg}");
                }
            }
            if !validation.is_valid {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Accumulated bound-check messages for a batch of amounts, empty when all
/// pass.
fn invalid_amount_errors(engine: &FeeEngine, amounts: &[i64]) -> Vec<String> {
    let mut errors = Vec::new();
    for &amount in amounts {
        for msg in engine.validate_amount(amount).errors {
            errors.push(format!("{}: {msg}", format_yen(amount)));
        }
    }
    errors
}

fn bail_on_invalid(errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    for msg in errors {
        eprintln!("error: {msg}");
    }
    std::process::exit(1);
}
