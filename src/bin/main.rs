//! Caissa CLI - compose the analytical reports and print their SQL.
//!
//! Usage:
//!   caissa risky-openings [--min-games N] [--start-month MON-YYYY]
//!   caissa rating-gap [--low-white-elo N] [--start-date DD-MON-YYYY]
//!
//! Examples:
//!   caissa risky-openings --min-games 50 --fetch-rows 25
//!   caissa rating-gap --low-white-elo 1200 --high-white-elo 2900 --output json

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use caissa::config::QueryDefaults;
use caissa::report::{opening_risk_by_month, rating_gap_accuracy_by_year};

#[derive(Parser)]
#[command(name = "caissa")]
#[command(about = "Compose analytical SQL reports over the historical games table")]
#[command(version)]
struct Cli {
    /// Path to a TOML file with report defaults (overrides built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "sql")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Percentage of games played with qualifying openings, per month/year
    RiskyOpenings {
        /// Minimum decided games for an opening to qualify
        #[arg(long)]
        min_games: Option<u32>,

        /// Row cap for the win-rate and average-moves fragments
        #[arg(long)]
        fetch_rows: Option<u64>,

        /// First month of the window (MON-YYYY)
        #[arg(long)]
        start_month: Option<String>,

        /// Last month of the window (MON-YYYY)
        #[arg(long)]
        end_month: Option<String>,
    },

    /// Observed-over-expected outcome ratio per year, by Elo rating gap
    RatingGap {
        #[arg(long)]
        low_white_elo: Option<i64>,
        #[arg(long)]
        high_white_elo: Option<i64>,
        #[arg(long)]
        low_black_elo: Option<i64>,
        #[arg(long)]
        high_black_elo: Option<i64>,
        #[arg(long)]
        low_turn: Option<i64>,
        #[arg(long)]
        high_turn: Option<i64>,

        /// First event date of the window (DD-MON-YYYY)
        #[arg(long)]
        start_date: Option<String>,

        /// Last event date of the window (DD-MON-YYYY)
        #[arg(long)]
        end_date: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Print the SQL text
    Sql,
    /// Print a JSON object with the report name and SQL
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut defaults = match load_defaults(cli.config.as_deref()) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (name, sql) = match cli.command {
        Commands::RiskyOpenings {
            min_games,
            fetch_rows,
            start_month,
            end_month,
        } => {
            if let Some(v) = min_games {
                defaults.min_games = v;
            }
            if let Some(v) = fetch_rows {
                defaults.fetch_rows = v;
            }
            if let Some(v) = start_month {
                defaults.start_month = v;
            }
            if let Some(v) = end_month {
                defaults.end_month = v;
            }
            ("risky_openings", opening_risk_by_month(&defaults))
        }
        Commands::RatingGap {
            low_white_elo,
            high_white_elo,
            low_black_elo,
            high_black_elo,
            low_turn,
            high_turn,
            start_date,
            end_date,
        } => {
            if let Some(v) = low_white_elo {
                defaults.low_white_elo = v;
            }
            if let Some(v) = high_white_elo {
                defaults.high_white_elo = v;
            }
            if let Some(v) = low_black_elo {
                defaults.low_black_elo = v;
            }
            if let Some(v) = high_black_elo {
                defaults.high_black_elo = v;
            }
            if let Some(v) = low_turn {
                defaults.low_turn = v;
            }
            if let Some(v) = high_turn {
                defaults.high_turn = v;
            }
            if let Some(v) = start_date {
                defaults.start_date = v;
            }
            if let Some(v) = end_date {
                defaults.end_date = v;
            }
            ("rating_gap", rating_gap_accuracy_by_year(&defaults))
        }
    };

    match cli.output {
        OutputFormat::Sql => println!("{sql}"),
        OutputFormat::Json => {
            let payload = serde_json::json!({ "report": name, "sql": sql });
            println!("{payload}");
        }
    }

    ExitCode::SUCCESS
}

fn load_defaults(config: Option<&std::path::Path>) -> Result<QueryDefaults, caissa::config::ConfigError> {
    match config {
        Some(path) => QueryDefaults::from_file(path),
        None => QueryDefaults::load(),
    }
}
