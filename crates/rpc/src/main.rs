//! TollChain CLI - Main entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tollchain_crypto::{CipherKey, DEFAULT_KEY_ENV_VAR};
use tollchain_rpc::{commands, AppConfig, AppContext, OverspeedPolicy};

#[derive(Parser)]
#[command(name = "tollchain")]
#[command(about = "TollChain - Toll decisions on an encrypted hash-chained ledger", long_about = None)]
struct Cli {
    /// Environment variable holding the 64-hex-char cipher key
    #[arg(long, global = true, default_value = DEFAULT_KEY_ENV_VAR)]
    key_env: String,

    /// Use the INSECURE built-in demo key when the key variable is unset
    #[arg(long, global = true)]
    insecure_demo_key: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fresh cipher key
    Keygen,

    /// Print the decision for each event in a file
    Evaluate {
        /// JSON array, JSON-lines, or `.csv` trip dataset
        file: PathBuf,
        /// JSON rows are trip records (plate, speed_kmph, ...); implied for `.csv`
        #[arg(long)]
        trips: bool,
    },

    /// Ingest, evaluate, dispatch, mine and print the ledger export
    Run {
        /// JSON array, JSON-lines, or `.csv` trip dataset
        file: PathBuf,
        /// JSON rows are trip records (plate, speed_kmph, ...); implied for `.csv`
        #[arg(long)]
        trips: bool,
        /// How to answer gates that wait for the driver
        #[arg(long, value_enum, default_value_t = OverspeedPolicy::Skip)]
        overspeed: OverspeedPolicy,
    },
}

fn main() -> anyhow::Result<()> {
    // stdout carries JSON only
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen => {
            let key = CipherKey::generate();
            println!("{}", key.to_hex());
            eprintln!("To use: export {}=<key>", cli.key_env);
        }

        Commands::Evaluate { file, trips } => {
            let events = commands::load_events(&file, trips)?;
            commands::print_decisions(&events)?;
        }

        Commands::Run {
            file,
            trips,
            overspeed,
        } => {
            let config = AppConfig {
                key_env_var: cli.key_env,
                allow_insecure_demo_key: cli.insecure_demo_key,
                overspeed_policy: overspeed,
            };
            let ctx = AppContext::from_config(&config)?;

            let events = commands::load_events(&file, trips)?;
            let summary = commands::run(&ctx, events, config.overspeed_policy)?;
            eprintln!(
                "Processed {} (pending {}, quarantined {}), skipped {}, invalid {}",
                summary.processed,
                summary.pending,
                summary.quarantined,
                summary.skipped,
                summary.invalid
            );

            println!("{}", serde_json::to_string_pretty(&ctx.export())?);
        }
    }

    Ok(())
}
