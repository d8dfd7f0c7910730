//! UDTswap CLI - transaction verification and quoting
//!
//! Runs the pool, pool lock and liquidity token validators over a
//! JSON-encoded transaction, and computes swap and liquidity quotes with the
//! same rounding the validators enforce.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod config;
mod quote;
mod verify;

#[derive(Parser)]
#[command(name = "udtswap")]
#[command(about = "UDTswap CLI - Verify pool transactions and compute quotes", long_about = None)]
#[command(version)]
struct Cli {
    /// Protocol config file (TOML); required by `verify`, fee defaults otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every UDTswap script of a transaction
    Verify {
        /// Transaction JSON file
        #[arg(short, long)]
        tx: PathBuf,
    },

    /// Compute amounts the validators accept
    Quote {
        #[command(subcommand)]
        command: QuoteCommands,
    },

    /// Print the effective protocol config as TOML
    Config,
}

#[derive(Subcommand)]
enum QuoteCommands {
    /// Swap quote, from either side
    Swap {
        /// Reserve of the asset paid in (baseline excluded)
        #[arg(long)]
        in_reserve: u128,

        /// Reserve of the asset paid out (baseline excluded)
        #[arg(long)]
        out_reserve: u128,

        /// Exact amount paid in
        #[arg(long)]
        amount_in: Option<u128>,

        /// Exact amount received
        #[arg(long)]
        amount_out: Option<u128>,
    },

    /// Deposit quote
    Add {
        #[arg(long)]
        reserve_a: u128,

        #[arg(long)]
        reserve_b: u128,

        /// Total liquidity token supply
        #[arg(long)]
        liquidity: u128,

        /// Asset A deposited
        #[arg(long)]
        amount_a: u128,
    },

    /// Withdrawal quote
    Remove {
        #[arg(long)]
        reserve_a: u128,

        #[arg(long)]
        reserve_b: u128,

        /// Total liquidity token supply
        #[arg(long)]
        liquidity: u128,

        /// Liquidity tokens burned
        #[arg(long)]
        burned: u128,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let protocol = config::load_protocol_config(cli.config.as_deref())?;

    if cli.verbose {
        let source = cli
            .config
            .as_ref()
            .map_or_else(|| "defaults".to_string(), |path| path.display().to_string());
        println!("{} {}", "Config:".bright_cyan(), source);
        println!("{} {}", "Max pool groups:".bright_cyan(), protocol.max_pool_groups);
    }

    match cli.command {
        Commands::Verify { tx } => {
            if cli.config.is_none() {
                anyhow::bail!(
                    "verify needs the deployed script code hashes\n\
                     Write a template with: udtswap config > udtswap.toml"
                );
            }
            verify::verify_command(&tx, &protocol)?;
        }
        Commands::Quote { command } => match command {
            QuoteCommands::Swap { in_reserve, out_reserve, amount_in, amount_out } => {
                quote::swap_command(&protocol, in_reserve, out_reserve, amount_in, amount_out)?;
            }
            QuoteCommands::Add { reserve_a, reserve_b, liquidity, amount_a } => {
                quote::add_command(reserve_a, reserve_b, liquidity, amount_a)?;
            }
            QuoteCommands::Remove { reserve_a, reserve_b, liquidity, burned } => {
                quote::remove_command(reserve_a, reserve_b, liquidity, burned)?;
            }
        },
        Commands::Config => print!("{}", config::render_protocol_config(&protocol)?),
    }

    Ok(())
}
