//! Commodity option PV command line
//!
//! ```text
//! commodity-pv [--store PATH] [--config PATH] upload <records.json>
//! commodity-pv [--store PATH] [--config PATH] record <ASSET> <PRICE>
//! commodity-pv [--store PATH] [--config PATH] latest
//! commodity-pv [--store PATH] [--config PATH] pv [--as-of DATE] "<description>"...
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr (`RUST_LOG`).

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commodity_pv::prelude::*;

/// Black-76 PV of commodity options from the latest futures prices
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Price history file (JSON lines)
    #[arg(long, global = true, default_value = "./data/market.jsonl")]
    store: PathBuf,

    /// Pricing config file (JSON); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append a JSON array of {timestamp, asset, price}
    Upload {
        /// Path to the records file
        file: PathBuf,
    },

    /// Append one price stamped now
    Record {
        /// Asset code, e.g. BRN
        asset: String,
        /// Futures price
        price: f64,
    },

    /// Print the latest price per asset
    Latest,

    /// Price option descriptions, e.g. "BRN Jan24 Call Strike 100 USD/BBL"
    Pv {
        /// Measure maturities from this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<NaiveDate>,

        #[arg(required = true)]
        descriptions: Vec<String>,
    },
}

fn write_json<T: serde::Serialize>(out: &mut impl Write, value: &T) -> PvResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| PvError::invalid_input(format!("cannot encode output: {}", e)))?;
    writeln!(out, "{}", json).map_err(StoreError::from)?;
    Ok(())
}

fn run(cli: Cli, out: &mut impl Write) -> PvResult<()> {
    let config = match &cli.config {
        Some(path) => PricingConfig::from_json_file(path)?,
        None => PricingConfig::default(),
    };

    let service = PricingService::new(PriceHistory::open(&cli.store)?, config)?;

    let result = match &cli.command {
        Command::Upload { file } => {
            let file = File::open(file).map_err(StoreError::from)?;
            let records: Vec<PriceRecord> =
                serde_json::from_reader(BufReader::new(file)).map_err(StoreError::from)?;
            service.upload_price_records(&records)?;
            write_json(out, &records.len())
        }
        Command::Record { asset, price } => {
            service.upload_price_records(&[PriceRecord::now(asset.as_str(), *price)])?;
            write_json(out, &1)
        }
        Command::Latest => write_json(out, &service.fetch_latest_prices()?),
        Command::Pv {
            as_of,
            descriptions,
        } => {
            let pv = match as_of {
                Some(today) => service.calculate_pv_as_of(descriptions, *today)?,
                None => service.calculate_pv(descriptions)?,
            };
            write_json(out, &pv)
        }
    };

    service.into_store().close()?;
    result
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run(cli, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
