use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "assetjet", about = "Daily price-history sync and indicator recompute pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch current prices and upsert today's row per asset
    Snapshot {
        /// Limit the run to one asset by symbol
        #[arg(long)]
        symbol: Option<String>,
        /// Limit the run to one asset by id (tried before the symbol)
        #[arg(long)]
        asset_id: Option<String>,
    },
    /// Backfill daily closes for one asset (symbol or asset id required)
    Backfill {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        asset_id: Option<String>,
        /// Days of history to request
        #[arg(long, default_value = "90")]
        days: u32,
    },
    /// Backfill the provider's recent daily OHLC window
    BackfillOhlc {
        /// Limit the run to one asset by symbol
        #[arg(long)]
        symbol: Option<String>,
        /// Limit the run to one asset by id (tried before the symbol)
        #[arg(long)]
        asset_id: Option<String>,
        #[arg(long, default_value = "14")]
        days: u32,
    },
    /// List the asset directory with provider mappings
    Assets,
    /// Seed an asset into the directory
    AssetAdd {
        /// Ticker symbol (stored uppercase, must be unique)
        symbol: String,
    },
    /// Show stored price rows for one asset, newest first
    History {
        symbol: String,
        #[arg(long, default_value = "30")]
        limit: usize,
    },
}
