use assetjet::application::sync::AssetSelector;
use assetjet::cli::commands::{Cli, Commands};
use assetjet::AssetJet;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let db_path = std::env::var("ASSETJET_DB").unwrap_or_else(|_| "./assetjet.db".into());

    let aj = match AssetJet::new(&db_path) {
        Ok(aj) => aj,
        Err(e) => {
            eprintln!("Error initializing AssetJet: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(aj, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn selector(symbol: Option<String>, asset_id: Option<String>) -> Option<AssetSelector> {
    if symbol.is_none() && asset_id.is_none() {
        return None;
    }
    Some(AssetSelector { asset_id, symbol })
}

async fn run_command(aj: AssetJet, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Snapshot { symbol, asset_id } => {
            let sel = selector(symbol, asset_id);
            let result = aj.snapshot(sel.as_ref()).await?;
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
        }
        Commands::Backfill {
            symbol,
            asset_id,
            days,
        } => {
            let sel = AssetSelector { asset_id, symbol };
            let result = aj.backfill(&sel, days).await?;
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
        }
        Commands::BackfillOhlc {
            symbol,
            asset_id,
            days,
        } => {
            let sel = selector(symbol, asset_id);
            let result = aj.backfill_ohlc(sel.as_ref(), days).await?;
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
        }
        Commands::Assets => {
            let assets = aj.assets()?;
            println!("{}", serde_json::to_string_pretty(&assets).unwrap());
        }
        Commands::AssetAdd { symbol } => {
            let asset = aj.add_asset(&symbol)?;
            println!("{}", serde_json::to_string_pretty(&asset).unwrap());
        }
        Commands::History { symbol, limit } => {
            let rows = aj.history(&symbol, Some(limit))?;
            println!("{}", serde_json::to_string_pretty(&rows).unwrap());
        }
    }
    Ok(())
}
