//! Rebuilds `all.json` and `mini.json` from the CoinMarketCap listing API.
//!
//! ```bash
//! build-catalog --out-dir data --limit 10000
//! ```

use clap::Parser;
use currency_catalog::{
    builder::{write_outputs, CatalogBuilder},
    constants::{CMC_MAP_ALL_URL, CMC_PAGE_LIMIT},
    sources::HttpTransport,
    BuildError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Rebuild the currency catalog files
#[derive(Debug, Parser)]
#[command(name = "build-catalog", version, about)]
struct Cli {
    /// Directory receiving all.json and mini.json
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,

    /// Page size of the listing API
    #[arg(long, default_value_t = CMC_PAGE_LIMIT)]
    limit: usize,

    /// Listing endpoint
    #[arg(long, default_value = CMC_MAP_ALL_URL)]
    api_base: String,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

async fn run(cli: &Cli) -> Result<(), BuildError> {
    let transport = Arc::new(HttpTransport::new()?);
    let builder = CatalogBuilder::new(transport)
        .with_api_url(&cli.api_base)
        .with_page_limit(cli.limit);

    let currencies = builder.fetch_all().await?;
    write_outputs(&cli.out_dir, &currencies).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching currencies");
            ExitCode::FAILURE
        }
    }
}
