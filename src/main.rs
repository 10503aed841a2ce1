use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use order_extractor::catalog::{Catalog, SAMPLE_ORDER_EMAIL};
use order_extractor::config::AppConfig;
use order_extractor::errors::{error_logging, AppError};
use order_extractor::observability;
use order_extractor::pairing::PairingStrategy;
use order_extractor::OrderExtractor;
use tracing::info;

/// Extract product quantities from a purchase email as JSON
///
/// Matches the built-in product catalog against the email and prints a JSON
/// object mapping each product to its quantity, plus `"flag": 0`.
#[derive(Parser, Debug)]
#[command(name = "order-extractor", version, about)]
struct Cli {
    /// Email to read; `-` reads stdin. Defaults to the bundled sample email.
    input: Option<PathBuf>,

    /// Minimum similarity (0-100) for a catalog entry to match
    #[arg(long)]
    score_cutoff: Option<f64>,

    /// Pairing strategy: `positional` or `nearest`
    #[arg(long)]
    pairing: Option<PairingStrategy>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

/// Load and validate configuration, applying command line overrides
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config =
        AppConfig::from_env().context("Failed to load configuration from environment")?;

    if let Some(cutoff) = cli.score_cutoff {
        config.extractor.score_cutoff = cutoff;
    }
    if let Some(pairing) = cli.pairing {
        config.extractor.pairing = pairing;
    }

    config.validate().map_err(|e| {
        anyhow::anyhow!("Configuration validation failed: {}. Please check your environment and flags.", e)
    })?;
    Ok(config)
}

/// Read the email text from the requested source
fn read_document(input: Option<&PathBuf>) -> Result<String> {
    match input {
        None => Ok(SAMPLE_ORDER_EMAIL.to_string()),
        Some(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(AppError::from)
                .context("Failed to read email from stdin")?;
            Ok(text)
        }
        Some(path) => std::fs::read_to_string(path)
            .inspect_err(|e| {
                error_logging::log_filesystem_error(e, "read_document", path.to_str());
            })
            .map_err(AppError::from)
            .with_context(|| format!("Failed to read email from {}", path.display())),
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    observability::init_tracing_with_config(&config.observability)?;
    info!("{}", config.summary());

    let text = read_document(cli.input.as_ref())?;
    let extractor = OrderExtractor::with_config(Catalog::default(), config.extractor);
    let result = extractor
        .run(&text)
        .map_err(AppError::from)
        .context("Order extraction failed")?;

    let json = if cli.pretty {
        result.to_json_pretty()?
    } else {
        result.to_json()?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()?;
    Ok(())
}
