// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Fersch 3D quote CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use fersch_quote::cli::Reporter;
use fersch_quote::{
    io, MeshSummary, PricingConfig, QuoteBreakdown, QuoteEngine, Selection, ShippingMethod,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "fersch-quote")]
#[command(about = "Fersch 3D - STL measurement and 3D-print quotes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure an STL file and price it
    Quote {
        /// Input STL file
        input: PathBuf,

        /// Material name (defaults to the first configured material)
        #[arg(short, long)]
        material: Option<String>,

        /// Type of piece (defaults to the first configured one)
        #[arg(short, long)]
        type_piece: Option<String>,

        /// Packaging typology (defaults to the first configured one)
        #[arg(long)]
        typology: Option<String>,

        /// Number of identical parts
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Shipping method (pickup or delivery)
        #[arg(short, long, default_value = "pickup")]
        shipping: ShippingMethod,

        /// Pricing file (TOML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print volume and bounding box of an STL file
    Measure {
        /// Input STL file
        input: PathBuf,

        /// Print the measurements as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the materials, type pieces and typologies of a pricing file
    Catalog {
        /// Pricing file (TOML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

/// JSON shape of `quote --json`
#[derive(Serialize)]
struct QuoteOutput<'a> {
    volume_ml: f64,
    largest_dimension_mm: f64,
    #[serde(flatten)]
    quote: &'a QuoteBreakdown,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Quote {
            input,
            material,
            type_piece,
            typology,
            quantity,
            shipping,
            config,
            json,
        } => {
            let pricing = PricingConfig::load(config.as_deref())?;
            let selection = pricing
                .default_selection(material, type_piece, typology)?
                .quantity(quantity)
                .shipping(shipping);
            quote_command(&input, pricing, selection, json)?;
        }
        Commands::Measure { input, json } => {
            measure_command(&input, json)?;
        }
        Commands::Catalog { config } => {
            let pricing = PricingConfig::load(config.as_deref())?;
            pricing.check();
            Reporter::report_catalog(&pricing);
        }
        Commands::Version => {
            println!("Fersch Quote v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn ensure_input(input: &Path) {
    if !input.exists() {
        Reporter::report_error(&format!("Input file not found: {}", input.display()));
        std::process::exit(1);
    }
}

fn quote_command(
    input: &Path,
    pricing: PricingConfig,
    selection: Selection,
    json: bool,
) -> Result<()> {
    ensure_input(input);

    let engine = QuoteEngine::new(pricing);
    let start = std::time::Instant::now();
    let (summary, quote) = match engine.quote_stl_file(input, selection.clone()) {
        Ok(result) => result,
        Err(err) => {
            Reporter::report_error(&format!("{:#}", err));
            std::process::exit(1);
        }
    };
    info!(elapsed = ?start.elapsed(), "quote computed");

    if json {
        let output = QuoteOutput {
            volume_ml: summary.volume_ml,
            largest_dimension_mm: summary.largest_dimension_mm(),
            quote: &quote,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        Reporter::report_quote(&input.display().to_string(), &summary, &selection, &quote);
    }

    Ok(())
}

fn measure_command(input: &Path, json: bool) -> Result<()> {
    ensure_input(input);

    let summary: MeshSummary = io::load_mesh_summary(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        Reporter::report_measure(&input.display().to_string(), &summary);
    }

    Ok(())
}
