//! Footprint CLI
//!
//! Serve, filter and summarize building footprint GeoJSON from the command line.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use footprint_api::{ApiConfig, ApiServer};
use footprint_core::constants::DEFAULT_DATA_FILE;
use footprint_core::types::BuildingQuery;
use footprint_engine::{CacheConfig, QueryEngine};

/// Footprint - cached queries over building footprint GeoJSON
#[derive(Parser)]
#[command(name = "footprint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// GeoJSON feature collection to serve
        #[arg(short, long, env = "FOOTPRINT_DATA", default_value = DEFAULT_DATA_FILE)]
        data: PathBuf,
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "3000")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Filter buildings and print the matching feature collection
    Query {
        /// GeoJSON feature collection to query
        #[arg(short, long, env = "FOOTPRINT_DATA", default_value = DEFAULT_DATA_FILE)]
        data: PathBuf,
        /// Minimum height, inclusive
        #[arg(long, allow_negative_numbers = true)]
        min_height: Option<f64>,
        /// Exact building type
        #[arg(long = "type")]
        building_type: Option<String>,
        /// Bounding box: minLon,minLat,maxLon,maxLat
        #[arg(long, allow_hyphen_values = true)]
        bbox: Option<String>,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Print summary statistics
    Summary {
        /// GeoJSON feature collection to summarize
        #[arg(short, long, env = "FOOTPRINT_DATA", default_value = DEFAULT_DATA_FILE)]
        data: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "footprint=debug,info"
    } else {
        "footprint=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Serve { data, port, bind } => cmd_serve(data, port, &bind).await,
        Commands::Query {
            data,
            min_height,
            building_type,
            bbox,
            pretty,
        } => {
            let query = BuildingQuery {
                min_height,
                building_type,
                bbox,
            };
            cmd_query(&data, &query, pretty)
        }
        Commands::Summary { data } => cmd_summary(&data),
    }
}

fn load_engine(data: &Path, cache: CacheConfig) -> Result<QueryEngine> {
    let start = Instant::now();
    let engine = QueryEngine::load(data, cache)
        .with_context(|| format!("Failed to load {}", data.display()))?;
    debug!(elapsed = ?start.elapsed(), "Engine ready");
    Ok(engine)
}

/// Run the API server
async fn cmd_serve(data: PathBuf, port: u16, bind: &str) -> Result<()> {
    println!("{}", "🏙  Starting Footprint API server...".cyan().bold());

    let config = ApiConfig::from_env().with_data_path(data);
    let engine = load_engine(&config.data_path, config.cache.clone())?;

    println!(
        "   {} {} ({} buildings)",
        "Data:".green(),
        config.data_path.display(),
        engine.stats().features_loaded
    );
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("\n   Press Ctrl+C to stop.\n");

    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    ApiServer::new(config, Arc::new(engine)).run(addr).await?;
    Ok(())
}

/// Filter buildings once and print the result to stdout
fn cmd_query(data: &Path, query: &BuildingQuery, pretty: bool) -> Result<()> {
    let engine = load_engine(data, CacheConfig::disabled())?;

    let buildings = engine
        .filter_buildings(query)
        .with_context(|| format!("Query failed ({})", query.cache_key()))?;

    let json = if pretty {
        serde_json::to_string_pretty(&*buildings)?
    } else {
        serde_json::to_string(&*buildings)?
    };
    println!("{}", json);

    eprintln!(
        "{} {} of {} buildings",
        "✓ Matched".green().bold(),
        buildings.len(),
        engine.stats().features_loaded
    );
    Ok(())
}

/// Print summary statistics
fn cmd_summary(data: &Path) -> Result<()> {
    let engine = load_engine(data, CacheConfig::disabled())?;
    let summary = engine.get_summary()?;

    println!("{}", "📊 Building summary".cyan().bold());
    println!("   {} {}", "Total buildings:".green(), summary.total_buildings);

    if !summary.types.is_empty() {
        println!("\n   {}", "By type:".bold());
        for (building_type, count) in &summary.types {
            println!("     {:<20} {}", building_type, count);
        }
    }

    let stats = &summary.height_stats;
    println!("\n   {}", "Height:".bold());
    println!("     {:<20} {}", "min", stats.min);
    println!("     {:<20} {}", "max", stats.max);
    println!("     {:<20} {:.2}", "avg", stats.avg);

    Ok(())
}
