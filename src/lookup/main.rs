//! Lookup CLI for the location grid resolver.
//!
//! Loads a region table, builds the in-memory candidate index, and resolves
//! a longitude/latitude to a region, printing the result as JSON.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use location_grid::models::AdminLevel;
use location_grid::resolve::GridResolver;
use location_grid::source::{load_regions, MemoryRegionIndex, MirrorFetcher};

use crate::config::Config;

const DEFAULT_MIRROR: &str = "https://storage.googleapis.com/location-grid-mirror/";

#[derive(Parser, Debug)]
#[command(name = "lookup")]
#[command(about = "Resolve a longitude/latitude against a location grid")]
struct Args {
    /// Longitude of the query point
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Latitude of the query point
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// ISO country code hint (narrows the candidate query)
    #[arg(long)]
    country_code: Option<String>,

    /// Exact admin level to query (admin0..admin5)
    #[arg(long)]
    level: Option<AdminLevel>,

    /// Region table CSV
    #[arg(long)]
    regions: Option<PathBuf>,

    /// Local geometry folder checked before the mirror
    #[arg(long)]
    geometry_dir: Option<PathBuf>,

    /// Boundary mirror base URL
    #[arg(long)]
    mirror: Option<String>,

    /// Optional TOML config file (flags take precedence)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the broader candidate scan instead of resolving
    #[arg(long)]
    possible: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    let regions_path = args
        .regions
        .clone()
        .or(config.regions)
        .context("no region table given (--regions or config file)")?;
    let mirror_url = args
        .mirror
        .clone()
        .or(config.mirror_url)
        .unwrap_or_else(|| DEFAULT_MIRROR.to_string());
    let geometry_dir = args.geometry_dir.clone().or(config.geometry_dir);

    info!("Loading region table from {}", regions_path.display());
    let regions = load_regions(&regions_path)?;

    let index = MemoryRegionIndex::build(regions);
    let fetcher = MirrorFetcher::new(mirror_url, geometry_dir);
    let resolver = GridResolver::new(index, fetcher);

    if args.possible {
        let matches = resolver.possible_matches(args.lon, args.lat).await?;
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    let resolved = resolver
        .resolve(
            args.lon,
            args.lat,
            args.country_code.as_deref(),
            args.level,
        )
        .await?;

    match &resolved {
        Some(region) => info!("Resolved to {} (grid id {})", region.name, region.grid_id),
        None => info!("No region found"),
    }

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
