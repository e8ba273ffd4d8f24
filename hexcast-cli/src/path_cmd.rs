//! Path and spread commands
//!
//! ## Architecture
//!
//! - Level 1: run_path(), run_spread() - orchestration
//! - Level 2: search_config() - flags merged over an optional config file,
//!   weighted_only_flags() - switches an unweighted search ignores
//! - Level 3: bounded obstacle and cost callbacks

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use hexcast_core::{find_path, path_cost, spread, Hex, PathNode, Pathfinder, SearchConfig};

use crate::map::{GridMap, Terrain};
use crate::output::print_nodes;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Map JSON file
    #[arg(long, value_name = "FILE")]
    pub map: PathBuf,

    /// Start cell as q,r
    #[arg(long, allow_hyphen_values = true)]
    pub from: Hex,

    /// Goal cell as q,r
    #[arg(long, allow_hyphen_values = true)]
    pub to: Hex,

    /// Use the map's per-cell costs instead of unit steps
    #[arg(long)]
    pub weighted: bool,

    /// Search options JSON file (weighted searches)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Expand only forward directions (weighted searches)
    #[arg(long)]
    pub uniform_on_entry: bool,

    /// Cells further than this from the start are treated as walls
    #[arg(long, default_value = "64")]
    pub bound: i32,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SpreadArgs {
    #[arg(long, value_name = "FILE")]
    pub map: PathBuf,

    /// Start cell as q,r
    #[arg(long, allow_hyphen_values = true)]
    pub origin: Hex,

    /// Largest path cost reached
    #[arg(long, allow_hyphen_values = true)]
    pub range: i32,

    #[arg(long)]
    pub weighted: bool,

    /// Report cells as soon as they are discovered (weighted searches)
    #[arg(long)]
    pub permissive: bool,

    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub uniform_on_entry: bool,

    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run_path(args: PathArgs) -> Result<()> {
    let terrain = GridMap::load(&args.map)?.terrain();
    let (from, to, bound) = (args.from, args.to, args.bound);
    tracing::info!("Searching path {} -> {} (weighted: {})", from, to, args.weighted);

    let path = if args.weighted {
        let config = search_config(args.config.as_deref(), args.uniform_on_entry, false)?;
        Pathfinder::builder(from)
            .move_cost(|node: &PathNode, cell: Hex| bounded_cost(&terrain, from, bound, node, cell))
            .config(config)
            .build()?
            .path_to(to)
    } else {
        warn_ignored(&weighted_only_flags(args.config.is_some(), args.uniform_on_entry, false));
        find_path(from, to, |cell| bounded_obstacle(&terrain, from, bound, cell))
    };

    match path {
        Some(path) => {
            tracing::info!("Found path: {} steps, cost {}", path.len(), path_cost(&path));
            print_nodes(&path, args.json)
        }
        None => {
            tracing::warn!("No path from {} to {} within {} cells", from, to, bound);
            Ok(())
        }
    }
}

pub fn run_spread(args: SpreadArgs) -> Result<()> {
    let terrain = GridMap::load(&args.map)?.terrain();
    let origin = args.origin;

    let nodes: Vec<PathNode> = if args.weighted {
        let config = search_config(args.config.as_deref(), args.uniform_on_entry, args.permissive)?;
        Pathfinder::builder(origin)
            .move_cost(|node: &PathNode, cell: Hex| terrain.move_cost(node, cell))
            .config(config)
            .build()?
            .spread(args.range, config.permissive)
            .collect()
    } else {
        warn_ignored(&weighted_only_flags(args.config.is_some(), args.uniform_on_entry, args.permissive));
        spread(origin, args.range, |cell| terrain.is_obstacle(cell)).collect()
    };

    tracing::info!("Reached {} cells from {} within {}", nodes.len(), origin, args.range);
    print_nodes(&nodes, args.json)
}

// ============================================================================
// LEVEL 2 - CONFIGURATION
// ============================================================================

/// Load a `SearchConfig` file (if any) and apply command-line switches on top
pub fn search_config(path: Option<&Path>, uniform_on_entry: bool, permissive: bool) -> Result<SearchConfig> {
    let base = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read search config {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse search config {}", path.display()))?
        }
        None => SearchConfig::default(),
    };
    Ok(base
        .with_uniform_on_entry(base.uniform_on_entry || uniform_on_entry)
        .with_permissive(base.permissive || permissive))
}

/// Switches given on the command line that only a weighted search reads
fn weighted_only_flags(config: bool, uniform_on_entry: bool, permissive: bool) -> Vec<&'static str> {
    [
        (config, "--config"),
        (uniform_on_entry, "--uniform-on-entry"),
        (permissive, "--permissive"),
    ]
    .into_iter()
    .filter_map(|(given, flag)| given.then_some(flag))
    .collect()
}

fn warn_ignored(flags: &[&str]) {
    if !flags.is_empty() {
        tracing::warn!("{} only apply with --weighted, ignoring", flags.join(", "));
    }
}

// ============================================================================
// LEVEL 3 - CALLBACKS
// ============================================================================

fn bounded_obstacle(terrain: &Terrain, start: Hex, bound: i32, cell: Hex) -> bool {
    cell.distance_to(start) > bound || terrain.is_obstacle(cell)
}

fn bounded_cost(terrain: &Terrain, start: Hex, bound: i32, node: &PathNode, cell: Hex) -> u32 {
    if cell.distance_to(start) > bound {
        0
    } else {
        terrain.move_cost(node, cell)
    }
}
