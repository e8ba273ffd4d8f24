//! Benchmark command - time searches and sight on a random map
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: generate_map(), run_benchmarks(), report_results()
//! - Level 3: benchmark_paths(), benchmark_weighted(), benchmark_sight()
//! - Level 4: timing utilities, formatting

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use hexcast_core::{find_path, line_of_sight, path_cost, within_range, Hex, PathNode, Pathfinder};

use crate::map::{CellValue, GridMap, Terrain};
use crate::output::print_records;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args, Debug)]
pub struct BenchmarkArgs {
    /// Radius of the generated map
    #[arg(long, default_value = "30")]
    pub radius: u32,

    /// Fraction of cells turned into walls (0.0-1.0)
    #[arg(long, default_value = "0.2")]
    pub density: f64,

    /// Number of queries per benchmark
    #[arg(long, default_value = "200")]
    pub searches: usize,

    /// Furthest ring examined by sight queries
    #[arg(long, default_value = "12")]
    pub sight_radius: i32,

    /// Random seed (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the generated map to this file
    #[arg(long, value_name = "FILE")]
    pub save_map: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Timing of one query family
#[derive(Debug, Serialize)]
struct BenchmarkResult {
    name: &'static str,
    queries: usize,
    total_ms: f64,
    per_query_us: f64,
    notes: String,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
///
/// 1. Generate a random walled map (optionally saved)
/// 2. Pick query endpoints on open floor
/// 3. Time each query family on the rayon pool
/// 4. Report all results
pub fn run(args: BenchmarkArgs) -> Result<()> {
    if !(0.0..1.0).contains(&args.density) {
        anyhow::bail!("Wall density must be in [0, 1), got {}", args.density);
    }
    tracing::info!(
        "Starting benchmarks on {}: radius {}, density {:.2}, {} queries",
        get_system_info(),
        args.radius,
        args.density,
        args.searches
    );

    let mut rng = create_rng(args.seed);
    let map = generate_map(&mut rng, args.radius, args.density);
    if let Some(path) = &args.save_map {
        map.save(path)?;
        tracing::info!("Saved generated map to {}", path.display());
    }
    let terrain = map.terrain();
    let pairs = pick_endpoints(&mut rng, &terrain, args.radius, args.searches);
    if pairs.is_empty() {
        anyhow::bail!("Generated map has no open cells");
    }

    let results = run_benchmarks(&terrain, &pairs, args.sight_radius);
    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Random map with walls and rough ground
fn generate_map(rng: &mut ChaCha8Rng, radius: u32, density: f64) -> GridMap {
    let mut map = GridMap {
        name: "benchmark".to_string(),
        radius: Some(radius),
        ..Default::default()
    };
    for cell in within_range(Hex::ORIGIN, radius as i32, false) {
        if rng.gen_bool(density) {
            map.walls.push(cell);
        } else if rng.gen_bool(0.25) {
            map.costs.push(CellValue {
                cell,
                value: rng.gen_range(2..=5),
            });
        }
    }
    tracing::debug!("Generated map with {} walls", map.walls.len());
    map
}

/// Random (start, goal) pairs on open floor
fn pick_endpoints(rng: &mut ChaCha8Rng, terrain: &Terrain, radius: u32, count: usize) -> Vec<(Hex, Hex)> {
    let open: Vec<Hex> = within_range(Hex::ORIGIN, radius as i32, false)
        .filter(|cell| !terrain.is_obstacle(*cell))
        .collect();
    if open.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|_| (open[rng.gen_range(0..open.len())], open[rng.gen_range(0..open.len())]))
        .collect()
}

fn run_benchmarks(terrain: &Terrain, pairs: &[(Hex, Hex)], sight_radius: i32) -> Vec<BenchmarkResult> {
    tracing::info!("Benchmarking unit-cost paths...");
    let paths = benchmark_paths(terrain, pairs);
    tracing::info!("Benchmarking weighted paths...");
    let weighted = benchmark_weighted(terrain, pairs);
    tracing::info!("Benchmarking line of sight (radius {})...", sight_radius);
    let sight = benchmark_sight(terrain, pairs, sight_radius);
    vec![paths, weighted, sight]
}

/// Report all benchmark results, as a table or a JSON array
fn report_results(results: &[BenchmarkResult], json: bool) -> Result<()> {
    if !json {
        println!(
            "{:<16} {:>8} {:>12} {:>12}  {}",
            "Benchmark", "Queries", "Total ms", "us/query", "Notes"
        );
    }
    print_records(results, json, format_result)
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn benchmark_paths(terrain: &Terrain, pairs: &[(Hex, Hex)]) -> BenchmarkResult {
    let start = Instant::now();
    let lengths: Vec<Option<usize>> = pairs
        .par_iter()
        .map(|&(from, to)| find_path(from, to, |cell| terrain.is_obstacle(cell)).map(|path| path.len()))
        .collect();
    let total_time = start.elapsed();

    let found: Vec<usize> = lengths.into_iter().flatten().collect();
    make_result(
        "BFS paths",
        pairs.len(),
        total_time,
        format!("Found {}/{}, avg length {:.1}", found.len(), pairs.len(), mean(&found)),
    )
}

fn benchmark_weighted(terrain: &Terrain, pairs: &[(Hex, Hex)]) -> BenchmarkResult {
    let start = Instant::now();
    let costs: Vec<Option<u32>> = pairs
        .par_iter()
        .map(|&(from, to)| {
            Pathfinder::new(from, |node: &PathNode, cell: Hex| terrain.move_cost(node, cell))
                .path_to(to)
                .map(|path| path_cost(&path))
        })
        .collect();
    let total_time = start.elapsed();

    let found: Vec<usize> = costs.into_iter().flatten().map(|c| c as usize).collect();
    make_result(
        "Weighted paths",
        pairs.len(),
        total_time,
        format!("Found {}/{}, avg cost {:.1}", found.len(), pairs.len(), mean(&found)),
    )
}

fn benchmark_sight(terrain: &Terrain, pairs: &[(Hex, Hex)], radius: i32) -> BenchmarkResult {
    let start = Instant::now();
    let counts: Vec<usize> = pairs
        .par_iter()
        .map(|&(origin, _)| {
            line_of_sight(origin, |cell| terrain.transparency(cell))
                .take_while(|cell| cell.distance_to(origin) <= radius)
                .count()
        })
        .collect();
    let total_time = start.elapsed();

    make_result(
        "Line of sight",
        pairs.len(),
        total_time,
        format!("Avg visible {:.1}", mean(&counts)),
    )
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn make_result(name: &'static str, queries: usize, total_time: Duration, notes: String) -> BenchmarkResult {
    let secs = total_time.as_secs_f64();
    BenchmarkResult {
        name,
        queries,
        total_ms: secs * 1_000.0,
        per_query_us: if queries > 0 { secs * 1_000_000.0 / queries as f64 } else { 0.0 },
        notes,
    }
}

fn mean(values: &[usize]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<usize>() as f64 / values.len() as f64
    }
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn get_system_info() -> String {
    format!(
        "hexcast {}, {} threads",
        env!("CARGO_PKG_VERSION"),
        rayon::current_num_threads()
    )
}

fn format_result(result: &BenchmarkResult) -> String {
    format!(
        "{:<16} {:>8} {:>12.1} {:>12.1}  {}",
        result.name, result.queries, result.total_ms, result.per_query_us, result.notes
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_map_is_reproducible() {
        let a = generate_map(&mut create_rng(Some(3)), 6, 0.3);
        let b = generate_map(&mut create_rng(Some(3)), 6, 0.3);
        assert_eq!(a, b);
        assert!(a.walls.iter().all(|cell| cell.axial_length() <= 6));
    }

    #[test]
    fn test_endpoints_avoid_walls() {
        let mut rng = create_rng(Some(11));
        let terrain = generate_map(&mut rng, 8, 0.4).terrain();
        let pairs = pick_endpoints(&mut rng, &terrain, 8, 50);
        assert_eq!(pairs.len(), 50);
        for (from, to) in pairs {
            assert!(!terrain.is_obstacle(from));
            assert!(!terrain.is_obstacle(to));
        }
    }

    #[test]
    fn test_benchmarks_run() {
        let mut rng = create_rng(Some(5));
        let terrain = generate_map(&mut rng, 6, 0.2).terrain();
        let pairs = pick_endpoints(&mut rng, &terrain, 6, 10);
        let results = run_benchmarks(&terrain, &pairs, 4);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.queries == 10));
    }

    #[test]
    fn test_result_timings() {
        let result = make_result("BFS paths", 4, Duration::from_millis(2), "ok".to_string());
        assert!((result.total_ms - 2.0).abs() < 1e-9);
        assert!((result.per_query_us - 500.0).abs() < 1e-6);

        let line = format_result(&result);
        assert!(line.starts_with("BFS paths"));
        assert!(line.contains("500.0"));
        assert!(line.ends_with("  ok"));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["name"], "BFS paths");
        assert_eq!(json["queries"], 4);

        let idle = make_result("Line of sight", 0, Duration::ZERO, String::new());
        assert_eq!(idle.per_query_us, 0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2, 4]), 3.0);
    }
}
