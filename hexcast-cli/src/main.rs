//! HEXCAST CLI - Command-line interface
//!
//! Commands:
//! - range, rect, ring, line: print the cells of a shape
//! - sight, radiate: visibility and light over a map file
//! - path, spread: searches over a map file
//! - benchmark: time queries on a random map

mod benchmark;
mod map;
mod output;
mod path_cmd;
mod shape_cmd;
mod sight_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hexcast")]
#[command(about = "Hex grid ranges, line of sight and pathfinding")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Cells within a distance of a centre
    Range(shape_cmd::RangeArgs),
    /// Cells inside an offset-coordinate rectangle
    Rect(shape_cmd::RectArgs),
    /// Cells at exactly one distance, walked counter-clockwise
    Ring(shape_cmd::RingArgs),
    /// Cells crossed by a straight segment
    Line(shape_cmd::LineArgs),
    /// Cells visible from a viewer
    Sight(sight_cmd::SightArgs),
    /// Light spreading from an emitter
    Radiate(sight_cmd::RadiateArgs),
    /// Best path between two cells
    Path(path_cmd::PathArgs),
    /// Every cell reachable within a cost
    Spread(path_cmd::SpreadArgs),
    /// Time queries on a random map
    Benchmark(benchmark::BenchmarkArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Range(args) => shape_cmd::run_range(args),
        Commands::Rect(args) => shape_cmd::run_rect(args),
        Commands::Ring(args) => shape_cmd::run_ring(args),
        Commands::Line(args) => shape_cmd::run_line(args),
        Commands::Sight(args) => sight_cmd::run_sight(args),
        Commands::Radiate(args) => sight_cmd::run_radiate(args),
        Commands::Path(args) => path_cmd::run_path(args),
        Commands::Spread(args) => path_cmd::run_spread(args),
        Commands::Benchmark(args) => benchmark::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use hexcast_core::Hex;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_range_with_negative_centre() {
        let cli = Cli::try_parse_from(["hexcast", "range", "--center", "-2,3", "--radius", "4", "--border"]).unwrap();
        match cli.command {
            Commands::Range(args) => {
                assert_eq!(args.center, Hex::new(-2, 3));
                assert_eq!(args.radius, 4);
                assert!(args.border);
                assert!(!args.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_path() {
        let cli = Cli::try_parse_from([
            "hexcast", "path", "--map", "arena.json", "--from", "0,0", "--to", "5,-2", "--weighted",
        ])
        .unwrap();
        match cli.command {
            Commands::Path(args) => {
                assert_eq!(args.to, Hex::new(5, -2));
                assert!(args.weighted);
                assert_eq!(args.bound, 64);
                assert!(args.config.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_coordinate() {
        let result = Cli::try_parse_from(["hexcast", "ring", "--center", "north", "--radius", "2"]);
        assert!(result.is_err());
    }
}
