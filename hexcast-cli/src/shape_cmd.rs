//! Shape commands - ranges, rectangles, rings and lines
//!
//! These need no map; they print the coordinates a shape covers.

use anyhow::Result;
use clap::Args;

use hexcast_core::{line, ring, within_range, within_rect, Hex};

use crate::output::print_cells;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args, Debug)]
pub struct RangeArgs {
    /// Centre cell as q,r
    #[arg(long, default_value = "0,0", allow_hyphen_values = true)]
    pub center: Hex,

    /// Maximum distance from the centre
    #[arg(long, allow_hyphen_values = true)]
    pub radius: i32,

    /// Only the outermost ring
    #[arg(long)]
    pub border: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RectArgs {
    /// First corner as q,r
    #[arg(long, allow_hyphen_values = true)]
    pub from: Hex,

    /// Opposite corner as q,r
    #[arg(long, allow_hyphen_values = true)]
    pub to: Hex,

    /// Only the outline
    #[arg(long)]
    pub border: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RingArgs {
    #[arg(long, default_value = "0,0", allow_hyphen_values = true)]
    pub center: Hex,

    #[arg(long, allow_hyphen_values = true)]
    pub radius: i32,

    /// Side the walk starts on (0-5, counter-clockwise from 30 degrees)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub first_side: i32,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct LineArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub from: Hex,

    #[arg(long, allow_hyphen_values = true)]
    pub to: Hex,

    /// Include cells the segment only grazes
    #[arg(long)]
    pub supercover: bool,

    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// RUN
// ============================================================================

pub fn run_range(args: RangeArgs) -> Result<()> {
    let cells: Vec<Hex> = within_range(args.center, args.radius, args.border).collect();
    tracing::debug!("range around {} radius {}: {} cells", args.center, args.radius, cells.len());
    print_cells(&cells, args.json)
}

pub fn run_rect(args: RectArgs) -> Result<()> {
    let cells: Vec<Hex> = within_rect(args.from, args.to, args.border).collect();
    tracing::debug!("rect {} to {}: {} cells", args.from, args.to, cells.len());
    print_cells(&cells, args.json)
}

pub fn run_ring(args: RingArgs) -> Result<()> {
    let cells: Vec<Hex> = ring(args.center, args.radius, args.first_side).collect();
    print_cells(&cells, args.json)
}

pub fn run_line(args: LineArgs) -> Result<()> {
    // Endpoints are not part of the line itself
    let cells: Vec<Hex> = line(args.from, args.to, args.supercover).collect();
    print_cells(&cells, args.json)
}
