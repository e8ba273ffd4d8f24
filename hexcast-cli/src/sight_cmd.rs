//! Sight and radiance commands
//!
//! Both walk outwards ring by ring, so the output is always bounded by
//! `--radius` even on unbounded maps.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use hexcast_core::{line_of_sight, radiate, Hex, RayHit};

use crate::map::GridMap;
use crate::output::{print_cells, print_hits};

#[derive(Args, Debug)]
pub struct SightArgs {
    /// Map JSON file
    #[arg(long, value_name = "FILE")]
    pub map: PathBuf,

    /// Viewer cell as q,r
    #[arg(long, allow_hyphen_values = true)]
    pub origin: Hex,

    /// Furthest ring examined
    #[arg(long, default_value = "10")]
    pub radius: i32,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RadiateArgs {
    #[arg(long, value_name = "FILE")]
    pub map: PathBuf,

    /// Emitter cell as q,r
    #[arg(long, allow_hyphen_values = true)]
    pub origin: Hex,

    /// Starting intensity
    #[arg(long)]
    pub intensity: u32,

    /// Furthest ring examined
    #[arg(long, default_value = "32")]
    pub radius: i32,

    #[arg(long)]
    pub json: bool,
}

pub fn run_sight(args: SightArgs) -> Result<()> {
    let terrain = GridMap::load(&args.map)?.terrain();
    if !terrain.contains(args.origin) {
        tracing::warn!("Viewer {} is outside the map", args.origin);
    }

    let origin = args.origin;
    let visible: Vec<Hex> = line_of_sight(origin, |cell| terrain.transparency(cell))
        .take_while(|cell| cell.distance_to(origin) <= args.radius)
        .collect();

    tracing::info!("{} cells visible from {}", visible.len(), origin);
    print_cells(&visible, args.json)
}

pub fn run_radiate(args: RadiateArgs) -> Result<()> {
    let terrain = GridMap::load(&args.map)?.terrain();

    let origin = args.origin;
    let hits: Vec<RayHit> = radiate(origin, args.intensity, |hit| terrain.attenuation(hit))
        .take_while(|hit| hit.location.distance_to(origin) <= args.radius)
        .collect();

    tracing::info!("{} cells lit from {} at intensity {}", hits.len(), origin, args.intensity);
    print_hits(&hits, args.json)
}
