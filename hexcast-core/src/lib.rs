//! HEXCAST Core - Hex grid algorithms
//!
//! This crate provides spatial queries over an unbounded hex grid:
//! - Coordinates (axial algebra, Cartesian layout, polar addressing)
//! - Enumeration of ranges, rectangles, rings and lines
//! - Shadow-casting line of sight and radiance propagation
//! - Breadth-first and weighted path search
//!
//! The grid itself is never stored. Every query takes closures describing
//! the cells it touches, so callers keep their map in whatever form suits them.

pub mod config;
pub mod coord;
pub mod enumerate;
pub mod error;
pub mod geometry;
pub mod pathfind;
pub mod shadow;

// Re-exports for convenient access
pub use config::SearchConfig;
pub use coord::{Hex, DIRECTIONS};
pub use enumerate::{line, ring, within_range, within_rect, Line, Ring, WithinRange, WithinRect};
pub use error::{GridError, Result};
pub use geometry::{approx_eq, wrap_angle, Point, TOLERANCE};
pub use pathfind::{
    find_path, find_path_where, path_cost, spread, PathNode, Pathfinder, PathfinderBuilder, Spread,
    WeightedSpread,
};
pub use shadow::{line_of_sight, radiate, Attenuation, LineOfSight, RadiantArc, Radiance, RayHit};
