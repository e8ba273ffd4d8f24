//! Map files - JSON description of a grid region
//!
//! A map lists the cells that differ from open floor. Anything not listed
//! is walkable, transparent and costs `default_cost` to enter.
//!
//! ```json
//! {
//!   "name": "courtyard",
//!   "radius": 12,
//!   "walls": [{"q": 1, "r": 0}],
//!   "voids": [{"q": -3, "r": 2}],
//!   "costs": [{"cell": {"q": 0, "r": 2}, "value": 4}],
//!   "attenuation": [{"cell": {"q": 2, "r": -1}, "value": 2}]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use hexcast_core::{Attenuation, Hex, PathNode, RayHit};

// ============================================================================
// FILE FORMAT
// ============================================================================

/// Per-cell override
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellValue {
    pub cell: Hex,
    pub value: u32,
}

/// Grid map as stored on disk
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridMap {
    pub name: String,
    /// Cells further than this from the origin are off the map (None = unbounded)
    pub radius: Option<u32>,
    /// Seen but impassable and opaque
    pub walls: Vec<Hex>,
    /// Holes: never reported, never crossed
    pub voids: Vec<Hex>,
    /// Entry cost overrides (0 = impassable)
    pub costs: Vec<CellValue>,
    /// Radiance loss overrides
    pub attenuation: Vec<CellValue>,
    pub default_cost: u32,
    pub default_attenuation: u32,
}

impl Default for GridMap {
    fn default() -> Self {
        Self {
            name: "unnamed".to_string(),
            radius: None,
            walls: Vec::new(),
            voids: Vec::new(),
            costs: Vec::new(),
            attenuation: Vec::new(),
            default_cost: 1,
            default_attenuation: 0,
        }
    }
}

impl GridMap {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read map {}", path.display()))?;
        let map: GridMap =
            serde_json::from_str(&content).with_context(|| format!("Failed to parse map {}", path.display()))?;
        tracing::info!(
            "Loaded map '{}': {} walls, {} voids, radius {:?}",
            map.name,
            map.walls.len(),
            map.voids.len(),
            map.radius
        );
        Ok(map)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write map {}", path.display()))?;
        Ok(())
    }

    /// Index the map for queries
    pub fn terrain(&self) -> Terrain {
        let walls: FxHashSet<Hex> = self.walls.iter().copied().collect();
        let voids: FxHashSet<Hex> = self.voids.iter().copied().collect();
        let overlap = walls.intersection(&voids).count();
        if overlap > 0 {
            tracing::warn!("{} cells listed as both wall and void, treating them as void", overlap);
        }
        Terrain {
            radius: self.radius,
            walls,
            voids,
            costs: self.costs.iter().map(|c| (c.cell, c.value)).collect(),
            attenuation: self.attenuation.iter().map(|c| (c.cell, c.value)).collect(),
            default_cost: self.default_cost,
            default_attenuation: self.default_attenuation,
        }
    }
}

// ============================================================================
// QUERIES
// ============================================================================

/// Indexed map answering the callbacks of the core queries
#[derive(Clone, Debug)]
pub struct Terrain {
    radius: Option<u32>,
    walls: FxHashSet<Hex>,
    voids: FxHashSet<Hex>,
    costs: FxHashMap<Hex, u32>,
    attenuation: FxHashMap<Hex, u32>,
    default_cost: u32,
    default_attenuation: u32,
}

impl Terrain {
    /// Whether a cell exists on the map
    pub fn contains(&self, cell: Hex) -> bool {
        let inside = self.radius.map_or(true, |r| cell.axial_length() as u32 <= r);
        inside && !self.voids.contains(&cell)
    }

    pub fn is_wall(&self, cell: Hex) -> bool {
        self.walls.contains(&cell)
    }

    pub fn is_obstacle(&self, cell: Hex) -> bool {
        !self.contains(cell) || self.is_wall(cell)
    }

    /// Cost of stepping into `to`; 0 when it cannot be entered
    pub fn move_cost(&self, _from: &PathNode, to: Hex) -> u32 {
        if self.is_obstacle(to) {
            return 0;
        }
        self.costs.get(&to).copied().unwrap_or(self.default_cost)
    }

    pub fn transparency(&self, cell: Hex) -> Option<bool> {
        if !self.contains(cell) {
            None
        } else {
            Some(!self.is_wall(cell))
        }
    }

    pub fn attenuation(&self, hit: &RayHit) -> Attenuation {
        let cell = hit.location;
        if !self.contains(cell) {
            Attenuation::Skip
        } else if self.is_wall(cell) {
            Attenuation::Block
        } else {
            Attenuation::Dim(self.attenuation.get(&cell).copied().unwrap_or(self.default_attenuation))
        }
    }
}
