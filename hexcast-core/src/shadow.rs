//! Shadow casting: line of sight and radiance propagation
//!
//! Both casters walk the grid ring by ring away from the origin while
//! keeping a list of open angular arcs. A ring is processed in one go and
//! its results are buffered, so memory stays proportional to one ring.
//!
//! Angles live in an unwrapped frame local to each arc: a cell's bearing
//! is shifted by whole turns so it sits next to the arc it is tested
//! against, which keeps arcs crossing the ±π seam intact.

use crate::coord::Hex;
use crate::geometry::{approx_eq, unwrap_near, wrap_angle, TOLERANCE};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::VecDeque;
use std::f64::consts::PI;

/// Extra cells walked before an arc's first cell, to catch outlines that
/// reach across a territory boundary
const SPAN_LOOKBACK: i32 = 2;
const TERRITORY_LOOKBACK: i32 = 1;

// ============================================================================
// TYPES
// ============================================================================

/// Angular interval `[start, end)` carrying light
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadiantArc {
    pub start: f64,
    pub end: f64,
    pub intensity: u32,
}

impl RadiantArc {
    /// Arc covering the whole circle
    pub fn full(intensity: u32) -> Self {
        Self { start: -PI, end: PI, intensity }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    fn is_degenerate(&self) -> bool {
        self.width() <= TOLERANCE
    }

    /// Same arc with `start` moved into `(-π, π]`
    fn normalized(self) -> Self {
        let start = wrap_angle(self.start);
        Self { start, end: start + self.width(), ..self }
    }

    /// Whether `other` starts where `self` ends (modulo whole turns)
    fn touches(&self, other: &RadiantArc) -> bool {
        approx_eq(wrap_angle(other.start - self.end), 0.0)
    }
}

/// Arc still open to line of sight.
///
/// A start that an open piece ends on (the seam of the full circle) is
/// inclusive, so the pieces never share a cell. Any other start is a
/// blocker's shadow edge and is exclusive like every end, so cells grazing
/// either edge of a shadow are hidden alike.
#[derive(Clone, Copy, Debug)]
struct Opening {
    arc: RadiantArc,
    shadow_start: bool,
}

impl Opening {
    fn full() -> Self {
        Self {
            arc: RadiantArc::full(1),
            shadow_start: false,
        }
    }

    /// Whether an unwrapped bearing falls inside the arc
    fn admits(&self, angle: f64) -> bool {
        let RadiantArc { start, end, .. } = self.arc;
        if approx_eq(angle, start) {
            return !self.shadow_start;
        }
        angle > start && angle < end && !approx_eq(angle, end)
    }

    fn normalized(self) -> Self {
        Self {
            arc: self.arc.normalized(),
            ..self
        }
    }
}

/// A cell reached by radiance
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub location: Hex,
    /// Bearing from the emission origin
    pub angle: f64,
    /// Intensity arriving at the cell
    pub intensity: u32,
}

/// How a cell affects radiance passing through it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attenuation {
    /// Cell is hit and lets light through, reduced by the given amount
    Dim(u32),
    /// Cell is hit but nothing passes beyond it
    Block,
    /// Cell is left out of the results and nothing passes beyond it
    Skip,
}

// ============================================================================
// RING CURSOR
// ============================================================================

/// Walks a ring counter-clockwise, tracking unwrapped centre bearings
struct RingCursor {
    ring: i32,
    index: i32,
    center: f64,
    lookback: i32,
}

impl RingCursor {
    fn new(ring: i32, reference: f64, lookback: i32) -> Self {
        Self {
            ring,
            index: Hex::find_polar_index(ring, reference) - lookback,
            center: reference,
            lookback,
        }
    }

    /// Upper bound on steps needed to cover any arc
    fn limit(&self) -> i32 {
        6 * self.ring + self.lookback + 3
    }

    /// Polar index, relative cell and unwrapped centre bearing; advances the cursor
    fn advance(&mut self) -> (i32, Hex, f64) {
        let index = self.index;
        let cell = Hex::at_polar(self.ring, index);
        self.center = unwrap_near(cell.polar_angle(), self.center);
        self.index += 1;
        (index, cell, self.center)
    }
}

/// Outline of a cell as unwrapped bearings around its unwrapped centre
fn outline(cell: Hex, center: f64) -> (f64, f64) {
    let raw = cell.polar_angle();
    let lo = center + wrap_angle(cell.polar_bounding_angle(false) - raw);
    let hi = center + wrap_angle(cell.polar_bounding_angle(true) - raw);
    (lo, hi)
}

/// Bearing of the edge shared by ring cells `index` and `index + 1`
fn territory_boundary(ring: i32, index: i32) -> f64 {
    let a = Hex::at_polar(ring, index).position();
    let b = Hex::at_polar(ring, index + 1).position();
    a.midpoint(b).angle()
}

/// Remove `[lo, hi]` from every piece
fn cut(pieces: Vec<Opening>, lo: f64, hi: f64) -> Vec<Opening> {
    let mut kept = Vec::with_capacity(pieces.len() + 1);
    for piece in pieces {
        let arc = piece.arc;
        if hi <= arc.start + TOLERANCE || lo >= arc.end - TOLERANCE {
            kept.push(piece);
            continue;
        }
        if lo > arc.start + TOLERANCE {
            kept.push(Opening {
                arc: RadiantArc { end: lo, ..arc },
                ..piece
            });
        }
        if hi < arc.end - TOLERANCE {
            kept.push(Opening {
                arc: RadiantArc { start: hi, ..arc },
                shadow_start: true,
            });
        }
    }
    kept
}

// ============================================================================
// LINE OF SIGHT
// ============================================================================

/// Cells visible from `origin`, nearest rings first.
///
/// `is_transparent` returns `Some(true)` for cells light passes through,
/// `Some(false)` for cells that are seen but block what lies behind them,
/// and `None` for cells that are neither reported nor see-through (holes in
/// the map). The origin itself is not reported. On an open map the
/// iterator never ends; bound it with `take_while` on distance.
pub fn line_of_sight<F>(origin: Hex, is_transparent: F) -> LineOfSight<F>
where
    F: FnMut(Hex) -> Option<bool>,
{
    LineOfSight {
        origin,
        is_transparent,
        arcs: vec![Opening::full()],
        ring: 0,
        visible: VecDeque::new(),
    }
}

/// Iterator returned by [`line_of_sight`]
pub struct LineOfSight<F> {
    origin: Hex,
    is_transparent: F,
    arcs: Vec<Opening>,
    ring: i32,
    visible: VecDeque<Hex>,
}

impl<F> LineOfSight<F>
where
    F: FnMut(Hex) -> Option<bool>,
{
    /// Arcs still open for the next ring
    pub fn open_arcs(&self) -> impl Iterator<Item = &RadiantArc> + '_ {
        self.arcs.iter().map(|opening| &opening.arc)
    }

    fn cast_ring(&mut self) {
        self.ring += 1;
        let mut survivors = Vec::new();

        for opening in std::mem::take(&mut self.arcs) {
            let arc = opening.arc;
            let mut pieces = vec![opening];
            let mut cursor = RingCursor::new(self.ring, arc.start, SPAN_LOOKBACK);

            for _ in 0..cursor.limit() {
                let (_, cell, center) = cursor.advance();
                let (lo, hi) = outline(cell, center);
                if lo >= arc.end - TOLERANCE {
                    break;
                }
                if hi <= arc.start + TOLERANCE {
                    continue;
                }

                let location = self.origin + cell;
                let transparency = (self.is_transparent)(location);
                if transparency.is_some() && opening.admits(center) {
                    self.visible.push_back(location);
                }
                if transparency != Some(true) {
                    pieces = cut(pieces, lo, hi);
                }
            }

            survivors.extend(pieces.into_iter().filter(|p| !p.arc.is_degenerate()).map(Opening::normalized));
        }

        // A start stays inclusive only while some piece still ends on it
        let arcs: Vec<RadiantArc> = survivors.iter().map(|opening| opening.arc).collect();
        for opening in &mut survivors {
            if !arcs.iter().any(|arc| arc.touches(&opening.arc)) {
                opening.shadow_start = true;
            }
        }

        tracing::trace!(ring = self.ring, arcs = survivors.len(), "line of sight ring cast");
        self.arcs = survivors;
    }
}

impl<F> Iterator for LineOfSight<F>
where
    F: FnMut(Hex) -> Option<bool>,
{
    type Item = Hex;

    fn next(&mut self) -> Option<Hex> {
        loop {
            if let Some(cell) = self.visible.pop_front() {
                return Some(cell);
            }
            if self.arcs.is_empty() {
                return None;
            }
            self.cast_ring();
        }
    }
}

// ============================================================================
// RADIANCE
// ============================================================================

/// Propagate `intensity` outwards from `origin`.
///
/// Each ring cell whose territory overlaps a lit arc is reported once, with
/// the highest intensity arriving there, and `attenuation` decides what
/// continues through every lit piece of that territory.
/// Arcs are re-cut along cell territories every ring and neighbours with
/// equal intensity merged back, so the arcs always tile the circle. The
/// iterator ends once every arc is dark; with no attenuation at all it
/// never ends.
pub fn radiate<F>(origin: Hex, intensity: u32, attenuation: F) -> Radiance<F>
where
    F: FnMut(&RayHit) -> Attenuation,
{
    let arcs = if intensity > 0 {
        vec![RadiantArc::full(intensity)]
    } else {
        Vec::new()
    };
    Radiance {
        origin,
        attenuation,
        arcs,
        ring: 0,
        hits: VecDeque::new(),
    }
}

/// Iterator returned by [`radiate`]
pub struct Radiance<F> {
    origin: Hex,
    attenuation: F,
    arcs: Vec<RadiantArc>,
    ring: i32,
    hits: VecDeque<RayHit>,
}

/// Append an arc, folding it into the previous one when they match
fn push_merged(arcs: &mut Vec<RadiantArc>, arc: RadiantArc) {
    if arc.is_degenerate() {
        return;
    }
    if let Some(last) = arcs.last_mut() {
        if last.intensity == arc.intensity && last.touches(&arc) {
            last.end += arc.width();
            return;
        }
    }
    arcs.push(arc);
}

impl<F> Radiance<F>
where
    F: FnMut(&RayHit) -> Attenuation,
{
    /// Current partition of the circle
    pub fn arcs(&self) -> &[RadiantArc] {
        &self.arcs
    }

    fn cast_ring(&mut self) {
        self.ring += 1;
        let ring = self.ring;
        let mut next: Vec<RadiantArc> = Vec::with_capacity(self.arcs.len());
        let mut ring_hits: Vec<RayHit> = Vec::new();
        let mut reported: FxHashMap<Hex, usize> = FxHashMap::default();

        for arc in std::mem::take(&mut self.arcs) {
            if arc.intensity == 0 {
                push_merged(&mut next, arc);
                continue;
            }

            let mut cursor = RingCursor::new(ring, arc.start, TERRITORY_LOOKBACK);
            let mut lo: Option<f64> = None;
            for _ in 0..cursor.limit() {
                let (index, cell, center) = cursor.advance();
                let start = lo.unwrap_or_else(|| unwrap_near(territory_boundary(ring, index - 1), center));
                let end = unwrap_near(territory_boundary(ring, index), center);
                lo = Some(end);
                if start >= arc.end - TOLERANCE {
                    break;
                }
                let piece_start = start.max(arc.start);
                let piece_end = end.min(arc.end);
                if piece_end - piece_start <= TOLERANCE {
                    continue;
                }

                let hit = RayHit {
                    location: self.origin + cell,
                    angle: wrap_angle(center),
                    intensity: arc.intensity,
                };
                let effect = (self.attenuation)(&hit);
                if effect != Attenuation::Skip {
                    match reported.entry(hit.location) {
                        Entry::Occupied(slot) => {
                            let earlier = &mut ring_hits[*slot.get()];
                            earlier.intensity = earlier.intensity.max(hit.intensity);
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(ring_hits.len());
                            ring_hits.push(hit);
                        }
                    }
                }
                let transmitted = match effect {
                    Attenuation::Dim(loss) => arc.intensity.saturating_sub(loss),
                    Attenuation::Block | Attenuation::Skip => 0,
                };
                push_merged(
                    &mut next,
                    RadiantArc {
                        start: piece_start,
                        end: piece_end,
                        intensity: transmitted,
                    },
                );
            }
        }

        self.hits.extend(ring_hits);

        // The first and last arcs meet across the seam of the walk
        if next.len() > 1 {
            let first = next[0];
            let last = next[next.len() - 1];
            if first.intensity == last.intensity && last.touches(&first) {
                next.remove(0);
                if let Some(last) = next.last_mut() {
                    last.end += first.width();
                }
            }
        }

        if next.iter().all(|arc| arc.intensity == 0) {
            tracing::trace!(ring, "radiance exhausted");
            next.clear();
        } else {
            tracing::trace!(ring, arcs = next.len(), "radiance ring cast");
        }
        self.arcs = next.into_iter().map(RadiantArc::normalized).collect();
    }
}

impl<F> Iterator for Radiance<F>
where
    F: FnMut(&RayHit) -> Attenuation,
{
    type Item = RayHit;

    fn next(&mut self) -> Option<RayHit> {
        loop {
            if let Some(hit) = self.hits.pop_front() {
                return Some(hit);
            }
            if self.arcs.is_empty() {
                return None;
            }
            self.cast_ring();
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
