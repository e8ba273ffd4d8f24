//! Hex coordinates: axial algebra, Cartesian layout and polar addressing
//!
//! Layout is flat-top with unit circumradius. Directions are numbered
//! counter-clockwise starting at the 30 degree bearing, so direction `d`
//! points at `30 + 60 * d` degrees and `(d + 3) % 6` is its opposite.
//!
//! Polar addressing identifies a cell by `(ring, index)`: the ring is the
//! distance from the origin and the index counts counter-clockwise around
//! the ring, starting at `ring * DIRECTIONS[0]`.

use crate::error::GridError;
use crate::geometry::{wrap_angle, Point, SQRT_3};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_3, FRAC_PI_6};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// Direction vectors in axial coordinates (dq, dr), counter-clockwise
/// Index: 0=30deg, 1=90deg, 2=150deg, 3=210deg, 4=270deg, 5=330deg
pub const DIRECTIONS: [(i32, i32); 6] = [
    (1, 0),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (0, -1),
    (1, -1),
];

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const ORIGIN: Hex = Hex { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Unit vector for a direction (taken modulo 6)
    pub const fn direction(direction: u8) -> Hex {
        let (dq, dr) = DIRECTIONS[direction as usize % 6];
        Hex::new(dq, dr)
    }

    /// Implicit third cube coordinate
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    pub const fn is_origin(&self) -> bool {
        self.q == 0 && self.r == 0
    }

    // ========================================================================
    // NEIGHBOURS AND DISTANCE
    // ========================================================================

    /// Get neighbor in direction (0-5)
    pub fn neighbor(&self, direction: u8) -> Hex {
        *self + Hex::direction(direction)
    }

    /// All six neighbours in direction order
    pub fn neighbors(&self) -> [Hex; 6] {
        [0, 1, 2, 3, 4, 5].map(|d| self.neighbor(d))
    }

    /// Direction leading from `self` to an adjacent `other`
    pub fn direction_to(&self, other: Hex) -> Option<u8> {
        (0..6u8).find(|&d| self.neighbor(d) == other)
    }

    /// Distance between two hexes
    pub fn distance(a: Hex, b: Hex) -> i32 {
        (a - b).axial_length()
    }

    pub fn distance_to(&self, other: Hex) -> i32 {
        Hex::distance(*self, other)
    }

    /// Distance from the origin
    pub fn axial_length(&self) -> i32 {
        let dq = self.q.abs();
        let dr = self.r.abs();
        let ds = self.s().abs();
        dq.max(dr).max(ds)
    }

    // ========================================================================
    // CARTESIAN LAYOUT
    // ========================================================================

    /// Centre of the cell
    pub fn position(&self) -> Point {
        let q = self.q as f64;
        let r = self.r as f64;
        Point::new(1.5 * q, SQRT_3 * (q / 2.0 + r))
    }

    /// Offset from the cell centre to corner `i` (0-5, counter-clockwise from 0deg)
    pub fn corner_vector(i: u8) -> Point {
        Point::from_angle(FRAC_PI_3 * (i % 6) as f64)
    }

    /// Cell containing a Cartesian point
    pub fn at_position(point: Point) -> Hex {
        let q = 2.0 / 3.0 * point.x;
        let r = -point.x / 3.0 + SQRT_3 / 3.0 * point.y;
        cube_round(q, r)
    }

    // ========================================================================
    // POLAR ADDRESSING
    // ========================================================================

    /// Cell at `(ring, index)` around the origin; index wraps modulo the ring size
    pub fn at_polar(ring: i32, index: i32) -> Hex {
        let ring = ring.abs();
        if ring == 0 {
            return Hex::ORIGIN;
        }
        let index = index.rem_euclid(6 * ring);
        let side = (index / ring) as u8;
        let step = index % ring;
        Hex::direction(side) * ring + Hex::direction(side + 2) * step
    }

    /// `(ring, index)` of this cell relative to the origin
    pub fn polar_index(&self) -> (i32, i32) {
        let ring = self.axial_length();
        if ring == 0 {
            return (0, 0);
        }
        for side in 0..6u8 {
            let rel = *self - Hex::direction(side) * ring;
            if let Some(step) = steps_along(rel, Hex::direction(side + 2)) {
                if (0..ring).contains(&step) {
                    return (ring, side as i32 * ring + step);
                }
            }
        }
        unreachable!("every non-origin hex lies on one side of its ring")
    }

    /// Bearing of the cell centre from the origin in `(-π, π]`
    pub fn polar_angle(&self) -> f64 {
        if self.is_origin() {
            return 0.0;
        }
        self.position().angle()
    }

    /// Extreme bearing of the cell's outline as seen from the origin.
    ///
    /// `ccw = true` gives the counter-clockwise bound, `false` the clockwise
    /// one. The origin cell surrounds the observer and spans the full circle.
    pub fn polar_bounding_angle(&self, ccw: bool) -> f64 {
        if self.is_origin() {
            return if ccw { std::f64::consts::PI } else { -std::f64::consts::PI };
        }
        let center = self.polar_angle();
        let pos = self.position();
        let offsets = (0..6u8).map(|i| wrap_angle((pos + Hex::corner_vector(i)).angle() - center));
        let bound = if ccw {
            offsets.fold(f64::MIN, f64::max)
        } else {
            offsets.fold(f64::MAX, f64::min)
        };
        wrap_angle(center + bound)
    }

    /// Next cell on the same ring (counter-clockwise when `ccw`)
    pub fn polar_neighbor(&self, ccw: bool) -> Hex {
        let (ring, index) = self.polar_index();
        Hex::at_polar(ring, if ccw { index + 1 } else { index - 1 })
    }

    /// Index of the ring cell whose territory contains `angle`.
    ///
    /// Territories are bounded by the midpoints of the edges shared between
    /// consecutive ring cells, so they tile the circle exactly.
    pub fn find_polar_index(ring: i32, angle: f64) -> i32 {
        let ring = ring.abs();
        if ring == 0 {
            return 0;
        }
        let angle = wrap_angle(angle);
        let side = ((angle - FRAC_PI_6) / FRAC_PI_3).floor().rem_euclid(6.0) as u8;

        // Ring cells on one side sit evenly on the segment between two corners
        let a = (Hex::direction(side) * ring).position();
        let b = (Hex::direction(side + 1) * ring).position();
        let u = Point::from_angle(angle);
        let edge = b - a;
        let denom = cross(u, edge);
        let t = if denom.abs() < f64::EPSILON {
            0.0
        } else {
            (cross(a, u) / denom).clamp(0.0, 1.0)
        };
        let step = (t * ring as f64).round() as i32;
        (side as i32 * ring + step).rem_euclid(6 * ring)
    }

    // ========================================================================
    // LINE DRAWING HELPERS
    // ========================================================================

    /// Rotate around the origin by `k * 60` degrees counter-clockwise
    pub fn sextant_rotation(&self, k: i32) -> Hex {
        (0..k.rem_euclid(6)).fold(*self, |h, _| Hex::new(-h.r, h.q + h.r))
    }

    /// Sextant `s` such that `self = a * dir(s) + b * dir(s + 1)` with `a > 0, b >= 0`
    pub fn sextant(&self) -> u8 {
        (0..6u8)
            .find(|&s| {
                let local = self.sextant_rotation(-(s as i32));
                local.q > 0 && local.r >= 0
            })
            .unwrap_or(0)
    }

    /// Half-sextant (0-11): the sextant doubled, plus one when the segment
    /// leans towards the sextant's second direction
    pub fn half_sextant(&self) -> u8 {
        let s = self.sextant();
        let local = self.sextant_rotation(-(s as i32));
        2 * s + u8::from(local.r > local.q)
    }

    /// Number of steps a straight walk to this cell takes off its dominant direction
    pub fn axial_skew(&self) -> i32 {
        let local = self.sextant_rotation(-(self.sextant() as i32));
        local.q.min(local.r)
    }
}

/// Cross product of two Cartesian vectors
fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// `k` such that `rel == dir * k`, if any
fn steps_along(rel: Hex, dir: Hex) -> Option<i32> {
    let k = if dir.q != 0 {
        if rel.q % dir.q != 0 {
            return None;
        }
        rel.q / dir.q
    } else {
        if rel.r % dir.r != 0 {
            return None;
        }
        rel.r / dir.r
    };
    (dir * k == rel).then_some(k)
}

/// Round fractional axial coordinates to the nearest cell
fn cube_round(q: f64, r: f64) -> Hex {
    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();

    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }
    Hex::new(rq as i32, rr as i32)
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, other: Hex) -> Hex {
        Hex::new(self.q + other.q, self.r + other.r)
    }
}

impl Sub for Hex {
    type Output = Hex;

    fn sub(self, other: Hex) -> Hex {
        Hex::new(self.q - other.q, self.r - other.r)
    }
}

impl Neg for Hex {
    type Output = Hex;

    fn neg(self) -> Hex {
        Hex::new(-self.q, -self.r)
    }
}

impl Mul<i32> for Hex {
    type Output = Hex;

    fn mul(self, k: i32) -> Hex {
        Hex::new(self.q * k, self.r * k)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

impl FromStr for Hex {
    type Err = GridError;

    /// Parse `"q,r"` (whitespace around either number is ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GridError::InvalidCoordinate(s.to_string());
        let (q, r) = s.split_once(',').ok_or_else(invalid)?;
        let q = q.trim().parse().map_err(|_| invalid())?;
        let r = r.trim().parse().map_err(|_| invalid())?;
        Ok(Hex::new(q, r))
    }
}
