//! Cartesian points and angle helpers

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::ops::{Add, Mul, Sub};

/// Tolerance used for all angle comparisons
pub const TOLERANCE: f64 = 1e-9;

/// sqrt(3), the row height of a unit flat-top hexagon
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// 2D Cartesian point (unit = hexagon circumradius)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Bearing from the origin in `(-π, π]`
    pub fn angle(&self) -> f64 {
        wrap_angle(self.y.atan2(self.x))
    }

    /// Midpoint between two points
    pub fn midpoint(self, other: Point) -> Point {
        (self + other) * 0.5
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

/// Tolerance-based equality for angles and distances
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// Normalise an angle into `(-π, π]`
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI + TOLERANCE {
        wrapped - TAU
    } else if approx_eq(wrapped, PI) {
        PI
    } else {
        wrapped
    }
}

/// Representation of `angle` closest to `reference` (within half a turn)
pub fn unwrap_near(angle: f64, reference: f64) -> f64 {
    reference + wrap_angle(angle - reference)
}
