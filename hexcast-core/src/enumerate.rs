//! Lazy coordinate enumeration: disks, rectangles, rings and lines
//!
//! Every function returns an iterator that owns only a few integers of
//! state, so callers may stop pulling at any point.

use crate::coord::Hex;

// ============================================================================
// RANGE
// ============================================================================

/// Cells within `radius` of `center` (exactly at `radius` when `border`).
///
/// Rows are walked by `dq`, so the border of a row is just its two ends.
/// A negative radius yields nothing.
pub fn within_range(center: Hex, radius: i32, border: bool) -> WithinRange {
    WithinRange {
        center,
        radius,
        border,
        dq: -radius,
        dr: row_start(-radius, radius),
    }
}

/// Iterator returned by [`within_range`]
#[derive(Clone, Debug)]
pub struct WithinRange {
    center: Hex,
    radius: i32,
    border: bool,
    dq: i32,
    dr: i32,
}

fn row_start(dq: i32, radius: i32) -> i32 {
    (-radius).max(-dq - radius)
}

fn row_end(dq: i32, radius: i32) -> i32 {
    radius.min(radius - dq)
}

impl Iterator for WithinRange {
    type Item = Hex;

    fn next(&mut self) -> Option<Hex> {
        loop {
            if self.dq > self.radius {
                return None;
            }
            let start = row_start(self.dq, self.radius);
            let end = row_end(self.dq, self.radius);
            if self.dr > end {
                self.dq += 1;
                self.dr = row_start(self.dq, self.radius);
                continue;
            }

            let cell = self.center + Hex::new(self.dq, self.dr);
            let interior_row = self.dq.abs() < self.radius;
            if self.border && interior_row && self.dr == start {
                self.dr = end;
            } else {
                self.dr += 1;
            }
            return Some(cell);
        }
    }
}

// ============================================================================
// RECTANGLE
// ============================================================================

/// Cells of the offset rectangle spanned by two corners.
///
/// Columns follow `q`; rows use odd-q offsets so the shape stays
/// rectangular on screen. With `border`, interior columns yield only their
/// first and last row.
pub fn within_rect(corner_a: Hex, corner_b: Hex, border: bool) -> WithinRect {
    let (col_a, row_a) = to_offset(corner_a);
    let (col_b, row_b) = to_offset(corner_b);
    let row_min = row_a.min(row_b);
    WithinRect {
        col_min: col_a.min(col_b),
        col_max: col_a.max(col_b),
        row_min,
        row_max: row_a.max(row_b),
        border,
        col: col_a.min(col_b),
        row: row_min,
    }
}

/// Iterator returned by [`within_rect`]
#[derive(Clone, Debug)]
pub struct WithinRect {
    col_min: i32,
    col_max: i32,
    row_min: i32,
    row_max: i32,
    border: bool,
    col: i32,
    row: i32,
}

fn to_offset(h: Hex) -> (i32, i32) {
    (h.q, h.r + h.q.div_euclid(2))
}

fn from_offset(col: i32, row: i32) -> Hex {
    Hex::new(col, row - col.div_euclid(2))
}

impl Iterator for WithinRect {
    type Item = Hex;

    fn next(&mut self) -> Option<Hex> {
        if self.col > self.col_max {
            return None;
        }
        let cell = from_offset(self.col, self.row);

        let edge_column = self.col == self.col_min || self.col == self.col_max;
        if self.row >= self.row_max {
            self.col += 1;
            self.row = self.row_min;
        } else if self.border && !edge_column {
            self.row = self.row_max;
        } else {
            self.row += 1;
        }
        Some(cell)
    }
}

// ============================================================================
// RING
// ============================================================================

/// The `6 * radius` cells at exactly `radius` from `center`.
///
/// The walk starts at polar index `first_side * radius` and proceeds
/// counter-clockwise, so consecutive cells are always adjacent. Radius 0
/// yields `center`; a negative radius is treated as its absolute value.
pub fn ring(center: Hex, radius: i32, first_side: i32) -> Ring {
    let radius = radius.abs();
    Ring {
        center,
        radius,
        start: first_side * radius,
        emitted: 0,
        total: (6 * radius).max(1),
    }
}

/// Iterator returned by [`ring`]
#[derive(Clone, Debug)]
pub struct Ring {
    center: Hex,
    radius: i32,
    start: i32,
    emitted: i32,
    total: i32,
}

impl Iterator for Ring {
    type Item = Hex;

    fn next(&mut self) -> Option<Hex> {
        if self.emitted >= self.total {
            return None;
        }
        let cell = self.center + Hex::at_polar(self.radius, self.start + self.emitted);
        self.emitted += 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.total - self.emitted) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Ring {}

// ============================================================================
// LINE
// ============================================================================

/// Intermediate cells crossed by the segment between two cell centres.
///
/// Neither endpoint is yielded. The segment is decomposed into steps along
/// the two directions bounding its sextant: the primary one (more steps)
/// and the secondary one. An error term scaled by 2 decides at each step
/// whether to bend. When the segment passes exactly through a vertex or
/// along an edge, `supercover` also yields the cell on the other side.
pub fn line(from: Hex, to: Hex, supercover: bool) -> Line {
    let delta = to - from;
    let half = delta.half_sextant();
    let sextant = half / 2;
    let (primary, secondary) = if half % 2 == 0 {
        (sextant, (sextant + 1) % 6)
    } else {
        ((sextant + 1) % 6, sextant)
    };
    Line {
        current: from,
        primary,
        secondary,
        length: delta.axial_length(),
        skew: delta.axial_skew(),
        step: 0,
        error: 0,
        supercover,
        grazed: None,
    }
}

/// Iterator returned by [`line`]
#[derive(Clone, Debug)]
pub struct Line {
    current: Hex,
    primary: u8,
    secondary: u8,
    length: i32,
    skew: i32,
    step: i32,
    error: i32,
    supercover: bool,
    grazed: Option<Hex>,
}

impl Iterator for Line {
    type Item = Hex;

    fn next(&mut self) -> Option<Hex> {
        if let Some(cell) = self.grazed.take() {
            return Some(cell);
        }
        if self.step >= self.length - 1 {
            return None;
        }
        self.step += 1;
        self.error += 2 * self.skew;

        let previous = self.current;
        if self.error > self.length {
            self.error -= 2 * self.length;
            self.current = previous.neighbor(self.secondary);
        } else {
            self.current = previous.neighbor(self.primary);
            if self.supercover && self.error == self.length {
                self.grazed = Some(previous.neighbor(self.secondary));
            }
        }
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_range_counts() {
        let origin = Hex::ORIGIN;
        assert_eq!(within_range(origin, 0, false).collect::<Vec<_>>(), vec![origin]);
        assert_eq!(within_range(origin, 1, false).count(), 7);
        assert_eq!(within_range(origin, 2, false).count(), 19);
        assert_eq!(within_range(origin, -2, false).count(), 0);
    }

    #[test]
    fn test_range_border_is_ring() {
        let center = Hex::new(3, -7);
        for radius in 0..6 {
            let border: FxHashSet<Hex> = within_range(center, radius, true).collect();
            let ring: FxHashSet<Hex> = ring(center, radius, 0).collect();
            assert_eq!(border, ring, "radius {}", radius);
        }
    }

    #[test]
    fn test_rect_fill() {
        let cells: Vec<Hex> = within_rect(Hex::new(0, 0), Hex::new(3, 1), false).collect();
        // Corner (3,1) is column 3, offset row 2; so 4 columns of 3 rows
        assert_eq!(cells.len(), 12);
        let unique: FxHashSet<Hex> = cells.iter().copied().collect();
        assert_eq!(unique.len(), 12);
        assert!(unique.contains(&Hex::new(0, 0)));
        assert!(unique.contains(&Hex::new(3, 1)));
        // Odd column is shifted: column 1 holds offset rows 0..=2 at r = 0..=2
        assert!(unique.contains(&Hex::new(1, 2)));
        assert!(!unique.contains(&Hex::new(1, -1)));
    }

    #[test]
    fn test_rect_corner_order_irrelevant() {
        let a: FxHashSet<Hex> = within_rect(Hex::new(-2, 4), Hex::new(3, -1), false).collect();
        let b: FxHashSet<Hex> = within_rect(Hex::new(3, -1), Hex::new(-2, 4), false).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rect_border() {
        let full: Vec<Hex> = within_rect(Hex::new(0, 0), Hex::new(4, 2), false).collect();
        let border: Vec<Hex> = within_rect(Hex::new(0, 0), Hex::new(4, 2), true).collect();
        // 5 columns of 5 rows; perimeter = 2 * 5 + 3 * 2
        assert_eq!(full.len(), 25);
        assert_eq!(border.len(), 16);
        assert!(border.iter().all(|h| full.contains(h)));

        // A single row degenerates cleanly
        let flat: Vec<Hex> = within_rect(Hex::new(0, 0), Hex::new(0, 0), true).collect();
        assert_eq!(flat, vec![Hex::new(0, 0)]);
    }

    #[test]
    fn test_ring_basics() {
        let origin = Hex::ORIGIN;
        let cells: Vec<Hex> = ring(origin, 2, 0).collect();
        assert_eq!(cells.len(), 12);
        assert!(cells.iter().all(|h| h.axial_length() == 2));
        assert_eq!(ring(origin, 0, 3).collect::<Vec<_>>(), vec![origin]);
        assert_eq!(ring(origin, -3, 0).count(), 18);
        assert_eq!(ring(origin, 3, 0).len(), 18);
    }

    #[test]
    fn test_ring_first_side() {
        let cells: Vec<Hex> = ring(Hex::ORIGIN, 2, 2).collect();
        assert_eq!(cells[0], Hex::direction(2) * 2);
        let a: FxHashSet<Hex> = cells.into_iter().collect();
        let b: FxHashSet<Hex> = ring(Hex::ORIGIN, 2, 0).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_line_empty_cases() {
        let a = Hex::new(2, 2);
        assert_eq!(line(a, a, false).count(), 0);
        assert_eq!(line(a, a, true).count(), 0);
        assert_eq!(line(a, a.neighbor(4), false).count(), 0);
    }

    #[test]
    fn test_line_straight() {
        let cells: Vec<Hex> = line(Hex::ORIGIN, Hex::new(0, 4), false).collect();
        assert_eq!(cells, vec![Hex::new(0, 1), Hex::new(0, 2), Hex::new(0, 3)]);
    }

    #[test]
    fn test_line_matches_sampled_segment() {
        // No sample of these segments falls on a cell boundary
        let targets = [Hex::new(5, 2), Hex::new(-4, 7), Hex::new(-6, -1), Hex::new(2, -7)];
        for to in targets {
            let from = Hex::new(1, 1);
            let to = from + to;
            let length = from.distance_to(to);
            let cells: Vec<Hex> = line(from, to, false).collect();
            assert_eq!(cells.len() as i32, length - 1);
            for (k, cell) in cells.iter().enumerate() {
                let t = (k + 1) as f64 / length as f64;
                let sample = from.position() + (to.position() - from.position()) * t;
                assert_eq!(*cell, Hex::at_position(sample), "{} -> {} step {}", from, to, k + 1);
            }
        }
    }

    #[test]
    fn test_line_supercover_edge() {
        // (2,-1) runs exactly along the edge between (1,0) and (1,-1)
        let plain: Vec<Hex> = line(Hex::ORIGIN, Hex::new(2, -1), false).collect();
        assert_eq!(plain.len(), 1);
        let wide: FxHashSet<Hex> = line(Hex::ORIGIN, Hex::new(2, -1), true).collect();
        let expected: FxHashSet<Hex> = [Hex::new(1, 0), Hex::new(1, -1)].into_iter().collect();
        assert_eq!(wide, expected);
    }

    #[test]
    fn test_line_supercover_is_duplicate_free() {
        // Along an edge direction every other step grazes a vertex
        let cells: Vec<Hex> = line(Hex::new(-3, 0), Hex::new(0, 3), true).collect();
        let unique: FxHashSet<Hex> = cells.iter().copied().collect();
        assert_eq!(cells.len(), 8);
        assert_eq!(cells.len(), unique.len());
        assert!(!unique.contains(&Hex::new(-3, 0)));
        assert!(!unique.contains(&Hex::new(0, 3)));
        assert_eq!(line(Hex::new(-3, 0), Hex::new(0, 3), false).count(), 5);
    }
}
