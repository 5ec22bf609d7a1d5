// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core geometric types for floor layouts

use crate::error::{LayoutError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned room rectangle in floor coordinates
///
/// `(x, y)` is the top-left corner; `y` grows towards the bottom edge of the floor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Finite position and strictly positive size
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True if the interiors of the two rectangles intersect
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }

    /// True if the rectangles are separated by at least `gap` along one axis
    pub fn has_min_gap(&self, other: &Rect, gap: f64) -> bool {
        self.right() + gap <= other.x
            || other.right() + gap <= self.x
            || self.bottom() + gap <= other.y
            || other.bottom() + gap <= self.y
    }

    /// True if the rectangles share an edge segment of positive length
    pub fn is_flush_adjacent(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-4;

        let vertical_overlap = self.bottom().min(other.bottom()) - self.y.max(other.y);
        let horizontal_overlap = self.right().min(other.right()) - self.x.max(other.x);

        let side_by_side = (self.right() - other.x).abs() < EPS
            || (other.right() - self.x).abs() < EPS;
        let stacked = (self.bottom() - other.y).abs() < EPS
            || (other.bottom() - self.y).abs() < EPS;

        (side_by_side && vertical_overlap > 0.0) || (stacked && horizontal_overlap > 0.0)
    }

    /// True if the rectangle lies inside `[0, width] x [0, height]`
    pub fn fits_within(&self, bounds: FloorBounds) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= bounds.width
            && self.bottom() <= bounds.height
    }
}

/// Outer extent of the floor, shared read-only by every boundary test
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FloorBounds {
    pub width: f64,
    pub height: f64,
}

impl FloorBounds {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(LayoutError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    /// Outer sides touched by `rect`, in the order left, right, top, bottom
    ///
    /// Touching is exact coincidence with the floor edge.
    pub fn touched_sides(&self, rect: &Rect) -> Vec<Side> {
        let mut sides = Vec::with_capacity(4);
        if rect.x == 0.0 {
            sides.push(Side::Left);
        }
        if rect.right() == self.width {
            sides.push(Side::Right);
        }
        if rect.y == 0.0 {
            sides.push(Side::Top);
        }
        if rect.bottom() == self.height {
            sides.push(Side::Bottom);
        }
        sides
    }
}

/// One of the four outer sides of the floor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let b = Rect::new(3.0, 3.0, 4.0, 4.0);
        let c = Rect::new(4.0, 0.0, 4.0, 4.0);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // touching edges do not overlap
    }

    #[test]
    fn test_min_gap() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let near = Rect::new(6.0, 0.0, 2.0, 2.0);
        let far = Rect::new(7.0, 0.0, 2.0, 2.0);

        assert!(!a.has_min_gap(&near, 3.0));
        assert!(a.has_min_gap(&far, 3.0));
    }

    #[test]
    fn test_flush_adjacent() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let right = Rect::new(4.0, 2.0, 3.0, 3.0);
        let corner_only = Rect::new(4.0, 4.0, 3.0, 3.0);
        let below = Rect::new(1.0, 4.0, 2.0, 2.0);

        assert!(a.is_flush_adjacent(&right));
        assert!(a.is_flush_adjacent(&below));
        assert!(!a.is_flush_adjacent(&corner_only));
    }

    #[test]
    fn test_touched_sides() {
        let bounds = FloorBounds::new(20.0, 20.0).unwrap();

        let corner = Rect::new(0.0, 15.0, 5.0, 5.0);
        assert_eq!(bounds.touched_sides(&corner), vec![Side::Left, Side::Bottom]);

        let inner = Rect::new(2.0, 2.0, 5.0, 5.0);
        assert!(bounds.touched_sides(&inner).is_empty());

        let full = Rect::new(0.0, 0.0, 20.0, 20.0);
        assert_eq!(bounds.touched_sides(&full).len(), 4);
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(FloorBounds::new(0.0, 10.0).is_err());
        assert!(FloorBounds::new(10.0, f64::NAN).is_err());
    }
}
