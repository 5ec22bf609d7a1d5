// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contour extraction and polygon moments

use crate::types::Point2D;
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;

/// Outermost contours of the white regions in a binary mask
///
/// Contours nested inside holes of other regions are skipped. Order follows
/// the raster scan in which borders are discovered.
pub fn external_contours(mask: &GrayImage) -> Vec<Vec<Point<i32>>> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.parent.is_none() && c.border_type == BorderType::Outer)
        .map(|c| c.points)
        .collect()
}

/// Spatial moments of a closed polygon (Green's theorem)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    /// Centroid `(m10 / m00, m01 / m00)`; `None` for zero-area polygons
    pub fn centroid(&self) -> Option<Point2D> {
        if self.m00 == 0.0 {
            return None;
        }
        Some(Point2D::new(self.m10 / self.m00, self.m01 / self.m00))
    }
}

/// Polygon moments of a contour, treating its points as vertices
pub fn contour_moments(points: &[Point<i32>]) -> Moments {
    let n = points.len();
    if n < 3 {
        return Moments::default();
    }

    let mut a = 0.0;
    let mut sx = 0.0;
    let mut sy = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let (xi, yi) = (points[i].x as f64, points[i].y as f64);
        let (xj, yj) = (points[j].x as f64, points[j].y as f64);
        let cross = xi * yj - xj * yi;
        a += cross;
        sx += (xi + xj) * cross;
        sy += (yi + yj) * cross;
    }

    Moments {
        m00: a / 2.0,
        m10: sx / 6.0,
        m01: sy / 6.0,
    }
}

/// Unsigned polygon area enclosed by the contour (shoelace formula)
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    contour_moments(points).m00.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Luma;

    fn square(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point<i32>> {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    #[test]
    fn test_contour_area() {
        assert_relative_eq!(contour_area(&square(0, 0, 10, 10)), 100.0);
        // Orientation does not matter
        let mut reversed = square(0, 0, 10, 10);
        reversed.reverse();
        assert_relative_eq!(contour_area(&reversed), 100.0);
    }

    #[test]
    fn test_centroid() {
        let centroid = contour_moments(&square(10, 20, 30, 60)).centroid().unwrap();
        assert_relative_eq!(centroid.x, 20.0);
        assert_relative_eq!(centroid.y, 40.0);
    }

    #[test]
    fn test_degenerate_contour_has_no_centroid() {
        let line = vec![Point::new(0, 0), Point::new(5, 0), Point::new(10, 0)];
        assert!(contour_moments(&line).centroid().is_none());
        assert!(contour_moments(&[Point::new(1, 1)]).centroid().is_none());
    }

    #[test]
    fn test_external_contours_skip_nested_regions() {
        // White frame with a white island inside its hole
        let mut mask = GrayImage::new(30, 30);
        for y in 2..28 {
            for x in 2..28 {
                let on_frame = x < 5 || x >= 25 || y < 5 || y >= 25;
                let on_island = (12..18).contains(&x) && (12..18).contains(&y);
                if on_frame || on_island {
                    mask.put_pixel(x, y, Luma([255]));
                }
            }
        }

        let contours = external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_relative_eq!(contour_area(&contours[0]), 25.0 * 25.0);
    }
}
