// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raster mask operations for region detection

use crate::types::ColorRange;
use image::{GrayImage, Luma, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

/// Convert an RGB image to grayscale
pub fn rgb_to_grayscale(image: &RgbImage) -> GrayImage {
    let mut gray = GrayImage::new(image.width(), image.height());

    for (x, y, pixel) in image.enumerate_pixels() {
        let r = pixel.0[0] as f32;
        let g = pixel.0[1] as f32;
        let b = pixel.0[2] as f32;
        // Standard luminance formula (ITU-R BT.601)
        let luma = (0.299 * r + 0.587 * g + 0.114 * b).round().min(255.0) as u8;
        gray.put_pixel(x, y, Luma([luma]));
    }

    gray
}

/// Inverted binary threshold - pixels darker than the cutoff become white
pub fn threshold_inverted(image: &GrayImage, cutoff: u8) -> GrayImage {
    let mut result = GrayImage::new(image.width(), image.height());

    for (x, y, pixel) in image.enumerate_pixels() {
        let value = if pixel.0[0] < cutoff { 255 } else { 0 };
        result.put_pixel(x, y, Luma([value]));
    }

    result
}

/// Mask of pixels whose colour lies inside `range` (all channels inclusive)
pub fn in_range(image: &RgbImage, range: &ColorRange) -> GrayImage {
    let mut result = GrayImage::new(image.width(), image.height());

    for (x, y, pixel) in image.enumerate_pixels() {
        if range.contains(pixel.0) {
            result.put_pixel(x, y, Luma([255]));
        }
    }

    result
}

/// Pixel-wise AND of two masks of equal size
pub fn mask_and(a: &GrayImage, b: &GrayImage) -> GrayImage {
    let mut result = a.clone();
    for (out, other) in result.pixels_mut().zip(b.pixels()) {
        out.0[0] &= other.0[0];
    }
    result
}

/// Fill the interior of a closed contour (boundary included) with white
pub fn fill_contour(mask: &mut GrayImage, points: &[Point<i32>]) {
    let mut polygon = points.to_vec();
    polygon.dedup();
    while polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }

    // Too few vertices for a polygon: just mark the traced pixels
    if polygon.len() < 3 {
        for p in &polygon {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < mask.width() && (p.y as u32) < mask.height() {
                mask.put_pixel(p.x as u32, p.y as u32, Luma([255]));
            }
        }
        return;
    }

    draw_polygon_mut(mask, &polygon, Luma([255]));
}

/// Dilate with a square structuring element of the given radius
pub fn dilate(image: &GrayImage, radius: u8) -> GrayImage {
    imageproc::morphology::dilate(image, imageproc::distance_transform::Norm::LInf, radius)
}

/// Erode with a square structuring element of the given radius
pub fn erode(image: &GrayImage, radius: u8) -> GrayImage {
    imageproc::morphology::erode(image, imageproc::distance_transform::Norm::LInf, radius)
}

/// Morphological closing (dilate then erode) - bridges gaps up to `2 * radius`
pub fn morphological_close(image: &GrayImage, radius: u8) -> GrayImage {
    let dilated = dilate(image, radius);
    erode(&dilated, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn count_nonzero(mask: &GrayImage) -> usize {
        mask.pixels().filter(|p| p.0[0] != 0).count()
    }

    #[test]
    fn test_threshold_inverted() {
        let mut img = GrayImage::new(10, 1);
        for x in 0..10 {
            img.put_pixel(x, 0, Luma([x as u8 * 10]));
        }

        let result = threshold_inverted(&img, 50);

        assert_eq!(result.get_pixel(4, 0).0[0], 255); // 40 < 50
        assert_eq!(result.get_pixel(5, 0).0[0], 0); // 50 is not darker
    }

    #[test]
    fn test_rgb_to_grayscale() {
        let mut rgb = RgbImage::new(2, 1);
        rgb.put_pixel(0, 0, Rgb([255, 255, 255]));
        rgb.put_pixel(1, 0, Rgb([0, 0, 0]));

        let gray = rgb_to_grayscale(&rgb);

        assert_eq!(gray.get_pixel(0, 0).0[0], 255);
        assert_eq!(gray.get_pixel(1, 0).0[0], 0);
    }

    #[test]
    fn test_in_range_and_mask() {
        let mut rgb = RgbImage::new(3, 1);
        rgb.put_pixel(0, 0, Rgb([250, 250, 250]));
        rgb.put_pixel(1, 0, Rgb([250, 150, 250]));
        rgb.put_pixel(2, 0, Rgb([210, 220, 230]));

        let range = ColorRange::new([200, 200, 200], [255, 255, 255]);
        let white = in_range(&rgb, &range);
        assert_eq!(count_nonzero(&white), 2);

        let mut keep = GrayImage::new(3, 1);
        keep.put_pixel(2, 0, Luma([255]));
        let both = mask_and(&white, &keep);
        assert_eq!(count_nonzero(&both), 1);
        assert_eq!(both.get_pixel(2, 0).0[0], 255);
    }

    #[test]
    fn test_fill_contour_rectangle() {
        let mut mask = GrayImage::new(10, 10);
        let square = [
            Point::new(2, 2),
            Point::new(6, 2),
            Point::new(6, 6),
            Point::new(2, 6),
        ];

        fill_contour(&mut mask, &square);

        assert_eq!(mask.get_pixel(4, 4).0[0], 255);
        assert_eq!(mask.get_pixel(2, 2).0[0], 255);
        assert_eq!(mask.get_pixel(6, 6).0[0], 255);
        assert_eq!(mask.get_pixel(2, 6).0[0], 255);
        assert_eq!(mask.get_pixel(8, 8).0[0], 0);
        assert_eq!(mask.get_pixel(1, 4).0[0], 0);
    }

    #[test]
    fn test_close_bridges_narrow_gap() {
        let mut mask = GrayImage::new(20, 10);
        for y in 3..7 {
            for x in (3..8).chain(11..16) {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
        assert_eq!(mask.get_pixel(9, 5).0[0], 0);

        let closed = morphological_close(&mask, 2);
        assert_eq!(closed.get_pixel(9, 5).0[0], 255);
        assert_eq!(closed.get_pixel(9, 1).0[0], 0);
        assert_eq!(count_nonzero(&closed), 13 * 4);
    }

    #[test]
    fn test_fill_degenerate_contour() {
        let mut mask = GrayImage::new(4, 4);
        fill_contour(&mut mask, &[Point::new(1, 1)]);
        assert_eq!(count_nonzero(&mask), 1);
    }
}
