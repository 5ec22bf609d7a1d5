// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Living-room detection inside the outer floor boundary
//!
//! Rendered plans have near-black walls and a light background. The largest
//! dark outline is taken as the floor boundary; near-white regions inside it
//! are the target rooms.

use crate::contour_ops::{contour_area, contour_moments, external_contours};
use crate::image_ops::{fill_contour, in_range, mask_and, rgb_to_grayscale, threshold_inverted};
use crate::types::{DetectionConfig, Point2D};
use image::{GrayImage, RgbImage};

/// Binary mask of boundary ink (pixels darker than the threshold)
pub fn black_mask(image: &RgbImage, config: &DetectionConfig) -> GrayImage {
    let gray = rgb_to_grayscale(image);
    threshold_inverted(&gray, config.black_threshold)
}

/// Filled interior of the largest dark outline, or `None` if there is no ink
pub fn floorplan_mask(image: &RgbImage, config: &DetectionConfig) -> Option<GrayImage> {
    let black = black_mask(image, config);
    let contours = external_contours(&black);

    let largest = contours.iter().max_by(|a, b| {
        contour_area(a)
            .partial_cmp(&contour_area(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    })?;

    let mut mask = GrayImage::new(image.width(), image.height());
    fill_contour(&mut mask, largest);
    Some(mask)
}

/// Near-white pixels inside the floor boundary
pub fn living_mask(image: &RgbImage, config: &DetectionConfig) -> Option<GrayImage> {
    let floorplan = floorplan_mask(image, config)?;
    let white = in_range(image, &config.living_range);
    Some(mask_and(&white, &floorplan))
}

/// Centroids of the target regions, in contour discovery order
///
/// Returns an empty list when the image has no boundary or no region passes
/// the area filter.
pub fn detect_living_rooms(image: &RgbImage, config: &DetectionConfig) -> Vec<Point2D> {
    let Some(living) = living_mask(image, config) else {
        return Vec::new();
    };

    external_contours(&living)
        .iter()
        .filter(|contour| contour_area(contour) >= config.min_region_area)
        .filter_map(|contour| contour_moments(contour).centroid())
        .collect()
}

/// Area of the largest target region, 0 when none exists
pub fn living_area(image: &RgbImage, config: &DetectionConfig) -> f64 {
    let Some(living) = living_mask(image, config) else {
        return 0.0;
    };

    external_contours(&living)
        .iter()
        .map(|contour| contour_area(contour))
        .fold(0.0, f64::max)
}

/// True when exactly one dark outline is larger than `min_contour_area`
pub fn is_connected(image: &RgbImage, config: &DetectionConfig, min_contour_area: f64) -> bool {
    let black = black_mask(image, config);
    external_contours(&black)
        .iter()
        .filter(|contour| contour_area(contour) > min_contour_area)
        .count()
        == 1
}
