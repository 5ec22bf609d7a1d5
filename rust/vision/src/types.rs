// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for living-room detection and plan curation

use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A 2D point in pixel coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Inclusive per-channel RGB range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorRange {
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, rgb: [u8; 3]) -> bool {
        (0..3).all(|c| rgb[c] >= self.lower[c] && rgb[c] <= self.upper[c])
    }
}

/// Configuration for the region detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Gray levels strictly below this are treated as boundary ink
    pub black_threshold: u8,
    /// Colour range of target (living room) fills
    pub living_range: ColorRange,
    /// Target regions with a smaller contour area are noise (square pixels)
    pub min_region_area: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            black_threshold: 50,
            living_range: ColorRange::new([200, 200, 200], [255, 255, 255]),
            min_region_area: 50.0,
        }
    }
}

/// Detection result for one image
#[derive(Debug, Clone)]
pub struct DetectionRecord {
    /// Image identifier (file name)
    pub name: String,
    pub image: RgbImage,
    /// Centroids of target regions, in contour discovery order
    pub centroids: Vec<Point2D>,
}

impl DetectionRecord {
    pub fn new(name: impl Into<String>, image: RgbImage, centroids: Vec<Point2D>) -> Self {
        Self {
            name: name.into(),
            image,
            centroids,
        }
    }

    /// The single target centroid, if exactly one was found
    pub fn single_centroid(&self) -> Option<Point2D> {
        match self.centroids.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

/// Text overlay drawn on curated images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelStyle {
    pub text: String,
    /// Offset from the centroid to the label origin, in pixels
    pub offset_x: i32,
    pub offset_y: i32,
    /// Glyph height in pixels
    pub scale: f32,
    pub color: [u8; 3],
    /// TrueType/OpenType font replacing the bundled one
    pub font_path: Option<PathBuf>,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            text: "Living Room".to_string(),
            offset_x: -20,
            offset_y: -6,
            scale: 12.0,
            color: [0, 0, 0],
            font_path: None,
        }
    }
}

/// Configuration for the curation policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationConfig {
    /// Cap when enough single-target images exist
    pub max_selected: usize,
    /// Minimum number of images to aim for
    pub min_goal: usize,
    /// Fill from ambiguous detections even when no single-target image exists
    pub fallback_to_ambiguous: bool,
    pub label: LabelStyle,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            max_selected: 10,
            min_goal: 8,
            fallback_to_ambiguous: false,
            label: LabelStyle::default(),
        }
    }
}

/// Configuration for connected-plan ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Boundary contours at or below this area do not count (square pixels)
    pub min_contour_area: f64,
    /// Number of plans kept
    pub top_n: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            min_contour_area: 200.0,
            top_n: 3,
        }
    }
}
