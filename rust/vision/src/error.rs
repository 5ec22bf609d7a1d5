// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use floorgen_layout::LayoutError;
use thiserror::Error;

/// Result type for detection, curation and ranking
pub type Result<T> = std::result::Result<T, VisionError>;

/// Errors surfaced by the image pipeline
///
/// Ambiguous detections and short inputs are not errors; they are logged and
/// reported through the returned reports instead.
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Plan {requested} requested but only {available} ranked plans exist")]
    PlanOutOfRange { requested: usize, available: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
