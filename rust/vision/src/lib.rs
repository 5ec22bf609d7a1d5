// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Living-room detection and curation for rendered floor plans
//!
//! This crate provides a complete pipeline for:
//! 1. Rasterizing layouts produced by `floorgen-layout`
//! 2. Finding the outer floor boundary and the near-white regions inside it
//! 3. Curating a set of plans with exactly one living room, labeled
//! 4. Ranking connected plans by living area
//!
//! # Usage
//!
//! ```rust,ignore
//! use floorgen_vision::{curate_directory, CurationConfig, DetectionConfig};
//!
//! let report = curate_directory(
//!     Path::new("output"),
//!     Path::new("finaloutput"),
//!     &DetectionConfig::default(),
//!     &CurationConfig::default(),
//! )?;
//! println!("{} images selected", report.selected.len());
//! ```

pub mod config;
pub mod contour_ops;
pub mod curation;
pub mod error;
pub mod image_ops;
pub mod pipeline;
pub mod ranking;
pub mod region_detector;
pub mod render;
pub mod storage;
pub mod types;

// Re-export commonly used types and functions
pub use config::PipelineConfig;
pub use curation::{
    curate_directory, label_image, select_curated, write_curated, CuratedEntry, CuratedSet,
    CurationReport, CurationWarning, Partition,
};
pub use error::{Result, VisionError};
pub use pipeline::{run_pipeline, FirstFloorOutput, PipelineReport};
pub use ranking::{rank_plans, select_connected_plans, RankedPlan};
pub use region_detector::{detect_living_rooms, is_connected, living_area};
pub use render::{render_layout, Palette, RenderConfig};
pub use types::{
    ColorRange, CurationConfig, DetectionConfig, DetectionRecord, LabelStyle, Point2D,
    RankingConfig,
};
