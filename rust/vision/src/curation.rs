// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Selection and labeling of the curated image set
//!
//! Detection records are split by how many target regions were found. Images
//! with exactly one region are preferred and get a text label at the region
//! centroid; ambiguous ones only pad the set up to the minimum goal.

use crate::error::Result;
use crate::region_detector::detect_living_rooms;
use crate::storage::{clear_images, file_name, list_images, load_rgb};
use crate::types::{CurationConfig, DetectionConfig, DetectionRecord, LabelStyle, Point2D};
use ab_glyph::{FontArc, FontVec};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Which side of the split a record landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    ExactlyOne,
    Other,
}

impl Partition {
    pub fn of(record: &DetectionRecord) -> Self {
        if record.centroids.len() == 1 {
            Partition::ExactlyOne
        } else {
            Partition::Other
        }
    }
}

/// One selected image
#[derive(Debug, Clone)]
pub struct CuratedEntry {
    pub record: DetectionRecord,
    pub partition: Partition,
}

impl CuratedEntry {
    /// Where the label goes, only for single-region images
    pub fn label_anchor(&self) -> Option<Point2D> {
        match self.partition {
            Partition::ExactlyOne => self.record.single_centroid(),
            Partition::Other => None,
        }
    }
}

/// Soft failures of a curation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurationWarning {
    /// No candidate images at all
    EmptyInput,
    /// Candidates exist but none has exactly one target region
    NoSingleCentroid { candidates: usize },
    /// Fewer images selected than the minimum goal
    BelowGoal { selected: usize, goal: usize },
}

/// Ordered result of the selection policy
#[derive(Debug, Clone, Default)]
pub struct CuratedSet {
    pub entries: Vec<CuratedEntry>,
    pub warnings: Vec<CurationWarning>,
}

impl CuratedSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.record.name.clone()).collect()
    }
}

/// Summary of a directory-level curation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct CurationReport {
    pub scanned: usize,
    pub selected: Vec<String>,
    pub labeled: usize,
    /// Image files that could not be decoded
    pub skipped: Vec<String>,
    pub warnings: Vec<CurationWarning>,
}

/// Choose the curated set from detection records in input order
pub fn select_curated(records: Vec<DetectionRecord>, config: &CurationConfig) -> CuratedSet {
    let mut set = CuratedSet::default();

    if records.is_empty() {
        tracing::warn!("No candidate images to curate");
        set.warnings.push(CurationWarning::EmptyInput);
        return set;
    }

    let total = records.len();
    let (singles, others): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|record| Partition::of(record) == Partition::ExactlyOne);

    tracing::debug!(
        singles = singles.len(),
        others = others.len(),
        "Partitioned detection records"
    );

    if singles.len() >= config.max_selected {
        set.entries = singles
            .into_iter()
            .take(config.max_selected)
            .map(|record| CuratedEntry {
                record,
                partition: Partition::ExactlyOne,
            })
            .collect();
        return set;
    }

    if singles.is_empty() && !config.fallback_to_ambiguous {
        tracing::warn!(
            candidates = total,
            "No image has exactly one living room; nothing is good enough to curate"
        );
        set.warnings
            .push(CurationWarning::NoSingleCentroid { candidates: total });
        return set;
    }

    set.entries.extend(singles.into_iter().map(|record| CuratedEntry {
        record,
        partition: Partition::ExactlyOne,
    }));

    let missing = config.min_goal.saturating_sub(set.entries.len());
    set.entries
        .extend(others.into_iter().take(missing).map(|record| CuratedEntry {
            record,
            partition: Partition::Other,
        }));

    if set.entries.len() < config.min_goal {
        tracing::warn!(
            selected = set.entries.len(),
            goal = config.min_goal,
            "Fewer curated images than the goal"
        );
        set.warnings.push(CurationWarning::BelowGoal {
            selected: set.entries.len(),
            goal: config.min_goal,
        });
    }

    set
}

/// Bundled DejaVu Sans, used when no font path is configured
const DEFAULT_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Load the label font
///
/// Without a configured path the bundled font is used. `None` means a
/// configured font could not be read, and a marker is drawn instead.
pub fn load_font(style: &LabelStyle) -> Option<FontArc> {
    let Some(path) = style.font_path.as_ref() else {
        return match FontArc::try_from_slice(DEFAULT_FONT) {
            Ok(font) => Some(font),
            Err(err) => {
                tracing::warn!(error = %err, "Invalid bundled label font");
                None
            }
        };
    };
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Cannot read label font");
            return None;
        }
    };
    match FontVec::try_from_vec(bytes) {
        Ok(font) => Some(FontArc::new(font)),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Invalid label font");
            None
        }
    }
}

/// Draw the label near `centroid`
///
/// The label origin is the truncated centroid plus the style offset. Without a
/// usable font a small outlined square marks the same spot.
pub fn label_image(
    image: &mut RgbImage,
    centroid: Point2D,
    style: &LabelStyle,
    font: Option<&FontArc>,
) {
    let x = centroid.x as i32 + style.offset_x;
    let y = centroid.y as i32 + style.offset_y;
    let color = Rgb(style.color);

    match font {
        Some(font) => draw_text_mut(image, color, x, y, style.scale, font, &style.text),
        None => {
            tracing::debug!(x, y, "No label font, drawing marker");
            let side = (style.scale / 2.0).max(2.0) as u32;
            draw_filled_rect_mut(image, Rect::at(x, y).of_size(side, side), color);
            draw_hollow_rect_mut(
                image,
                Rect::at(x - 1, y - 1).of_size(side + 2, side + 2),
                Rgb([255, 255, 255]),
            );
        }
    }
}

/// Clear `output` and persist the set, labeling single-region images
///
/// Returns the number of labeled images.
pub fn write_curated(set: &CuratedSet, output: &Path, style: &LabelStyle) -> Result<usize> {
    let removed = clear_images(output)?;
    if removed > 0 {
        tracing::debug!(removed, dir = %output.display(), "Cleared previous output");
    }

    let font = load_font(style);
    let mut labeled = 0;

    for entry in &set.entries {
        let target = output.join(&entry.record.name);
        match entry.label_anchor() {
            Some(centroid) => {
                let mut image = entry.record.image.clone();
                label_image(&mut image, centroid, style, font.as_ref());
                image.save(&target)?;
                labeled += 1;
            }
            None => entry.record.image.save(&target)?,
        }
    }

    Ok(labeled)
}

/// Detect, select and write in one pass over an image directory
///
/// Unreadable images are skipped. When no image can be read at all, `output`
/// is left untouched.
pub fn curate_directory(
    input: &Path,
    output: &Path,
    detection: &DetectionConfig,
    curation: &CurationConfig,
) -> Result<CurationReport> {
    let paths = list_images(input)?;
    let mut records = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();

    for path in &paths {
        let name = file_name(path);
        let image = match load_rgb(path) {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!(image = %name, error = %err, "Skipping unreadable image");
                skipped.push(name);
                continue;
            }
        };
        let centroids = detect_living_rooms(&image, detection);
        tracing::debug!(image = %name, regions = centroids.len(), "Detected living rooms");
        records.push(DetectionRecord::new(name, image, centroids));
    }

    let readable = records.len();
    let set = select_curated(records, curation);
    let mut report = CurationReport {
        scanned: paths.len(),
        selected: set.names(),
        labeled: 0,
        skipped,
        warnings: set.warnings.clone(),
    };

    if readable == 0 {
        return Ok(report);
    }

    report.labeled = write_curated(&set, output, &curation.label)?;
    tracing::info!(
        scanned = report.scanned,
        selected = report.selected.len(),
        labeled = report.labeled,
        "Curation complete"
    );
    Ok(report)
}
