// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ranking of connected plans by living area

use crate::error::Result;
use crate::region_detector::{is_connected, living_area};
use crate::storage::{clear_images, file_name, list_images, load_rgb};
use crate::types::{DetectionConfig, RankingConfig};
use image::RgbImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// A connected plan and its living area in square pixels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlan {
    pub name: String,
    pub living_area: f64,
}

/// Keep connected plans, largest living area first, at most `top_n`
///
/// Ties keep input order.
pub fn rank_plans<'a, I>(
    images: I,
    detection: &DetectionConfig,
    ranking: &RankingConfig,
) -> Vec<RankedPlan>
where
    I: IntoIterator<Item = (&'a str, &'a RgbImage)>,
{
    let mut ranked: Vec<RankedPlan> = images
        .into_iter()
        .filter(|(name, image)| {
            let connected = is_connected(image, detection, ranking.min_contour_area);
            if !connected {
                tracing::debug!(image = %name, "Skipping plan with disconnected boundary");
            }
            connected
        })
        .map(|(name, image)| RankedPlan {
            name: name.to_string(),
            living_area: living_area(image, detection),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.living_area
            .partial_cmp(&a.living_area)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(ranking.top_n);
    ranked
}

/// Rank the images in `input` and copy the winners unchanged into `output`
///
/// `output` is cleared first, even when nothing qualifies.
pub fn select_connected_plans(
    input: &Path,
    output: &Path,
    detection: &DetectionConfig,
    ranking: &RankingConfig,
) -> Result<Vec<RankedPlan>> {
    let mut loaded = Vec::new();
    for path in list_images(input)? {
        let name = file_name(&path);
        match load_rgb(&path) {
            Ok(image) => loaded.push((name, image)),
            Err(err) => tracing::warn!(image = %name, error = %err, "Skipping unreadable image"),
        }
    }

    let ranked = rank_plans(
        loaded.iter().map(|(name, image)| (name.as_str(), image)),
        detection,
        ranking,
    );

    clear_images(output)?;
    for plan in &ranked {
        fs::copy(input.join(&plan.name), output.join(&plan.name))?;
    }

    tracing::info!(
        candidates = loaded.len(),
        kept = ranked.len(),
        "Connected-plan ranking complete"
    );
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    fn plan_with_room(room: u32) -> RgbImage {
        let mut img = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        for y in 10..90 {
            for x in 10..90 {
                let frame = !(13..87).contains(&x) || !(13..87).contains(&y);
                let inside_room = (20..20 + room).contains(&x) && (20..20 + room).contains(&y);
                let color = if frame {
                    [0, 0, 0]
                } else if inside_room {
                    [255, 255, 255]
                } else {
                    [150, 150, 150]
                };
                img.put_pixel(x, y, Rgb(color));
            }
        }
        img
    }

    fn split_plan() -> RgbImage {
        let mut img = RgbImage::from_pixel(200, 100, Rgb([255, 255, 255]));
        for y in 10..90 {
            for x in (10..90).chain(110..190) {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
        img
    }

    #[test]
    fn test_sorted_by_area_and_truncated() {
        let small = plan_with_room(11);
        let large = plan_with_room(41);
        let medium = plan_with_room(21);
        let none = plan_with_room(0);
        let split = split_plan();

        let ranked = rank_plans(
            [
                ("small", &small),
                ("split", &split),
                ("large", &large),
                ("none", &none),
                ("medium", &medium),
            ],
            &DetectionConfig::default(),
            &RankingConfig::default(),
        );

        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["large", "medium", "small"]);
        assert!((ranked[0].living_area - 1600.0).abs() < 1e-9);
    }

    #[test]
    fn test_directory_copy_skips_unreadable_and_clears() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        fs::create_dir_all(&input).unwrap();
        fs::create_dir_all(&output).unwrap();

        plan_with_room(21).save(input.join("a.png")).unwrap();
        split_plan().save(input.join("b.png")).unwrap();
        fs::write(input.join("c.png"), b"not a png").unwrap();
        fs::write(output.join("stale.png"), b"x").unwrap();

        let ranked = select_connected_plans(
            &input,
            &output,
            &DetectionConfig::default(),
            &RankingConfig::default(),
        )
        .unwrap();

        assert_eq!(ranked.len(), 1);
        let kept: Vec<String> = list_images(&output)
            .unwrap()
            .iter()
            .map(|p| file_name(p))
            .collect();
        assert_eq!(kept, vec!["a.png"]);
        assert_eq!(
            fs::read(input.join("a.png")).unwrap(),
            fs::read(output.join("a.png")).unwrap()
        );
    }
}
