// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end run: generate, render, curate, rank, derive first floors

use crate::config::PipelineConfig;
use crate::curation::{curate_directory, CurationReport};
use crate::error::{Result, VisionError};
use crate::ranking::{select_connected_plans, RankedPlan};
use crate::render::render_layout;
use crate::storage::clear_images;
use floorgen_layout::{apply_approach, generate_base_layout, Approach, Layout, LayoutError};
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fs;

/// One rendered first-floor variant
#[derive(Debug, Clone, Serialize)]
pub struct FirstFloorOutput {
    pub approach: u8,
    pub file: String,
    pub rooms: Vec<String>,
}

/// Summary written to `report.json`
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub generated: Vec<String>,
    pub failed_plans: usize,
    pub curation: CurationReport,
    pub ranking: Vec<RankedPlan>,
    pub chosen_plan: Option<String>,
    pub first_floor: Vec<FirstFloorOutput>,
}

/// Run every stage in order and write the report
pub fn run_pipeline<R: Rng + ?Sized>(
    config: &PipelineConfig,
    rng: &mut R,
) -> Result<PipelineReport> {
    let bounds = config.generator.bounds()?;
    let mut report = PipelineReport::default();

    // Stage 1: base layouts
    let output = config.output_dir();
    clear_images(&output)?;
    let mut layouts: FxHashMap<String, Layout> = FxHashMap::default();
    for i in 1..=config.plan_count {
        let layout = match generate_base_layout(&config.generator, rng) {
            Ok(layout) => layout,
            Err(err @ LayoutError::PlacementFailed { .. }) => {
                tracing::warn!(plan = i, error = %err, "Skipping plan");
                report.failed_plans += 1;
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        let name = format!("floorplan_{i}.png");
        render_layout(&layout, bounds, &config.render).save(output.join(&name))?;
        report.generated.push(name.clone());
        layouts.insert(name, layout);
    }
    tracing::info!(
        generated = report.generated.len(),
        failed = report.failed_plans,
        "Base layouts rendered"
    );

    // Stage 2: curation
    report.curation = curate_directory(
        &output,
        &config.curated_dir(),
        &config.detection,
        &config.curation,
    )?;

    // Stage 3: connected-plan ranking
    report.ranking = select_connected_plans(
        &config.curated_dir(),
        &config.perfect_dir(),
        &config.detection,
        &config.ranking,
    )?;

    // Stage 4: first floor from the chosen plan
    let first_floor_dir = config.first_floor_dir();
    clear_images(&first_floor_dir)?;

    if report.ranking.is_empty() {
        tracing::warn!("No connected plan available, skipping first floor");
    } else {
        let chosen = report
            .ranking
            .get(config.plan_index.wrapping_sub(1))
            .ok_or(VisionError::PlanOutOfRange {
                requested: config.plan_index,
                available: report.ranking.len(),
            })?
            .name
            .clone();

        match layouts.get(&chosen) {
            Some(base) => {
                for approach in Approach::ALL {
                    let plan = apply_approach(base, bounds, approach, &config.carve, rng)?;
                    let file = format!("first_floor_plan_approach{}.png", approach.number());
                    render_layout(&plan, bounds, &config.render)
                        .save(first_floor_dir.join(&file))?;
                    report.first_floor.push(FirstFloorOutput {
                        approach: approach.number(),
                        file,
                        rooms: plan.ids().map(|id| id.to_string()).collect(),
                    });
                }
            }
            None => tracing::warn!(plan = %chosen, "Ranked plan has no layout in this run"),
        }
        report.chosen_plan = Some(chosen);
    }

    // Stage 5: report
    fs::write(config.report_path(), serde_json::to_string_pretty(&report)?)?;
    tracing::info!(report = %config.report_path().display(), "Pipeline complete");
    Ok(report)
}
