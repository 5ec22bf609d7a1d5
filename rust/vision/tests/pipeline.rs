// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Detection on rendered layouts and a full seeded pipeline run

use approx::assert_abs_diff_eq;
use floorgen_layout::{
    apply_approach, Approach, CarveConfig, FloorBounds, Layout, Rect, RoomId, RoomKind,
};
use floorgen_vision::storage::list_images;
use floorgen_vision::{
    detect_living_rooms, is_connected, render_layout, run_pipeline, DetectionConfig,
    PipelineConfig, RenderConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn bounds() -> FloorBounds {
    FloorBounds::new(20.0, 20.0).unwrap()
}

fn layout(rooms: &[(&str, Rect)]) -> Layout {
    Layout::from_rooms(rooms.iter().map(|(name, rect)| (RoomId::parse(name), *rect))).unwrap()
}

#[test]
fn test_gap_between_two_rooms_is_one_living_room() {
    let plan = layout(&[
        ("Bedroom_1", Rect::new(0.0, 0.0, 8.0, 20.0)),
        ("Kitchen", Rect::new(12.0, 0.0, 8.0, 20.0)),
    ]);
    let img = render_layout(&plan, bounds(), &RenderConfig::default());

    let centroids = detect_living_rooms(&img, &DetectionConfig::default());

    assert_eq!(centroids.len(), 1);
    assert_abs_diff_eq!(centroids[0].x, 209.5, epsilon = 1.0);
    assert_abs_diff_eq!(centroids[0].y, 209.5, epsilon = 1.0);
}

#[test]
fn test_band_splits_living_space_in_two() {
    let plan = layout(&[
        ("Kitchen", Rect::new(0.0, 0.0, 20.0, 2.0)),
        ("Bedroom_1", Rect::new(0.0, 8.0, 20.0, 4.0)),
        ("Garage", Rect::new(0.0, 18.0, 20.0, 2.0)),
    ]);
    let img = render_layout(&plan, bounds(), &RenderConfig::default());

    let centroids = detect_living_rooms(&img, &DetectionConfig::default());

    assert_eq!(centroids.len(), 2);
    assert!(centroids[0].y < centroids[1].y);
    assert_abs_diff_eq!(centroids[0].y, 109.5, epsilon = 1.0);
    assert_abs_diff_eq!(centroids[1].y, 309.5, epsilon = 1.0);
}

#[test]
fn test_rooms_that_never_fuse_are_disconnected() {
    let plan = layout(&[
        ("Bedroom_1", Rect::new(0.0, 0.0, 5.0, 5.0)),
        ("Kitchen", Rect::new(14.0, 14.0, 5.0, 5.0)),
    ]);
    let config = RenderConfig {
        max_closing_units: 1,
        ..Default::default()
    };
    let img = render_layout(&plan, bounds(), &config);
    assert!(!is_connected(&img, &DetectionConfig::default(), 200.0));

    let fused = render_layout(&plan, bounds(), &RenderConfig::default());
    assert!(is_connected(&fused, &DetectionConfig::default(), 200.0));
}

#[test]
fn test_first_floor_renders_keep_the_boundary() {
    let base = layout(&[
        ("Bedroom_1", Rect::new(0.0, 0.0, 5.0, 5.0)),
        ("Kitchen", Rect::new(15.0, 0.0, 5.0, 5.0)),
        ("Garage", Rect::new(0.0, 15.0, 5.0, 5.0)),
        ("Washroom_1", Rect::new(15.0, 15.0, 5.0, 5.0)),
    ]);
    let mut rng = StdRng::seed_from_u64(11);

    for approach in Approach::ALL {
        let plan =
            apply_approach(&base, bounds(), approach, &CarveConfig { thickness: 1.0 }, &mut rng)
                .unwrap();
        let img = render_layout(&plan, bounds(), &RenderConfig::default());
        assert!(is_connected(&img, &DetectionConfig::default(), 200.0));
        assert_eq!(detect_living_rooms(&img, &DetectionConfig::default()).len(), 1);
    }
}

#[test]
fn test_seeded_pipeline_run() {
    let dir = TempDir::new().unwrap();
    let mut config = PipelineConfig::default().with_work_dir(dir.path());
    config.plan_count = 4;
    config.seed = Some(7);
    let mut rng = StdRng::seed_from_u64(7);

    let report = run_pipeline(&config, &mut rng).unwrap();

    assert_eq!(report.generated.len() + report.failed_plans, 4);
    assert_eq!(
        list_images(&config.output_dir()).unwrap().len(),
        report.generated.len()
    );
    assert_eq!(
        list_images(&config.curated_dir()).unwrap().len(),
        report.curation.selected.len()
    );
    assert_eq!(
        list_images(&config.perfect_dir()).unwrap().len(),
        report.ranking.len()
    );
    assert!(report.ranking.len() <= 3);
    assert!(config.report_path().is_file());

    let first_floor = list_images(&config.first_floor_dir()).unwrap();
    match &report.chosen_plan {
        Some(_) => assert_eq!(first_floor.len(), 3),
        None => assert!(first_floor.is_empty()),
    }
}

#[test]
fn test_pipeline_rerun_replaces_outputs() {
    let dir = TempDir::new().unwrap();
    let mut config = PipelineConfig::default().with_work_dir(dir.path());
    config.plan_count = 3;

    run_pipeline(&config, &mut StdRng::seed_from_u64(1)).unwrap();
    config.plan_count = 2;
    let report = run_pipeline(&config, &mut StdRng::seed_from_u64(2)).unwrap();

    assert_eq!(
        list_images(&config.output_dir()).unwrap().len(),
        report.generated.len()
    );
    assert_eq!(
        list_images(&config.curated_dir()).unwrap().len(),
        report.curation.selected.len()
    );
}
