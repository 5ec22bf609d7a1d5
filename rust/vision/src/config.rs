// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration loaded from environment variables.

use crate::render::RenderConfig;
use crate::types::{CurationConfig, DetectionConfig, RankingConfig};
use floorgen_layout::{CarveConfig, GeneratorConfig};
use std::path::{Path, PathBuf};

/// End-to-end pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root directory for all pipeline outputs.
    pub work_dir: PathBuf,
    /// Number of base layouts to generate.
    pub plan_count: usize,
    /// 1-based index into the ranked plans used for the first floor.
    pub plan_index: usize,
    /// Seed for the random source; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub generator: GeneratorConfig,
    pub carve: CarveConfig,
    pub render: RenderConfig,
    pub detection: DetectionConfig,
    pub curation: CurationConfig,
    pub ranking: RankingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            plan_count: 40,
            plan_index: 1,
            seed: None,
            generator: GeneratorConfig::default(),
            carve: CarveConfig { thickness: 1.0 },
            render: RenderConfig::default(),
            detection: DetectionConfig::default(),
            curation: CurationConfig::default(),
            ranking: RankingConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mut config = Self {
            work_dir: std::env::var("FLOORGEN_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir.clone()),
            plan_count: std::env::var("FLOORGEN_PLAN_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.plan_count),
            seed: std::env::var("FLOORGEN_SEED")
                .ok()
                .and_then(|v| v.parse().ok()),
            carve: CarveConfig {
                thickness: std::env::var("FLOORGEN_BALCONY_THICKNESS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.carve.thickness),
            },
            ..defaults
        };
        config.curation.label.font_path = std::env::var("FLOORGEN_LABEL_FONT")
            .ok()
            .map(PathBuf::from);
        config
    }

    /// Rendered base layouts.
    pub fn output_dir(&self) -> PathBuf {
        self.work_dir.join("output")
    }

    /// Curated, labeled images.
    pub fn curated_dir(&self) -> PathBuf {
        self.work_dir.join("finaloutput")
    }

    /// Top connected plans.
    pub fn perfect_dir(&self) -> PathBuf {
        self.work_dir.join("perfect")
    }

    /// First-floor renders, one per approach.
    pub fn first_floor_dir(&self) -> PathBuf {
        self.work_dir.join("output_floor1")
    }

    pub fn report_path(&self) -> PathBuf {
        self.work_dir.join("report.json")
    }

    pub fn with_work_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.work_dir = dir.as_ref().to_path_buf();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_layout() {
        let config = PipelineConfig::default().with_work_dir("/tmp/run");
        assert_eq!(config.output_dir(), PathBuf::from("/tmp/run/output"));
        assert_eq!(config.curated_dir(), PathBuf::from("/tmp/run/finaloutput"));
        assert_eq!(config.perfect_dir(), PathBuf::from("/tmp/run/perfect"));
        assert_eq!(
            config.first_floor_dir(),
            PathBuf::from("/tmp/run/output_floor1")
        );
        assert_eq!(config.report_path(), PathBuf::from("/tmp/run/report.json"));
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.plan_count, 40);
        assert_eq!(config.plan_index, 1);
        assert_eq!(config.carve.thickness, 1.0);
        assert!(config.curation.label.font_path.is_none());
    }
}
