use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use fmcwcore::prelude::{InternalParameters, RadarConfiguration};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub radar: RadarConfiguration,
    /// Overrides the default detection threshold when set.
    pub detection_threshold: Option<f32>,
    pub threshold_enter: f32,
    pub threshold_exit: f32,
    pub trend_window: usize,
    pub frames: usize,
    pub generator: GeneratorConfig,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            radar: RadarConfiguration::default(),
            detection_threshold: None,
            threshold_enter: 1.0,
            threshold_exit: 0.5,
            trend_window: 8,
            frames: 20,
            generator: GeneratorConfig::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(frames: usize, chirps_per_frame: usize, samples_per_chirp: usize) -> Self {
        Self {
            radar: RadarConfiguration {
                chirps_per_frame,
                samples_per_chirp,
                ..Default::default()
            },
            frames,
            ..Default::default()
        }
    }

    pub fn internal_parameters(&self) -> InternalParameters {
        let params = InternalParameters::derive(&self.radar);
        match self.detection_threshold {
            Some(threshold) => params.with_threshold(threshold),
            None => params,
        }
    }
}
