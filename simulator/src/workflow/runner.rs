use crate::generator::profile::FrameGenerator;
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use fmcwcore::events::{EventTracker, LabelFollower, PresenceUpdate};
use fmcwcore::interface::{FrameDoubleBuffer, ProcessingResult};
use fmcwcore::processing::AngleOfArrivalProcessor;
use fmcwcore::telemetry::MetricsSnapshot;
use log::info;
use serde::Serialize;

/// One processed frame as written to the report.
#[derive(Debug, Clone, Serialize)]
pub struct FrameRecord {
    pub frame: usize,
    pub result: ProcessingResult,
    pub range_m: f64,
    /// Arrival angles off boresight, in degrees.
    pub azimuth_deg: f32,
    pub elevation_deg: f32,
    /// Range bin the generator placed the target at, if present.
    pub truth_range_bin: Option<f32>,
    pub presence: PresenceUpdate,
}

pub struct WorkflowResult {
    pub records: Vec<FrameRecord>,
    pub events: usize,
    pub metrics: MetricsSnapshot,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let radar = self.config.radar.clone();
        let mut processor =
            AngleOfArrivalProcessor::with_parameters(radar.clone(), self.config.internal_parameters())
                .context("initializing angle-of-arrival processor")?;
        let follower = LabelFollower::new(self.config.threshold_enter, self.config.threshold_exit)
            .context("initializing label follower")?;
        let mut tracker = EventTracker::new(follower, self.config.trend_window);
        let mut generator = FrameGenerator::new(self.config.generator.clone(), radar.clone())?;
        let mut buffers = FrameDoubleBuffer::new(&radar).context("allocating frame buffers")?;

        let mut records = Vec::with_capacity(self.config.frames);
        let mut events = 0;

        for frame_index in 0..self.config.frames {
            let truth_range_bin = generator.target_range_bin();
            generator
                .fill(buffers.back_mut())
                .with_context(|| format!("generating frame {}", frame_index))?;
            buffers.swap();

            let frame = buffers.front().context("reading published frame")?;
            let result = processor
                .process(&frame)
                .with_context(|| format!("processing frame {}", frame_index))?;
            let presence = tracker.feed(&result);

            if presence.changed {
                events += 1;
                info!(
                    "frame {}: presence {} (amplitude {:.3}, range bin {})",
                    frame_index,
                    if presence.active { "entered" } else { "left" },
                    result.amplitude,
                    result.range
                );
            }

            let geometry = processor.configuration();
            records.push(FrameRecord {
                frame: frame_index,
                range_m: geometry.bin_to_meters(result.range),
                azimuth_deg: geometry.phase_to_angle(result.azimuth).to_degrees(),
                elevation_deg: geometry.phase_to_angle(result.elevation).to_degrees(),
                truth_range_bin,
                result,
                presence,
            });
        }

        Ok(WorkflowResult {
            records,
            events,
            metrics: processor.metrics(),
        })
    }
}
