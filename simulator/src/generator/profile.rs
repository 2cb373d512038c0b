use crate::generator::template::cycle_phase;
use anyhow::{ensure, Context};
use fmcwcore::prelude::RadarConfiguration;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const ADC_MID_SCALE: f32 = 2048.0;
const ADC_MAX_CODE: f32 = 4095.0;

/// Synthetic moving point target seen by a three-antenna array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Range bin of the target on the first frame.
    pub range_bin: f32,
    /// Range bins travelled per frame; negative approaches the sensor.
    pub range_drift: f32,
    pub doppler_bin: f32,
    /// Peak deviation from mid-scale, in ADC codes.
    pub amplitude: f32,
    /// Phase lead of antenna 0 over antenna 2, radians.
    pub azimuth_phase: f32,
    /// Phase lead of antenna 1 over antenna 2, radians.
    pub elevation_phase: f32,
    /// Uniform noise half-width, in ADC codes.
    pub noise: f32,
    pub present_from: usize,
    pub present_until: Option<usize>,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            range_bin: 12.0,
            range_drift: 0.0,
            doppler_bin: 4.0,
            amplitude: 800.0,
            azimuth_phase: 0.4,
            elevation_phase: -0.2,
            noise: 2.0,
            present_from: 0,
            present_until: None,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    fn is_present(&self, frame_index: usize) -> bool {
        frame_index >= self.present_from
            && self.present_until.map_or(true, |until| frame_index < until)
    }

    fn antenna_phase(&self, antenna: usize) -> f32 {
        match antenna {
            0 => self.azimuth_phase,
            1 => self.elevation_phase,
            _ => 0.0,
        }
    }
}

/// Produces consecutive raw frames in the sensor's interleaved layout.
pub struct FrameGenerator {
    config: GeneratorConfig,
    radar: RadarConfiguration,
    rng: StdRng,
    frame_index: usize,
}

impl FrameGenerator {
    pub fn new(config: GeneratorConfig, radar: RadarConfiguration) -> anyhow::Result<Self> {
        radar.validate().context("validating radar configuration for generator")?;
        ensure!(
            config.noise >= 0.0 && config.noise.is_finite(),
            "generator noise must be finite and non-negative"
        );
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            radar,
            rng,
            frame_index: 0,
        })
    }

    /// Range bin the target occupies on the next frame.
    pub fn current_range_bin(&self) -> f32 {
        self.config.range_bin + self.config.range_drift * self.frame_index as f32
    }

    /// Ground-truth range bin of the next frame, `None` while the target is absent.
    pub fn target_range_bin(&self) -> Option<f32> {
        self.config
            .is_present(self.frame_index)
            .then(|| self.current_range_bin())
    }

    /// Writes the next frame into `out`, which must hold exactly one frame.
    pub fn fill(&mut self, out: &mut [u16]) -> anyhow::Result<()> {
        let antennas = self.radar.antenna_count;
        let samples = self.radar.samples_per_chirp;
        let chirps = self.radar.chirps_per_frame;
        ensure!(
            out.len() == self.radar.frame_len(),
            "frame buffer holds {} codes, expected {}",
            out.len(),
            self.radar.frame_len()
        );

        let present = self.config.is_present(self.frame_index);
        let range_bin = self.current_range_bin();
        let amplitude = if present { self.config.amplitude } else { 0.0 };

        for chirp in 0..chirps {
            let slow = cycle_phase(self.config.doppler_bin, chirp, chirps);
            for sample in 0..samples {
                let fast = cycle_phase(range_bin, sample, samples);
                for antenna in 0..antennas {
                    let phase = fast + slow + self.config.antenna_phase(antenna);
                    let jitter = if self.config.noise > 0.0 {
                        self.rng.gen_range(-self.config.noise..self.config.noise)
                    } else {
                        0.0
                    };
                    let value = ADC_MID_SCALE + amplitude * phase.cos() + jitter;
                    out[(chirp * samples + sample) * antennas + antenna] =
                        value.round().clamp(0.0, ADC_MAX_CODE) as u16;
                }
            }
        }

        self.frame_index += 1;
        Ok(())
    }

    #[cfg(test)]
    pub fn next_frame(&mut self) -> anyhow::Result<Vec<u16>> {
        let mut frame = vec![0u16; self.radar.frame_len()];
        self.fill(&mut frame)?;
        Ok(frame)
    }
}
