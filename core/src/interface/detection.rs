use serde::{Deserialize, Serialize};

/// Number of scalars published per frame: amplitude, range, azimuth, elevation.
pub const OUTPUT_DIMENSION: usize = 4;

/// Per-frame output of the angle-of-arrival processor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Strongest Doppler magnitude found on the reference antenna.
    pub amplitude: f32,
    /// Winning range bin, or 0 when the amplitude stays below threshold.
    pub range: f32,
    /// Phase difference between the reference and common antennas, radians.
    pub azimuth: f32,
    /// Phase difference between the vertical and common antennas, radians.
    pub elevation: f32,
    /// Whether the amplitude cleared the detection threshold. Range and angles
    /// are only meaningful when set.
    pub detected: bool,
}

impl ProcessingResult {
    pub fn new(amplitude: f32, range: f32, azimuth: f32, elevation: f32) -> Self {
        Self {
            amplitude,
            range,
            azimuth,
            elevation,
            detected: true,
        }
    }

    /// Result for a frame whose peak did not clear the detection threshold.
    pub fn below_threshold(amplitude: f32) -> Self {
        Self {
            amplitude,
            ..Default::default()
        }
    }

    pub fn to_array(&self) -> [f32; OUTPUT_DIMENSION] {
        [self.amplitude, self.range, self.azimuth, self.elevation]
    }
}
