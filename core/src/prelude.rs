use serde::{Deserialize, Serialize};

/// Full-scale code of the 12-bit ADC; raw samples are divided by this value.
pub const ADC_FULL_SCALE: f32 = 4096.0;

/// Default amplitude a Doppler peak must exceed to count as a detection.
pub const DEFAULT_DETECTION_THRESHOLD: f32 = 0.05;

/// Highest antenna count addressable by a `u32` selection mask.
pub const MAX_ANTENNAS: usize = 32;

/// Receive antenna baseline of the reference board, in metres.
pub const DEFAULT_ANTENNA_SPACING_M: f64 = 2.5e-3;

const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Chirp and array geometry supplied once when a processing session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfiguration {
    pub antenna_count: usize,
    pub chirps_per_frame: usize,
    pub samples_per_chirp: usize,
    pub sampling_rate: u32,
    pub start_freq: u64,
    pub end_freq: u64,
    /// Distance between the antenna pairs used for phase comparison.
    pub antenna_spacing_m: f64,
}

impl Default for RadarConfiguration {
    fn default() -> Self {
        Self {
            antenna_count: 3,
            chirps_per_frame: 32,
            samples_per_chirp: 64,
            sampling_rate: 1_000_000,
            start_freq: 58_500_000_000,
            end_freq: 62_500_000_000,
            antenna_spacing_m: DEFAULT_ANTENNA_SPACING_M,
        }
    }
}

impl RadarConfiguration {
    /// Number of raw codes one frame must carry. Only meaningful once `validate`
    /// has accepted the configuration.
    pub fn frame_len(&self) -> usize {
        self.antenna_count * self.chirps_per_frame * self.samples_per_chirp
    }

    /// Usable range-FFT length; the real transform only yields the positive half.
    pub fn range_bins(&self) -> usize {
        self.samples_per_chirp / 2
    }

    pub fn validate(&self) -> DspResult<()> {
        if self.antenna_count == 0 || self.antenna_count > MAX_ANTENNAS {
            return Err(DspError::Configuration(format!(
                "antenna_count must be within 1..={}, got {}",
                MAX_ANTENNAS, self.antenna_count
            )));
        }
        if self.chirps_per_frame == 0 {
            return Err(DspError::Configuration(
                "chirps_per_frame must be non-zero".into(),
            ));
        }
        if self.samples_per_chirp < 2 || self.samples_per_chirp % 2 != 0 {
            return Err(DspError::Configuration(format!(
                "samples_per_chirp must be even and at least 2, got {}",
                self.samples_per_chirp
            )));
        }
        if checked_frame_len(
            self.antenna_count,
            self.chirps_per_frame,
            self.samples_per_chirp,
        )
        .is_none()
        {
            return Err(DspError::Configuration(format!(
                "frame of {} x {} x {} codes is not addressable",
                self.antenna_count, self.chirps_per_frame, self.samples_per_chirp
            )));
        }
        if !self.antenna_spacing_m.is_finite() || self.antenna_spacing_m <= 0.0 {
            return Err(DspError::Configuration(format!(
                "antenna_spacing_m must be finite and positive, got {}",
                self.antenna_spacing_m
            )));
        }
        Ok(())
    }

    /// Frequency slope of one chirp in Hz/s.
    pub fn chirp_slope(&self) -> f64 {
        let bandwidth = self.end_freq as f64 - self.start_freq as f64;
        let duration = self.samples_per_chirp as f64 / self.sampling_rate.max(1) as f64;
        bandwidth / duration
    }

    /// Distance covered by the whole range spectrum, in metres.
    pub fn max_range_m(&self) -> f64 {
        let slope = self.chirp_slope();
        if slope == 0.0 {
            return 0.0;
        }
        (self.sampling_rate as f64 / 2.0 * SPEED_OF_LIGHT) / (2.0 * slope.abs())
    }

    /// Distance spanned by a single range bin, in metres.
    pub fn range_resolution_m(&self) -> f64 {
        self.max_range_m() / self.range_bins().max(1) as f64
    }

    /// Converts a (possibly fractional) range bin index to metres.
    pub fn bin_to_meters(&self, bin: f32) -> f64 {
        bin as f64 * self.range_resolution_m()
    }

    /// Carrier wavelength at the centre of the sweep.
    pub fn wavelength_m(&self) -> f64 {
        let centre = (self.start_freq as f64 + self.end_freq as f64) / 2.0;
        if centre == 0.0 {
            return 0.0;
        }
        SPEED_OF_LIGHT / centre
    }

    /// Converts a wrapped phase difference between two antennas into the arrival
    /// angle off boresight, in radians.
    ///
    /// Uses `sin(alpha) = lambda * phase / (2 * pi * d)`; ratios outside the unit
    /// interval (spacing wider than half a wavelength) saturate at +-90 degrees.
    pub fn phase_to_angle(&self, phase: f32) -> f32 {
        if self.antenna_spacing_m <= 0.0 {
            return 0.0;
        }
        let ratio = self.wavelength_m() * phase as f64
            / (2.0 * std::f64::consts::PI * self.antenna_spacing_m);
        ratio.clamp(-1.0, 1.0).asin() as f32
    }
}

/// Product of the frame dimensions, `None` on overflow.
pub fn checked_frame_len(
    antenna_count: usize,
    chirps_per_frame: usize,
    samples_per_chirp: usize,
) -> Option<usize> {
    antenna_count
        .checked_mul(chirps_per_frame)?
        .checked_mul(samples_per_chirp)
}

/// Values derived from the radar configuration at session start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalParameters {
    pub bin_start: usize,
    pub bin_end: usize,
    pub detection_threshold: f32,
}

impl InternalParameters {
    /// Scans the full range spectrum with the default threshold.
    pub fn derive(config: &RadarConfiguration) -> Self {
        Self {
            bin_start: 0,
            bin_end: config.range_bins(),
            detection_threshold: DEFAULT_DETECTION_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.detection_threshold = threshold;
        self
    }

    pub fn validate(&self, config: &RadarConfiguration) -> DspResult<()> {
        if self.bin_start >= self.bin_end || self.bin_end > config.range_bins() {
            return Err(DspError::Configuration(format!(
                "bin range {}..{} must be non-empty and within 0..{}",
                self.bin_start,
                self.bin_end,
                config.range_bins()
            )));
        }
        if !self.detection_threshold.is_finite() || self.detection_threshold < 0.0 {
            return Err(DspError::Configuration(format!(
                "detection threshold must be finite and non-negative, got {}",
                self.detection_threshold
            )));
        }
        Ok(())
    }
}

/// Common error type for the processing core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DspError {
    #[error("invalid argument: {0}")]
    Argument(String),
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type DspResult<T> = Result<T, DspError>;
