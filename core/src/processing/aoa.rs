use crate::interface::detection::ProcessingResult;
use crate::interface::frame::Frame;
use crate::math::angle::angle_diff;
use crate::math::fft::{FftKernel, SpectralKernel};
use crate::math::stats::{SpectralPeak, StatsHelper};
use crate::math::window::WindowKind;
use crate::prelude::{DspError, DspResult, InternalParameters, RadarConfiguration};
use crate::processing::doppler::DopplerExtractor;
use crate::processing::range::{full_antenna_mask, RangeExtractor, RangeSpectrum};
use crate::processing::TransformOptions;
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};
use num_complex::Complex32;

/// Antenna scanned for the strongest range/Doppler cell.
pub const REFERENCE_ANTENNA: usize = 0;
/// Antenna vertically displaced from the common antenna.
pub const VERTICAL_ANTENNA: usize = 1;
/// Antenna both phase differences are taken against.
pub const COMMON_ANTENNA: usize = 2;

const REQUIRED_ANTENNAS: usize = 3;

/// Strongest Doppler cell across the scanned range bins.
#[derive(Debug, Clone, Copy, Default)]
struct Detection {
    range_bin: usize,
    peak: SpectralPeak,
}

/// Processing session turning raw frames into amplitude, range and
/// angle-of-arrival estimates.
///
/// Every buffer is allocated once here and reused for each frame; frames must be
/// processed one at a time.
pub struct AngleOfArrivalProcessor<K: SpectralKernel = FftKernel> {
    config: RadarConfiguration,
    params: InternalParameters,
    kernel: K,
    range_extractor: RangeExtractor,
    doppler_extractor: DopplerExtractor,
    range: RangeSpectrum,
    doppler: Vec<Complex32>,
    range_window: Vec<f32>,
    doppler_window: Vec<f32>,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl AngleOfArrivalProcessor<FftKernel> {
    pub fn new(config: RadarConfiguration) -> DspResult<Self> {
        let params = InternalParameters::derive(&config);
        Self::with_parameters(config, params)
    }

    pub fn with_parameters(
        config: RadarConfiguration,
        params: InternalParameters,
    ) -> DspResult<Self> {
        config.validate()?;
        let kernel = FftKernel::with_lengths(config.samples_per_chirp, config.chirps_per_frame);
        Self::with_kernel(config, params, kernel)
    }
}

impl<K: SpectralKernel> AngleOfArrivalProcessor<K> {
    pub fn with_kernel(
        config: RadarConfiguration,
        params: InternalParameters,
        kernel: K,
    ) -> DspResult<Self> {
        config.validate()?;
        if config.antenna_count < REQUIRED_ANTENNAS {
            return Err(DspError::Configuration(format!(
                "angle of arrival needs {} antennas, got {}",
                REQUIRED_ANTENNAS, config.antenna_count
            )));
        }
        params.validate(&config)?;

        let logger = LogManager::new("aoa");
        logger.record(&format!(
            "session ready: {} antennas, {} chirps x {} samples, bins {}..{}, threshold {}",
            config.antenna_count,
            config.chirps_per_frame,
            config.samples_per_chirp,
            params.bin_start,
            params.bin_end,
            params.detection_threshold
        ));

        Ok(Self {
            range_extractor: RangeExtractor::new(config.samples_per_chirp),
            doppler_extractor: DopplerExtractor::new(config.chirps_per_frame),
            range: RangeSpectrum::new(
                config.antenna_count,
                config.chirps_per_frame,
                config.range_bins(),
            ),
            doppler: vec![Complex32::new(0.0, 0.0); config.chirps_per_frame],
            range_window: WindowKind::BlackmanHarris.generate(config.samples_per_chirp),
            doppler_window: WindowKind::BlackmanHarris.generate(config.chirps_per_frame),
            kernel,
            config,
            params,
            logger,
            metrics: MetricsRecorder::new(),
        })
    }

    pub fn configuration(&self) -> &RadarConfiguration {
        &self.config
    }

    pub fn parameters(&self) -> &InternalParameters {
        &self.params
    }

    /// Range spectrum computed for the most recent frame.
    pub fn range_spectrum(&self) -> &RangeSpectrum {
        &self.range
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Validates raw codes against the configured geometry and processes them.
    pub fn process_samples(&mut self, samples: &[u16]) -> DspResult<ProcessingResult> {
        let frame = match Frame::new(samples, &self.config) {
            Ok(frame) => frame,
            Err(err) => {
                self.metrics.record_rejected();
                return Err(err);
            }
        };
        self.process(&frame)
    }

    pub fn process(&mut self, frame: &Frame<'_>) -> DspResult<ProcessingResult> {
        let outcome = self.run_cycle(frame);
        match &outcome {
            Ok(result) => self.metrics.record_processed(result.detected),
            Err(err) => {
                self.metrics.record_rejected();
                self.logger.record(&format!("frame rejected: {}", err));
            }
        }
        outcome
    }

    fn run_cycle(&mut self, frame: &Frame<'_>) -> DspResult<ProcessingResult> {
        self.range_extractor.extract(
            &mut self.kernel,
            frame,
            &mut self.range,
            full_antenna_mask(self.config.antenna_count),
            &TransformOptions::new(true, Some(self.range_window.as_slice())),
        )?;

        let best = self.scan_reference_antenna()?;

        if best.peak.magnitude <= self.params.detection_threshold {
            self.logger.trace(&format!(
                "peak {:.4} at bin {} below threshold",
                best.peak.magnitude, best.range_bin
            ));
            return Ok(ProcessingResult::below_threshold(best.peak.magnitude));
        }

        let common_phase = self.phase_at(best, COMMON_ANTENNA)?;
        let vertical_phase = self.phase_at(best, VERTICAL_ANTENNA)?;

        let result = ProcessingResult::new(
            best.peak.magnitude,
            best.range_bin as f32,
            angle_diff(best.peak.phase, common_phase),
            angle_diff(vertical_phase, common_phase),
        );
        self.logger.trace(&format!(
            "detection: amplitude {:.4} bin {} velocity {} azimuth {:.3} elevation {:.3}",
            result.amplitude, best.range_bin, best.peak.index, result.azimuth, result.elevation
        ));
        Ok(result)
    }

    /// Doppler FFT of every scanned range bin on the reference antenna, keeping the
    /// first strictly greatest peak.
    fn scan_reference_antenna(&mut self) -> DspResult<Detection> {
        let options = TransformOptions::new(true, Some(self.doppler_window.as_slice()));
        let mut best = Detection::default();

        for bin in self.params.bin_start..self.params.bin_end {
            self.doppler_extractor.extract(
                &mut self.kernel,
                &self.range,
                &mut self.doppler,
                bin,
                REFERENCE_ANTENNA,
                &options,
            )?;

            let peak = StatsHelper::peak(&self.doppler);
            if peak.magnitude > best.peak.magnitude {
                best = Detection {
                    range_bin: bin,
                    peak,
                };
            }
        }

        Ok(best)
    }

    /// Phase of `antenna` at the range bin and velocity index found on the reference.
    fn phase_at(&mut self, detection: Detection, antenna: usize) -> DspResult<f32> {
        self.doppler_extractor.extract(
            &mut self.kernel,
            &self.range,
            &mut self.doppler,
            detection.range_bin,
            antenna,
            &TransformOptions::new(true, Some(self.doppler_window.as_slice())),
        )?;
        Ok(StatsHelper::phase(self.doppler[detection.peak.index]))
    }
}
