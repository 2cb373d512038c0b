use crate::math::fft::SpectralKernel;
use crate::math::stats::StatsHelper;
use crate::prelude::{DspError, DspResult};
use crate::processing::range::RangeSpectrum;
use crate::processing::TransformOptions;
use num_complex::Complex32;

/// Slow-time FFT across chirps for one (antenna, range bin) coordinate.
///
/// Output stays in natural FFT order: bin 0 is zero velocity and negative
/// velocities occupy the upper half. No centring shift is applied.
pub struct DopplerExtractor {
    chirps_per_frame: usize,
}

impl DopplerExtractor {
    pub fn new(chirps_per_frame: usize) -> Self {
        Self { chirps_per_frame }
    }

    pub fn chirps_per_frame(&self) -> usize {
        self.chirps_per_frame
    }

    pub fn extract<K: SpectralKernel>(
        &self,
        kernel: &mut K,
        range: &RangeSpectrum,
        output: &mut [Complex32],
        bin: usize,
        antenna: usize,
        options: &TransformOptions<'_>,
    ) -> DspResult<()> {
        if range.chirps_per_frame() != self.chirps_per_frame {
            return Err(DspError::Argument(format!(
                "range spectrum holds {} chirps, extractor expects {}",
                range.chirps_per_frame(),
                self.chirps_per_frame
            )));
        }
        if output.len() != self.chirps_per_frame {
            return Err(DspError::Argument(format!(
                "doppler buffer holds {} bins, expected {}",
                output.len(),
                self.chirps_per_frame
            )));
        }
        if antenna >= range.antenna_count() {
            return Err(DspError::Argument(format!(
                "antenna {} out of range (count {})",
                antenna,
                range.antenna_count()
            )));
        }
        if bin >= range.range_bins() {
            return Err(DspError::Argument(format!(
                "range bin {} out of range (bins {})",
                bin,
                range.range_bins()
            )));
        }
        options.check_window(self.chirps_per_frame)?;

        for (slot, &value) in output.iter_mut().zip(range.slow_time(antenna, bin)) {
            *slot = value;
        }

        if options.mean_removal {
            StatsHelper::remove_complex_mean(output);
        }
        if let Some(window) = options.window {
            output
                .iter_mut()
                .zip(window)
                .for_each(|(sample, &w)| *sample *= w);
        }

        kernel.complex_forward(output)
    }
}
