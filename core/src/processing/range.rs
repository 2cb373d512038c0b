use crate::interface::frame::Frame;
use crate::math::fft::SpectralKernel;
use crate::math::stats::StatsHelper;
use crate::prelude::{DspError, DspResult, ADC_FULL_SCALE, MAX_ANTENNAS};
use crate::processing::TransformOptions;
use ndarray::{s, Array3, ArrayView1, Axis};
use num_complex::Complex32;

/// Mask with one bit set per antenna.
pub fn full_antenna_mask(antenna_count: usize) -> u32 {
    if antenna_count >= MAX_ANTENNAS {
        u32::MAX
    } else {
        (1u32 << antenna_count) - 1
    }
}

/// Complex range spectra laid out `[antenna][chirp][range_bin]`.
#[derive(Debug, Clone)]
pub struct RangeSpectrum {
    data: Array3<Complex32>,
}

impl RangeSpectrum {
    pub fn new(antenna_count: usize, chirps_per_frame: usize, range_bins: usize) -> Self {
        Self {
            data: Array3::zeros((antenna_count, chirps_per_frame, range_bins)),
        }
    }

    pub fn antenna_count(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn chirps_per_frame(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    pub fn range_bins(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    pub fn get(&self, antenna: usize, chirp: usize, bin: usize) -> Option<Complex32> {
        self.data.get((antenna, chirp, bin)).copied()
    }

    /// Range bins of one chirp on one antenna.
    pub fn chirp(&self, antenna: usize, chirp: usize) -> ArrayView1<'_, Complex32> {
        self.data.slice(s![antenna, chirp, ..])
    }

    /// Chirp-indexed sequence at a fixed (antenna, bin) coordinate.
    pub fn slow_time(&self, antenna: usize, bin: usize) -> ArrayView1<'_, Complex32> {
        self.data.slice(s![antenna, .., bin])
    }

    pub fn chirp_mut(&mut self, antenna: usize, chirp: usize) -> DspResult<&mut [Complex32]> {
        self.data
            .slice_mut(s![antenna, chirp, ..])
            .into_slice()
            .ok_or_else(|| DspError::Internal("range spectrum row is not contiguous".into()))
    }

    pub fn fill(&mut self, value: Complex32) {
        self.data.fill(value);
    }
}

/// Per-chirp real FFT over a de-interleaved frame.
pub struct RangeExtractor {
    adc_samples: Vec<f32>,
}

impl RangeExtractor {
    pub fn new(samples_per_chirp: usize) -> Self {
        Self {
            adc_samples: vec![0.0; samples_per_chirp],
        }
    }

    /// Writes the range spectrum of every masked antenna. Slots of antennas outside
    /// the mask are left untouched.
    pub fn extract<K: SpectralKernel>(
        &mut self,
        kernel: &mut K,
        frame: &Frame<'_>,
        spectrum: &mut RangeSpectrum,
        antenna_mask: u32,
        options: &TransformOptions<'_>,
    ) -> DspResult<()> {
        let samples_per_chirp = frame.samples_per_chirp();
        let antenna_count = frame.antenna_count();
        let chirps = frame.chirps_per_frame();

        if samples_per_chirp != self.adc_samples.len() {
            return Err(DspError::Argument(format!(
                "frame carries {} samples per chirp, extractor expects {}",
                samples_per_chirp,
                self.adc_samples.len()
            )));
        }
        if spectrum.antenna_count() != antenna_count
            || spectrum.chirps_per_frame() != chirps
            || spectrum.range_bins() != samples_per_chirp / 2
        {
            return Err(DspError::Argument(format!(
                "range spectrum shape ({}, {}, {}) does not match frame ({}, {}, {})",
                spectrum.antenna_count(),
                spectrum.chirps_per_frame(),
                spectrum.range_bins(),
                antenna_count,
                chirps,
                samples_per_chirp / 2
            )));
        }
        options.check_window(samples_per_chirp)?;

        for antenna in 0..antenna_count.min(MAX_ANTENNAS) {
            if antenna_mask & (1 << antenna) == 0 {
                continue;
            }

            for chirp in 0..chirps {
                for (slot, &code) in self.adc_samples.iter_mut().zip(frame.chirp(chirp, antenna)) {
                    *slot = code as f32 / ADC_FULL_SCALE;
                }

                if options.mean_removal {
                    StatsHelper::remove_mean(&mut self.adc_samples);
                }
                if let Some(window) = options.window {
                    self.adc_samples
                        .iter_mut()
                        .zip(window)
                        .for_each(|(sample, &w)| *sample *= w);
                }

                let bins = spectrum.chirp_mut(antenna, chirp)?;
                kernel.real_forward(&self.adc_samples, bins)?;
                bins[0].im = 0.0;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fft::FftKernel;
    use crate::math::window::WindowKind;
    use crate::prelude::RadarConfiguration;
    use std::f32::consts::PI;

    fn config() -> RadarConfiguration {
        RadarConfiguration {
            antenna_count: 3,
            chirps_per_frame: 4,
            samples_per_chirp: 64,
            sampling_rate: 1_000_000,
            ..Default::default()
        }
    }

    /// Mid-scale frame with a tone written into a single (antenna, chirp).
    fn tone_frame(config: &RadarConfiguration, antenna: usize, chirp: usize, freq_hz: f32) -> Vec<u16> {
        let mut codes = vec![2048u16; config.frame_len()];
        let fs = config.sampling_rate as f32;
        for sample in 0..config.samples_per_chirp {
            let index = chirp * config.antenna_count * config.samples_per_chirp
                + sample * config.antenna_count
                + antenna;
            let value = 2048.0 + 900.0 * (2.0 * PI * freq_hz * sample as f32 / fs).sin();
            codes[index] = value.round() as u16;
        }
        codes
    }

    fn peak_bin(spectrum: &RangeSpectrum, antenna: usize, chirp: usize) -> usize {
        let bins: Vec<Complex32> = spectrum.chirp(antenna, chirp).to_vec();
        StatsHelper::peak(&bins).index
    }

    #[test]
    fn tone_peaks_at_expected_range_bin() {
        let config = config();
        let freq = 156_250.0; // 10 * fs / 64
        let expected = (freq * 64.0 / config.sampling_rate as f32).round() as usize;
        let codes = tone_frame(&config, 1, 2, freq);
        let frame = Frame::new(&codes, &config).unwrap();

        let window = WindowKind::BlackmanHarris.generate(config.samples_per_chirp);
        let mut spectrum = RangeSpectrum::new(3, 4, 32);
        let mut extractor = RangeExtractor::new(64);
        let mut kernel = FftKernel::new();
        extractor
            .extract(
                &mut kernel,
                &frame,
                &mut spectrum,
                full_antenna_mask(3),
                &TransformOptions::new(true, Some(window.as_slice())),
            )
            .unwrap();

        assert_eq!(expected, 10);
        assert_eq!(peak_bin(&spectrum, 1, 2), expected);
        // Other chirps only carry the removed DC level.
        assert!(spectrum.chirp(1, 0).iter().all(|c| c.norm() < 1e-4));
        assert!(spectrum.chirp(0, 2).iter().all(|c| c.norm() < 1e-4));
    }

    #[test]
    fn dc_bin_imaginary_part_is_cleared() {
        let config = config();
        // Alternating codes put energy at Nyquist, which the packed layout
        // would otherwise leave in the DC imaginary slot.
        let codes: Vec<u16> = (0..config.frame_len())
            .map(|i| if (i / 3) % 2 == 0 { 3000 } else { 1000 })
            .collect();
        let frame = Frame::new(&codes, &config).unwrap();
        let mut spectrum = RangeSpectrum::new(3, 4, 32);
        let mut extractor = RangeExtractor::new(64);
        extractor
            .extract(
                &mut FftKernel::new(),
                &frame,
                &mut spectrum,
                full_antenna_mask(3),
                &TransformOptions::new(false, None),
            )
            .unwrap();

        for antenna in 0..3 {
            for chirp in 0..4 {
                let dc = spectrum.get(antenna, chirp, 0).unwrap();
                assert_eq!(dc.im, 0.0);
                // Mean of 3000/1000 codes is 2000 / 4096, summed over 64 samples.
                assert!((dc.re - 64.0 * 2000.0 / 4096.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn masked_antennas_are_left_untouched() {
        let config = config();
        let codes = tone_frame(&config, 0, 0, 156_250.0);
        let frame = Frame::new(&codes, &config).unwrap();
        let sentinel = Complex32::new(-9.0, 9.0);
        let mut spectrum = RangeSpectrum::new(3, 4, 32);
        spectrum.fill(sentinel);

        RangeExtractor::new(64)
            .extract(
                &mut FftKernel::new(),
                &frame,
                &mut spectrum,
                0b101,
                &TransformOptions::new(true, None),
            )
            .unwrap();

        assert!(spectrum.chirp(1, 3).iter().all(|&c| c == sentinel));
        assert_ne!(spectrum.get(0, 0, 10), Some(sentinel));
        assert_ne!(spectrum.get(2, 0, 0), Some(sentinel));
    }

    #[test]
    fn shape_mismatch_is_an_argument_error() {
        let config = config();
        let codes = vec![2048u16; config.frame_len()];
        let frame = Frame::new(&codes, &config).unwrap();
        let mut spectrum = RangeSpectrum::new(2, 4, 32);
        let result = RangeExtractor::new(64).extract(
            &mut FftKernel::new(),
            &frame,
            &mut spectrum,
            full_antenna_mask(3),
            &TransformOptions::default(),
        );
        assert!(matches!(result, Err(DspError::Argument(_))));

        let short_window = vec![1.0; 10];
        let mut spectrum = RangeSpectrum::new(3, 4, 32);
        let result = RangeExtractor::new(64).extract(
            &mut FftKernel::new(),
            &frame,
            &mut spectrum,
            full_antenna_mask(3),
            &TransformOptions::new(true, Some(short_window.as_slice())),
        );
        assert!(matches!(result, Err(DspError::Argument(_))));
    }

    #[test]
    fn full_mask_sets_one_bit_per_antenna() {
        assert_eq!(full_antenna_mask(3), 0b111);
        assert_eq!(full_antenna_mask(32), u32::MAX);
    }
}
