use num_complex::Complex32;

/// Strongest bin of a complex spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpectralPeak {
    pub index: usize,
    pub magnitude: f32,
    pub phase: f32,
}

pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().sum::<f32>() / samples.len() as f32
    }

    /// Subtracts the arithmetic mean in place.
    pub fn remove_mean(samples: &mut [f32]) {
        let mean = Self::mean(samples);
        samples.iter_mut().for_each(|v| *v -= mean);
    }

    /// Subtracts the average complex value in place, zeroing the DC component.
    pub fn remove_complex_mean(samples: &mut [Complex32]) {
        if samples.is_empty() {
            return;
        }
        let sum: Complex32 = samples.iter().sum();
        let mean = sum / samples.len() as f32;
        samples.iter_mut().for_each(|v| *v -= mean);
    }

    pub fn magnitude(value: Complex32) -> f32 {
        value.norm()
    }

    /// Four-quadrant phase in radians.
    pub fn phase(value: Complex32) -> f32 {
        value.im.atan2(value.re)
    }

    /// Largest-magnitude bin. Ties keep the lowest index; an all-zero spectrum
    /// reports bin 0 with zero magnitude.
    pub fn peak(spectrum: &[Complex32]) -> SpectralPeak {
        let mut max = 0.0;
        let mut max_index = 0;
        for (index, &value) in spectrum.iter().enumerate() {
            let magnitude = Self::magnitude(value);
            if magnitude > max {
                max = magnitude;
                max_index = index;
            }
        }

        SpectralPeak {
            index: max_index,
            magnitude: max,
            phase: spectrum.get(max_index).map_or(0.0, |&v| Self::phase(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_sequence_is_zero() {
        assert_eq!(StatsHelper::mean(&[]), 0.0);
    }

    #[test]
    fn remove_mean_centres_samples() {
        let mut samples = [1.0, 2.0, 3.0];
        StatsHelper::remove_mean(&mut samples);
        assert_eq!(samples, [-1.0, 0.0, 1.0]);
    }

    #[test]
    fn remove_complex_mean_zeroes_dc() {
        let mut samples = [Complex32::new(1.0, 2.0), Complex32::new(3.0, -2.0)];
        StatsHelper::remove_complex_mean(&mut samples);
        assert_eq!(samples[0], Complex32::new(-1.0, 2.0));
        assert_eq!(samples[1], Complex32::new(1.0, -2.0));
    }

    #[test]
    fn peak_keeps_first_of_equal_magnitudes() {
        let spectrum = [
            Complex32::new(0.5, 0.0),
            Complex32::new(0.0, 2.0),
            Complex32::new(-2.0, 0.0),
        ];
        let peak = StatsHelper::peak(&spectrum);
        assert_eq!(peak.index, 1);
        assert!((peak.magnitude - 2.0).abs() < 1e-6);
        assert!((peak.phase - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn peak_of_silent_spectrum_is_bin_zero() {
        let peak = StatsHelper::peak(&[Complex32::new(0.0, 0.0); 4]);
        assert_eq!(peak, SpectralPeak::default());
    }
}
