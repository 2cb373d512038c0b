use serde::{Deserialize, Serialize};

/// Least-squares line through `y[i]` sampled at `x = 0, 1, .., n - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f32,
    pub intercept: f32,
}

impl LinearFit {
    /// Closed-form normal equations. Fewer than two points leave the
    /// denominator at zero and yield a flat zero line.
    pub fn compute(y: &[f32]) -> Self {
        if y.is_empty() {
            return Self::default();
        }

        let count = y.len() as f64;
        let (mut xsum, mut ysum, mut xysum, mut xxsum) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
        for (i, &value) in y.iter().enumerate() {
            let x = i as f64;
            let value = value as f64;
            xsum += x;
            ysum += value;
            xysum += x * value;
            xxsum += x * x;
        }

        let den = count * xxsum - xsum * xsum;
        if den == 0.0 {
            return Self::default();
        }

        let slope = (count * xysum - xsum * ysum) / den;
        let intercept = (ysum - slope * xsum) / count;
        Self {
            slope: slope as f32,
            intercept: intercept as f32,
        }
    }

    pub fn predict(&self, x: f32) -> f32 {
        self.slope * x + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_line() {
        for n in [2usize, 3, 10, 257] {
            let y: Vec<f32> = (0..n).map(|i| -0.75 * i as f32 + 4.5).collect();
            let fit = LinearFit::compute(&y);
            assert!((fit.slope + 0.75).abs() < 1e-4, "n={n} slope {}", fit.slope);
            assert!((fit.intercept - 4.5).abs() < 1e-3, "n={n} intercept {}", fit.intercept);
        }
    }

    #[test]
    fn degenerate_lengths_yield_zero() {
        assert_eq!(LinearFit::compute(&[]), LinearFit::default());
        assert_eq!(LinearFit::compute(&[42.0]), LinearFit::default());
    }

    #[test]
    fn noisy_points_fit_midline() {
        let fit = LinearFit::compute(&[1.0, 3.0, 2.0, 4.0]);
        assert!((fit.slope - 0.8).abs() < 1e-6);
        assert!((fit.intercept - 1.3).abs() < 1e-6);
        assert!((fit.predict(4.0) - 4.5).abs() < 1e-5);
    }
}
