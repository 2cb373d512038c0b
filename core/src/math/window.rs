use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Taper families available to the extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowKind {
    Rectangular,
    Hann,
    /// 4-term Blackman-Harris, -92 dB sidelobes.
    #[default]
    BlackmanHarris,
}

impl WindowKind {
    /// Symmetric coefficients of the given length.
    pub fn generate(&self, length: usize) -> Vec<f32> {
        match length {
            0 => Vec::new(),
            1 => vec![1.0],
            _ => {
                let denom = (length - 1) as f32;
                (0..length)
                    .map(|n| self.coefficient(2.0 * PI * n as f32 / denom))
                    .collect()
            }
        }
    }

    fn coefficient(&self, phase: f32) -> f32 {
        match self {
            WindowKind::Rectangular => 1.0,
            WindowKind::Hann => 0.5 - 0.5 * phase.cos(),
            WindowKind::BlackmanHarris => {
                const A0: f32 = 0.35875;
                const A1: f32 = 0.48829;
                const A2: f32 = 0.14128;
                const A3: f32 = 0.01168;
                A0 - A1 * phase.cos() + A2 * (2.0 * phase).cos() - A3 * (3.0 * phase).cos()
            }
        }
    }
}
