pub mod aoa;
pub mod doppler;
pub mod range;

pub use aoa::AngleOfArrivalProcessor;
pub use doppler::DopplerExtractor;
pub use range::{full_antenna_mask, RangeExtractor, RangeSpectrum};

use crate::prelude::{DspError, DspResult};

/// Conditioning applied to a sequence before its spectral transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions<'w> {
    pub mean_removal: bool,
    pub window: Option<&'w [f32]>,
}

impl<'w> TransformOptions<'w> {
    pub fn new(mean_removal: bool, window: Option<&'w [f32]>) -> Self {
        Self {
            mean_removal,
            window,
        }
    }

    fn check_window(&self, len: usize) -> DspResult<()> {
        match self.window {
            Some(window) if window.len() != len => Err(DspError::Argument(format!(
                "window has {} coefficients, sequence has {} samples",
                window.len(),
                len
            ))),
            _ => Ok(()),
        }
    }
}
