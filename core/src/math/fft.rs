use crate::prelude::{DspError, DspResult};
use num_complex::Complex32;
use rustfft::{num_traits::Zero, Fft, FftPlanner};
use std::sync::Arc;

/// Spectral transforms the extractors rely on.
///
/// `real_forward` follows the packed real-FFT layout: a real input of length `L`
/// produces `L / 2` complex bins, and the imaginary slot of bin 0 carries the real
/// Nyquist value. Callers that need a true DC bin must zero it themselves.
pub trait SpectralKernel {
    fn real_forward(&mut self, input: &[f32], output: &mut [Complex32]) -> DspResult<()>;
    fn complex_forward(&mut self, buffer: &mut [Complex32]) -> DspResult<()>;
}

/// One forward plan, rebuilt only when the requested length changes.
struct CachedPlan {
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex32>,
}

impl CachedPlan {
    fn build(planner: &mut FftPlanner<f32>, len: usize) -> Self {
        let fft = planner.plan_fft_forward(len);
        let scratch = vec![Complex32::zero(); fft.get_inplace_scratch_len()];
        Self { fft, scratch }
    }
}

/// `rustfft`-backed kernel with a length-keyed plan cache for each transform kind.
pub struct FftKernel {
    planner: FftPlanner<f32>,
    real_plan: Option<CachedPlan>,
    complex_plan: Option<CachedPlan>,
    real_work: Vec<Complex32>,
}

impl FftKernel {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            real_plan: None,
            complex_plan: None,
            real_work: Vec::new(),
        }
    }

    /// Pre-builds both plans so steady-state processing never allocates.
    pub fn with_lengths(real_len: usize, complex_len: usize) -> Self {
        let mut kernel = Self::new();
        kernel.real_plan = Some(CachedPlan::build(&mut kernel.planner, real_len));
        kernel.complex_plan = Some(CachedPlan::build(&mut kernel.planner, complex_len));
        kernel.real_work = vec![Complex32::zero(); real_len];
        kernel
    }

    fn plan_for<'a>(
        planner: &mut FftPlanner<f32>,
        slot: &'a mut Option<CachedPlan>,
        len: usize,
    ) -> &'a mut CachedPlan {
        let stale = slot.as_ref().map_or(true, |plan| plan.fft.len() != len);
        if stale {
            *slot = Some(CachedPlan::build(planner, len));
        }
        slot.get_or_insert_with(|| CachedPlan::build(planner, len))
    }

    pub fn cached_lengths(&self) -> (Option<usize>, Option<usize>) {
        (
            self.real_plan.as_ref().map(|plan| plan.fft.len()),
            self.complex_plan.as_ref().map(|plan| plan.fft.len()),
        )
    }
}

impl Default for FftKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectralKernel for FftKernel {
    fn real_forward(&mut self, input: &[f32], output: &mut [Complex32]) -> DspResult<()> {
        let len = input.len();
        if len < 2 || len % 2 != 0 {
            return Err(DspError::Argument(format!(
                "real transform length must be even and at least 2, got {}",
                len
            )));
        }
        if output.len() != len / 2 {
            return Err(DspError::Argument(format!(
                "real transform of {} samples needs {} output bins, got {}",
                len,
                len / 2,
                output.len()
            )));
        }

        if self.real_work.len() != len {
            self.real_work.resize(len, Complex32::zero());
        }
        for (slot, &value) in self.real_work.iter_mut().zip(input) {
            *slot = Complex32::new(value, 0.0);
        }

        let plan = Self::plan_for(&mut self.planner, &mut self.real_plan, len);
        plan.fft
            .process_with_scratch(&mut self.real_work, &mut plan.scratch);

        let half = len / 2;
        output.copy_from_slice(&self.real_work[..half]);
        // Packed layout: Nyquist real part travels in the DC imaginary slot.
        output[0] = Complex32::new(self.real_work[0].re, self.real_work[half].re);
        Ok(())
    }

    fn complex_forward(&mut self, buffer: &mut [Complex32]) -> DspResult<()> {
        if buffer.is_empty() {
            return Err(DspError::Argument("complex transform of empty buffer".into()));
        }
        let plan = Self::plan_for(&mut self.planner, &mut self.complex_plan, buffer.len());
        plan.fft.process_with_scratch(buffer, &mut plan.scratch);
        Ok(())
    }
}
