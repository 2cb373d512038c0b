pub mod angle;
pub mod fft;
pub mod regression;
pub mod stats;
pub mod window;

pub use angle::angle_diff;
pub use fft::{FftKernel, SpectralKernel};
pub use regression::LinearFit;
pub use stats::{SpectralPeak, StatsHelper};
pub use window::WindowKind;
