//! Signal-processing core for FMCW presence and gesture radar.
//!
//! Raw interleaved ADC frames go through a per-chirp range FFT, a per-bin Doppler
//! FFT and a phase comparison across three receive antennas. The resulting
//! amplitude, range, azimuth and elevation feed a hysteresis follower and a
//! least-squares trend estimator that produce debounced presence events.

pub mod events;
pub mod interface;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use interface::{Frame, ProcessingResult};
pub use prelude::{DspError, DspResult, InternalParameters, RadarConfiguration};
pub use processing::AngleOfArrivalProcessor;
