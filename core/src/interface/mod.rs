pub mod detection;
pub mod frame;

pub use detection::ProcessingResult;
pub use frame::{Frame, FrameDoubleBuffer};
