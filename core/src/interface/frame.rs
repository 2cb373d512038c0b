use crate::prelude::{checked_frame_len, DspError, DspResult, RadarConfiguration};
use ndarray::{ArrayView1, ArrayView3, Axis};

/// Borrowed view over one raw radar frame.
///
/// Codes are laid out `[chirp][sample][antenna]` with the antenna index varying
/// fastest, exactly as the sensor FIFO delivers them.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    samples: ArrayView3<'a, u16>,
}

impl<'a> Frame<'a> {
    pub fn new(samples: &'a [u16], config: &RadarConfiguration) -> DspResult<Self> {
        Self::from_dims(
            samples,
            config.antenna_count,
            config.chirps_per_frame,
            config.samples_per_chirp,
        )
    }

    pub fn from_dims(
        samples: &'a [u16],
        antenna_count: usize,
        chirps_per_frame: usize,
        samples_per_chirp: usize,
    ) -> DspResult<Self> {
        let expected = checked_frame_len(antenna_count, chirps_per_frame, samples_per_chirp)
            .ok_or_else(|| {
                DspError::Argument(format!(
                    "frame of {} x {} x {} codes is not addressable",
                    antenna_count, chirps_per_frame, samples_per_chirp
                ))
            })?;
        if samples.len() != expected {
            return Err(DspError::Argument(format!(
                "frame holds {} codes, expected {}",
                samples.len(),
                expected
            )));
        }
        let samples = ArrayView3::from_shape(
            (chirps_per_frame, samples_per_chirp, antenna_count),
            samples,
        )
        .map_err(|err| DspError::Argument(format!("frame shape: {}", err)))?;
        Ok(Self { samples })
    }

    pub fn antenna_count(&self) -> usize {
        self.samples.len_of(Axis(2))
    }

    pub fn chirps_per_frame(&self) -> usize {
        self.samples.len_of(Axis(0))
    }

    pub fn samples_per_chirp(&self) -> usize {
        self.samples.len_of(Axis(1))
    }

    /// De-interleaved samples of one chirp as seen by one antenna.
    pub fn chirp(&self, chirp: usize, antenna: usize) -> ArrayView1<'_, u16> {
        self.samples.index_axis(Axis(0), chirp).index_axis_move(Axis(1), antenna)
    }
}

/// Two frame buffers for the acquisition boundary: the producer fills the back
/// buffer while the consumer reads the front one, then `swap` publishes.
#[derive(Debug, Clone)]
pub struct FrameDoubleBuffer {
    front: Vec<u16>,
    back: Vec<u16>,
    config: RadarConfiguration,
}

impl FrameDoubleBuffer {
    pub fn new(config: &RadarConfiguration) -> DspResult<Self> {
        config.validate()?;
        let len = config.frame_len();
        Ok(Self {
            front: vec![0; len],
            back: vec![0; len],
            config: config.clone(),
        })
    }

    /// Buffer the producer writes the next frame into.
    pub fn back_mut(&mut self) -> &mut [u16] {
        &mut self.back
    }

    /// Makes the freshly written back buffer readable.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    pub fn front(&self) -> DspResult<Frame<'_>> {
        Frame::new(&self.front, &self.config)
    }
}
