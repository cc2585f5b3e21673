pub mod codec;
pub mod combine;
pub mod config;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod overlay;
pub mod resample;

pub use codec::{AudioCodec, BitdepthRequest, ContainerFormat, Subtype, WavCodec};
pub use combine::{combine_signals, zero_pad};
pub use config::{CombineParams, LoadOptions, OverlayParams, PrepConfig};
pub use error::SoundPrepError;
pub use loader::{
    add_sound_file_to_signal, combine_sound_files, load_signal, save_signal, SignalLoader,
};
pub use normalize::{normalize, stereo_to_mono};
pub use overlay::{add_sound_to_signal, extend_sound};
pub use resample::{resample, FourierResampler, Resample};

use ndarray::{Array1, Array2, ArrayView1, Axis};

/// Sample storage for a [`Signal`].
///
/// Mono audio never carries a trailing channel axis; multi-channel audio is
/// laid out as frames × channels.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    Mono(Array1<f32>),
    Frames(Array2<f32>),
}

/// A buffer of audio samples paired with its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Samples,
    sample_rate: u32,
}

impl Signal {
    pub fn mono(samples: Array1<f32>, sample_rate: u32) -> Result<Self, SoundPrepError> {
        if sample_rate == 0 {
            return Err(SoundPrepError::InvalidSampleRate);
        }
        Ok(Self {
            samples: Samples::Mono(samples),
            sample_rate,
        })
    }

    /// Build a signal from a frames × channels buffer.
    ///
    /// A single-channel buffer is collapsed to [`Samples::Mono`].
    pub fn from_frames(frames: Array2<f32>, sample_rate: u32) -> Result<Self, SoundPrepError> {
        if frames.ncols() == 1 {
            return Self::mono(frames.index_axis_move(Axis(1), 0), sample_rate);
        }
        if sample_rate == 0 {
            return Err(SoundPrepError::InvalidSampleRate);
        }
        Ok(Self {
            samples: Samples::Frames(frames),
            sample_rate,
        })
    }

    pub fn from_vec(samples: Vec<f32>, sample_rate: u32) -> Result<Self, SoundPrepError> {
        Self::mono(Array1::from(samples), sample_rate)
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames (samples per channel).
    pub fn len(&self) -> usize {
        match &self.samples {
            Samples::Mono(data) => data.len(),
            Samples::Frames(data) => data.nrows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channels(&self) -> usize {
        match &self.samples {
            Samples::Mono(_) => 1,
            Samples::Frames(data) => data.ncols(),
        }
    }

    /// Duration in seconds, always derived from the current buffer length.
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    pub fn as_mono(&self) -> Result<ArrayView1<'_, f32>, SoundPrepError> {
        match &self.samples {
            Samples::Mono(data) => Ok(data.view()),
            Samples::Frames(data) => Err(SoundPrepError::NotMono {
                channels: data.ncols(),
            }),
        }
    }

    pub fn into_parts(self) -> (Samples, u32) {
        (self.samples, self.sample_rate)
    }
}
