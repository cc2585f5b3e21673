//! Codec adapters for decoding, encoding and converting audio files.
//!
//! The loader only talks to the [`AudioCodec`] trait. [`WavCodec`] is the
//! default implementation:
//!
//! - **Decoding**: a strict WAV reader that accepts 8/16/32-bit integer PCM
//!   and 32-bit float. Anything else is reported as
//!   [`SoundPrepError::UnsupportedFormat`] or
//!   [`SoundPrepError::UnsupportedBitdepth`] so the caller can convert the
//!   file and retry.
//! - **Container conversion**: any format Symphonia can read is rewritten as
//!   a 16-bit `.wav` next to the source (requires the `transcode` feature).
//! - **Bitdepth conversion**: rewrites a WAV file as 16- or 32-bit PCM.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use soundprep_rs::{AudioCodec, BitdepthRequest, WavCodec};
//!
//! let codec = WavCodec::new();
//! let converted = codec.convert_bitdepth(Path::new("take_24bit.wav"), &BitdepthRequest::default())?;
//! let signal = codec.decode(&converted)?;
//! println!("{} frames at {} Hz", signal.len(), signal.sample_rate());
//! # Ok::<(), soundprep_rs::SoundPrepError>(())
//! ```

pub mod path;
#[cfg(feature = "transcode")]
mod transcode;
mod wav;

pub use path::{match_ext, AudioPath};
pub use wav::WavCodec;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{error::SoundPrepError, Signal};

/// Sample encoding written into a WAV container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subtype {
    #[default]
    Pcm16,
    Pcm32,
    Float32,
}

impl Subtype {
    /// Integer PCM subtype for a bitdepth conversion; only 16 and 32 are offered.
    pub fn from_bitdepth(bitdepth: u16) -> Result<Self, SoundPrepError> {
        match bitdepth {
            16 => Ok(Subtype::Pcm16),
            32 => Ok(Subtype::Pcm32),
            other => Err(SoundPrepError::InvalidBitdepth(other)),
        }
    }

    pub fn bits_per_sample(self) -> u16 {
        match self {
            Subtype::Pcm16 => 16,
            Subtype::Pcm32 | Subtype::Float32 => 32,
        }
    }
}

/// Container a file can be converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerFormat {
    #[default]
    Wav,
}

impl ContainerFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ContainerFormat::Wav => "wav",
        }
    }
}

/// Where and how to write a bitdepth-converted copy of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitdepthRequest {
    /// Target bitdepth, 16 or 32.
    pub bitdepth: u16,
    /// Destination; its extension is forced to match the source's.
    pub new_path: Option<PathBuf>,
    /// Rewrite the source file in place, ignoring `new_path`.
    pub overwrite: bool,
}

impl Default for BitdepthRequest {
    fn default() -> Self {
        Self {
            bitdepth: 16,
            new_path: None,
            overwrite: false,
        }
    }
}

impl BitdepthRequest {
    pub fn new(bitdepth: u16) -> Self {
        Self {
            bitdepth,
            ..Default::default()
        }
    }
}

/// File decode/encode backend used by the loader.
pub trait AudioCodec {
    /// Read a file the strict reader accepts.
    fn decode(&self, path: &Path) -> Result<Signal, SoundPrepError>;

    fn encode(&self, path: &Path, signal: &Signal, subtype: Subtype)
        -> Result<(), SoundPrepError>;

    /// Rewrite `path` into `target`, optionally resampling, and return the new path.
    fn convert_container(
        &self,
        path: &Path,
        target: ContainerFormat,
        sample_rate: Option<u32>,
    ) -> Result<PathBuf, SoundPrepError>;

    /// Rewrite `path` at a new bitdepth and return where it was saved.
    fn convert_bitdepth(
        &self,
        path: &Path,
        request: &BitdepthRequest,
    ) -> Result<PathBuf, SoundPrepError>;
}
