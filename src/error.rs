use std::path::PathBuf;

/// Errors produced while loading, converting and mixing signals.
#[derive(thiserror::Error, Debug)]
pub enum SoundPrepError {
    #[error("unsupported audio container: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("unsupported bitdepth in {}: {bits}-bit {format}", .path.display())]
    UnsupportedBitdepth {
        path: PathBuf,
        bits: u16,
        format: &'static str,
    },

    #[error(
        "no file extension provided for {} or {}",
        .first.display(),
        .second.display()
    )]
    MissingExtension { first: PathBuf, second: PathBuf },

    #[error("signal lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("padding needs {required} samples but the buffer holds {available}")]
    OutOfRange { required: usize, available: usize },

    #[error("gave up on {} after {attempts} conversion attempts", .path.display())]
    ConversionRetriesExhausted {
        path: PathBuf,
        attempts: usize,
        #[source]
        last: Box<SoundPrepError>,
    },

    #[error("bitdepth {0} is not an option, available bit depths: 16, 32")]
    InvalidBitdepth(u16),

    #[error("sample rate must be positive")]
    InvalidSampleRate,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("expected a mono signal, found {channels} channels")]
    NotMono { channels: usize },

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("ndarray shape error")]
    Shape(#[from] ndarray::ShapeError),

    #[error("WAV error")]
    Wav(#[from] hound::Error),

    #[cfg(feature = "transcode")]
    #[error("decode error")]
    Decode(#[from] symphonia::core::errors::Error),

    #[error("config error")]
    Config(#[from] serde_json::Error),
}
