use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use ndarray::Array2;

#[cfg(feature = "transcode")]
use super::transcode;
use crate::{
    codec::{match_ext, AudioCodec, AudioPath, BitdepthRequest, ContainerFormat, Subtype},
    error::SoundPrepError,
    Samples, Signal,
};

/// [`AudioCodec`] backed by `hound`, with Symphonia for foreign containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavCodec;

impl WavCodec {
    pub fn new() -> Self {
        Self
    }
}

type FileReader = WavReader<BufReader<File>>;

fn open_reader(path: &Path) -> Result<FileReader, SoundPrepError> {
    WavReader::open(path).map_err(|err| match err {
        hound::Error::FormatError(_) | hound::Error::Unsupported => {
            log::debug!("{} is not a readable WAV file: {}", path.display(), err);
            SoundPrepError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
        }
        hound::Error::IoError(io) => SoundPrepError::Io(io),
        other => SoundPrepError::Wav(other),
    })
}

fn is_strict_bitdepth(spec: &WavSpec) -> bool {
    match spec.sample_format {
        SampleFormat::Int => matches!(spec.bits_per_sample, 8 | 16 | 32),
        SampleFormat::Float => spec.bits_per_sample == 32,
    }
}

/// Read every sample as f32 in [-1.0, 1.0], laid out as frames × channels.
///
/// `strict` rejects bit depths outside what [`is_strict_bitdepth`] allows.
fn read_wav(path: &Path, strict: bool) -> Result<Signal, SoundPrepError> {
    let mut reader = open_reader(path)?;
    let spec = reader.spec();

    if strict && !is_strict_bitdepth(&spec) {
        return Err(SoundPrepError::UnsupportedBitdepth {
            path: path.to_path_buf(),
            bits: spec.bits_per_sample,
            format: match spec.sample_format {
                SampleFormat::Int => "int",
                SampleFormat::Float => "float",
            },
        });
    }

    let mut interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Int => {
            let full_scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|s| s as f32 / full_scale))
                .collect::<Result<_, _>>()?
        }
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
    };

    let channels = usize::from(spec.channels.max(1));
    let frames = interleaved.len() / channels;
    interleaved.truncate(frames * channels);
    log::trace!(
        "read {} frames x {} channels at {} Hz from {}",
        frames,
        channels,
        spec.sample_rate,
        path.display()
    );

    let data = Array2::from_shape_vec((frames, channels), interleaved)?;
    Signal::from_frames(data, spec.sample_rate)
}

fn write_wav(path: &Path, signal: &Signal, subtype: Subtype) -> Result<(), SoundPrepError> {
    let spec = WavSpec {
        channels: signal.channels() as u16,
        sample_rate: signal.sample_rate(),
        bits_per_sample: subtype.bits_per_sample(),
        sample_format: match subtype {
            Subtype::Float32 => SampleFormat::Float,
            Subtype::Pcm16 | Subtype::Pcm32 => SampleFormat::Int,
        },
    };

    let mut writer = WavWriter::create(path, spec)?;
    // Integer PCM uses the same full scale as `read_wav`, so values survive a
    // write/read cycle unchanged; +1.0 saturates one step below full scale.
    let mut write = |s: f32| -> Result<(), hound::Error> {
        let s = s.clamp(-1.0, 1.0) as f64;
        match subtype {
            Subtype::Pcm16 => {
                let scaled = (s * 32_768.0).round().min(i16::MAX as f64);
                writer.write_sample(scaled as i16)
            }
            Subtype::Pcm32 => {
                let scaled = (s * 2_147_483_648.0).round().min(i32::MAX as f64);
                writer.write_sample(scaled as i32)
            }
            Subtype::Float32 => writer.write_sample(s as f32),
        }
    };

    match signal.samples() {
        Samples::Mono(data) => {
            for &s in data {
                write(s)?;
            }
        }
        Samples::Frames(data) => {
            for frame in data.rows() {
                for &s in frame {
                    write(s)?;
                }
            }
        }
    }

    writer.finalize()?;
    Ok(())
}

impl AudioCodec for WavCodec {
    fn decode(&self, path: &Path) -> Result<Signal, SoundPrepError> {
        read_wav(path, true)
    }

    fn encode(
        &self,
        path: &Path,
        signal: &Signal,
        subtype: Subtype,
    ) -> Result<(), SoundPrepError> {
        write_wav(path, signal, subtype)
    }

    #[cfg(feature = "transcode")]
    fn convert_container(
        &self,
        path: &Path,
        target: ContainerFormat,
        sample_rate: Option<u32>,
    ) -> Result<PathBuf, SoundPrepError> {
        let destination = AudioPath::new(path)
            .with_suffix(target.extension())
            .into_path_buf();
        log::info!("Converting {} to .{}", path.display(), target.extension());

        let mut signal = transcode::decode_any(path)?;
        if let Some(rate) = sample_rate {
            signal = transcode::resample_signal(signal, rate)?;
        }
        write_wav(&destination, &signal, Subtype::Pcm16)?;

        log::info!("Saved file as {}", destination.display());
        Ok(destination)
    }

    #[cfg(not(feature = "transcode"))]
    fn convert_container(
        &self,
        path: &Path,
        _target: ContainerFormat,
        _sample_rate: Option<u32>,
    ) -> Result<PathBuf, SoundPrepError> {
        log::warn!(
            "cannot convert {} without the `transcode` feature",
            path.display()
        );
        Err(SoundPrepError::UnsupportedFormat {
            path: path.to_path_buf(),
        })
    }

    fn convert_bitdepth(
        &self,
        path: &Path,
        request: &BitdepthRequest,
    ) -> Result<PathBuf, SoundPrepError> {
        let subtype = Subtype::from_bitdepth(request.bitdepth)?;
        log::info!(
            "Ensuring bitdepth of {} is {}-bit",
            path.display(),
            request.bitdepth
        );

        let signal = read_wav(path, false)?;

        let destination = if request.overwrite {
            path.to_path_buf()
        } else if let Some(new_path) = &request.new_path {
            let (_, destination) = match_ext(path, new_path)?;
            destination
        } else {
            let adjustment = format!("_bitdepth{}", request.bitdepth);
            let destination = AudioPath::new(path)
                .adjusted(Some(adjustment.as_str()))
                .into_path_buf();
            log::info!(
                "No new filename provided. Saving as {}",
                destination.display()
            );
            destination
        };

        write_wav(&destination, &signal, subtype)?;
        log::info!("Saved file as {}", destination.display());
        Ok(destination)
    }
}
