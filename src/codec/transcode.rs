//! Decoding of non-WAV containers through Symphonia.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use ndarray::{Array1, Array2, Axis};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::{
    error::SoundPrepError,
    resample::{resample, FourierResampler},
    Samples, Signal,
};

/// Decode the first audio track of any container Symphonia recognizes.
pub(crate) fn decode_any(path: &Path) -> Result<Signal, SoundPrepError> {
    let unsupported = || SoundPrepError::UnsupportedFormat {
        path: path.to_path_buf(),
    };

    let src = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|err| match err {
            Error::Unsupported(_) => unsupported(),
            Error::IoError(io) if io.kind() == ErrorKind::UnexpectedEof => unsupported(),
            other => SoundPrepError::Decode(other),
        })?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(unsupported)?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut interleaved: Vec<f32> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(Error::IoError(err)) if err.kind() == ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(err.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = Some(spec.rate);
                channels = Some(spec.channels.count());

                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                interleaved.extend_from_slice(buffer.samples());
            }
            Err(Error::DecodeError(msg)) => {
                log::warn!("skipping undecodable packet in {}: {}", path.display(), msg);
            }
            Err(err) => return Err(err.into()),
        }
    }

    let sample_rate = sample_rate.ok_or(SoundPrepError::InvalidSampleRate)?;
    let channels = channels.unwrap_or(1).max(1);
    let frames = interleaved.len() / channels;
    interleaved.truncate(frames * channels);

    log::debug!(
        "decoded {} frames x {} channels at {} Hz from {}",
        frames,
        channels,
        sample_rate,
        path.display()
    );

    let data = Array2::from_shape_vec((frames, channels), interleaved)?;
    Signal::from_frames(data, sample_rate)
}

/// Resample each channel of `signal` to `sample_rate`.
pub(crate) fn resample_signal(signal: Signal, sample_rate: u32) -> Result<Signal, SoundPrepError> {
    if signal.sample_rate() == sample_rate {
        return Ok(signal);
    }
    let (samples, original_rate) = signal.into_parts();
    match samples {
        Samples::Mono(data) => {
            let (data, rate) =
                resample(data.view(), original_rate, sample_rate, &FourierResampler)?;
            Signal::mono(data, rate)
        }
        Samples::Frames(data) => {
            let channels = data
                .axis_iter(Axis(1))
                .map(|channel| {
                    resample(channel, original_rate, sample_rate, &FourierResampler)
                        .map(|(resampled, _)| resampled)
                })
                .collect::<Result<Vec<Array1<f32>>, _>>()?;
            let views: Vec<_> = channels.iter().map(|c| c.view()).collect();
            let frames = ndarray::stack(Axis(1), &views)?;
            Signal::from_frames(frames, sample_rate)
        }
    }
}
