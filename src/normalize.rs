//! Amplitude normalization and channel collapse.
//!
//! Both helpers are pure: they borrow the input buffer and return a new one.
//!
//! # Example
//!
//! ```rust
//! use ndarray::array;
//! use soundprep_rs::normalize::normalize;
//!
//! let scaled = normalize(&array![0.0f32, 5.0, 10.0], -1.0, 1.0)?;
//! assert_eq!(scaled, array![-1.0f32, 0.0, 1.0]);
//! # Ok::<(), soundprep_rs::SoundPrepError>(())
//! ```

use ndarray::{Array, Array1, ArrayBase, Axis, Data, Dimension, Ix2};

use crate::{error::SoundPrepError, Samples, Signal};

/// Linearly rescale the empirical range of `samples` onto `[min_val, max_val]`.
///
/// The range is taken over every element, so a frames × channels buffer is
/// scaled as a whole rather than per channel.
///
/// A constant buffer has no range to stretch; every sample is mapped to the
/// midpoint of the target range instead. Empty buffers come back unchanged.
///
/// # Errors
///
/// Returns [`SoundPrepError::InvalidParameter`] if `min_val >= max_val` or
/// either bound is NaN.
pub fn normalize<S, D>(
    samples: &ArrayBase<S, D>,
    min_val: f32,
    max_val: f32,
) -> Result<Array<f32, D>, SoundPrepError>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    if min_val.is_nan() || max_val.is_nan() || min_val >= max_val {
        return Err(SoundPrepError::InvalidParameter(format!(
            "normalization range [{min_val}, {max_val}] is empty"
        )));
    }
    if samples.is_empty() {
        return Ok(samples.to_owned());
    }

    let (lo, hi) = samples
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &s| {
            (lo.min(s), hi.max(s))
        });

    let span = hi - lo;
    if span == 0.0 || !span.is_finite() {
        log::debug!("normalizing a constant signal ({lo}), mapping to range midpoint");
        let midpoint = (min_val + max_val) / 2.0;
        return Ok(Array::from_elem(samples.raw_dim(), midpoint));
    }

    let target_span = max_val - min_val;
    Ok(samples.mapv(|s| {
        let scaled = min_val + (s - lo) / span * target_span;
        scaled.clamp(min_val, max_val)
    }))
}

/// Keep channel 0 of a frames × channels buffer and drop the rest.
///
/// This is a selection, not an average of the channels.
pub fn stereo_to_mono<S>(frames: &ArrayBase<S, Ix2>) -> Array1<f32>
where
    S: Data<Elem = f32>,
{
    frames.index_axis(Axis(1), 0).to_owned()
}

/// Normalize whatever layout a [`Signal`] holds.
pub fn normalize_signal(
    signal: &Signal,
    min_val: f32,
    max_val: f32,
) -> Result<Signal, SoundPrepError> {
    match signal.samples() {
        Samples::Mono(data) => {
            Signal::mono(normalize(data, min_val, max_val)?, signal.sample_rate())
        }
        Samples::Frames(data) => {
            Signal::from_frames(normalize(data, min_val, max_val)?, signal.sample_rate())
        }
    }
}

/// Collapse a multi-channel [`Signal`] to mono; mono input is returned as-is.
pub fn signal_to_mono(signal: Signal) -> Result<Signal, SoundPrepError> {
    let (samples, sample_rate) = signal.into_parts();
    match samples {
        Samples::Mono(data) => Signal::mono(data, sample_rate),
        Samples::Frames(data) => {
            log::debug!("collapsing {} channels to mono", data.ncols());
            Signal::mono(stereo_to_mono(&data), sample_rate)
        }
    }
}
