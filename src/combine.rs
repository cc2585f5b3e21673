//! Aligning and summing two mono signals.
//!
//! [`combine_signals`] brings both signals to one sample rate, delays the
//! shorter one, pads or truncates so the lengths agree and adds them sample
//! for sample. [`zero_pad`] is the padding primitive it is built on.
//!
//! # Example
//!
//! ```rust
//! use soundprep_rs::{combine_signals, CombineParams, FourierResampler, Signal};
//!
//! let voice = Signal::from_vec(vec![0.5; 10], 1)?;
//! let noise = Signal::from_vec(vec![0.1; 20], 1)?;
//! let params = CombineParams {
//!     match_to_shortest: true,
//!     delay_sec: 1.0,
//!     total_dur_sec: None,
//! };
//!
//! let mixed = combine_signals(&voice, &noise, &params, &FourierResampler)?;
//! assert_eq!(mixed.len(), 11);
//! # Ok::<(), soundprep_rs::SoundPrepError>(())
//! ```

use ndarray::{s, Array1, ArrayView1};

use crate::{
    config::CombineParams,
    error::SoundPrepError,
    resample::{resample, Resample},
    Signal,
};

/// Convert a delay in seconds to whole samples, rounding down.
pub(crate) fn delay_samples(sample_rate: u32, delay_sec: f64) -> Result<usize, SoundPrepError> {
    if !delay_sec.is_finite() || delay_sec < 0.0 {
        return Err(SoundPrepError::InvalidParameter(format!(
            "delay must be a non-negative number of seconds, got {delay_sec}"
        )));
    }
    Ok((sample_rate as f64 * delay_sec) as usize)
}

/// Place `data` `delay_sec` seconds into a zeroed buffer of `target_len` samples.
///
/// Data that is already `target_len` samples or longer is returned unchanged,
/// without applying the delay.
///
/// # Errors
///
/// - [`SoundPrepError::OutOfRange`] if the delayed data does not fit in `target_len`
/// - [`SoundPrepError::InvalidParameter`] for a negative or non-finite delay
pub fn zero_pad(
    data: ArrayView1<'_, f32>,
    target_len: usize,
    sample_rate: u32,
    delay_sec: f64,
) -> Result<Array1<f32>, SoundPrepError> {
    let delay = delay_samples(sample_rate, delay_sec)?;

    if data.len() >= target_len {
        return Ok(data.to_owned());
    }

    let required = delay.checked_add(data.len()).unwrap_or(usize::MAX);
    if required > target_len {
        return Err(SoundPrepError::OutOfRange {
            required,
            available: target_len,
        });
    }

    let mut padded = Array1::zeros(target_len);
    padded.slice_mut(s![delay..required]).assign(&data);
    log::trace!(
        "zero-padded {} samples to {} with a {} sample delay",
        data.len(),
        target_len,
        delay
    );
    Ok(padded)
}

/// Elementwise sum of two buffers that must already have the same length.
pub(crate) fn add_equal_length(
    left: ArrayView1<'_, f32>,
    right: ArrayView1<'_, f32>,
) -> Result<Array1<f32>, SoundPrepError> {
    if left.len() != right.len() {
        return Err(SoundPrepError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(&left + &right)
}

/// Mix two mono signals into one at `first`'s sample rate.
///
/// `second` is resampled when the rates differ. The shorter signal is delayed
/// by `params.delay_sec` and then either
///
/// - padded to its own length plus the delay, with the longer signal
///   truncated to match (`match_to_shortest`), or
/// - padded out to the longer signal's length.
///
/// The sum is finally truncated to `params.total_dur_sec` seconds when set.
///
/// # Errors
///
/// - [`SoundPrepError::NotMono`] if either signal has more than one channel
/// - [`SoundPrepError::OutOfRange`] if the delayed shorter signal overruns its padding
/// - [`SoundPrepError::LengthMismatch`] if the aligned buffers still differ in length,
///   e.g. when the longer signal is shorter than the shorter one plus the delay
pub fn combine_signals<R: Resample + ?Sized>(
    first: &Signal,
    second: &Signal,
    params: &CombineParams,
    resampler: &R,
) -> Result<Signal, SoundPrepError> {
    let sample_rate = first.sample_rate();
    let first_data = first.as_mono()?;
    let second_data = if second.sample_rate() != sample_rate {
        resample(second.as_mono()?, second.sample_rate(), sample_rate, resampler)?.0
    } else {
        second.as_mono()?.to_owned()
    };

    let (long, short) = if first_data.len() > second_data.len() {
        (first_data, second_data.view())
    } else {
        (second_data.view(), first_data)
    };
    let long_len = long.len();
    let short_len = short.len();

    let extra = if params.delay_sec > 0.0 {
        delay_samples(sample_rate, params.delay_sec)?
    } else {
        0
    };

    let combined = if params.match_to_shortest {
        let aligned_len = short_len
            .checked_add(extra)
            .ok_or(SoundPrepError::OutOfRange {
                required: usize::MAX,
                available: long_len,
            })?;
        let short = zero_pad(short, aligned_len, sample_rate, params.delay_sec)?;
        let long = long.slice(s![..aligned_len.min(long_len)]);
        add_equal_length(long, short.view())?
    } else {
        let short = zero_pad(short, long_len, sample_rate, params.delay_sec)?;
        add_equal_length(long, short.view())?
    };

    let combined = match params.total_dur_sec {
        Some(total) if total > 0.0 => {
            let total_samples = (sample_rate as f64 * total) as usize;
            if total_samples < combined.len() {
                combined.slice(s![..total_samples]).to_owned()
            } else {
                combined
            }
        }
        _ => combined,
    };

    log::debug!(
        "combined {} and {} samples into {} at {} Hz",
        long_len,
        short_len,
        combined.len(),
        sample_rate
    );
    Signal::mono(combined, sample_rate)
}
