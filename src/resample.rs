//! Sample-rate conversion.
//!
//! The output length depends only on the input length and the two rates:
//! `floor(len * desired / original)`. How the samples in between are
//! interpolated is left to a [`Resample`] implementation.

use ndarray::{Array1, ArrayView1};
use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::SoundPrepError;

/// An interpolating primitive that stretches or squeezes a buffer to an exact
/// number of samples.
pub trait Resample {
    fn resample(&self, samples: ArrayView1<'_, f32>, target_count: usize) -> Array1<f32>;
}

/// Frequency-domain resampler.
///
/// Takes the FFT of the whole buffer, truncates or zero-pads the spectrum to
/// the target length and transforms back. Treats the input as one period of a
/// periodic signal, so the ends of the buffer may ring.
#[derive(Debug, Clone, Copy, Default)]
pub struct FourierResampler;

impl Resample for FourierResampler {
    fn resample(&self, samples: ArrayView1<'_, f32>, target_count: usize) -> Array1<f32> {
        let input_len = samples.len();
        if target_count == 0 {
            return Array1::zeros(0);
        }
        if input_len == 0 {
            return Array1::zeros(target_count);
        }
        if input_len == target_count {
            return samples.to_owned();
        }

        let mut planner = FftPlanner::<f64>::new();

        let mut spectrum: Vec<Complex<f64>> = samples
            .iter()
            .map(|&s| Complex::new(s as f64, 0.0))
            .collect();
        planner.plan_fft_forward(input_len).process(&mut spectrum);

        let mut output = vec![Complex::new(0.0, 0.0); target_count];
        let kept = input_len.min(target_count);
        let nyquist = kept / 2 + 1;

        // Positive frequencies, Nyquist included when present.
        output[..nyquist].copy_from_slice(&spectrum[..nyquist]);
        // Negative frequencies.
        if kept > 2 {
            let negative = kept - nyquist;
            output[target_count - negative..].copy_from_slice(&spectrum[input_len - negative..]);
        }

        if kept % 2 == 0 {
            let half = kept / 2;
            if target_count < input_len {
                // Fold the dropped -N/2 component into +N/2.
                output[target_count - half] += spectrum[input_len - half];
            } else {
                // Split +N/2 evenly between the two Nyquist bins.
                output[half] *= 0.5;
                output[target_count - half] = output[half];
            }
        }

        planner.plan_fft_inverse(target_count).process(&mut output);

        // rustfft leaves the inverse unnormalized; dividing by the input length
        // folds in both the 1/target and target/input factors.
        let scale = 1.0 / input_len as f64;
        output.iter().map(|c| (c.re * scale) as f32).collect()
    }
}

/// Number of samples a buffer of `len` samples occupies after conversion
/// from `original_rate` to `desired_rate`, rounded down.
pub fn target_sample_count(len: usize, original_rate: u32, desired_rate: u32) -> usize {
    ((len as u128 * desired_rate as u128) / original_rate as u128) as usize
}

/// Resample `samples` from `original_rate` to `desired_rate`.
///
/// Returns the new buffer together with `desired_rate`.
///
/// # Errors
///
/// Returns [`SoundPrepError::InvalidSampleRate`] if either rate is zero.
pub fn resample<R: Resample + ?Sized>(
    samples: ArrayView1<'_, f32>,
    original_rate: u32,
    desired_rate: u32,
    resampler: &R,
) -> Result<(Array1<f32>, u32), SoundPrepError> {
    if original_rate == 0 || desired_rate == 0 {
        return Err(SoundPrepError::InvalidSampleRate);
    }

    let target_count = target_sample_count(samples.len(), original_rate, desired_rate);
    log::debug!(
        "resampling {} samples from {} Hz to {} Hz ({} samples)",
        samples.len(),
        original_rate,
        desired_rate,
        target_count
    );

    Ok((resampler.resample(samples, target_count), desired_rate))
}
