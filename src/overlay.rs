//! Laying a (looped) sound over a target signal.

use ndarray::{concatenate, s, Array1, ArrayView1, Axis};

use crate::{
    combine::add_equal_length,
    config::OverlayParams,
    error::SoundPrepError,
    resample::{resample, Resample},
    Signal,
};

/// Tile `data` by repeated self-concatenation until it reaches `target_len`,
/// then truncate to exactly `target_len` samples.
///
/// # Errors
///
/// Returns [`SoundPrepError::InvalidInput`] if `data` is empty and
/// `target_len` is not, since nothing can be tiled.
pub fn extend_sound(
    data: ArrayView1<'_, f32>,
    target_len: usize,
) -> Result<Array1<f32>, SoundPrepError> {
    if data.is_empty() && target_len > 0 {
        return Err(SoundPrepError::InvalidInput(
            "cannot extend an empty sound".to_string(),
        ));
    }

    let mut extended = data.to_owned();
    while extended.len() < target_len {
        let doubled = concatenate(Axis(0), &[extended.view(), extended.view()])?;
        extended = doubled;
    }
    extended.slice_collapse(s![..target_len]);
    Ok(extended)
}

/// Add `sound` on top of `target`, looping it as needed.
///
/// The first second of the (scaled) sound is split off as a lead-in. The rest
/// is looped or truncated to the target's length and summed with it. With
/// `params.delay_target` the lead-in is put back in front, so the target
/// starts one second into the result.
///
/// # Errors
///
/// - [`SoundPrepError::NotMono`] if either signal has more than one channel
/// - [`SoundPrepError::InvalidInput`] if nothing is left after the lead-in
///   but the target is not empty
pub fn add_sound_to_signal<R: Resample + ?Sized>(
    target: &Signal,
    sound: &Signal,
    params: &OverlayParams,
    resampler: &R,
) -> Result<Signal, SoundPrepError> {
    let sample_rate = target.sample_rate();
    let target_data = target.as_mono()?;

    let mut sound_data = if sound.sample_rate() != sample_rate {
        resample(sound.as_mono()?, sound.sample_rate(), sample_rate, resampler)?.0
    } else {
        sound.as_mono()?.to_owned()
    };
    sound_data *= params.scale;

    let split = (sample_rate as usize).min(sound_data.len());
    let (lead_in, tail) = sound_data.view().split_at(Axis(0), split);

    let tail = if tail.len() < target_data.len() {
        extend_sound(tail, target_data.len())?
    } else {
        tail.slice(s![..target_data.len()]).to_owned()
    };

    let mixed = add_equal_length(tail.view(), target_data)?;
    let mixed = if params.delay_target {
        concatenate(Axis(0), &[lead_in, mixed.view()])?
    } else {
        mixed
    };

    log::debug!(
        "overlaid {} samples on {} ({} sample lead-in) at {} Hz",
        sound_data.len(),
        target_data.len(),
        lead_in.len(),
        sample_rate
    );
    Signal::mono(mixed, sample_rate)
}
