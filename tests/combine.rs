use ndarray::{array, Array1};
use soundprep_rs::{
    combine_signals, zero_pad, CombineParams, FourierResampler, Signal, SoundPrepError,
};

fn params(match_to_shortest: bool, delay_sec: f64, total_dur_sec: Option<f64>) -> CombineParams {
    CombineParams {
        match_to_shortest,
        delay_sec,
        total_dur_sec,
    }
}

fn constant(value: f32, len: usize, sample_rate: u32) -> Signal {
    Signal::mono(Array1::from_elem(len, value), sample_rate).unwrap()
}

#[test]
fn zero_pad_to_own_length_is_a_no_op() {
    let data = array![0.1f32, -0.2, 0.3];
    assert_eq!(zero_pad(data.view(), 3, 16_000, 1.0).unwrap(), data);
    assert_eq!(zero_pad(data.view(), 2, 16_000, 1.0).unwrap(), data);
}

#[test]
fn zero_pad_delays_into_a_zero_buffer() {
    let data = array![1.0f32, 2.0, 3.0];
    let padded = zero_pad(data.view(), 6, 1, 1.0).unwrap();
    assert_eq!(padded, array![0.0f32, 1.0, 2.0, 3.0, 0.0, 0.0]);

    let undelayed = zero_pad(data.view(), 5, 1, 0.0).unwrap();
    assert_eq!(undelayed, array![1.0f32, 2.0, 3.0, 0.0, 0.0]);
}

#[test]
fn zero_pad_rejects_delays_that_overrun_the_buffer() {
    let data = array![1.0f32, 2.0, 3.0];
    let err = zero_pad(data.view(), 4, 1, 2.0).unwrap_err();
    assert!(matches!(
        err,
        SoundPrepError::OutOfRange {
            required: 5,
            available: 4
        }
    ));
}

#[test]
fn zero_pad_rejects_negative_delay() {
    let data = array![1.0f32];
    let err = zero_pad(data.view(), 4, 1, -1.0).unwrap_err();
    assert!(matches!(err, SoundPrepError::InvalidParameter(_)));
}

#[test]
fn match_to_shortest_keeps_short_length_plus_delay() -> Result<(), SoundPrepError> {
    let short = constant(1.0, 10, 1);
    let long = constant(2.0, 20, 1);

    let mixed = combine_signals(&short, &long, &params(true, 1.0, None), &FourierResampler)?;
    assert_eq!(mixed.len(), 11);
    assert_eq!(mixed.sample_rate(), 1);

    let mut expected = vec![3.0f32; 11];
    expected[0] = 2.0;
    assert_eq!(mixed.as_mono()?.to_vec(), expected);

    // argument order does not matter
    let swapped = combine_signals(&long, &short, &params(true, 1.0, None), &FourierResampler)?;
    assert_eq!(swapped, mixed);
    Ok(())
}

#[test]
fn zero_total_duration_disables_truncation() -> Result<(), SoundPrepError> {
    let mixed = combine_signals(
        &constant(1.0, 10, 1),
        &constant(2.0, 20, 1),
        &params(true, 1.0, Some(0.0)),
        &FourierResampler,
    )?;
    assert_eq!(mixed.len(), 11);
    Ok(())
}

#[test]
fn total_duration_caps_the_result() -> Result<(), SoundPrepError> {
    for (a_len, b_len, delay) in [(10, 20, 1.0), (3, 40, 2.0), (30, 30, 0.0), (2, 4, 0.0)] {
        for match_to_shortest in [true, false] {
            let mixed = combine_signals(
                &constant(0.5, a_len, 1),
                &constant(0.25, b_len, 1),
                &params(match_to_shortest, delay, Some(5.0)),
                &FourierResampler,
            )?;
            assert!(mixed.len() <= 5, "{a_len}/{b_len} gave {}", mixed.len());
        }
    }
    Ok(())
}

#[test]
fn short_results_are_not_padded_to_total_duration() -> Result<(), SoundPrepError> {
    let mixed = combine_signals(
        &constant(0.5, 2, 1),
        &constant(0.25, 4, 1),
        &params(true, 1.0, Some(5.0)),
        &FourierResampler,
    )?;
    assert_eq!(mixed.len(), 3);
    Ok(())
}

#[test]
fn padding_to_longest_delays_the_short_signal() -> Result<(), SoundPrepError> {
    let short = Signal::from_vec(vec![1.0, 2.0, 3.0], 1)?;
    let long = Signal::from_vec(vec![10.0; 6], 1)?;

    let mixed = combine_signals(&short, &long, &params(false, 1.0, None), &FourierResampler)?;
    assert_eq!(
        mixed.as_mono()?.to_vec(),
        vec![10.0, 11.0, 12.0, 13.0, 10.0, 10.0]
    );
    Ok(())
}

#[test]
fn padding_to_longest_fails_when_delay_does_not_fit() {
    let err = combine_signals(
        &constant(1.0, 5, 1),
        &constant(1.0, 6, 1),
        &params(false, 2.0, None),
        &FourierResampler,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SoundPrepError::OutOfRange {
            required: 7,
            available: 6
        }
    ));
}

#[test]
fn equal_lengths_with_delay_are_a_length_mismatch() {
    let err = combine_signals(
        &constant(1.0, 10, 1),
        &constant(1.0, 10, 1),
        &params(true, 1.0, None),
        &FourierResampler,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SoundPrepError::LengthMismatch {
            left: 10,
            right: 11
        }
    ));
}

#[test]
fn no_delay_sums_the_overlap() -> Result<(), SoundPrepError> {
    let a = Signal::from_vec(vec![1.0, 2.0], 1)?;
    let b = Signal::from_vec(vec![10.0, 20.0, 30.0], 1)?;

    let mixed = combine_signals(&a, &b, &params(true, 0.0, None), &FourierResampler)?;
    assert_eq!(mixed.as_mono()?.to_vec(), vec![11.0, 22.0]);
    Ok(())
}

#[test]
fn second_signal_is_resampled_to_first_rate() -> Result<(), SoundPrepError> {
    let a = constant(0.5, 8, 4);
    let b = constant(0.25, 32, 8);

    let mixed = combine_signals(&a, &b, &params(true, 1.0, None), &FourierResampler)?;
    assert_eq!(mixed.sample_rate(), 4);
    assert_eq!(mixed.len(), 8 + 4);
    Ok(())
}

#[test]
fn stereo_input_is_rejected() -> Result<(), SoundPrepError> {
    let stereo = Signal::from_frames(array![[0.0f32, 1.0], [0.5, 0.5]], 1)?;
    let err = combine_signals(
        &stereo,
        &constant(1.0, 4, 1),
        &CombineParams::default(),
        &FourierResampler,
    )
    .unwrap_err();
    assert!(matches!(err, SoundPrepError::NotMono { channels: 2 }));
    Ok(())
}

#[test]
fn huge_delays_are_out_of_range() {
    let data = array![1.0f32];
    let err = zero_pad(data.view(), 5, 1, 1e300).unwrap_err();
    assert!(matches!(
        err,
        SoundPrepError::OutOfRange {
            required: usize::MAX,
            available: 5
        }
    ));

    let short = constant(0.5, 3, 1);
    let long = constant(0.25, 6, 1);
    for match_to_shortest in [true, false] {
        let err = combine_signals(
            &short,
            &long,
            &params(match_to_shortest, 1e300, None),
            &FourierResampler,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SoundPrepError::OutOfRange {
                required: usize::MAX,
                ..
            }
        ));
    }
}
