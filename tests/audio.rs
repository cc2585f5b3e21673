use std::error::Error;
use std::path::Path;

use soundprep_rs::{load_signal, LoadOptions, SignalLoader, SoundPrepError};

fn write_int_wav(
    path: &Path,
    channels: u16,
    bits_per_sample: u16,
    sample_rate: u32,
    samples: &[i32],
) -> Result<(), Box<dyn Error>> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

fn raw_options() -> LoadOptions {
    LoadOptions {
        normalize: false,
        ..Default::default()
    }
}

#[test]
fn load_signal_normalizes_full_range() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    let wav_path = temp_dir.path().join("extreme.wav");
    write_int_wav(
        &wav_path,
        1,
        16,
        16_000,
        &[i16::MAX as i32, 0, i16::MIN as i32],
    )?;

    let signal = load_signal(&wav_path)?;
    let samples = signal.as_mono()?;
    assert_eq!(signal.sample_rate(), 16_000);
    assert_eq!(samples.len(), 3);

    assert_eq!(samples[0], 1.0);
    assert!(samples[1].abs() < 1e-3);
    assert_eq!(samples[2], -1.0);

    Ok(())
}

#[test]
fn raw_load_scales_by_full_scale() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    let wav_path = temp_dir.path().join("raw.wav");
    write_int_wav(&wav_path, 1, 16, 8_000, &[i16::MIN as i32, 16_384])?;

    let signal = SignalLoader::with_options(raw_options()).load(&wav_path)?;
    let samples = signal.as_mono()?;
    assert_eq!(samples[0], -1.0);
    assert_eq!(samples[1], 0.5);

    Ok(())
}

#[test]
fn stereo_file_keeps_only_the_first_channel() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    let wav_path = temp_dir.path().join("stereo.wav");
    write_int_wav(
        &wav_path,
        2,
        16,
        8_000,
        &[1_000, -5_000, 2_000, 7_000, 3_000, 0],
    )?;

    let mono = SignalLoader::with_options(raw_options()).load(&wav_path)?;
    assert_eq!(mono.channels(), 1);
    let expected: Vec<f32> = [1_000.0f32, 2_000.0, 3_000.0]
        .iter()
        .map(|s| s / 32_768.0)
        .collect();
    assert_eq!(mono.as_mono()?.to_vec(), expected);

    let stereo = SignalLoader::with_options(LoadOptions {
        mono: false,
        ..raw_options()
    })
    .load(&wav_path)?;
    assert_eq!(stereo.channels(), 2);
    assert_eq!(stereo.len(), 3);
    assert!(matches!(
        stereo.as_mono(),
        Err(SoundPrepError::NotMono { channels: 2 })
    ));

    Ok(())
}

#[test]
fn twenty_four_bit_file_is_converted_before_loading() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    let wav_path = temp_dir.path().join("studio.wav");
    write_int_wav(&wav_path, 1, 24, 16_000, &[-4_000_000, 0, 4_000_000, 8_000_000])?;

    let signal = load_signal(&wav_path)?;
    assert_eq!(signal.len(), 4);
    assert_eq!(signal.as_mono()?[0], -1.0);
    assert_eq!(signal.as_mono()?[3], 1.0);

    let converted = temp_dir.path().join("studio_bitdepth16.wav");
    assert!(converted.exists());
    assert_eq!(hound::WavReader::open(&converted)?.spec().bits_per_sample, 16);

    Ok(())
}

#[test]
fn unreadable_file_reports_unsupported_format() -> Result<(), Box<dyn Error>> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("notes.txt");
    std::fs::write(&path, "this is definitely not audio data")?;

    let err = load_signal(&path).unwrap_err();
    assert!(matches!(err, SoundPrepError::UnsupportedFormat { .. }));

    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_signal("does/not/exist.wav").unwrap_err();
    assert!(matches!(err, SoundPrepError::Io(_)));
}
