//! Turning audio files into ready-to-use signals.
//!
//! [`SignalLoader`] decodes a file through an [`AudioCodec`]. If the codec
//! rejects the container or bitdepth, the loader asks the codec to convert
//! the file and tries again, up to [`LoadOptions::max_conversion_retries`]
//! times. The decoded audio is then collapsed to mono and normalized as
//! configured.
//!
//! ```rust,no_run
//! use soundprep_rs::{load_signal, combine_sound_files, save_signal, CombineParams, Subtype};
//!
//! let speech = load_signal("speech.flac")?;
//! println!("{:.2}s at {} Hz", speech.duration_secs(), speech.sample_rate());
//!
//! let mixed = combine_sound_files("speech.flac", "cafe_noise.wav", &CombineParams::default())?;
//! save_signal("speech_in_cafe.wav", &mixed, Subtype::Pcm16)?;
//! # Ok::<(), soundprep_rs::SoundPrepError>(())
//! ```

use std::path::{Path, PathBuf};

use crate::{
    codec::{AudioCodec, AudioPath, ContainerFormat, Subtype, WavCodec},
    combine::combine_signals,
    config::{CombineParams, LoadOptions, OverlayParams},
    error::SoundPrepError,
    normalize::{normalize_signal, signal_to_mono},
    overlay::add_sound_to_signal,
    resample::{FourierResampler, Resample},
    Signal,
};

/// Loads, converts and mixes files through a codec and a resampler.
pub struct SignalLoader<C = WavCodec, R = FourierResampler> {
    codec: C,
    resampler: R,
    options: LoadOptions,
}

impl SignalLoader {
    pub fn new() -> Self {
        Self::with_options(LoadOptions::default())
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self::with_codec(WavCodec::new(), FourierResampler, options)
    }
}

impl Default for SignalLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_convertible(err: &SoundPrepError) -> bool {
    matches!(
        err,
        SoundPrepError::UnsupportedFormat { .. } | SoundPrepError::UnsupportedBitdepth { .. }
    )
}

impl<C: AudioCodec, R: Resample> SignalLoader<C, R> {
    pub fn with_codec(codec: C, resampler: R, options: LoadOptions) -> Self {
        Self {
            codec,
            resampler,
            options,
        }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    fn exhausted(&self, path: PathBuf, last: SoundPrepError) -> SoundPrepError {
        log::warn!(
            "giving up on {} after {} conversion attempts: {}",
            path.display(),
            self.options.max_conversion_retries,
            last
        );
        SoundPrepError::ConversionRetriesExhausted {
            path,
            attempts: self.options.max_conversion_retries,
            last: Box::new(last),
        }
    }

    /// Decode `path`, converting the file whenever the codec rejects its
    /// container or bitdepth. Returns the signal and the path that was
    /// finally read.
    pub fn decode(&self, path: &Path) -> Result<(Signal, PathBuf), SoundPrepError> {
        let mut current = path.to_path_buf();
        let mut attempts = 0;

        loop {
            let err = match self.codec.decode(&current) {
                Ok(signal) => return Ok((signal, current)),
                Err(err) if is_convertible(&err) => err,
                Err(err) => return Err(err),
            };

            if attempts >= self.options.max_conversion_retries {
                return Err(self.exhausted(current, err));
            }
            attempts += 1;

            current = match err {
                SoundPrepError::UnsupportedFormat { .. } => {
                    log::info!(
                        "Ensuring {} filetype is compatible with the WAV reader",
                        current.display()
                    );
                    self.codec
                        .convert_container(&current, ContainerFormat::Wav, None)?
                }
                _ => {
                    log::info!(
                        "Ensuring bitdepth of {} is compatible with the WAV reader",
                        current.display()
                    );
                    self.codec
                        .convert_bitdepth(&current, &self.options.bitdepth_request())?
                }
            };
        }
    }

    /// Load `path` as a signal, collapsing to mono and normalizing per the
    /// loader's [`LoadOptions`].
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Signal, SoundPrepError> {
        let (mut signal, _) = self.decode(path.as_ref())?;

        if self.options.mono && signal.channels() > 1 {
            signal = signal_to_mono(signal)?;
        }
        if self.options.normalize {
            signal = normalize_signal(&signal, self.options.min_val, self.options.max_val)?;
        }
        Ok(signal)
    }

    /// Convert `path` until the strict reader accepts it and return the
    /// resulting file name.
    ///
    /// Files without a `.wav` suffix get a container conversion; `.wav` files
    /// whose name does not mention `bitdepth` yet get a bitdepth conversion.
    /// Anything else is reported as-is.
    pub fn prepare(&self, path: impl AsRef<Path>) -> Result<PathBuf, SoundPrepError> {
        let mut current = path.as_ref().to_path_buf();
        let mut attempts = 0;

        loop {
            let err = match self.codec.decode(&current) {
                Ok(_) => return Ok(current),
                Err(err) if is_convertible(&err) => err,
                Err(err) => return Err(err),
            };

            let audio_path = AudioPath::new(&current);
            let needs_container = !audio_path.has_suffix(ContainerFormat::Wav.extension());
            let already_converted = audio_path.stem().contains("bitdepth");
            if !needs_container && already_converted {
                return Err(err);
            }

            if attempts >= self.options.max_conversion_retries {
                return Err(self.exhausted(current, err));
            }
            attempts += 1;

            current = if needs_container {
                log::info!("Converting {} to .wav", current.display());
                self.codec
                    .convert_container(&current, ContainerFormat::Wav, None)?
            } else {
                log::info!("Ensuring bitdepth of {} is compatible", current.display());
                self.codec
                    .convert_bitdepth(&current, &self.options.bitdepth_request())?
            };
            log::info!("Saved file as {}", current.display());
        }
    }

    /// Load two files and mix them with [`combine_signals`].
    pub fn combine_files(
        &self,
        first: impl AsRef<Path>,
        second: impl AsRef<Path>,
        params: &CombineParams,
    ) -> Result<Signal, SoundPrepError> {
        let first = self.load(first)?;
        let second = self.load(second)?;
        combine_signals(&first, &second, params, &self.resampler)
    }

    /// Load two files and lay the second over the first with
    /// [`add_sound_to_signal`].
    pub fn add_sound_file(
        &self,
        target: impl AsRef<Path>,
        sound: impl AsRef<Path>,
        params: &OverlayParams,
    ) -> Result<Signal, SoundPrepError> {
        let target = self.load(target)?;
        let sound = self.load(sound)?;
        add_sound_to_signal(&target, &sound, params, &self.resampler)
    }

    pub fn save(
        &self,
        path: impl AsRef<Path>,
        signal: &Signal,
        subtype: Subtype,
    ) -> Result<(), SoundPrepError> {
        self.codec.encode(path.as_ref(), signal, subtype)
    }
}

/// Load `path` with the default loader: mono, normalized to [-1.0, 1.0].
pub fn load_signal(path: impl AsRef<Path>) -> Result<Signal, SoundPrepError> {
    SignalLoader::new().load(path)
}

pub fn combine_sound_files(
    first: impl AsRef<Path>,
    second: impl AsRef<Path>,
    params: &CombineParams,
) -> Result<Signal, SoundPrepError> {
    SignalLoader::new().combine_files(first, second, params)
}

pub fn add_sound_file_to_signal(
    target: impl AsRef<Path>,
    sound: impl AsRef<Path>,
    params: &OverlayParams,
) -> Result<Signal, SoundPrepError> {
    SignalLoader::new().add_sound_file(target, sound, params)
}

/// Write `signal` as a WAV file.
pub fn save_signal(
    path: impl AsRef<Path>,
    signal: &Signal,
    subtype: Subtype,
) -> Result<(), SoundPrepError> {
    WavCodec::new().encode(path.as_ref(), signal, subtype)
}
