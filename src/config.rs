//! Parameters for loading and mixing, loadable from JSON.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```rust
//! use soundprep_rs::PrepConfig;
//!
//! let config = PrepConfig::from_json_str(r#"{ "combine": { "delay_sec": 0.5 } }"#)?;
//! assert_eq!(config.combine.delay_sec, 0.5);
//! assert!(config.combine.match_to_shortest);
//! assert!(config.load.mono);
//! # Ok::<(), soundprep_rs::SoundPrepError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    codec::{BitdepthRequest, Subtype},
    error::SoundPrepError,
};

/// How files are turned into ready-to-use signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Rescale amplitude onto `[min_val, max_val]` (default: true)
    pub normalize: bool,
    /// Collapse multi-channel audio to channel 0 (default: true)
    pub mono: bool,
    /// Lower bound of the normalized range (default: -1.0)
    pub min_val: f32,
    /// Upper bound of the normalized range (default: 1.0)
    pub max_val: f32,
    /// Conversions attempted before giving up on a file (default: 2)
    pub max_conversion_retries: usize,
    /// Bitdepth used when a file's bitdepth is unreadable (default: 16)
    pub fallback_bitdepth: u16,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            mono: true,
            min_val: -1.0,
            max_val: 1.0,
            max_conversion_retries: 2,
            fallback_bitdepth: 16,
        }
    }
}

impl LoadOptions {
    pub(crate) fn bitdepth_request(&self) -> BitdepthRequest {
        BitdepthRequest::new(self.fallback_bitdepth)
    }
}

/// Parameters for [`combine_signals`](crate::combine_signals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineParams {
    /// Truncate to the shorter signal plus the delay instead of padding to the longer one
    pub match_to_shortest: bool,
    /// Silence placed before the shorter signal, in seconds (0 disables)
    pub delay_sec: f64,
    /// Length of the result in seconds; `None` or 0 keeps everything
    pub total_dur_sec: Option<f64>,
}

impl Default for CombineParams {
    fn default() -> Self {
        Self {
            match_to_shortest: true,
            delay_sec: 1.0,
            total_dur_sec: Some(5.0),
        }
    }
}

/// Parameters for [`add_sound_to_signal`](crate::add_sound_to_signal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayParams {
    /// Amplitude multiplier applied to the added sound
    pub scale: f32,
    /// Prepend the first second of the added sound before the mix
    pub delay_target: bool,
}

impl Default for OverlayParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            delay_target: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    pub load: LoadOptions,
    pub combine: CombineParams,
    pub overlay: OverlayParams,
    /// Sample encoding for written results (default: `pcm16`)
    pub save_subtype: Subtype,
}

impl PrepConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SoundPrepError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SoundPrepError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
