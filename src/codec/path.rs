//! Stem/suffix handling for audio file names.

use std::path::{Path, PathBuf};

use crate::error::SoundPrepError;

/// An audio file path split into parent directory, stem and suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPath {
    path: PathBuf,
}

impl AudioPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }

    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
    }

    /// Extension including the leading dot, e.g. `".wav"`.
    pub fn suffix(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{ext}"))
    }

    /// Case-insensitive suffix check; `suffix` may be given with or without the dot.
    pub fn has_suffix(&self, suffix: &str) -> bool {
        let wanted = suffix.trim_start_matches('.');
        self.suffix()
            .is_some_and(|own| own[1..].eq_ignore_ascii_case(wanted))
    }

    /// Replace (or add) the extension. `extension` may be given with or without the dot.
    pub fn with_suffix(&self, extension: &str) -> Self {
        Self::new(self.path.with_extension(extension.trim_start_matches('.')))
    }

    /// `<parent>/<stem><adjustment><suffix>`; the adjustment defaults to `_adj`.
    pub fn adjusted(&self, adjustment: Option<&str>) -> Self {
        let mut name = self.stem().to_string();
        name.push_str(adjustment.unwrap_or("_adj"));
        if let Some(suffix) = self.suffix() {
            name.push_str(&suffix);
        }
        Self::new(self.path.with_file_name(name))
    }
}

impl AsRef<Path> for AudioPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Give both paths the same extension.
///
/// The first path's extension wins; the second's is used only when the first
/// has none.
///
/// # Errors
///
/// Returns [`SoundPrepError::MissingExtension`] if neither path has one.
pub fn match_ext(first: &Path, second: &Path) -> Result<(PathBuf, PathBuf), SoundPrepError> {
    let a = AudioPath::new(first);
    let b = AudioPath::new(second);

    let extension = a
        .suffix()
        .or_else(|| b.suffix())
        .ok_or_else(|| SoundPrepError::MissingExtension {
            first: first.to_path_buf(),
            second: second.to_path_buf(),
        })?;

    let align = |p: AudioPath| {
        if p.suffix().as_deref() == Some(extension.as_str()) {
            p.into_path_buf()
        } else {
            p.with_suffix(&extension).into_path_buf()
        }
    };

    Ok((align(a), align(b)))
}
