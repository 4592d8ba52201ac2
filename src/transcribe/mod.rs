//! Speech-to-text backends.
//!
//! Transcription sits behind the [`Transcribe`] trait so the watch loop
//! can be driven by any backend; [`WhisperTranscriber`] is the production
//! implementation. The supported-format gate lives here because it is
//! checked before any backend is invoked.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

pub mod model;
pub mod whisper;

pub use model::ModelSize;
pub use whisper::WhisperTranscriber;

/// Audio container formats the speech model accepts.
///
/// Matched against the file extension exactly, case-sensitively: `foo.WAV`
/// is not supported.
pub const SUPPORTED_EXTENSIONS: [&str; 7] =
    ["mp3", "mp4", "mpeg", "mpga", "m4a", "wav", "webm"];

/// Whether `path` carries one of the recognized audio extensions.
pub fn is_supported_format(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// A speech-to-text backend.
#[async_trait]
pub trait Transcribe: Send + Sync {
    /// Transcribe the audio file at `audio` and return the raw text.
    async fn transcribe(&self, audio: &Path) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn recognizes_supported_extensions() {
        for ext in SUPPORTED_EXTENSIONS {
            let path = PathBuf::from(format!("clip.{ext}"));
            assert!(is_supported_format(&path), "{ext} should be supported");
        }
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(!is_supported_format(Path::new("notes.pdf")));
        assert!(!is_supported_format(Path::new("clip.ogg")));
        assert!(!is_supported_format(Path::new("noext")));
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        assert!(!is_supported_format(Path::new("clip.WAV")));
        assert!(!is_supported_format(Path::new("clip.Mp3")));
    }
}
