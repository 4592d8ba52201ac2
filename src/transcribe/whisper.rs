//! Whisper transcription backend.
//!
//! Shells out to the local `whisper` binary, forcing English decoding and
//! disabling fp16, and reads the transcript back from its JSON output.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use super::{ModelSize, Transcribe};

/// Whisper output JSON structure (only the fields we read).
#[derive(Debug, Deserialize)]
struct WhisperOutput {
    text: String,
}

/// Speech-to-text via the local Whisper CLI.
///
/// The model size is fixed when the transcriber is constructed and reused
/// for every file. The binary location can be overridden with the
/// `WHISPER_PATH` environment variable.
pub struct WhisperTranscriber {
    binary: PathBuf,
    model: ModelSize,
}

impl WhisperTranscriber {
    pub fn new(model: ModelSize) -> Self {
        let binary = std::env::var("WHISPER_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("whisper"));

        Self { binary, model }
    }

    pub fn model(&self) -> ModelSize {
        self.model
    }
}

#[async_trait]
impl Transcribe for WhisperTranscriber {
    async fn transcribe(&self, audio: &Path) -> Result<String> {
        // Whisper writes its output files next to each other; give it a
        // scratch directory so nothing lands in the working tree.
        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;

        let output = Command::new(&self.binary)
            .arg(audio)
            .arg("--model")
            .arg(self.model.as_str())
            .arg("--language")
            .arg("en")
            .arg("--fp16")
            .arg("False")
            .arg("--output_format")
            .arg("json")
            .arg("--output_dir")
            .arg(temp_dir.path())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context("Failed to run whisper")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Whisper failed: {}", stderr);
        }

        // Whisper names the JSON document after the input file's stem.
        let stem = audio.file_stem().unwrap_or_default().to_string_lossy();
        let json_path = temp_dir.path().join(format!("{}.json", stem));

        let json_content = tokio::fs::read_to_string(&json_path)
            .await
            .context("Failed to read whisper output")?;

        let whisper: WhisperOutput =
            serde_json::from_str(&json_content).context("Failed to parse whisper JSON")?;

        Ok(whisper.text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_is_fixed_at_construction() {
        let transcriber = WhisperTranscriber::new(ModelSize::Small);
        assert_eq!(transcriber.model(), ModelSize::Small);
    }

    #[test]
    fn parses_whisper_json() {
        let doc = r#"{"text": " hello world ", "language": "en", "segments": []}"#;
        let parsed: WhisperOutput = serde_json::from_str(doc).unwrap();
        assert_eq!(parsed.text.trim(), "hello world");
    }
}
