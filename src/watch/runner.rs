//! The poll → diff → transcribe → normalize → write loop.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::config::WatchConfig;
use crate::normalize::normalize;
use crate::output::{OutputWriter, RunStamp};
use crate::transcribe::{is_supported_format, Transcribe, SUPPORTED_EXTENSIONS};

use super::snapshot::{diff, Snapshot};

/// Fixed delay between polls. Deliberately not configurable.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// A per-file failure, attributed to the stage that produced it.
///
/// Normalization is pure string rewriting and cannot fail, so only the
/// transcription and write stages appear here.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("transcription failed: {0}")]
    Transcribe(#[source] anyhow::Error),

    #[error("failed to write transcript: {0}")]
    Write(#[from] std::io::Error),
}

/// What happened to one newly detected file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Normalized transcript written to this path.
    Written(PathBuf),

    /// Unrecognized audio format; logged and skipped, not an error.
    Skipped,
}

/// Watches the input directory and turns new audio files into normalized
/// transcripts, one file at a time.
pub struct Watcher<T> {
    config: WatchConfig,
    transcriber: T,
    writer: OutputWriter,
}

impl<T: Transcribe> Watcher<T> {
    /// Create a watcher. The capture timestamp is taken here, once, and
    /// shared by every artifact this watcher writes.
    pub fn new(config: WatchConfig, transcriber: T) -> Self {
        let writer = OutputWriter::new(config.output_dir.clone(), RunStamp::now());

        Self {
            config,
            transcriber,
            writer,
        }
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    /// Watch forever. Returns only if a directory becomes unreadable;
    /// per-file failures are logged and skipped.
    pub async fn run(&self) -> Result<()> {
        self.config.validate()?;

        tracing::info!(
            "Watching {} for new audio files",
            self.config.input_dir.display()
        );

        let mut previous = self.initial_snapshot().await?;

        loop {
            let (current, added) = self.poll(previous).await?;
            previous = current;

            if added.is_empty() {
                continue;
            }

            tracing::info!("{} new file(s) in input directory", added.len());
            self.process_batch(&added).await;

            tracing::info!(
                "Watching {} for new audio files",
                self.config.input_dir.display()
            );
        }
    }

    /// The snapshot everything after startup is diffed against. Files
    /// already present when the watcher starts are never processed.
    pub async fn initial_snapshot(&self) -> Result<Snapshot> {
        Snapshot::scan(&self.config.input_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to read input directory {}",
                    self.config.input_dir.display()
                )
            })
    }

    /// One poll step: sleep out the interval, rescan, and diff against
    /// `previous`. Returns the new snapshot to carry into the next poll
    /// alongside the names added since the last one.
    pub async fn poll(&self, previous: Snapshot) -> Result<(Snapshot, Vec<String>)> {
        tokio::time::sleep(POLL_INTERVAL).await;

        let current = Snapshot::scan(&self.config.input_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to read input directory {}",
                    self.config.input_dir.display()
                )
            })?;

        let added = diff(&previous, &current);
        Ok((current, added))
    }

    /// Handle a batch of new files sequentially, in diff order. A failure
    /// on one file never stops the rest of the batch.
    pub async fn process_batch(&self, names: &[String]) {
        for name in names {
            match self.process_file(name).await {
                Ok(FileOutcome::Written(path)) => {
                    tracing::info!("Wrote {}", path.display());
                }
                Ok(FileOutcome::Skipped) => {}
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", name, e);
                }
            }
        }
    }

    /// Transcribe, normalize, and write a single input file.
    pub async fn process_file(&self, name: &str) -> Result<FileOutcome, ProcessError> {
        let input_path = self.config.input_dir.join(name);

        if !is_supported_format(&input_path) {
            tracing::info!(
                "Skipping {}: unsupported format (supported: {})",
                name,
                SUPPORTED_EXTENSIONS.join(", ")
            );
            return Ok(FileOutcome::Skipped);
        }

        tracing::info!("Transcribing {}", name);
        let raw = self
            .transcriber
            .transcribe(&input_path)
            .await
            .map_err(ProcessError::Transcribe)?;

        let text = normalize(&raw);

        let path = self.writer.write(name, &text).await?;
        Ok(FileOutcome::Written(path))
    }
}
