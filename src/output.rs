//! Output artifact naming and writing.

use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Local};

/// The capture timestamp: taken once when a run starts and reused for
/// every artifact written during that run.
#[derive(Debug, Clone, Copy)]
pub struct RunStamp(DateTime<Local>);

impl RunStamp {
    pub fn now() -> Self {
        Self(Local::now())
    }

    pub fn from_datetime(datetime: DateTime<Local>) -> Self {
        Self(datetime)
    }

    /// `HHhMMmSSs`, e.g. `14h03m07s`.
    pub fn time_str(&self) -> String {
        self.0.format("%Hh%Mm%Ss").to_string()
    }

    /// `DD-MM-YYYY`, e.g. `09-03-2024`.
    pub fn date_str(&self) -> String {
        self.0.format("%d-%m-%Y").to_string()
    }
}

/// Writes normalized transcripts into the output directory.
pub struct OutputWriter {
    output_dir: PathBuf,
    stamp: RunStamp,
}

impl OutputWriter {
    pub fn new(output_dir: PathBuf, stamp: RunStamp) -> Self {
        Self { output_dir, stamp }
    }

    /// Artifact name for a given input file name:
    /// `<stem> (at <HHhMMmSSs> on <DD-MM-YYYY>).txt`.
    ///
    /// The stem is everything up to the first dot, so `a.b.wav` yields `a`.
    pub fn artifact_name(&self, input_name: &str) -> String {
        let stem = input_name.split('.').next().unwrap_or(input_name);

        format!(
            "{} (at {} on {}).txt",
            stem,
            self.stamp.time_str(),
            self.stamp.date_str()
        )
    }

    /// Write `text` as the artifact for `input_name`, overwriting any
    /// previous artifact with the same name. The file is created fresh on
    /// each attempt; nothing is left behind if the write fails.
    pub async fn write(&self, input_name: &str, text: &str) -> io::Result<PathBuf> {
        let path = self.output_dir.join(self.artifact_name(input_name));
        tokio::fs::write(&path, text).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_stamp() -> RunStamp {
        RunStamp::from_datetime(Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap())
    }

    #[test]
    fn artifact_name_embeds_stem_and_stamp() {
        let writer = OutputWriter::new(PathBuf::from("output"), fixed_stamp());

        assert_eq!(
            writer.artifact_name("sample.wav"),
            "sample (at 07h05m03s on 09-03-2024).txt"
        );
    }

    #[test]
    fn stem_stops_at_first_dot() {
        let writer = OutputWriter::new(PathBuf::from("output"), fixed_stamp());

        assert_eq!(
            writer.artifact_name("meeting.notes.wav"),
            "meeting (at 07h05m03s on 09-03-2024).txt"
        );
    }

    #[tokio::test]
    async fn write_overwrites_on_collision() {
        let temp = TempDir::new().unwrap();
        let writer = OutputWriter::new(temp.path().to_path_buf(), fixed_stamp());

        let first = writer.write("sample.wav", "first").await.unwrap();
        let second = writer.write("sample.wav", "second").await.unwrap();

        assert_eq!(first, second);
        let content = tokio::fs::read_to_string(&second).await.unwrap();
        assert_eq!(content, "second");
    }

    #[tokio::test]
    async fn write_fails_when_output_dir_is_missing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");
        let writer = OutputWriter::new(missing, fixed_stamp());

        assert!(writer.write("sample.wav", "text").await.is_err());
    }
}
