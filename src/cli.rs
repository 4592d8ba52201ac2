//! Command-line interface.
//!
//! - `scribewatch watch`: poll the input directory forever
//! - `scribewatch transcribe <file>`: one-shot transcribe + normalize
//! - `scribewatch normalize`: run the rule pipeline over a file or stdin
//! - `scribewatch config`: show resolved paths

use std::io::{self, Read, Write as _};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::WatchConfig;
use crate::normalize::normalize;
use crate::output::{OutputWriter, RunStamp};
use crate::transcribe::{
    is_supported_format, ModelSize, Transcribe, WhisperTranscriber, SUPPORTED_EXTENSIONS,
};
use crate::watch::{Watcher, POLL_INTERVAL};

/// scribewatch - dictation transcriber for watched directories
#[derive(Parser, Debug)]
#[command(name = "scribewatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the input directory and transcribe new audio files forever
    Watch {
        /// Whisper model size (prompted for interactively if omitted)
        #[arg(short, long, value_enum)]
        model: Option<ModelSize>,

        /// Directory polled for new audio files
        #[arg(long, default_value = "input")]
        input: PathBuf,

        /// Directory transcripts are written to
        #[arg(long, default_value = "output")]
        output: PathBuf,
    },

    /// Transcribe one audio file, normalize it, and write the artifact
    Transcribe {
        /// Audio file to transcribe
        file: PathBuf,

        /// Whisper model size
        #[arg(short, long, value_enum, default_value_t = ModelSize::Base)]
        model: ModelSize,

        /// Directory the transcript is written to (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Normalize raw transcript text from a file or stdin
    Normalize {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show the resolved configuration
    Config {
        /// Directory polled for new audio files
        #[arg(long, default_value = "input")]
        input: PathBuf,

        /// Directory transcripts are written to
        #[arg(long, default_value = "output")]
        output: PathBuf,
    },
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Watch {
                model,
                input,
                output,
            } => execute_watch(model, input, output).await,
            Commands::Transcribe {
                file,
                model,
                output,
            } => execute_transcribe(file, model, output).await,
            Commands::Normalize { input } => execute_normalize(input),
            Commands::Config { input, output } => execute_config(input, output),
        }
    }
}

/// Run the watch loop. Only returns on a setup or directory access error.
async fn execute_watch(
    model: Option<ModelSize>,
    input: PathBuf,
    output: PathBuf,
) -> Result<()> {
    let model = match model {
        Some(m) => m,
        None => prompt_model_size()?,
    };

    let config = WatchConfig {
        input_dir: input,
        output_dir: output,
    };

    println!("Using Whisper '{}' model", model);
    println!("Watching directory '{}'...", config.input_dir.display());

    let transcriber = WhisperTranscriber::new(model);
    let watcher = Watcher::new(config, transcriber);
    watcher.run().await
}

/// Transcribe and normalize a single file.
async fn execute_transcribe(
    file: PathBuf,
    model: ModelSize,
    output: Option<PathBuf>,
) -> Result<()> {
    if !is_supported_format(&file) {
        anyhow::bail!(
            "Unsupported format '{}'. Supported file formats are: {}",
            file.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }

    let transcriber = WhisperTranscriber::new(model);

    eprintln!("Transcribing '{}'...", file.display());
    let raw = transcriber
        .transcribe(&file)
        .await
        .with_context(|| format!("Failed to transcribe {}", file.display()))?;

    let text = normalize(&raw);

    match output {
        Some(dir) => {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let writer = OutputWriter::new(dir, RunStamp::now());
            let path = writer.write(&name, &text).await?;
            eprintln!("Results written to '{}'", path.display());
        }
        None => println!("{}", text),
    }

    Ok(())
}

/// Run the normalization pipeline over a file or stdin.
fn execute_normalize(input: Option<PathBuf>) -> Result<()> {
    let raw = if let Some(path) = input {
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    };

    println!("{}", normalize(&raw));
    Ok(())
}

/// Show resolved paths and whether they exist.
fn execute_config(input: PathBuf, output: PathBuf) -> Result<()> {
    let config = WatchConfig {
        input_dir: input,
        output_dir: output,
    };

    println!();
    println!("scribewatch configuration");
    println!("══════════════════════════════════════════════════════════════");
    println!();
    println!("Input directory:   {}", config.input_dir.display());
    println!("Output directory:  {}", config.output_dir.display());
    println!("Poll interval:     {} seconds", POLL_INTERVAL.as_secs());
    println!("Model sizes:       {}", ModelSize::choices());
    println!("Audio formats:     {}", SUPPORTED_EXTENSIONS.join(", "));
    println!();

    for (label, dir) in [("Input", &config.input_dir), ("Output", &config.output_dir)] {
        if dir.is_dir() {
            println!("✓ {} directory exists", label);
        } else {
            println!("⚠️  {} directory does not exist: {}", label, dir.display());
        }
    }

    Ok(())
}

/// Ask for a model size on the console. One re-prompt on invalid input; a
/// second invalid entry is a setup-time error.
fn prompt_model_size() -> Result<ModelSize> {
    let first = read_line(&format!(
        "\nEnter a Whisper model size ({})\n> ",
        ModelSize::choices()
    ))?;

    match first.trim().parse::<ModelSize>() {
        Ok(model) => Ok(model),
        Err(_) => {
            let second = read_line(&format!(
                "Enter a Whisper model size ({})\n> ",
                ModelSize::choices()
            ))?;

            second
                .trim()
                .parse::<ModelSize>()
                .map_err(|e| anyhow::anyhow!(e))
        }
    }
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    Ok(line)
}
