//! Whisper model sizes.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

/// Available Whisper model sizes, selected once at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    pub const ALL: [ModelSize; 5] = [
        ModelSize::Tiny,
        ModelSize::Base,
        ModelSize::Small,
        ModelSize::Medium,
        ModelSize::Large,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }

    /// The sizes as a comma-separated list, for prompts and errors.
    pub fn choices() -> String {
        Self::ALL
            .iter()
            .map(ModelSize::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiny" => Ok(ModelSize::Tiny),
            "base" => Ok(ModelSize::Base),
            "small" => Ok(ModelSize::Small),
            "medium" => Ok(ModelSize::Medium),
            "large" => Ok(ModelSize::Large),
            other => Err(format!(
                "unknown model size '{}', expected one of: {}",
                other,
                ModelSize::choices()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_sizes() {
        assert_eq!("tiny".parse::<ModelSize>().unwrap(), ModelSize::Tiny);
        assert_eq!("MEDIUM".parse::<ModelSize>().unwrap(), ModelSize::Medium);
    }

    #[test]
    fn rejects_unknown_sizes() {
        let err = "huge".parse::<ModelSize>().unwrap_err();
        assert!(err.contains("tiny, base, small, medium, large"));
    }

    #[test]
    fn round_trips_through_display() {
        for size in ModelSize::ALL {
            assert_eq!(size.to_string().parse::<ModelSize>().unwrap(), size);
        }
    }
}
