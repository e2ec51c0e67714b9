use crate::data_processing::LogOrder;
use crate::error::{RatingError, Result};
use crate::systems::{ClassicElo, GlickoApprox, RatingSystem};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The rating system and its parameters. Omitted parameters take the
/// system's defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SystemConfig {
    Classic(ClassicElo),
    GlickoApprox(GlickoApprox),
}

impl SystemConfig {
    /// A system with default parameters, by the name used in config files.
    pub fn from_name(system_name: &str) -> std::result::Result<Self, String> {
        match system_name {
            "classic" | "elo" => Ok(Self::Classic(ClassicElo::default())),
            "glicko_approx" | "glicko" => Ok(Self::GlickoApprox(GlickoApprox::default())),
            name => Err(format!(
                "{} is not a valid rating system. Must be one of: classic, glicko_approx",
                name
            )),
        }
    }

    pub fn build(self) -> Box<dyn RatingSystem> {
        match self {
            Self::Classic(system) => Box::new(system),
            Self::GlickoApprox(system) => Box::new(system),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/output")
}

#[derive(Clone, Debug, Deserialize)]
pub struct RatingConfig {
    pub match_log: PathBuf,
    #[serde(default)]
    pub log_order: LogOrder,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    pub system: SystemConfig,
}

impl RatingConfig {
    pub fn from_file(source: impl AsRef<Path>) -> Result<Self> {
        let source = source.as_ref();
        let text = std::fs::read_to_string(source).map_err(|e| RatingError::io(source, e))?;
        Self::from_json5(&text).map_err(|e| RatingError::Config {
            path: source.to_path_buf(),
            source: e,
        })
    }

    pub fn from_json5(text: &str) -> std::result::Result<Self, json5::Error> {
        json5::from_str(text)
    }
}
