//! `scenepub.toml` configuration.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Export output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    #[value(name = "geojson")]
    #[serde(rename = "geojson")]
    GeoJson,
    Czml,
    Kml,
    Shp,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Self::GeoJson => "geojson",
            Self::Czml => "czml",
            Self::Kml => "kml",
            Self::Shp => "shp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Format used when `--format` is not given.
    pub default_format: Format,
    /// Directory for outputs when `--out` is not given.
    pub output_dir: PathBuf,
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: Format::GeoJson,
            output_dir: PathBuf::from("."),
            publish: PublishConfig::default(),
        }
    }
}

impl Config {
    /// Loads the config file at `path`.
    /// A missing, unreadable or malformed file yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config file {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
