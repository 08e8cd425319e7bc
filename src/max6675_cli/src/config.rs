//! Board configuration (`Max6675.toml`)
use max6675_port_std::SimConfig;
use std::path::{Path, PathBuf};

/// The contents of a board configuration file. Every section is optional.
#[derive(Default, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub board: Board,
    pub sim: SimConfig,
    pub timing: Timing,
}

/// A section describing the board the chip is wired to.
#[derive(Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Board {
    pub name: String,
    pub pins: Pins,
}

/// The pins the chip's SPI lines are connected to.
#[derive(Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Pins {
    pub sck: String,
    pub miso: String,
    pub cs: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Timing {
    /// The delay between consecutive reads, measured in milliseconds.
    pub read_interval_ms: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            name: "raspberrypi4b".to_owned(),
            pins: Pins::default(),
        }
    }
}

impl Default for Pins {
    fn default() -> Self {
        Self {
            sck: "GPIO11(BCM)".to_owned(),
            miso: "GPIO9(BCM)".to_owned(),
            cs: "GPIO8(BCM)".to_owned(),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            read_interval_ms: 1000,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("Could not read {0:?}.")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("Could not parse {0:?}.")]
    Parse(PathBuf, #[source] toml::de::Error),
}

impl Config {
    /// Load the configuration from `path`, or use the defaults if `path` is
    /// `None`.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            log::debug!("No configuration file was given; using the defaults");
            return Ok(Self::default());
        };

        log::debug!("Loading the configuration from '{}'", path.display());
        let data = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_owned(), e))?;
        Self::parse(&data).map_err(|e| ConfigError::Parse(path.to_owned(), e))
    }

    pub(crate) fn parse(data: &str) -> Result<Self, toml::de::Error> {
        let config: Self = toml::from_str(data)?;
        log::debug!("config = {:?}", config);
        Ok(config)
    }
}
