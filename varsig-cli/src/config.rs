use std::fs::read_to_string;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use varsig_stats::pipeline::DEFAULT_BINS;
use varsig_stats::{
    BinExtent, CommandExtractor, InvalidRecordPolicy, LengthMode, OutOfRangePolicy, RunConfig,
    SbsFilter,
};

///
/// Contents of a `--config` TOML file. Every key is optional.
///
#[derive(Deserialize, Serialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunFileConfig {
    pub quality: Option<f64>,
    pub bins: Option<u32>,
    pub bin_extent: Option<BinExtent>,
    pub out_of_range: Option<OutOfRangePolicy>,
    pub invalid_sbs: Option<InvalidRecordPolicy>,
    pub length_mode: Option<LengthMode>,
    pub gzip: Option<bool>,
    pub signatures: Option<CommandExtractor>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {option}")]
    InvalidChoice { option: String, value: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl TryFrom<&Path> for RunFileConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

///
/// Parse a kebab-case choice (`last-record`, `skip`, ...) into its enum, using
/// the same names the TOML file accepts.
///
pub fn parse_choice<T: DeserializeOwned>(option: &str, value: &str) -> ConfigResult<T> {
    serde_json::from_value(serde_json::Value::String(value.to_string())).map_err(|_| {
        ConfigError::InvalidChoice {
            option: option.to_string(),
            value: value.to_string(),
        }
    })
}

/// Values given explicitly on the command line.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CliOverrides {
    pub quality: Option<f64>,
    pub bins: Option<u32>,
    pub bin_extent: Option<BinExtent>,
    pub out_of_range: Option<OutOfRangePolicy>,
    pub invalid_sbs: Option<InvalidRecordPolicy>,
    pub length_mode: Option<LengthMode>,
    pub gzip: bool,
    pub signatures_cmd: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub run: RunConfig,
    pub gzip: bool,
    pub signatures: Option<CommandExtractor>,
}

impl RunFileConfig {
    ///
    /// Command line beats file, file beats defaults.
    ///
    pub fn resolve(self, cli: CliOverrides) -> Settings {
        let quality = cli.quality.or(self.quality);

        let signatures = match cli.signatures_cmd {
            Some(cmd) => Some(CommandExtractor {
                command: cmd,
                args: self.signatures.map(|s| s.args).unwrap_or_default(),
            }),
            None => self.signatures,
        };

        Settings {
            run: RunConfig {
                sbs_filter: SbsFilter::from_threshold(quality),
                n_bins: cli.bins.or(self.bins).unwrap_or(DEFAULT_BINS),
                bin_extent: cli.bin_extent.or(self.bin_extent).unwrap_or_default(),
                out_of_range: cli.out_of_range.or(self.out_of_range).unwrap_or_default(),
                invalid_sbs: cli.invalid_sbs.or(self.invalid_sbs).unwrap_or_default(),
                length_mode: cli.length_mode.or(self.length_mode).unwrap_or_default(),
            },
            gzip: cli.gzip || self.gzip.unwrap_or(false),
            signatures,
        }
    }
}
