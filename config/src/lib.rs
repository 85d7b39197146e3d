//! Configuration for Vakit, read from `~/.vakit/config.toml`.
//!
//! Every section is optional. The binary layers `VAKIT_*` environment
//! variables on top via [`VakitConfig::apply_env`], and its own flags on top
//! of that.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

use vakit_types::Language;

pub const ENV_LANG: &str = "VAKIT_LANG";
pub const ENV_TZ: &str = "VAKIT_TZ";
pub const ENV_TABLE: &str = "VAKIT_TABLE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unknown time zone {0:?}")]
    UnknownTimezone(String),
    #[error("invalid value {value:?} in {var}")]
    InvalidOverride { var: &'static str, value: String },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => Some(path),
            ConfigError::UnknownTimezone(_) | ConfigError::InvalidOverride { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VakitConfig {
    pub app: AppConfig,
    pub location: Option<LocationConfig>,
    pub countdown: CountdownConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub language: Option<Language>,
    /// IANA zone name. Absent means the system's local zone.
    pub timezone: Option<String>,
    /// Snapshot file with the district's prayer times.
    pub table: Option<PathBuf>,
}

/// Where the table came from. Shown next to the countdown, never used to fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub country: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub district_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    pub tick_secs: Option<u64>,
    pub widget_tick_secs: Option<u64>,
}

impl VakitConfig {
    /// Loads the config from its default location.
    ///
    /// Returns `Ok(None)` when there is no home directory or no config file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| env::var(var).ok())
    }

    /// Applies `VAKIT_LANG`, `VAKIT_TZ` and `VAKIT_TABLE` as reported by `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        if let Some(value) = get(ENV_LANG) {
            let language = value
                .parse::<Language>()
                .map_err(|_| ConfigError::InvalidOverride {
                    var: ENV_LANG,
                    value,
                })?;
            self.app.language = Some(language);
        }
        if let Some(value) = get(ENV_TZ) {
            self.app.timezone = Some(value.trim().to_string());
        }
        if let Some(value) = get(ENV_TABLE) {
            self.app.table = Some(PathBuf::from(value));
        }
        Ok(())
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.app.language.unwrap_or_default()
    }

    /// The configured zone, or `None` for the system's local zone.
    pub fn timezone(&self) -> Result<Option<Tz>, ConfigError> {
        self.app
            .timezone
            .as_deref()
            .map(parse_timezone)
            .transpose()
    }

    /// The snapshot path with a leading `~` expanded; defaults to `~/.vakit/times.json`.
    #[must_use]
    pub fn table_path(&self) -> Option<PathBuf> {
        match &self.app.table {
            Some(path) => Some(expand_home(path)),
            None => vakit_dir().map(|dir| dir.join("times.json")),
        }
    }

    /// Zero is treated as unset.
    #[must_use]
    pub fn tick(&self) -> Option<Duration> {
        secs(self.countdown.tick_secs)
    }

    #[must_use]
    pub fn widget_tick(&self) -> Option<Duration> {
        secs(self.countdown.widget_tick_secs)
    }
}

fn secs(value: Option<u64>) -> Option<Duration> {
    value.filter(|&s| s > 0).map(Duration::from_secs)
}

pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ConfigError::UnknownTimezone(name.to_string()))
}

/// Replaces a leading `~` component with the home directory.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

#[must_use]
pub fn vakit_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vakit"))
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    vakit_dir().map(|dir| dir.join("config.toml"))
}
