//! Runtime configuration resolution.
//!
//! # Responsibility
//! - Resolve data directory, log level and theme for executables.
//!
//! # Invariants
//! - Precedence is explicit override, then environment, then default.
//! - Resolved `data_dir` and `log_dir` are absolute.

use crate::logging::{default_log_level, normalize_level};
use crate::settings::ThemeMode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DATA_DIR: &str = "MARKNOTE_DATA_DIR";
pub const ENV_LOG_LEVEL: &str = "MARKNOTE_LOG_LEVEL";
pub const ENV_THEME: &str = "MARKNOTE_THEME";

const APP_DIR_NAME: &str = "marknote";
const STORE_FILE_NAME: &str = "marknote.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    /// No override, no env value and no platform data directory.
    NoDataDir,
    /// Relative data dir could not be anchored to the working directory.
    CurrentDir(std::io::Error),
    InvalidLogLevel(String),
    InvalidTheme(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataDir => write!(
                f,
                "could not determine a data directory; set {ENV_DATA_DIR} or pass --data-dir"
            ),
            Self::CurrentDir(err) => write!(f, "failed to read working directory: {err}"),
            Self::InvalidLogLevel(details) => write!(f, "{details}"),
            Self::InvalidTheme(details) => write!(f, "{details}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CurrentDir(err) => Some(err),
            _ => None,
        }
    }
}

/// Caller-supplied values that win over environment and defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub theme: Option<String>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
    pub theme: ThemeMode,
}

impl AppConfig {
    /// Resolves configuration from overrides and the process environment.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok(), dirs::data_dir())
    }

    /// Resolves configuration from overrides, an environment lookup and the
    /// platform data directory.
    pub fn resolve_with(
        overrides: &ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
        platform_data_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let data_dir = match overrides
            .data_dir
            .clone()
            .or_else(|| non_blank(env(ENV_DATA_DIR)).map(PathBuf::from))
        {
            Some(dir) => absolutize(&dir)?,
            None => platform_data_dir
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(ConfigError::NoDataDir)?,
        };

        let log_level = match overrides
            .log_level
            .clone()
            .or_else(|| non_blank(env(ENV_LOG_LEVEL)))
        {
            Some(level) => normalize_level(&level)
                .map_err(|err| ConfigError::InvalidLogLevel(err.to_string()))?,
            None => default_log_level(),
        };

        let theme = match overrides.theme.clone().or_else(|| non_blank(env(ENV_THEME))) {
            Some(theme) => theme
                .parse::<ThemeMode>()
                .map_err(ConfigError::InvalidTheme)?,
            None => ThemeMode::default(),
        };

        Ok(Self {
            log_dir: data_dir.join(LOG_DIR_NAME),
            data_dir,
            log_level,
            theme,
        })
    }

    /// Path of the durable note store file.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn absolutize(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, ConfigOverrides, ENV_DATA_DIR, ENV_LOG_LEVEL, ENV_THEME};
    use crate::settings::ThemeMode;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_use_platform_dir() {
        let config = AppConfig::resolve_with(
            &ConfigOverrides::default(),
            env_of(&[]),
            Some(PathBuf::from("/home/u/.local/share")),
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/home/u/.local/share/marknote"));
        assert_eq!(
            config.store_path(),
            PathBuf::from("/home/u/.local/share/marknote/marknote.sqlite3")
        );
        assert_eq!(config.log_dir, PathBuf::from("/home/u/.local/share/marknote/logs"));
        assert_eq!(config.theme, ThemeMode::Light);
    }

    #[test]
    fn overrides_beat_environment() {
        let env = env_of(&[
            (ENV_DATA_DIR, "/from/env"),
            (ENV_LOG_LEVEL, "error"),
            (ENV_THEME, "dark"),
        ]);
        let overrides = ConfigOverrides {
            data_dir: Some(PathBuf::from("/from/flag")),
            log_level: Some("Warning".to_string()),
            theme: None,
        };
        let config = AppConfig::resolve_with(&overrides, env, None).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/from/flag"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.theme, ThemeMode::Dark);
    }

    #[test]
    fn missing_data_dir_is_an_error() {
        let err =
            AppConfig::resolve_with(&ConfigOverrides::default(), env_of(&[(ENV_DATA_DIR, " ")]), None)
                .unwrap_err();
        assert!(matches!(err, ConfigError::NoDataDir));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let env = env_of(&[(ENV_DATA_DIR, "/d"), (ENV_THEME, "sepia")]);
        let err = AppConfig::resolve_with(&ConfigOverrides::default(), env, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTheme(_)));

        let env = env_of(&[(ENV_DATA_DIR, "/d"), (ENV_LOG_LEVEL, "loud")]);
        let err = AppConfig::resolve_with(&ConfigOverrides::default(), env, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }
}
