//! Connection configuration read from a Java-style property file.
//!
//! # Invariants
//! - Reading a property file never mutates the process environment.
//! - `dburl` is the only required key.

use log::debug;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Property file looked up when the caller does not name one.
pub const DEFAULT_PROPERTIES_FILE: &str = "db.properties";

const URL_KEY: &str = "dburl";
const BUSY_TIMEOUT_KEY: &str = "busy_timeout_ms";
const FOREIGN_KEYS_KEY: &str = "foreign_keys";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Unreadable { path: PathBuf, message: String },
    MissingKey(&'static str),
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable { path, message } => write!(
                f,
                "cannot read properties file `{}`: {message}",
                path.display()
            ),
            Self::MissingKey(key) => write!(f, "missing required property `{key}`"),
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for property `{key}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Settings used to open the SQLite connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Database file path, `:memory:` or a `file:` URI.
    pub url: String,
    /// How long SQLite waits on a locked database before failing.
    pub busy_timeout: Duration,
    /// Whether `PRAGMA foreign_keys` is enabled on open.
    pub foreign_keys: bool,
}

impl DbConfig {
    /// Creates a config for `url` with default options.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
            foreign_keys: true,
        }
    }

    /// Reads and parses a property file in `java.util.Properties` format.
    ///
    /// Values are taken literally apart from the format's own escapes; no
    /// environment variable expansion takes place.
    ///
    /// # Errors
    /// - `ConfigError::Unreadable` when the file cannot be opened or is not
    ///   valid property syntax.
    /// - See [`DbConfig::from_properties`] for key validation errors.
    pub fn from_properties_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let unreadable = |message: String| ConfigError::Unreadable {
            path: path.to_path_buf(),
            message,
        };

        let file = File::open(path).map_err(|err| unreadable(err.to_string()))?;
        let properties = java_properties::read(BufReader::new(file))
            .map_err(|err| unreadable(err.to_string()))?
            .into_iter()
            .collect::<BTreeMap<_, _>>();

        Self::from_properties(&properties)
    }

    /// Builds a config from already parsed properties.
    ///
    /// Unknown keys (including `user`/`password`, which SQLite has no use
    /// for) are ignored.
    pub fn from_properties(properties: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let url = properties
            .get(URL_KEY)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingKey(URL_KEY))?;

        let mut config = Self::new(url);

        if let Some(value) = properties.get(BUSY_TIMEOUT_KEY) {
            let millis = value
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid(BUSY_TIMEOUT_KEY, value))?;
            config.busy_timeout = Duration::from_millis(millis);
        }

        if let Some(value) = properties.get(FOREIGN_KEYS_KEY) {
            config.foreign_keys =
                parse_flag(value).ok_or_else(|| invalid(FOREIGN_KEYS_KEY, value))?;
        }

        let ignored = properties
            .keys()
            .filter(|key| ![URL_KEY, BUSY_TIMEOUT_KEY, FOREIGN_KEYS_KEY].contains(&key.as_str()))
            .map(String::as_str)
            .collect::<Vec<_>>();
        if !ignored.is_empty() {
            debug!(
                "event=config_load module=db status=ok ignored_keys={}",
                ignored.join(",")
            );
        }

        Ok(config)
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}
