//! Server directory: maps a server name to its connection parameters

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::tracing::span_names;

/// Port used when an entry has no port, or port 0
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Connection parameters for one configured server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerEntry {
    #[serde(rename = "ip")]
    address: String,
    #[serde(rename = "user")]
    username: String,
    #[serde(default)]
    port: Option<u16>,
}

impl ServerEntry {
    /// Creates an entry; `None` or `Some(0)` means the default SSH port
    #[must_use]
    pub fn new(address: impl Into<String>, username: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            address: address.into(),
            username: username.into(),
            port,
        }
    }

    /// Host name or IP address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Login name on the remote host
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Effective port, falling back to [`DEFAULT_SSH_PORT`]
    pub fn port(&self) -> u16 {
        match self.port {
            Some(port) if port != 0 => port,
            _ => DEFAULT_SSH_PORT,
        }
    }

    fn validate(&self, name: &str) -> ConfigResult<()> {
        if self.address.trim().is_empty() {
            return Err(ConfigError::InvalidEntry {
                name: name.to_string(),
                reason: "ip must not be empty".to_string(),
            });
        }
        if self.username.trim().is_empty() {
            return Err(ConfigError::InvalidEntry {
                name: name.to_string(),
                reason: "user must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Immutable name → [`ServerEntry`] mapping.
///
/// Names iterate in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ServerDirectory {
    servers: BTreeMap<String, ServerEntry>,
}

impl ServerDirectory {
    /// Builds a directory from `(name, entry)` pairs
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, ServerEntry)>,
        S: Into<String>,
    {
        Self {
            servers: entries
                .into_iter()
                .map(|(name, entry)| (name.into(), entry))
                .collect(),
        }
    }

    /// Loads and validates the directory from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a mapping of
    /// server entries, or an entry has an empty `ip` or `user`.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let _span = tracing::debug_span!(span_names::CONFIG_LOAD, path = %path.display()).entered();

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let directory = Self::parse(&contents).map_err(|err| match err {
            ParseFailure::Yaml(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::Invalid(err) => err,
        })?;

        tracing::debug!(servers = directory.len(), "Server directory loaded");
        Ok(directory)
    }

    /// Parses and validates YAML text. An empty document is an empty directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid server directory.
    pub fn from_yaml(contents: &str) -> ConfigResult<Self> {
        Self::parse(contents).map_err(|err| match err {
            ParseFailure::Yaml(source) => ConfigError::Parse {
                path: Path::new("<inline>").to_path_buf(),
                source,
            },
            ParseFailure::Invalid(err) => err,
        })
    }

    fn parse(contents: &str) -> Result<Self, ParseFailure> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let directory: Self = serde_yaml::from_str(contents).map_err(ParseFailure::Yaml)?;
        for (name, entry) in &directory.servers {
            entry.validate(name).map_err(ParseFailure::Invalid)?;
        }
        Ok(directory)
    }

    /// Looks up a server by exact name
    pub fn get(&self, name: &str) -> Option<&ServerEntry> {
        self.servers.get(name)
    }

    /// Iterates over `(name, entry)` pairs sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServerEntry)> {
        self.servers.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Server names sorted lexicographically
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.servers.keys().map(String::as_str)
    }

    /// Number of configured servers
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// Returns true if no server is configured
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

enum ParseFailure {
    Yaml(serde_yaml::Error),
    Invalid(ConfigError),
}
