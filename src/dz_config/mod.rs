//! Transport configuration for a Datazilla server.

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{auth::oauth1::Consumer, prelude::*};

/// Protocols a submission may be posted over.
///
/// Anything else is rejected rather than replaced with a default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            other => Err(Error::UnsupportedProtocol(other.to_string())),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how submissions are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default)]
    pub protocol: Protocol,
    /// Server host, optionally with a port.
    pub host: String,
    /// Project path segment, also sent as the OAuth `user` parameter.
    pub project: String,
    #[serde(default)]
    pub oauth_key: Option<String>,
    #[serde(default)]
    pub oauth_secret: Option<String>,
    /// Reject run metadata with an empty branch, build name or revision.
    #[serde(default)]
    pub strict: bool,
}

impl TransportConfig {
    /// Creates an unsigned, non-strict configuration.
    ///
    /// Fails with [`Error::UnsupportedProtocol`] unless `protocol` is
    /// `http` or `https`.
    pub fn new(
        protocol: &str,
        host: impl Into<String>,
        project: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            protocol: protocol.parse()?,
            host: host.into(),
            project: project.into(),
            oauth_key: None,
            oauth_secret: None,
            strict: false,
        })
    }

    /// Sets the OAuth consumer credentials.
    pub fn with_oauth(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.oauth_key = Some(key.into());
        self.oauth_secret = Some(secret.into());
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Load configuration from a TOML file.
    pub fn from_file(file_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(file_path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML string.
    pub fn from_toml(value: &str) -> Result<Self> {
        Ok(toml::from_str(value)?)
    }

    /// `{protocol}://{host}/{project}/api/load_test`
    pub fn endpoint(&self) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}://{}/{}/api/load_test",
            self.protocol, self.host, self.project
        ))?)
    }

    /// Consumer credentials, present only when both key and secret are non-empty.
    pub fn credentials(&self) -> Option<Consumer> {
        match (self.oauth_key.as_deref(), self.oauth_secret.as_deref()) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Some(Consumer::new(key, secret))
            }
            _ => None,
        }
    }
}
