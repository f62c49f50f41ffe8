//! Configuration for a broker integration.

use crate::address::Address;
use crate::error::{Error, Result};
use crate::sender::Sender;
use crate::validation::Validate;
use serde::{Deserialize, Serialize};
use shipbroker_codes::{CountryCode, CurrencyCode, LanguageCode};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Broker endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.shipbroker.cz/";

/// Identity the integration sends with every request.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SenderConfig {
    /// Account id.
    pub id: u64,

    /// API key.
    pub key: String,

    /// Currency prices are quoted in.
    #[serde(default)]
    pub currency: CurrencyCode,

    /// Language of texts in replies.
    #[serde(default)]
    pub language: LanguageCode,

    /// Name of the calling shop system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,

    /// Version of the calling shop system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_version: Option<String>,

    /// Version of the integration module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_version: Option<String>,
}

impl fmt::Debug for SenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderConfig")
            .field("id", &self.id)
            .field("key", &"<redacted>")
            .field("currency", &self.currency)
            .field("language", &self.language)
            .field("system_name", &self.system_name)
            .field("system_version", &self.system_version)
            .field("module_version", &self.module_version)
            .finish()
    }
}

/// Configuration for talking to the broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Base URL of the broker API.
    pub endpoint: String,

    /// Integration identity.
    pub sender: SenderConfig,

    /// Country of addresses built through [`BrokerConfig::address`].
    #[serde(default)]
    pub default_country: CountryCode,

    /// Timeout for a single call in seconds. Only transports read it.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            sender: SenderConfig::default(),
            default_country: CountryCode::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BrokerConfig {
    /// Parse a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.check_endpoint()?;
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading broker configuration from {}", path.display());
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Build the configuration from `SHIPBROKER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| Error::Config(format!("{} is not set", name)))
        };

        let id = required("SHIPBROKER_SENDER_ID")?;
        let id = id
            .trim()
            .parse::<u64>()
            .map_err(|_| Error::Config(format!("SHIPBROKER_SENDER_ID is not a number: {}", id)))?;

        let mut sender = SenderConfig {
            id,
            key: required("SHIPBROKER_SENDER_KEY")?,
            ..SenderConfig::default()
        };
        if let Some(currency) = lookup("SHIPBROKER_CURRENCY") {
            sender.currency = CurrencyCode::new(&currency)?;
        }
        if let Some(language) = lookup("SHIPBROKER_LANGUAGE") {
            sender.language = LanguageCode::new(&language)?;
        }

        let mut config = Self {
            endpoint: lookup("SHIPBROKER_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            sender,
            ..Self::default()
        };
        if let Some(country) = lookup("SHIPBROKER_COUNTRY") {
            config.default_country = CountryCode::new(&country)?;
        }
        config.check_endpoint()?;
        Ok(config)
    }

    fn check_endpoint(&self) -> Result<()> {
        match url::Url::parse(&self.endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            Ok(url) => Err(Error::Config(format!(
                "endpoint must use http or https, not {}",
                url.scheme()
            ))),
            Err(e) => Err(Error::Config(format!(
                "invalid endpoint {}: {}",
                self.endpoint, e
            ))),
        }
    }

    /// The configured identity as a validated [`Sender`].
    pub fn sender(&self) -> Result<Sender> {
        let mut sender = Sender::new(self.sender.id, self.sender.key.clone())
            .with_currency(self.sender.currency)
            .with_language(self.sender.language.clone());
        sender.system_name = self.sender.system_name.clone();
        sender.system_version = self.sender.system_version.clone();
        sender.module_version = self.sender.module_version.clone();

        let violations = sender.violations();
        if !violations.is_empty() {
            let details: Vec<String> = violations.iter().map(ToString::to_string).collect();
            return Err(Error::Config(format!(
                "sender is not valid: {}",
                details.join("; ")
            )));
        }
        Ok(sender)
    }

    /// An address in [`default_country`](Self::default_country).
    pub fn address(&self, postal_code: impl Into<String>) -> Result<Address> {
        Address::new_in(postal_code, self.default_country.clone())
    }

    /// Returns the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
