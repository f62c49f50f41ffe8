//! Integration identity sent with every request.

use crate::validation::{RuleViolation, Rules, Validate};
use crate::wire::{WireEntity, WireWriter};
use shipbroker_codes::{CurrencyCode, LanguageCode};
use std::fmt;

/// Character encoding announced to the broker.
pub const ENCODING: &str = "UTF-8";

/// API version spoken by this crate.
pub const API_VERSION: &str = "2.0";

/// Credentials of an account the integration acts on behalf of.
#[derive(Clone, PartialEq, Eq)]
pub struct ReferredSender {
    id: u64,
    key: String,
}

impl ReferredSender {
    /// Create referred credentials.
    pub fn new(id: u64, key: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
        }
    }

    /// Account id.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Debug for ReferredSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferredSender")
            .field("id", &self.id)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Validate for ReferredSender {
    fn violations(&self) -> Vec<RuleViolation> {
        Rules::new()
            .at_least("id", self.id, 1)
            .required("key", &self.key)
            .max_len("key", &self.key, 64)
            .markup_text("key", &self.key)
            .finish()
    }
}

impl WireEntity for ReferredSender {
    const ENTITY_NAME: &'static str = "ReferredSender";

    fn write_wire(&self, writer: &mut WireWriter) {
        writer.element("referred_sender", |w| {
            w.number("id", self.id).text("key", &self.key);
        });
    }
}

/// The integration's own identity.
#[derive(Clone, PartialEq, Eq)]
pub struct Sender {
    id: u64,
    key: String,
    /// Currency prices are quoted in.
    pub currency: CurrencyCode,
    /// Language of texts in replies.
    pub language: LanguageCode,
    /// API version; defaults to [`API_VERSION`].
    pub api_version: String,
    /// Name of the calling shop system.
    pub system_name: Option<String>,
    /// Version of the calling shop system.
    pub system_version: Option<String>,
    /// Version of the integration module.
    pub module_version: Option<String>,
    /// Account acted on behalf of, if any.
    pub referred: Option<ReferredSender>,
}

impl Sender {
    /// Create a sender with default currency and language.
    pub fn new(id: u64, key: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            currency: CurrencyCode::default(),
            language: LanguageCode::default(),
            api_version: API_VERSION.to_string(),
            system_name: None,
            system_version: None,
            module_version: None,
            referred: None,
        }
    }

    /// Set the currency.
    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    /// Set the reply language.
    pub fn with_language(mut self, language: LanguageCode) -> Self {
        self.language = language;
        self
    }

    /// Describe the calling system.
    pub fn with_system(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        module_version: impl Into<String>,
    ) -> Self {
        self.system_name = Some(name.into());
        self.system_version = Some(version.into());
        self.module_version = Some(module_version.into());
        self
    }

    /// Act on behalf of another account.
    pub fn referring(mut self, referred: ReferredSender) -> Self {
        self.referred = Some(referred);
        self
    }

    /// Account id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// API key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender")
            .field("id", &self.id)
            .field("key", &"<redacted>")
            .field("currency", &self.currency)
            .field("language", &self.language)
            .field("api_version", &self.api_version)
            .field("system_name", &self.system_name)
            .field("system_version", &self.system_version)
            .field("module_version", &self.module_version)
            .field("referred", &self.referred)
            .finish()
    }
}

impl Validate for Sender {
    fn violations(&self) -> Vec<RuleViolation> {
        Rules::new()
            .at_least("id", self.id, 1)
            .required("key", &self.key)
            .max_len("key", &self.key, 64)
            .markup_text("key", &self.key)
            .required("api_version", &self.api_version)
            .max_len("api_version", &self.api_version, 8)
            .markup_text("api_version", &self.api_version)
            .opt_max_len("system_name", self.system_name.as_deref(), 32)
            .opt_markup_text("system_name", self.system_name.as_deref())
            .opt_max_len("system_version", self.system_version.as_deref(), 16)
            .opt_markup_text("system_version", self.system_version.as_deref())
            .opt_max_len("module_version", self.module_version.as_deref(), 16)
            .opt_markup_text("module_version", self.module_version.as_deref())
            .nested_opt("referred_sender", self.referred.as_ref())
            .finish()
    }
}

impl WireEntity for Sender {
    const ENTITY_NAME: &'static str = "Sender";

    fn write_wire(&self, writer: &mut WireWriter) {
        writer.element("sender", |w| {
            w.number("id", self.id)
                .text("key", &self.key)
                .display("currency", self.currency)
                .display("language", &self.language)
                .text("encoding", ENCODING)
                .text("api_version", &self.api_version)
                .opt_text("system_name", self.system_name.as_deref())
                .opt_text("system_version", self.system_version.as_deref())
                .opt_text("module_version", self.module_version.as_deref())
                .opt_fragment(self.referred.as_ref());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_sender_wire_format() {
        let sender = Sender::new(1234, "secret");
        assert_eq!(
            sender.to_wire_format().unwrap(),
            "<sender><id>1234</id><key>secret</key><currency>CZK</currency>\
             <language>cs</language><encoding>UTF-8</encoding>\
             <api_version>2.0</api_version></sender>"
        );
    }

    #[test]
    fn test_full_sender_wire_format() {
        let sender = Sender::new(7, "k")
            .with_currency(CurrencyCode::new("eur").unwrap())
            .with_language(LanguageCode::new("EN").unwrap())
            .with_system("Shop & Co", "5.1", "1.0.3")
            .referring(ReferredSender::new(99, "rk"));
        assert_eq!(
            sender.to_wire_format().unwrap(),
            "<sender><id>7</id><key>k</key><currency>EUR</currency>\
             <language>en</language><encoding>UTF-8</encoding>\
             <api_version>2.0</api_version><system_name>Shop &amp; Co</system_name>\
             <system_version>5.1</system_version><module_version>1.0.3</module_version>\
             <referred_sender><id>99</id><key>rk</key></referred_sender></sender>"
        );
    }

    #[test]
    fn test_invalid_sender() {
        let sender = Sender::new(0, "").referring(ReferredSender::new(0, "x"));
        let fields: Vec<_> = sender.violations().into_iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["id", "key", "referred_sender.id"]);
        assert!(sender.to_wire_format().is_err());
    }

    #[test]
    fn test_control_characters_in_credentials() {
        let sender = Sender::new(1, "se\u{7}cret").referring(ReferredSender::new(2, "\u{1B}"));
        let fields: Vec<_> = sender.violations().into_iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["key", "referred_sender.key"]);
    }

    #[test]
    fn test_debug_redacts_key() {
        let sender = Sender::new(1, "top-secret").referring(ReferredSender::new(2, "also-secret"));
        let debug = format!("{:?}", sender);
        assert!(!debug.contains("top-secret"));
        assert!(!debug.contains("also-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
