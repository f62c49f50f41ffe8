use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Languages the broker localises labels and notifications into
const SUPPORTED: &[&str] = &[
    "cs", "sk", "en", "de", "pl", "hu", "fr", "it", "es", "nl", "ro", "sl", "hr", "uk", "ru",
];

/// Two-letter language code, canonically lower-case
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(&'static str);

impl LanguageCode {
    /// Parse and validate a language code
    pub fn new(code: &str) -> Result<Self, Error> {
        let canonical = code.trim().to_ascii_lowercase();
        SUPPORTED
            .iter()
            .copied()
            .find(|supported| *supported == canonical)
            .map(Self)
            .ok_or_else(|| Error::InvalidLanguageCode(code.to_string()))
    }

    /// The lower-case code
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// All supported codes
    pub fn supported() -> &'static [&'static str] {
        SUPPORTED
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self("cs")
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageCode::new(s)
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for LanguageCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for LanguageCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LanguageCode::new(&s).map_err(serde::de::Error::custom)
    }
}
