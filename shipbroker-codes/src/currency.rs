use crate::error::Error;
use iso_currency::Currency;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// ISO 4217 currency code
///
/// Input is upper-cased before the lookup; unknown codes are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyCode(Currency);

impl CurrencyCode {
    /// Parse and validate a currency code
    pub fn new(code: &str) -> Result<Self, Error> {
        let canonical = code.trim().to_ascii_uppercase();
        if canonical.len() != 3 {
            return Err(Error::InvalidCurrencyCode(code.to_string()));
        }
        Currency::from_code(&canonical)
            .map(Self)
            .ok_or_else(|| Error::InvalidCurrencyCode(code.to_string()))
    }

    /// The three-letter code
    pub fn as_str(&self) -> &'static str {
        self.0.code()
    }

    /// The underlying ISO currency
    pub fn currency(&self) -> Currency {
        self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self(Currency::CZK)
    }
}

impl FromStr for CurrencyCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::new(s)
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CurrencyCode::new(&s).map_err(serde::de::Error::custom)
    }
}
