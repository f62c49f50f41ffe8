use crate::error::Error;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

static COUNTRY_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}$").expect("Failed to compile COUNTRY_CODE_REGEX"));

/// ISO 3166-1 alpha-2 codes, sorted for binary search
const ISO_3166_ALPHA2: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX",
    "AZ", "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ",
    "BR", "BS", "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK",
    "CL", "CM", "CN", "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM",
    "DO", "DZ", "EC", "EE", "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR",
    "GA", "GB", "GD", "GE", "GF", "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS",
    "GT", "GU", "GW", "GY", "HK", "HM", "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN",
    "IO", "IQ", "IR", "IS", "IT", "JE", "JM", "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN",
    "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC", "LI", "LK", "LR", "LS", "LT", "LU", "LV",
    "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK", "ML", "MM", "MN", "MO", "MP", "MQ",
    "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA", "NC", "NE", "NF", "NG", "NI",
    "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG", "PH", "PK", "PL", "PM",
    "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW", "SA", "SB", "SC",
    "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS", "ST", "SV",
    "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO", "TR",
    "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

/// Country the broker treats as domestic when an address names none
const DOMESTIC: &str = "CZ";

/// ISO 3166-1 alpha-2 country code
///
/// Construction upper-cases and trims the input, then checks it against the
/// frozen ISO table. Anything that is not a known code is rejected rather than
/// being coerced into one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountryCode(String);

impl CountryCode {
    /// Parse and validate a country code
    pub fn new(code: &str) -> Result<Self, Error> {
        let canonical = code.trim().to_ascii_uppercase();
        if !COUNTRY_CODE_REGEX.is_match(&canonical)
            || ISO_3166_ALPHA2.binary_search(&canonical.as_str()).is_err()
        {
            return Err(Error::InvalidCountryCode(code.to_string()));
        }
        Ok(Self(canonical))
    }

    /// The broker's home country
    pub fn domestic() -> Self {
        Self(DOMESTIC.to_string())
    }

    /// Whether this is the broker's home country
    pub fn is_domestic(&self) -> bool {
        self.0 == DOMESTIC
    }

    /// The canonical upper-case code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        Self::domestic()
    }
}

impl FromStr for CountryCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CountryCode::new(s)
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CountryCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CountryCode::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted() {
        assert!(ISO_3166_ALPHA2.windows(2).all(|w| w[0] < w[1]));
        assert!(ISO_3166_ALPHA2.binary_search(&DOMESTIC).is_ok());
    }

    #[test]
    fn test_valid_country_codes() {
        assert_eq!(CountryCode::new("CZ").unwrap().as_str(), "CZ");
        assert_eq!(CountryCode::new("de").unwrap().as_str(), "DE");
        assert_eq!(CountryCode::new(" sk ").unwrap().as_str(), "SK");
        assert_eq!(CountryCode::from_str("gb").unwrap().to_string(), "GB");
    }

    #[test]
    fn test_invalid_country_codes() {
        assert!(CountryCode::new("").is_err());
        assert!(CountryCode::new("C").is_err());
        assert!(CountryCode::new("CZE").is_err());
        assert!(CountryCode::new("XX").is_err());
        assert!(CountryCode::new("1A").is_err());
    }

    #[test]
    fn test_domestic_default() {
        let code = CountryCode::default();
        assert!(code.is_domestic());
        assert_eq!(code, CountryCode::domestic());
        assert!(!CountryCode::new("AT").unwrap().is_domestic());
    }

    #[test]
    fn test_serialization() {
        let code = CountryCode::new("pl").unwrap();
        let serialized = serde_json::to_string(&code).unwrap();
        assert_eq!(serialized, r#""PL""#);

        let deserialized: CountryCode = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, code);

        assert!(serde_json::from_str::<CountryCode>(r#""QQ""#).is_err());
    }
}
