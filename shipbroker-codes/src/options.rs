//! String-valued option sets sent with requests.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why goods leave the customs union
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportReason {
    /// Commercial sale
    #[default]
    Sale,
    /// Gift
    Gift,
    /// Commercial sample
    Sample,
    /// Goods returned to the seller
    Return,
    /// Sent for repair
    Repair,
    /// Documents only
    Documents,
    /// Personal effects
    Personal,
    /// Anything else
    Other,
}

impl ExportReason {
    /// Wire value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Gift => "gift",
            Self::Sample => "sample",
            Self::Return => "return",
            Self::Repair => "repair",
            Self::Documents => "documents",
            Self::Personal => "personal",
            Self::Other => "other",
        }
    }
}

impl FromStr for ExportReason {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sale" => Ok(Self::Sale),
            "gift" => Ok(Self::Gift),
            "sample" => Ok(Self::Sample),
            "return" => Ok(Self::Return),
            "repair" => Ok(Self::Repair),
            "documents" => Ok(Self::Documents),
            "personal" => Ok(Self::Personal),
            "other" => Ok(Self::Other),
            _ => Err(Error::UnknownExportReason(s.to_string())),
        }
    }
}

impl fmt::Display for ExportReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering of shipping products in a quote reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Cheapest first
    #[default]
    Price,
    /// Fastest first
    DeliveryTime,
    /// Alphabetical by product name
    Name,
}

impl SortOrder {
    /// Wire value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::DeliveryTime => "delivery_time",
            Self::Name => "name",
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(Self::Price),
            "delivery_time" => Ok(Self::DeliveryTime),
            "name" => Ok(Self::Name),
            _ => Err(Error::UnknownSortOrder(s.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_reason_parsing() {
        assert_eq!("GIFT".parse::<ExportReason>().unwrap(), ExportReason::Gift);
        assert_eq!(ExportReason::default(), ExportReason::Sale);
        assert!("bribe".parse::<ExportReason>().is_err());
        assert_eq!(
            serde_json::to_string(&ExportReason::Documents).unwrap(),
            r#""documents""#
        );
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!(
            "delivery_time".parse::<SortOrder>().unwrap(),
            SortOrder::DeliveryTime
        );
        assert_eq!(SortOrder::default().to_string(), "price");
        assert!("random".parse::<SortOrder>().is_err());
    }
}
