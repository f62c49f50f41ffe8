//! Validated code tables for the shipping broker client
//!
//! Every value in this crate is checked against a fixed allow-list when it is
//! built. Input codes are case-folded to their canonical case; anything that
//! is not a known code is rejected instead of being normalised into one.
mod classification;
mod country;
mod currency;
pub mod error;
mod language;
mod options;

pub use classification::{DocumentTypeId, ShippingStateId};
pub use country::CountryCode;
pub use currency::CurrencyCode;
pub use error::Error;
pub use language::LanguageCode;
pub use options::{ExportReason, SortOrder};
