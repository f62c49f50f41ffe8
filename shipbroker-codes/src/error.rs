use thiserror::Error;

/// Error types for the code tables
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input is not an ISO 3166-1 alpha-2 country code
    #[error("Invalid country code: {0}")]
    InvalidCountryCode(String),

    /// Input is not an ISO 4217 currency code
    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    /// Input is not one of the supported two-letter language codes
    #[error("Invalid language code: {0}")]
    InvalidLanguageCode(String),

    /// Numeric document type outside the known table
    #[error("Unknown document type: {0}")]
    UnknownDocumentType(u8),

    /// Numeric shipping state outside the known table
    #[error("Unknown shipping state: {0}")]
    UnknownShippingState(u16),

    /// Export reason outside the known set
    #[error("Unknown export reason: {0}")]
    UnknownExportReason(String),

    /// Sort order outside the known set
    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),
}

/// Result alias for code parsing
pub type Result<T> = std::result::Result<T, Error>;
