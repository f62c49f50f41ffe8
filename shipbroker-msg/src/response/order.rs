use super::{Encoding, Payload};
use serde::Deserialize;
use shipbroker_codes::CurrencyCode;

/// Reply to an order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderResult {
    /// Broker shipment id.
    pub shipment_id: u64,
    /// Code granting access to the shipment detail.
    pub access_code: String,
    /// Link to the shipment detail.
    pub access_link: String,
    /// Carrier tracking number, once assigned.
    #[serde(default)]
    pub tracking_code: Option<String>,
    /// Carrier tracking page.
    #[serde(default)]
    pub tracking_link: Option<String>,
    /// Charged price.
    pub amount: f64,
    /// Currency of `amount`.
    pub currency: CurrencyCode,
}

impl Payload for OrderResult {
    fn parse(body: &str) -> Result<Self, String> {
        Encoding::Markup.decode(body)
    }
}
