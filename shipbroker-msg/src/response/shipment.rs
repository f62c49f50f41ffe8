use super::{wrapped_list, Encoding, Payload, ShippingDocument};
use serde::Deserialize;

wrapped_list!(
    shipping_documents,
    ShippingDocumentList,
    "shipping_document",
    ShippingDocument
);

/// Reply to a shipment creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShipmentCreationResult {
    /// Broker shipment id.
    pub shipment_id: u64,
    /// Carrier tracking number.
    pub tracking_code: String,
    /// Carrier tracking page.
    pub tracking_link: String,
    /// Labels and customs papers ready for printing.
    #[serde(default, deserialize_with = "shipping_documents")]
    pub shipping_documents: Vec<ShippingDocument>,
}

impl Payload for ShipmentCreationResult {
    fn parse(body: &str) -> Result<Self, String> {
        Encoding::Markup.decode(body)
    }
}
