use super::{wrapped_list, Encoding, Payload};
use serde::Deserialize;
use shipbroker_codes::DocumentTypeId;

/// A printable document attached to a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShippingDocument {
    /// Kind of document.
    pub type_id: DocumentTypeId,
    /// Display name.
    pub name: String,
    /// Download link.
    pub link: String,
    /// File format, such as `pdf`.
    #[serde(default)]
    pub format: Option<String>,
}

wrapped_list!(
    shipping_documents,
    ShippingDocumentList,
    "shipping_document",
    ShippingDocument
);

/// Reply to a document listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentListResult {
    /// Broker shipment id.
    pub shipment_id: u64,
    /// Documents in the order the broker lists them.
    #[serde(default, deserialize_with = "shipping_documents")]
    pub shipping_documents: Vec<ShippingDocument>,
}

impl DocumentListResult {
    /// Documents of one kind.
    pub fn of_type(&self, type_id: DocumentTypeId) -> impl Iterator<Item = &ShippingDocument> {
        self.shipping_documents
            .iter()
            .filter(move |document| document.type_id == type_id)
    }
}

impl Payload for DocumentListResult {
    fn parse(body: &str) -> Result<Self, String> {
        Encoding::Markup.decode(body)
    }
}
