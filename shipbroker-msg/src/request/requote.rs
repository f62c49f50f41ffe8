use super::BrokerRequest;
use crate::item::ShipmentItem;
use crate::parcel::Parcel;
use crate::response::QuoteResult;
use crate::sender::Sender;
use crate::transport::Operation;
use crate::validation::{RuleViolation, Rules, Validate};
use crate::wire::{WireEntity, WireWriter};

/// Ask the broker to re-price a quote it already issued.
///
/// Addresses come from the referenced quote. Goods are only sent when they
/// changed since.
#[derive(Debug, Clone, PartialEq)]
pub struct ReQuoteRequest {
    /// Integration identity.
    pub sender: Sender,
    /// Quote being re-priced.
    pub quote_id: u64,
    /// New declared value, rendered with two decimals.
    pub value: Option<f64>,
    /// Price insurance into every product.
    pub insure: bool,
    /// Replacement goods lines.
    pub items: Vec<ShipmentItem>,
    /// Replacement packages.
    pub parcels: Vec<Parcel>,
}

impl ReQuoteRequest {
    /// Re-price `quote_id` unchanged.
    pub fn new(sender: Sender, quote_id: u64) -> Self {
        Self {
            sender,
            quote_id,
            value: None,
            insure: false,
            items: Vec::new(),
            parcels: Vec::new(),
        }
    }

    /// Change the declared value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Include insurance.
    pub fn insured(mut self) -> Self {
        self.insure = true;
        self
    }

    /// Replace the goods lines.
    pub fn with_items(mut self, items: Vec<ShipmentItem>) -> Self {
        self.items = items;
        self
    }

    /// Replace the packages.
    pub fn with_parcels(mut self, parcels: Vec<Parcel>) -> Self {
        self.parcels = parcels;
        self
    }
}

impl Validate for ReQuoteRequest {
    fn violations(&self) -> Vec<RuleViolation> {
        Rules::new()
            .at_least("quote_id", self.quote_id, 1)
            .opt_non_negative("value", self.value)
            .nested("sender", &self.sender)
            .nested_all("commodities", &self.items)
            .nested_all("parcels", &self.parcels)
            .finish()
    }
}

impl WireEntity for ReQuoteRequest {
    const ENTITY_NAME: &'static str = "ReQuoteRequest";

    fn write_wire(&self, writer: &mut WireWriter) {
        writer.element("requote", |w| {
            w.fragment(&self.sender)
                .number("quote_id", self.quote_id)
                .opt_money("value", self.value)
                .flag("insure", self.insure)
                .list("commodities", &self.items)
                .list("parcels", &self.parcels);
        });
    }
}

impl BrokerRequest for ReQuoteRequest {
    type Payload = QuoteResult;

    fn operation(&self) -> Operation {
        Operation::ReQuote
    }
}
