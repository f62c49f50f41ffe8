//! Aggregate request documents.
//!
//! Each request owns a [`Sender`](crate::sender::Sender) plus the addresses,
//! parties, goods lines and parcels it needs, and reports the flattened
//! violations of all of them. A request only renders once the whole tree is
//! valid.

mod order;
mod quote;
mod requote;
mod shipment;

pub use order::{DirectOrder, Order, QuoteOrder};
pub use quote::QuoteRequest;
pub use requote::ReQuoteRequest;
pub use shipment::ShipmentCreationRequest;

use crate::item::ShipmentItem;
use crate::parcel::Parcel;
use crate::response::Payload;
use crate::transport::Operation;
use crate::validation::Rules;
use crate::wire::WireEntity;

/// Longest merchant reference the broker stores.
pub const REFERENCE_MAX: usize = 50;

/// A document the broker answers with a typed payload.
pub trait BrokerRequest: WireEntity {
    /// Payload of a successful reply.
    type Payload: Payload;

    /// Call this document is sent with.
    fn operation(&self) -> Operation;
}

pub(crate) fn check_reference(rules: &mut Rules, field: &str, reference: Option<&str>) {
    rules
        .opt_max_len(field, reference, REFERENCE_MAX)
        .opt_plain_text(field, reference);
}

pub(crate) fn check_goods_present(rules: &mut Rules, items: &[ShipmentItem], parcels: &[Parcel]) {
    rules.check(
        !items.is_empty() || !parcels.is_empty(),
        "commodities",
        "at least one commodity or parcel is required",
    );
}
