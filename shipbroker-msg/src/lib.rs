//! Request documents and reply parsing for a shipping broker API
//!
//! This crate is the client-side data layer of a broker integration. It
//! builds quote, re-quote, shipment creation and order documents out of
//! self-validating entities, renders them to the broker's markup format only
//! when every rule holds, and turns replies into a uniform [`Response`].
//!
//! The network itself is left to the host through the [`Transport`] trait;
//! [`BrokerClient`] ties a transport to serialization and parsing.

// Internal modules
pub mod address;
pub mod config;
pub mod error;
pub mod item;
pub mod parcel;
pub mod party;
pub mod pickup;
pub mod request;
pub mod response;
pub mod sender;
pub mod transport;
pub mod validation;
pub mod wire;

// Re-export the code tables for convenience
pub use shipbroker_codes as codes;

// Re-export public types for easier access
pub use address::{Address, FromAddress, ToAddress};
pub use config::{BrokerConfig, SenderConfig};
pub use error::{Error, Result};
pub use item::ShipmentItem;
pub use parcel::Parcel;
pub use party::{Dispatcher, Party, Recipient};
pub use pickup::PickupInfo;
pub use request::{
    BrokerRequest, DirectOrder, Order, QuoteOrder, QuoteRequest, ReQuoteRequest,
    ShipmentCreationRequest,
};
pub use response::{
    AgentListResult, DocumentListResult, OrderResult, Payload, Reply, Response,
    ShipmentCreationResult, StatusCode, QuoteResult, TrackingResult,
};
pub use sender::{ReferredSender, Sender};
pub use transport::{BrokerClient, Operation, Transport};
pub use validation::{RuleViolation, Validate};
pub use wire::WireEntity;
