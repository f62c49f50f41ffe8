//! Boundary to the host-provided transport.
//!
//! The crate never opens a connection. The host implements [`Transport`]
//! and [`BrokerClient`] ties it to request serialization and reply parsing.
//! Retries and request signing belong to the transport.

use crate::error::Result;
use crate::request::BrokerRequest;
use crate::response::{
    AgentListResult, DocumentListResult, Payload, Reply, Response, TrackingResult,
};
use shipbroker_codes::CountryCode;
use std::sync::Arc;
use tracing::{debug, info};

/// A call the broker accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Price a shipment.
    Quote,
    /// Reprice an existing quote.
    ReQuote,
    /// Create a shipment without a quote.
    CreateShipment,
    /// Place an order.
    Order,
    /// Look up a shipment's history.
    Tracking {
        /// Broker shipment id.
        shipment_id: u64,
    },
    /// List a shipment's documents.
    Documents {
        /// Broker shipment id.
        shipment_id: u64,
    },
    /// Find pickup points near a postal code.
    Agents {
        /// Country searched.
        country: CountryCode,
        /// Postal code searched.
        postal_code: String,
    },
}

impl Operation {
    /// Path segment of the call.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::ReQuote => "requote",
            Self::CreateShipment => "create_shipment",
            Self::Order => "order",
            Self::Tracking { .. } => "tracking",
            Self::Documents { .. } => "documents",
            Self::Agents { .. } => "agents",
        }
    }

    /// Query parameters of document-less calls.
    pub fn parameters(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Tracking { shipment_id } | Self::Documents { shipment_id } => {
                vec![("shipment_id", shipment_id.to_string())]
            }
            Self::Agents {
                country,
                postal_code,
            } => vec![
                ("country", country.to_string()),
                ("postal_code", postal_code.clone()),
            ],
            _ => Vec::new(),
        }
    }

    /// Whether the call carries a request document.
    pub fn has_document(&self) -> bool {
        matches!(
            self,
            Self::Quote | Self::ReQuote | Self::CreateShipment | Self::Order
        )
    }
}

/// Sends one call and hands back the raw reply, or `None` when nothing came back.
pub trait Transport {
    /// Send `document`, if the call has one.
    fn send(&self, operation: Operation, document: Option<&str>) -> Option<Reply>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, operation: Operation, document: Option<&str>) -> Option<Reply> {
        (**self).send(operation, document)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, operation: Operation, document: Option<&str>) -> Option<Reply> {
        (**self).send(operation, document)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, operation: Operation, document: Option<&str>) -> Option<Reply> {
        (**self).send(operation, document)
    }
}

/// Serializes requests, sends them and parses the replies.
#[derive(Debug, Clone)]
pub struct BrokerClient<T> {
    transport: T,
}

impl<T: Transport> BrokerClient<T> {
    /// Wrap a transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The wrapped transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request document.
    ///
    /// Fails only when the request is invalid; everything that goes wrong
    /// afterwards is reported inside the [`Response`].
    pub fn submit<R: BrokerRequest>(&self, request: &R) -> Result<Response<R::Payload>> {
        let document = request.to_wire_format()?;
        let operation = request.operation();
        info!(
            operation = operation.path(),
            entity = R::ENTITY_NAME,
            "submitting request"
        );
        debug!(bytes = document.len(), "request document rendered");
        Ok(self.call(operation, Some(&document)))
    }

    /// Look up a shipment's history.
    pub fn track(&self, shipment_id: u64) -> Response<TrackingResult> {
        self.call(Operation::Tracking { shipment_id }, None)
    }

    /// List a shipment's documents.
    pub fn documents(&self, shipment_id: u64) -> Response<DocumentListResult> {
        self.call(Operation::Documents { shipment_id }, None)
    }

    /// Find pickup points near a postal code.
    pub fn agents(
        &self,
        country: CountryCode,
        postal_code: impl Into<String>,
    ) -> Response<AgentListResult> {
        self.call(
            Operation::Agents {
                country,
                postal_code: postal_code.into(),
            },
            None,
        )
    }

    fn call<P: Payload>(&self, operation: Operation, document: Option<&str>) -> Response<P> {
        let path = operation.path();
        let reply = self.transport.send(operation, document);
        let response = Response::from_reply(reply.as_ref());
        debug!(
            operation = path,
            status = %response.status_code,
            has_result = response.has_result(),
            "reply parsed"
        );
        response
    }
}
