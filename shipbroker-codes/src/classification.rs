//! Closed numeric tables the broker uses to classify documents and
//! shipment states in its replies.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a shipping document attached to a shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DocumentTypeId {
    /// Carrier label
    Label,
    /// Invoice
    Invoice,
    /// Proforma invoice
    ProformaInvoice,
    /// Customs declaration
    CustomsDeclaration,
    /// Delivery note
    DeliveryNote,
    /// Handover protocol signed at pickup
    HandoverProtocol,
    /// Commercial invoice for export
    CommercialInvoice,
    /// Certificate of origin
    CertificateOfOrigin,
}

impl DocumentTypeId {
    /// Numeric wire value
    pub fn id(self) -> u8 {
        match self {
            Self::Label => 1,
            Self::Invoice => 2,
            Self::ProformaInvoice => 3,
            Self::CustomsDeclaration => 4,
            Self::DeliveryNote => 5,
            Self::HandoverProtocol => 6,
            Self::CommercialInvoice => 7,
            Self::CertificateOfOrigin => 8,
        }
    }

    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Invoice => "invoice",
            Self::ProformaInvoice => "proforma invoice",
            Self::CustomsDeclaration => "customs declaration",
            Self::DeliveryNote => "delivery note",
            Self::HandoverProtocol => "handover protocol",
            Self::CommercialInvoice => "commercial invoice",
            Self::CertificateOfOrigin => "certificate of origin",
        }
    }
}

impl TryFrom<u8> for DocumentTypeId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Label,
            2 => Self::Invoice,
            3 => Self::ProformaInvoice,
            4 => Self::CustomsDeclaration,
            5 => Self::DeliveryNote,
            6 => Self::HandoverProtocol,
            7 => Self::CommercialInvoice,
            8 => Self::CertificateOfOrigin,
            other => return Err(Error::UnknownDocumentType(other)),
        })
    }
}

impl From<DocumentTypeId> for u8 {
    fn from(value: DocumentTypeId) -> Self {
        value.id()
    }
}

impl fmt::Display for DocumentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tracking state of a shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum ShippingStateId {
    /// Order accepted by the broker
    Created,
    /// Waiting for the carrier to collect
    AwaitingPickup,
    /// Collected by the carrier
    PickedUp,
    /// Moving through the carrier network
    InTransit,
    /// Sitting at a depot
    AtDepot,
    /// On the delivery vehicle
    OutForDelivery,
    /// Handed to the recipient
    Delivered,
    /// Waiting at a pickup point agent
    ReadyForPickup,
    /// Delivery attempt failed
    DeliveryFailed,
    /// On the way back to the sender
    ReturningToSender,
    /// Back with the sender
    Returned,
    /// Cancelled before pickup
    Cancelled,
    /// Held by customs
    CustomsClearance,
    /// Lost or damaged in transit
    LostOrDamaged,
}

impl ShippingStateId {
    /// Numeric wire value
    pub fn id(self) -> u16 {
        match self {
            Self::Created => 1,
            Self::AwaitingPickup => 2,
            Self::PickedUp => 3,
            Self::InTransit => 4,
            Self::AtDepot => 5,
            Self::OutForDelivery => 6,
            Self::Delivered => 7,
            Self::ReadyForPickup => 8,
            Self::DeliveryFailed => 9,
            Self::ReturningToSender => 10,
            Self::Returned => 11,
            Self::Cancelled => 12,
            Self::CustomsClearance => 13,
            Self::LostOrDamaged => 14,
        }
    }

    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::AwaitingPickup => "awaiting pickup",
            Self::PickedUp => "picked up",
            Self::InTransit => "in transit",
            Self::AtDepot => "at depot",
            Self::OutForDelivery => "out for delivery",
            Self::Delivered => "delivered",
            Self::ReadyForPickup => "ready for pickup at agent",
            Self::DeliveryFailed => "delivery failed",
            Self::ReturningToSender => "returning to sender",
            Self::Returned => "returned",
            Self::Cancelled => "cancelled",
            Self::CustomsClearance => "customs clearance",
            Self::LostOrDamaged => "lost or damaged",
        }
    }

    /// Whether no further state changes are expected
    pub fn is_final(self) -> bool {
        matches!(
            self,
            Self::Delivered | Self::Returned | Self::Cancelled | Self::LostOrDamaged
        )
    }
}

impl TryFrom<u16> for ShippingStateId {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Created,
            2 => Self::AwaitingPickup,
            3 => Self::PickedUp,
            4 => Self::InTransit,
            5 => Self::AtDepot,
            6 => Self::OutForDelivery,
            7 => Self::Delivered,
            8 => Self::ReadyForPickup,
            9 => Self::DeliveryFailed,
            10 => Self::ReturningToSender,
            11 => Self::Returned,
            12 => Self::Cancelled,
            13 => Self::CustomsClearance,
            14 => Self::LostOrDamaged,
            other => return Err(Error::UnknownShippingState(other)),
        })
    }
}

impl From<ShippingStateId> for u16 {
    fn from(value: ShippingStateId) -> Self {
        value.id()
    }
}

impl fmt::Display for ShippingStateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
