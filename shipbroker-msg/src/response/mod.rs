//! Typed replies from the broker.
//!
//! Every call ends in a [`Response`]: absent replies, unsuccessful transport
//! statuses and unreadable bodies become error responses with a fixed
//! status text instead of Rust errors, so callers always inspect one shape.
//! A body whose own `code` reports an error is returned with the body's
//! status fields and no payload.

mod agents;
mod documents;
mod order;
mod quote;
mod shipment;
mod tracking;

pub use agents::{Agent, AgentAddress, AgentListResult, OpeningInterval, OperationHours};
pub use documents::{DocumentListResult, ShippingDocument};
pub use order::OrderResult;
pub use quote::{QuoteResult, ShippingProduct};
pub use shipment::ShipmentCreationResult;
pub use tracking::{ShippingState, TrackingResult};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Server status text used when the reply could not be read.
pub const STATUS_UNKNOWN: &str = "Status unknown - no or invalid reply";

/// Error text for a call that produced no reply.
pub const ABSENT_REPLY: &str = "reply was absent";

/// Outcome reported by the broker's numeric `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    /// The call succeeded.
    Ok,
    /// The call succeeded with a warning.
    Warning,
    /// The call failed.
    Error,
}

impl StatusCode {
    /// Map the broker's numeric code.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Ok,
            1 => Self::Warning,
            _ => Self::Error,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Raw reply handed back by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Transport status, HTTP style.
    pub status: u16,
    /// Reply body.
    pub body: String,
}

impl Reply {
    /// Create a reply.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the transport status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// How a payload is encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Tag-per-field markup.
    Markup,
    /// JSON object map.
    ObjectMap,
}

impl Encoding {
    fn decode<T: DeserializeOwned>(self, body: &str) -> Result<T, String> {
        match self {
            Self::Markup => quick_xml::de::from_str(body).map_err(|e| e.to_string()),
            Self::ObjectMap => serde_json::from_str(body).map_err(|e| e.to_string()),
        }
    }
}

/// Operation-specific reply content.
pub trait Payload: Sized {
    /// Encoding of the reply body.
    const ENCODING: Encoding = Encoding::Markup;

    /// Read the payload from a reply body, describing any failure.
    fn parse(body: &str) -> Result<Self, String>;
}

/// Status fields present in every reply body.
#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    #[serde(default, alias = "status")]
    server_status: Option<String>,
    code: i64,
    #[serde(default)]
    warning_message: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

impl StatusEnvelope {
    fn is_error(&self) -> bool {
        StatusCode::from_code(self.code) == StatusCode::Error
            || (self.code != 0 && self.error_message.is_some())
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|text| !text.trim().is_empty())
}

/// Uniform envelope for every broker reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    /// Status text reported by the server, or [`STATUS_UNKNOWN`].
    pub server_status_text: String,
    /// Outcome of the call.
    pub status_code: StatusCode,
    /// Warning reported alongside a result.
    pub warning_text: Option<String>,
    /// Why the call failed.
    pub error_text: Option<String>,
    /// Operation-specific content of a successful reply.
    pub payload: Option<T>,
}

impl<T> Response<T> {
    /// An error response with the unknown-status sentinel.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            server_status_text: STATUS_UNKNOWN.to_string(),
            status_code: StatusCode::Error,
            warning_text: None,
            error_text: Some(text.into()),
            payload: None,
        }
    }

    /// Whether a payload is present.
    pub fn has_result(&self) -> bool {
        self.payload.is_some()
    }

    /// Whether the call succeeded, possibly with a warning.
    pub fn is_ok(&self) -> bool {
        self.status_code != StatusCode::Error
    }

    /// The payload, if any, discarding the status fields.
    pub fn into_payload(self) -> Option<T> {
        self.payload
    }
}

impl<T: Payload> Response<T> {
    /// Turn a transport reply, or its absence, into a response.
    pub fn from_reply(reply: Option<&Reply>) -> Self {
        let Some(reply) = reply else {
            warn!("no reply received");
            return Self::error(ABSENT_REPLY);
        };
        if !reply.is_success() {
            warn!(status = reply.status, "unsuccessful reply");
            return Self::error(format!(
                "Not successful response ({}). Response Content: '{}'.",
                reply.status, reply.body
            ));
        }

        let envelope: StatusEnvelope = match T::ENCODING.decode(&reply.body) {
            Ok(envelope) => envelope,
            Err(detail) => return Self::invalid_payload(detail),
        };
        let envelope = StatusEnvelope {
            server_status: non_blank(envelope.server_status),
            warning_message: non_blank(envelope.warning_message),
            error_message: non_blank(envelope.error_message),
            ..envelope
        };

        if envelope.is_error() {
            debug!(code = envelope.code, "broker reported an error");
            return Self {
                server_status_text: envelope.server_status.unwrap_or_default(),
                status_code: StatusCode::Error,
                warning_text: envelope.warning_message,
                error_text: envelope.error_message,
                payload: None,
            };
        }

        match T::parse(&reply.body) {
            Ok(payload) => Self {
                server_status_text: envelope.server_status.unwrap_or_default(),
                status_code: StatusCode::from_code(envelope.code),
                warning_text: envelope.warning_message,
                error_text: envelope.error_message,
                payload: Some(payload),
            },
            Err(detail) => Self::invalid_payload(detail),
        }
    }

    fn invalid_payload(detail: String) -> Self {
        warn!(%detail, "unreadable reply body");
        Self::error(format!("Invalid payload: {}", detail))
    }
}

/// Deserialize `<wrapper><item/>...</wrapper>` lists into a plain `Vec`.
macro_rules! wrapped_list {
    ($fn_name:ident, $wrapper:ident, $item_tag:literal, $item:ty) => {
        #[derive(serde::Deserialize)]
        struct $wrapper {
            #[serde(default, rename = $item_tag)]
            items: Vec<$item>,
        }

        fn $fn_name<'de, D>(deserializer: D) -> std::result::Result<Vec<$item>, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            <$wrapper as serde::Deserialize>::deserialize(deserializer).map(|list| list.items)
        }
    };
}

pub(crate) use wrapped_list;


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Echo {
        value: u32,
    }

    impl Payload for Echo {
        fn parse(body: &str) -> Result<Self, String> {
            quick_xml::de::from_str(body).map_err(|e| e.to_string())
        }
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(StatusCode::from_code(0), StatusCode::Ok);
        assert_eq!(StatusCode::from_code(1), StatusCode::Warning);
        assert_eq!(StatusCode::from_code(2), StatusCode::Error);
        assert_eq!(StatusCode::from_code(-1), StatusCode::Error);
    }

    #[test]
    fn test_absent_reply() {
        let response = Response::<Echo>::from_reply(None);
        assert!(!response.has_result());
        assert!(!response.is_ok());
        assert_eq!(response.server_status_text, STATUS_UNKNOWN);
        assert_eq!(response.error_text.as_deref(), Some("reply was absent"));
    }

    #[test]
    fn test_unsuccessful_transport_status() {
        let reply = Reply::new(503, "busy");
        let response = Response::<Echo>::from_reply(Some(&reply));
        assert_eq!(response.server_status_text, STATUS_UNKNOWN);
        assert_eq!(
            response.error_text.as_deref(),
            Some("Not successful response (503). Response Content: 'busy'.")
        );
    }

    #[test]
    fn test_success_with_warning() {
        let reply = Reply::new(
            200,
            "<echo><server_status>OK</server_status><code>1</code>\
             <warning_message>slow</warning_message><error_message></error_message>\
             <value>7</value></echo>",
        );
        let response = Response::<Echo>::from_reply(Some(&reply));
        assert!(response.is_ok());
        assert_eq!(response.status_code, StatusCode::Warning);
        assert_eq!(response.warning_text.as_deref(), Some("slow"));
        assert_eq!(response.error_text, None);
        assert_eq!(response.payload, Some(Echo { value: 7 }));
    }

    #[test]
    fn test_body_error_short_circuits() {
        let reply = Reply::new(
            200,
            "<echo><server_status>FAILED</server_status><code>1</code>\
             <error_message>Unknown sender</error_message><value>oops</value></echo>",
        );
        let response = Response::<Echo>::from_reply(Some(&reply));
        assert!(!response.has_result());
        assert_eq!(response.status_code, StatusCode::Error);
        assert_eq!(response.server_status_text, "FAILED");
        assert_eq!(response.error_text.as_deref(), Some("Unknown sender"));
    }

    #[test]
    fn test_invalid_payload() {
        let reply = Reply::new(200, "<echo><code>0</code><value>oops</value></echo>");
        let response = Response::<Echo>::from_reply(Some(&reply));
        assert_eq!(response.server_status_text, STATUS_UNKNOWN);
        assert!(response
            .error_text
            .as_deref()
            .is_some_and(|text| text.starts_with("Invalid payload: ")));

        let missing_code = Reply::new(200, "<echo><value>1</value></echo>");
        assert!(!Response::<Echo>::from_reply(Some(&missing_code)).is_ok());
    }
}
