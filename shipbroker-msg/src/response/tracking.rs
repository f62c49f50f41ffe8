use super::{wrapped_list, Encoding, Payload};
use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer};
use shipbroker_codes::ShippingStateId;

/// Layouts carriers use for state timestamps, tried in order.
const STATE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

fn state_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    STATE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| de::Error::custom(format!("unrecognised state date {:?}", raw)))
}

/// One step in a shipment's history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShippingState {
    /// State reached.
    pub id: ShippingStateId,
    /// Carrier's wording of the state.
    pub name: String,
    /// When the state was reached, in the carrier's local time.
    #[serde(deserialize_with = "state_date")]
    pub date: NaiveDateTime,
    /// Where the state was reached.
    #[serde(default)]
    pub location: Option<String>,
}

wrapped_list!(shipping_states, ShippingStateList, "shipping_state", ShippingState);

/// Reply to a tracking lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackingResult {
    /// Broker shipment id.
    pub shipment_id: u64,
    /// Carrier tracking number.
    pub tracking_code: String,
    /// Carrier tracking page.
    #[serde(default)]
    pub tracking_link: Option<String>,
    /// History, oldest first.
    #[serde(default, deserialize_with = "shipping_states")]
    pub shipping_states: Vec<ShippingState>,
}

impl TrackingResult {
    /// Most recent state.
    pub fn current_state(&self) -> Option<&ShippingState> {
        self.shipping_states.last()
    }

    /// Whether the shipment has reached a state it cannot leave.
    pub fn is_finished(&self) -> bool {
        self.current_state()
            .map(|state| state.id.is_final())
            .unwrap_or(false)
    }
}

impl Payload for TrackingResult {
    fn parse(body: &str) -> Result<Self, String> {
        Encoding::Markup.decode(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::render;
    use crate::response::{Reply, Response};
    use pretty_assertions::assert_eq;

    fn state(id: ShippingStateId, date: &str, location: Option<&str>) -> ShippingState {
        ShippingState {
            id,
            name: id.name().to_string(),
            date: NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S").unwrap(),
            location: location.map(str::to_string),
        }
    }

    #[test]
    fn test_round_trip_preserves_history_order() {
        let expected = TrackingResult {
            shipment_id: 9,
            tracking_code: "CZ0001".into(),
            tracking_link: Some("https://carrier.example/t/CZ0001".into()),
            shipping_states: vec![
                state(ShippingStateId::Created, "2024-03-01 08:00:00", None),
                state(ShippingStateId::InTransit, "2024-03-01 17:45:00", Some("Praha")),
                state(ShippingStateId::Delivered, "2024-03-02 10:12:00", Some("Brno")),
            ],
        };
        let body = render::reply("tracking_result", 0, |w| {
            w.number("shipment_id", expected.shipment_id)
                .text("tracking_code", &expected.tracking_code)
                .opt_text("tracking_link", expected.tracking_link.as_deref())
                .element("shipping_states", |w| {
                    for state in &expected.shipping_states {
                        w.element("shipping_state", |w| {
                            w.number("id", state.id.id())
                                .text("name", &state.name)
                                .display("date", state.date.format("%Y-%m-%d %H:%M:%S"))
                                .opt_text("location", state.location.as_deref());
                        });
                    }
                });
        });
        let response = Response::<TrackingResult>::from_reply(Some(&Reply::new(200, body)));
        let tracking = response.payload.unwrap();
        assert_eq!(tracking, expected);
        assert!(tracking.is_finished());
    }

    #[test]
    fn test_state_date_layouts() {
        let parse = |date: &str| {
            TrackingResult::parse(&render::reply("tracking_result", 0, |w| {
                w.number("shipment_id", 3u64)
                    .text("tracking_code", "X")
                    .element("shipping_states", |w| {
                        w.element("shipping_state", |w| {
                            w.number("id", 1u32).text("name", "Created").text("date", date);
                        });
                    });
            }))
        };
        let expected = NaiveDateTime::parse_from_str("2024-05-01 10:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        for date in ["2024-05-01 10:00:00", "2024-05-01 10:00", "2024-05-01T10:00:00"] {
            let tracking = parse(date).unwrap();
            assert_eq!(tracking.shipping_states[0].date, expected);
        }
        assert!(parse("yesterday").is_err());
    }

    #[test]
    fn test_empty_history() {
        let body = render::reply("tracking_result", 0, |w| {
            w.number("shipment_id", 3u64).text("tracking_code", "X");
        });
        let tracking = TrackingResult::parse(&body).unwrap();
        assert!(tracking.current_state().is_none());
        assert!(!tracking.is_finished());
    }
}
