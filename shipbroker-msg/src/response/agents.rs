use super::{Encoding, Payload};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use shipbroker_codes::CountryCode;

/// Postal address of a pickup point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAddress {
    /// Street and number.
    pub street: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Country.
    pub country_code: CountryCode,
}

/// Opening interval within one day, as `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningInterval {
    /// Opening time.
    pub from: String,
    /// Closing time.
    pub to: String,
}

/// Weekly opening hours; a missing day means closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationHours {
    /// Opening intervals on Monday.
    #[serde(default)]
    pub monday: Vec<OpeningInterval>,
    /// Opening intervals on Tuesday.
    #[serde(default)]
    pub tuesday: Vec<OpeningInterval>,
    /// Opening intervals on Wednesday.
    #[serde(default)]
    pub wednesday: Vec<OpeningInterval>,
    /// Opening intervals on Thursday.
    #[serde(default)]
    pub thursday: Vec<OpeningInterval>,
    /// Opening intervals on Friday.
    #[serde(default)]
    pub friday: Vec<OpeningInterval>,
    /// Opening intervals on Saturday.
    #[serde(default)]
    pub saturday: Vec<OpeningInterval>,
    /// Opening intervals on Sunday.
    #[serde(default)]
    pub sunday: Vec<OpeningInterval>,
}

impl OperationHours {
    /// Intervals for one day of the week.
    pub fn on(&self, day: Weekday) -> &[OpeningInterval] {
        match day {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }
}

/// A pickup point that can receive a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Agent id to order with.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Carrier operating the agent.
    pub shipper: String,
    /// Id of that carrier.
    pub shipper_id: u64,
    /// Distance from the searched postal code, in kilometres.
    pub distance: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Preformatted description for display.
    #[serde(default)]
    pub html_info: String,
    /// Where the agent is.
    pub address: AgentAddress,
    /// When the agent is open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_hours: Option<OperationHours>,
}

/// Reply to an agent lookup, encoded as a JSON object map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentListResult {
    /// Server status text.
    pub status: String,
    /// Numeric status code.
    pub code: i64,
    /// Agents, nearest first.
    #[serde(default)]
    pub agents: Vec<Agent>,
}

impl AgentListResult {
    /// Agents run by one carrier.
    pub fn by_shipper(&self, shipper_id: u64) -> impl Iterator<Item = &Agent> {
        self.agents
            .iter()
            .filter(move |agent| agent.shipper_id == shipper_id)
    }
}

impl Payload for AgentListResult {
    const ENCODING: Encoding = Encoding::ObjectMap;

    fn parse(body: &str) -> Result<Self, String> {
        Encoding::ObjectMap.decode(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{Reply, Response, StatusCode};
    use pretty_assertions::assert_eq;

    const BODY: &str = r#"{
        "status": "OK",
        "code": 0,
        "agents": [
            {
                "distance": 0.35,
                "html_info": "<b>Trafika</b>",
                "shipper_id": 3,
                "latitude": 50.0755,
                "longitude": 14.4378,
                "name": "Trafika U Muzea",
                "shipper": "Depot Net",
                "id": 5501,
                "address": {
                    "street": "Vinohradská 12",
                    "city": "Praha",
                    "postal_code": "12000",
                    "country_code": "cz"
                },
                "operation_hours": {
                    "monday": [{"from": "08:00", "to": "12:00"}, {"from": "13:00", "to": "18:00"}],
                    "saturday": [{"from": "09:00", "to": "11:00"}]
                }
            },
            {
                "distance": 1.2,
                "html_info": "",
                "shipper_id": 5,
                "latitude": 50.08,
                "longitude": 14.42,
                "name": "Box 17",
                "shipper": "Lockers",
                "id": 17,
                "address": {
                    "street": "Národní 1",
                    "city": "Praha",
                    "postal_code": "11000",
                    "country_code": "CZ"
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_object_map() {
        let response = Response::<AgentListResult>::from_reply(Some(&Reply::new(200, BODY)));
        assert_eq!(response.status_code, StatusCode::Ok);
        assert_eq!(response.server_status_text, "OK");
        let agents = response.payload.unwrap();
        assert_eq!(
            agents.agents.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![5501, 17]
        );

        let first = &agents.agents[0];
        assert_eq!(first.address.country_code.as_str(), "CZ");
        let hours = first.operation_hours.as_ref().unwrap();
        assert_eq!(hours.on(Weekday::Mon).len(), 2);
        assert_eq!(hours.on(Weekday::Sat)[0].to, "11:00");
        assert!(hours.on(Weekday::Sun).is_empty());
        assert!(agents.agents[1].operation_hours.is_none());
        assert_eq!(agents.by_shipper(5).count(), 1);
    }

    #[test]
    fn test_round_trip() {
        let parsed = AgentListResult::parse(BODY).unwrap();
        let rendered = serde_json::to_string(&parsed).unwrap();
        assert_eq!(AgentListResult::parse(&rendered).unwrap(), parsed);
    }

    #[test]
    fn test_error_code_short_circuits() {
        let body = r#"{"status": "ERROR", "code": 2, "error_message": "Unknown postal code"}"#;
        let response = Response::<AgentListResult>::from_reply(Some(&Reply::new(200, body)));
        assert!(!response.has_result());
        assert_eq!(response.server_status_text, "ERROR");
        assert_eq!(response.error_text.as_deref(), Some("Unknown postal code"));
    }

    #[test]
    fn test_markup_body_is_invalid_payload() {
        let response = Response::<AgentListResult>::from_reply(Some(&Reply::new(
            200,
            "<agents><code>0</code></agents>",
        )));
        assert!(response
            .error_text
            .as_deref()
            .is_some_and(|text| text.starts_with("Invalid payload: ")));
    }
}
