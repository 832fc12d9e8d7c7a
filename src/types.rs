use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::SchemaError;

/// Team the scraping job is hardwired to.
pub const TEAM: &str = "tottenham";

/// Key under which the scraping job nests the formatted payload.
pub const ENVELOPE_KEY: &str = "formatted_data";

const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PlayerStat {
    pub name: String,
    pub apps: u32,
    pub mins: u32,
    pub goals: u32,
    pub xg: f64,
    pub goals_vs_xg: f64,
    pub shots: u32,
    pub sot: u32,
    pub conv_percent: String,
    pub xg_per_shot: f64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub team: String,
    pub total_players: usize,
    pub players: Vec<PlayerStat>,
    pub headers: Vec<String>,
    pub error: Option<String>,
}

impl StatsResponse {
    /// Placeholder published in place of real data when the fetch fails.
    pub fn failure(team: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let error = if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        };

        Self {
            success: false,
            team: team.into(),
            total_players: 0,
            players: vec![],
            headers: vec![],
            error: Some(error),
        }
    }
}

/// A reply from the scraping backend, before the payload is pulled out.
#[derive(Clone, PartialEq, Debug)]
pub enum RawReply {
    Enveloped(Value),
    Direct(Value),
}

impl RawReply {
    pub fn from_value(mut value: Value) -> Self {
        let enveloped = value
            .get(ENVELOPE_KEY)
            .is_some_and(|inner| inner.is_object());

        if enveloped {
            RawReply::Enveloped(value[ENVELOPE_KEY].take())
        } else {
            RawReply::Direct(value)
        }
    }

    pub fn is_enveloped(&self) -> bool {
        matches!(self, RawReply::Enveloped(_))
    }

    pub fn into_payload(self) -> Value {
        match self {
            RawReply::Enveloped(payload) | RawReply::Direct(payload) => payload,
        }
    }
}

// Failure replies from the job only carry `success` and `error`, so the
// top-level fields are optional on the wire and checked in `into_response`.
#[derive(Debug, Deserialize)]
struct WireResponse {
    success: bool,
    team: Option<String>,
    total_players: Option<usize>,
    players: Option<Vec<PlayerStat>>,
    headers: Option<Vec<String>>,
    error: Option<String>,
}

impl WireResponse {
    fn into_response(self, team: &str) -> Result<StatsResponse, SchemaError> {
        if !self.success {
            return Ok(StatsResponse {
                success: false,
                team: self.team.unwrap_or_else(|| team.into()),
                total_players: self.total_players.unwrap_or(0),
                players: self.players.unwrap_or_default(),
                headers: self.headers.unwrap_or_default(),
                error: self.error,
            });
        }

        let response = StatsResponse {
            success: true,
            team: self.team.ok_or(SchemaError::MissingField("team"))?,
            total_players: self
                .total_players
                .ok_or(SchemaError::MissingField("total_players"))?,
            players: self.players.ok_or(SchemaError::MissingField("players"))?,
            headers: self.headers.ok_or(SchemaError::MissingField("headers"))?,
            error: self.error,
        };

        if response.players.len() != response.total_players {
            warn!(
                total_players = response.total_players,
                players = response.players.len(),
                "player count disagrees with total_players"
            );
        }

        Ok(response)
    }
}

/// Decodes a resolved payload into a `StatsResponse`, defaulting the team of
/// bare failure replies to `team`.
pub fn decode_stats(payload: Value, team: &str) -> Result<StatsResponse, SchemaError> {
    let wire: WireResponse = serde_json::from_value(payload)?;
    wire.into_response(team)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::error::SchemaError;
    use crate::types::{decode_stats, RawReply, StatsResponse, TEAM};

    fn son() -> serde_json::Value {
        json!({
            "name": "Son Heung-min",
            "apps": 35,
            "mins": 2900,
            "goals": 17,
            "xg": 12.4,
            "goals_vs_xg": 4.6,
            "shots": 75,
            "sot": 38,
            "conv_percent": "22.7%",
            "xg_per_shot": 0.17
        })
    }

    #[test]
    fn envelope_is_unwrapped() {
        let inner = json!({ "success": true, "team": "tottenham" });
        let reply = RawReply::from_value(json!({
            "success": true,
            "count": 1,
            "formatted_data": inner.clone(),
        }));

        assert!(reply.is_enveloped());
        assert_eq!(reply.into_payload(), inner);
    }

    #[test]
    fn direct_reply_passes_through() {
        let value = json!({ "success": true, "team": "tottenham", "total_players": 0 });
        let reply = RawReply::from_value(value.clone());

        assert!(!reply.is_enveloped());
        assert_eq!(reply.into_payload(), value);
    }

    #[test]
    fn null_envelope_counts_as_direct() {
        let value = json!({ "success": false, "formatted_data": null });
        let reply = RawReply::from_value(value.clone());
        assert_eq!(reply, RawReply::Direct(value));
    }

    #[test]
    fn scalar_envelope_counts_as_direct() {
        for falsy in [json!(false), json!(0), json!(""), json!([])] {
            let value = json!({ "success": false, "error": "boom", "formatted_data": falsy });
            let reply = RawReply::from_value(value.clone());
            assert_eq!(reply, RawReply::Direct(value));
        }

        let response = decode_stats(
            RawReply::from_value(json!({
                "success": false,
                "error": "boom",
                "formatted_data": false
            }))
            .into_payload(),
            TEAM,
        )
        .unwrap();
        assert_eq!(response.error.as_deref(), Some("boom"));
    }

    #[test]
    fn non_object_reply_is_direct() {
        let reply = RawReply::from_value(json!([1, 2, 3]));
        assert_eq!(reply, RawReply::Direct(json!([1, 2, 3])));
    }

    #[test]
    fn decodes_successful_payload() {
        let payload = json!({
            "success": true,
            "team": "tottenham",
            "total_players": 1,
            "players": [son()],
            "headers": ["Player", "Apps"],
            "error": null
        });

        let response = decode_stats(payload, TEAM).unwrap();
        assert!(response.success);
        assert_eq!(response.total_players, 1);
        assert_eq!(response.players[0].name, "Son Heung-min");
        assert_eq!(response.players[0].conv_percent, "22.7%");
        assert_eq!(response.headers, vec!["Player", "Apps"]);
        assert_eq!(response.error, None);
    }

    #[test]
    fn success_without_players_is_schema_error() {
        let payload = json!({
            "success": true,
            "team": "tottenham",
            "total_players": 3,
            "headers": []
        });

        let err = decode_stats(payload, TEAM).unwrap_err();
        assert!(matches!(err, SchemaError::MissingField("players")));
    }

    #[test]
    fn mistyped_player_is_schema_error() {
        // rows keyed by column index, as the scraper emits before formatting
        let payload = json!({
            "success": true,
            "team": "tottenham",
            "total_players": 1,
            "players": [{ "0": "Son Heung-min", "1": "35" }],
            "headers": ["Player", "Apps"]
        });

        let err = decode_stats(payload, TEAM).unwrap_err();
        assert!(matches!(err, SchemaError::Decode(_)));
    }

    #[test]
    fn bare_failure_reply_gets_defaults() {
        let payload = json!({
            "success": false,
            "title": null,
            "url": "https://theanalyst.com/competition/premier-league/stats",
            "error": "timeout waiting for table"
        });

        let response = decode_stats(payload, TEAM).unwrap();
        assert_eq!(
            response,
            StatsResponse {
                success: false,
                team: "tottenham".into(),
                total_players: 0,
                players: vec![],
                headers: vec![],
                error: Some("timeout waiting for table".into()),
            }
        );
    }

    #[test]
    fn failure_with_empty_message_falls_back() {
        let response = StatsResponse::failure(TEAM, "");
        assert_eq!(response.error.as_deref(), Some("Unknown error"));
        assert!(!response.success);
        assert!(response.players.is_empty());
    }
}
