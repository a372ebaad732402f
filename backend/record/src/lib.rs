//! Shared data model for the penalty tracker: the creation payload, the
//! form draft and its validation rules, the sheet column contract, and the
//! wire payloads exchanged between the server and its clients.

use serde::{Deserialize, Deserializer, Serialize};

pub mod display;
pub mod form;
pub mod payloads;
pub mod sheet;

/// One infraction entry as submitted for creation.
///
/// Deserialization is deliberately tolerant: every field falls back to its
/// empty value when absent or null, and `round`/`table` accept either a
/// JSON number or a numeric string. An absent field and a
/// present-but-empty field are the same thing at the presence check.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PenaltyRecord {
    #[serde(deserialize_with = "u32_or_text")]
    pub round: u32,
    #[serde(deserialize_with = "text_or_number")]
    pub table: String,
    #[serde(deserialize_with = "null_to_empty")]
    pub judge: String,
    #[serde(deserialize_with = "null_to_empty")]
    pub player_id: String,
    #[serde(deserialize_with = "null_to_empty")]
    pub player_name: String,
    #[serde(deserialize_with = "null_to_empty")]
    pub infraction: String,
    #[serde(deserialize_with = "null_to_empty")]
    pub penalty: String,
    #[serde(deserialize_with = "null_to_empty")]
    pub description: String,
}

impl PenaltyRecord {
    /// Presence of the required fields, checked the way the endpoints
    /// re-check them: `round` at least 1 and the required text fields
    /// non-empty after trimming.
    pub fn has_required(&self) -> bool {
        self.round >= 1
            && !self.table.trim().is_empty()
            && !self.judge.trim().is_empty()
            && !self.infraction.trim().is_empty()
            && !self.penalty.trim().is_empty()
    }
}

fn u32_or_text<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => u32::try_from(n).unwrap_or(0),
        Some(Raw::Text(s)) => s.trim().parse().unwrap_or(0),
        None => 0,
    })
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

fn null_to_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::PenaltyRecord;

    #[test]
    fn test_deserialize_full_payload() {
        let record: PenaltyRecord = serde_json::from_str(
            r#"{
                "round": 3,
                "table": "12",
                "judge": "Alice",
                "playerId": "0042",
                "playerName": "Bob",
                "infraction": "Slow Play",
                "penalty": "Warning",
                "description": "Took too long shuffling."
            }"#,
        )
        .unwrap();

        assert_eq!(record.round, 3);
        assert_eq!(record.table, "12");
        assert_eq!(record.judge, "Alice");
        assert_eq!(record.player_id, "0042");
        assert_eq!(record.player_name, "Bob");
        assert_eq!(record.infraction, "Slow Play");
        assert_eq!(record.penalty, "Warning");
        assert_eq!(record.description, "Took too long shuffling.");
        assert!(record.has_required());
    }

    #[test]
    fn test_deserialize_missing_fields_default() {
        let record: PenaltyRecord = serde_json::from_str(r#"{"judge": "Alice"}"#).unwrap();

        assert_eq!(record.round, 0);
        assert_eq!(record.table, "");
        assert_eq!(record.player_id, "");
        assert!(!record.has_required());
    }

    #[test]
    fn test_deserialize_numeric_table_and_text_round() {
        let record: PenaltyRecord =
            serde_json::from_str(r#"{"round": "4", "table": 12}"#).unwrap();

        assert_eq!(record.round, 4);
        assert_eq!(record.table, "12");
    }

    #[test]
    fn test_deserialize_null_fields_default() {
        let record: PenaltyRecord =
            serde_json::from_str(r#"{"round": null, "table": null, "judge": null}"#).unwrap();

        assert_eq!(record.round, 0);
        assert_eq!(record.table, "");
        assert_eq!(record.judge, "");
    }

    #[test]
    fn test_negative_round_counts_as_missing() {
        let record: PenaltyRecord = serde_json::from_str(
            r#"{"round": -2, "table": "1", "judge": "j", "infraction": "i", "penalty": "p"}"#,
        )
        .unwrap();

        assert_eq!(record.round, 0);
        assert!(!record.has_required());
    }

    #[test]
    fn test_has_required_rejects_blank_fields() {
        let mut record = PenaltyRecord {
            round: 1,
            table: "12".to_string(),
            judge: "Alice".to_string(),
            infraction: "Slow Play".to_string(),
            penalty: "Warning".to_string(),
            ..PenaltyRecord::default()
        };
        assert!(record.has_required());

        record.judge = "   ".to_string();
        assert!(!record.has_required());

        record.judge = "Alice".to_string();
        record.round = 0;
        assert!(!record.has_required());
    }

    #[test]
    fn test_serialize_uses_camel_case_keys() {
        let record = PenaltyRecord {
            round: 1,
            player_id: "0042".to_string(),
            ..PenaltyRecord::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["round"], 1);
        assert_eq!(json["playerId"], "0042");
        assert_eq!(json["playerName"], "");
    }
}
