use serde::{Deserialize, Serialize};

use crate::{PenaltyRecord, sheet::DataRow};

/// Request body of the write endpoint. The `values` wrapper is part of the
/// contract; a body without it is malformed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddPenalty {
    pub values: PenaltyRecord,
}

/// Plain success body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Status {
    pub status: u16,
}

/// Success body of the read endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rows {
    pub status: u16,
    pub rows: Vec<DataRow>,
}

/// Error body shared by every failure response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::AddPenalty;

    #[test]
    fn test_body_without_values_wrapper_is_malformed() {
        let direct = serde_json::from_str::<AddPenalty>(r#"{"round": 1, "table": "12"}"#);
        assert!(direct.is_err());

        let wrapped =
            serde_json::from_str::<AddPenalty>(r#"{"values": {"round": 1, "table": "12"}}"#)
                .unwrap();
        assert_eq!(wrapped.values.round, 1);
        assert_eq!(wrapped.values.table, "12");
    }
}
