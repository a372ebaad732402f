use serde::{Deserialize, Serialize};

use crate::PenaltyRecord;

/// Column titles of the backing sheet, in the fixed write order. Reads map
/// rows back by these same names, so renaming a sheet column breaks both
/// directions.
pub const COLUMN_TITLES: [&str; 8] = [
    "Turno",
    "Tavolo",
    "Judge",
    "ID Giocatore",
    "Nome completo",
    "Infrazione",
    "Penalità",
    "Descrizione",
];

/// One row as read back from the sheet, keyed by the display column
/// titles. Cells are whatever text the sheet renders, numbers included.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataRow {
    #[serde(rename = "Turno")]
    pub round: String,
    #[serde(rename = "Tavolo")]
    pub table: String,
    #[serde(rename = "Judge")]
    pub judge: String,
    #[serde(rename = "ID Giocatore")]
    pub player_id: String,
    #[serde(rename = "Nome completo")]
    pub player_name: String,
    #[serde(rename = "Infrazione")]
    pub infraction: String,
    #[serde(rename = "Penalità")]
    pub penalty: String,
    #[serde(rename = "Descrizione")]
    pub description: String,
}

/// Cells of one appended row, in `COLUMN_TITLES` order.
pub fn to_cells(record: &PenaltyRecord) -> Vec<String> {
    vec![
        record.round.to_string(),
        record.table.clone(),
        record.judge.clone(),
        record.player_id.clone(),
        record.player_name.clone(),
        record.infraction.clone(),
        record.penalty.clone(),
        record.description.clone(),
    ]
}

/// Maps a raw value range (header row first) into rows keyed by column
/// title. Rows shorter than the header pad with empty cells since the
/// sheet API trims trailing blanks; columns with unknown titles are
/// ignored.
pub fn rows_from_values(values: &[Vec<String>]) -> Vec<DataRow> {
    let Some((header, rows)) = values.split_first() else {
        return Vec::new();
    };

    rows.iter()
        .map(|cells| {
            let mut row = DataRow::default();

            for (index, title) in header.iter().enumerate() {
                let cell = cells.get(index).cloned().unwrap_or_default();

                match title.as_str() {
                    "Turno" => row.round = cell,
                    "Tavolo" => row.table = cell,
                    "Judge" => row.judge = cell,
                    "ID Giocatore" => row.player_id = cell,
                    "Nome completo" => row.player_name = cell,
                    "Infrazione" => row.infraction = cell,
                    "Penalità" => row.penalty = cell,
                    "Descrizione" => row.description = cell,
                    _ => {}
                }
            }

            row
        })
        .collect()
}
