use std::collections::BTreeMap;

use crate::PenaltyRecord;

pub const REQUIRED_MESSAGE: &str = "Campo obbligatorio.";
pub const NUMERIC_MESSAGE: &str = "Deve essere un numero.";
pub const MIN_ROUND_MESSAGE: &str = "Deve essere almeno 1.";

/// Form field identifiers, in the order the form renders them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Round,
    Table,
    Judge,
    PlayerId,
    PlayerName,
    Infraction,
    Penalty,
    Description,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Round,
        Field::Table,
        Field::Judge,
        Field::PlayerId,
        Field::PlayerName,
        Field::Infraction,
        Field::Penalty,
        Field::Description,
    ];
}

/// In-progress textual form state. Everything stays a string until submit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Draft {
    pub round: String,
    pub table: String,
    pub judge: String,
    pub player_id: String,
    pub player_name: String,
    pub infraction: String,
    pub penalty: String,
    pub description: String,
}

impl Draft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Round => &self.round,
            Field::Table => &self.table,
            Field::Judge => &self.judge,
            Field::PlayerId => &self.player_id,
            Field::PlayerName => &self.player_name,
            Field::Infraction => &self.infraction,
            Field::Penalty => &self.penalty,
            Field::Description => &self.description,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Round => &mut self.round,
            Field::Table => &mut self.table,
            Field::Judge => &mut self.judge,
            Field::PlayerId => &mut self.player_id,
            Field::PlayerName => &mut self.player_name,
            Field::Infraction => &mut self.infraction,
            Field::Penalty => &mut self.penalty,
            Field::Description => &mut self.description,
        }
    }

    /// Converts the draft into the creation payload. Meant for drafts that
    /// passed `validate`; an unparseable round becomes 0 and fails the
    /// server-side presence check anyway.
    pub fn to_record(&self) -> PenaltyRecord {
        PenaltyRecord {
            round: self.round.trim().parse().unwrap_or(0),
            table: self.table.trim().to_string(),
            judge: self.judge.trim().to_string(),
            player_id: self.player_id.trim().to_string(),
            player_name: self.player_name.trim().to_string(),
            infraction: self.infraction.trim().to_string(),
            penalty: self.penalty.trim().to_string(),
            description: self.description.clone(),
        }
    }
}

/// Field-level validation of a draft. An empty map means the draft is
/// eligible for submission. Pure function of its input, never panics.
pub fn validate(draft: &Draft) -> BTreeMap<Field, String> {
    let mut errors = BTreeMap::new();

    let round = draft.round.trim();
    if round.is_empty() {
        errors.insert(Field::Round, REQUIRED_MESSAGE.to_string());
    } else {
        match round.parse::<i64>() {
            Err(_) => {
                errors.insert(Field::Round, NUMERIC_MESSAGE.to_string());
            }
            Ok(n) if n < 1 => {
                errors.insert(Field::Round, MIN_ROUND_MESSAGE.to_string());
            }
            Ok(_) => {}
        }
    }

    for (field, value) in [
        (Field::Table, &draft.table),
        (Field::Judge, &draft.judge),
        (Field::Infraction, &draft.infraction),
        (Field::Penalty, &draft.penalty),
    ] {
        if value.trim().is_empty() {
            errors.insert(field, REQUIRED_MESSAGE.to_string());
        }
    }

    errors
}
