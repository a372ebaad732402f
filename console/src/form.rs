use std::collections::{BTreeMap, BTreeSet};

use record::{
    PenaltyRecord,
    form::{Draft, Field, validate},
};

/// One input control of the submission form, in sheet column order.
/// A multiline control takes line breaks as input instead of moving
/// focus on Enter.
#[derive(Clone, Copy)]
pub struct Control {
    pub field: Field,
    pub label: &'static str,
    pub required: bool,
    pub multiline: bool,
}

pub const CONTROLS: [Control; 8] = [
    Control {
        field: Field::Round,
        label: "Numero del turno",
        required: true,
        multiline: false,
    },
    Control {
        field: Field::Table,
        label: "Numero del tavolo",
        required: true,
        multiline: false,
    },
    Control {
        field: Field::Judge,
        label: "Nome del Judge",
        required: true,
        multiline: false,
    },
    Control {
        field: Field::PlayerId,
        label: "ID del giocatore",
        required: false,
        multiline: false,
    },
    Control {
        field: Field::PlayerName,
        label: "Nome del giocatore",
        required: false,
        multiline: false,
    },
    Control {
        field: Field::Infraction,
        label: "Infrazione",
        required: true,
        multiline: false,
    },
    Control {
        field: Field::Penalty,
        label: "Penalità",
        required: true,
        multiline: false,
    },
    Control {
        field: Field::Description,
        label: "Descrizione",
        required: false,
        multiline: true,
    },
];

/// Editable state of the submission form.
///
/// `errors` always mirrors the current draft. A field's error is only
/// shown once the field has been visited, or after a failed submit.
pub struct FormState {
    pub draft: Draft,
    pub touched: BTreeSet<Field>,
    pub focus: usize,
    pub errors: BTreeMap<Field, String>,
}

impl FormState {
    pub fn new() -> Self {
        let draft = Draft::default();
        let errors = validate(&draft);
        FormState {
            draft,
            touched: BTreeSet::new(),
            focus: 0,
            errors,
        }
    }

    pub fn focused(&self) -> Control {
        CONTROLS[self.focus]
    }

    pub fn insert(&mut self, ch: char) {
        let field = CONTROLS[self.focus].field;
        self.draft.get_mut(field).push(ch);
        self.revalidate();
    }

    pub fn backspace(&mut self) {
        let field = CONTROLS[self.focus].field;
        self.draft.get_mut(field).pop();
        self.revalidate();
    }

    /// Moving away from a field counts as visiting it.
    pub fn focus_next(&mut self) {
        self.touched.insert(CONTROLS[self.focus].field);
        self.focus = (self.focus + 1) % CONTROLS.len();
    }

    pub fn focus_prev(&mut self) {
        self.touched.insert(CONTROLS[self.focus].field);
        self.focus = (self.focus + CONTROLS.len() - 1) % CONTROLS.len();
    }

    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if !self.touched.contains(&field) {
            return None;
        }
        self.errors.get(&field).map(String::as_str)
    }

    /// Hands back the record when the draft is complete, otherwise
    /// surfaces every validation error.
    pub fn submit(&mut self) -> Option<PenaltyRecord> {
        self.revalidate();
        if self.errors.is_empty() {
            return Some(self.draft.to_record());
        }
        self.touched
            .extend(CONTROLS.iter().map(|control| control.field));
        None
    }

    pub fn reset(&mut self) {
        *self = FormState::new();
    }

    fn revalidate(&mut self) {
        self.errors = validate(&self.draft);
    }
}

impl Default for FormState {
    fn default() -> Self {
        FormState::new()
    }
}

#[cfg(test)]
mod tests {
    use record::form::REQUIRED_MESSAGE;

    use super::*;

    fn type_text(state: &mut FormState, text: &str) {
        for ch in text.chars() {
            state.insert(ch);
        }
    }

    #[test]
    fn test_controls_follow_column_order() {
        let order: Vec<Field> = CONTROLS.iter().map(|control| control.field).collect();
        assert_eq!(order, Field::ALL);
    }

    #[test]
    fn test_errors_hidden_until_visited() {
        let mut state = FormState::new();
        assert!(state.errors.contains_key(&Field::Round));
        assert_eq!(state.visible_error(Field::Round), None);

        state.focus_next();
        assert_eq!(state.visible_error(Field::Round), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_typing_clears_the_error() {
        let mut state = FormState::new();
        type_text(&mut state, "3");
        assert!(!state.errors.contains_key(&Field::Round));
    }

    #[test]
    fn test_failed_submit_surfaces_every_error() {
        let mut state = FormState::new();
        assert!(state.submit().is_none());
        assert_eq!(state.touched.len(), CONTROLS.len());
        assert_eq!(state.visible_error(Field::Table), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_submit_returns_the_record() {
        let mut state = FormState::new();
        for text in ["2", "14", "Alice", "", "", "Slow Play", "Warning", ""] {
            type_text(&mut state, text);
            state.focus_next();
        }

        let record = state.submit().unwrap();
        assert_eq!(record.round, 2);
        assert_eq!(record.table, "14");
        assert_eq!(record.judge, "Alice");
        assert_eq!(record.infraction, "Slow Play");
        assert_eq!(record.penalty, "Warning");
        assert!(record.player_id.is_empty());
    }

    #[test]
    fn test_description_keeps_line_breaks() {
        let mut state = FormState::new();
        for text in ["2", "14", "Alice", "", "", "Slow Play", "Warning", "riga uno\nriga due"] {
            type_text(&mut state, text);
            state.focus_next();
        }

        let record = state.submit().unwrap();
        assert_eq!(record.description, "riga uno\nriga due");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = FormState::new();
        type_text(&mut state, "7");
        state.focus_next();
        state.reset();

        assert_eq!(state.focus, 0);
        assert!(state.touched.is_empty());
        assert!(state.draft.get(Field::Round).is_empty());
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut state = FormState::new();
        state.focus_prev();
        assert_eq!(state.focus, CONTROLS.len() - 1);
        state.focus_next();
        assert_eq!(state.focus, 0);
    }
}
