use crate::sheet::DataRow;

/// Display projection of one penalty row. The player identifier stays
/// internal to `DataRow` and is not part of what gets shown.
#[derive(Clone, Debug, PartialEq)]
pub struct Penalty {
    pub round: String,
    pub table: String,
    pub judge: String,
    pub player_name: String,
    pub infraction: String,
    pub penalty: String,
    pub description: String,
}

/// Projects sheet rows into display entries, sorted ascending by player
/// name. Rows with equal names keep their sheet order.
pub fn project(rows: &[DataRow]) -> Vec<Penalty> {
    let mut penalties: Vec<Penalty> = rows
        .iter()
        .map(|row| Penalty {
            round: row.round.clone(),
            table: row.table.clone(),
            judge: row.judge.clone(),
            player_name: row.player_name.clone(),
            infraction: row.infraction.clone(),
            penalty: row.penalty.clone(),
            description: row.description.clone(),
        })
        .collect();

    penalties.sort_by(|a, b| a.player_name.cmp(&b.player_name));

    penalties
}

#[cfg(test)]
mod tests {
    use super::project;
    use crate::sheet::DataRow;

    fn row(player_name: &str, player_id: &str, round: &str) -> DataRow {
        DataRow {
            round: round.to_string(),
            player_id: player_id.to_string(),
            player_name: player_name.to_string(),
            ..DataRow::default()
        }
    }

    #[test]
    fn test_sorts_ascending_by_player_name() {
        let rows = vec![row("Carla", "3", "1"), row("Anna", "1", "2"), row("Bruno", "2", "3")];

        let penalties = project(&rows);
        let names: Vec<&str> = penalties
            .iter()
            .map(|penalty| penalty.player_name.as_str())
            .collect();

        assert_eq!(names, vec!["Anna", "Bruno", "Carla"]);
    }

    #[test]
    fn test_equal_names_keep_sheet_order() {
        let rows = vec![row("Anna", "1", "1"), row("Anna", "2", "2")];

        let penalties = project(&rows);
        let rounds: Vec<&str> = penalties
            .iter()
            .map(|penalty| penalty.round.as_str())
            .collect();

        assert_eq!(rounds, vec!["1", "2"]);
    }

    #[test]
    fn test_projection_carries_every_display_field() {
        let rows = vec![DataRow {
            round: "1".to_string(),
            table: "12".to_string(),
            judge: "Alice".to_string(),
            player_id: "0042".to_string(),
            player_name: "Bob".to_string(),
            infraction: "Slow Play".to_string(),
            penalty: "Warning".to_string(),
            description: "note".to_string(),
        }];

        let penalties = project(&rows);
        let penalty = &penalties[0];

        assert_eq!(penalty.round, "1");
        assert_eq!(penalty.table, "12");
        assert_eq!(penalty.judge, "Alice");
        assert_eq!(penalty.player_name, "Bob");
        assert_eq!(penalty.infraction, "Slow Play");
        assert_eq!(penalty.penalty, "Warning");
        assert_eq!(penalty.description, "note");
    }

    #[test]
    fn test_empty_input_projects_to_empty() {
        assert!(project(&[]).is_empty());
    }
}
