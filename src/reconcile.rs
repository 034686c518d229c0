//! Return Reconciliation
//!
//! Runs on return-form submission, before the browser posts the form. It
//! only rewrites field values and never blocks the submission.

use crate::models::UnreturnedLine;
use crate::widgets::{SelectOption, SelectWidget, WidgetBoard, WidgetId};

/// Station cell text the server renders for issues without a station
pub const NO_STATION_MARKER: &str = "—";

/// One row of the return table
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnLine {
    /// Station name as displayed in the first column
    pub station: String,
    pub equipment_id: u32,
    pub equipment: String,
    pub missing: u32,
    /// Raw value of the quantity input
    pub quantity: String,
}

impl ReturnLine {
    pub fn quantity_is_positive(&self) -> bool {
        self.quantity.trim().parse::<f64>().map(|q| q > 0.0).unwrap_or(false)
    }
}

impl From<&UnreturnedLine> for ReturnLine {
    fn from(line: &UnreturnedLine) -> Self {
        Self {
            station: line.station.clone(),
            equipment_id: line.equipment_id,
            equipment: line.equipment.clone(),
            missing: line.missing,
            quantity: "0".to_string(),
        }
    }
}

/// Everything the reconciler looks at, captured at submit time
#[derive(Debug, Clone, Copy)]
pub struct ReturnSubmission<'a> {
    pub person: Option<&'a SelectWidget>,
    pub station: Option<&'a SelectWidget>,
    pub lines: &'a [ReturnLine],
    pub no_station_marker: &'a str,
}

impl<'a> ReturnSubmission<'a> {
    pub fn from_board(board: &'a WidgetBoard, lines: &'a [ReturnLine], no_station_marker: &'a str) -> Self {
        Self {
            person: board.get(WidgetId::PersonSelectReturn),
            station: board.get(WidgetId::StationFilter),
            lines,
            no_station_marker,
        }
    }
}

/// Field rewrites to perform before the form posts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// A person was picked, so the free-text name must not compete with it
    pub clear_new_person: bool,
    /// Station option inferred from the first returned line
    pub station: Option<SelectOption>,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        !self.clear_new_person && self.station.is_none()
    }

    pub fn apply(&self, board: &mut WidgetBoard, new_person: &mut String) {
        if self.clear_new_person {
            new_person.clear();
        }
        if let Some(option) = &self.station {
            if let Some(station) = board.get_mut(WidgetId::StationFilter) {
                station.select_value(&option.value);
            }
        }
    }
}

pub fn reconcile(submission: &ReturnSubmission<'_>) -> Reconciliation {
    let clear_new_person = submission.person.map(|p| p.has_value()).unwrap_or(false);
    let station = submission
        .station
        .filter(|s| !s.has_value())
        .and_then(|s| infer_station(s, submission.lines, submission.no_station_marker))
        .cloned();
    Reconciliation { clear_new_person, station }
}

/// The first line with a positive quantity and a real station label decides.
/// Its label must match an option label exactly; otherwise nothing is
/// inferred and later lines are not consulted.
pub fn infer_station<'w>(station: &'w SelectWidget, lines: &[ReturnLine], no_station_marker: &str) -> Option<&'w SelectOption> {
    let label = lines
        .iter()
        .filter(|line| line.quantity_is_positive())
        .map(|line| line.station.trim())
        .find(|label| !label.is_empty() && *label != no_station_marker)?;
    station.find_by_label(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostConfig;
    use crate::models::LookupEntity;

    fn line(station: &str, quantity: &str) -> ReturnLine {
        ReturnLine {
            station: station.to_string(),
            equipment_id: 1,
            equipment: "Cone".to_string(),
            missing: 5,
            quantity: quantity.to_string(),
        }
    }

    fn station_widget() -> SelectWidget {
        let stations = [(5, "Aid Station A"), (6, "Aid Station B")]
            .iter()
            .map(|(id, name)| LookupEntity { id: *id, name: name.to_string() })
            .collect::<Vec<_>>();
        SelectWidget::from_entities(WidgetId::StationFilter, "station", "-- Station --", &stations)
    }

    fn person_widget(selected: Option<&str>) -> SelectWidget {
        SelectWidget::new(
            WidgetId::PersonSelectReturn,
            "person",
            vec![SelectOption::placeholder("-- Person --"), SelectOption::new("Ana", "Ana")],
        )
        .with_value(selected)
    }

    fn submission<'a>(person: Option<&'a SelectWidget>, station: Option<&'a SelectWidget>, lines: &'a [ReturnLine]) -> ReturnSubmission<'a> {
        ReturnSubmission { person, station, lines, no_station_marker: NO_STATION_MARKER }
    }

    #[test]
    fn test_first_nonzero_row_sets_station() {
        let station = station_widget();
        let lines = [line("Aid Station A", "0"), line("Aid Station B", "3"), line("Aid Station A", "2")];

        let outcome = reconcile(&submission(None, Some(&station), &lines));

        assert_eq!(outcome.station, Some(SelectOption::new("6", "Aid Station B")));
        assert!(!outcome.clear_new_person);
    }

    #[test]
    fn test_no_matching_option_leaves_station_unset() {
        let station = station_widget();
        let lines = [line("Aid Station Z", "3"), line("Aid Station A", "1")];

        let outcome = reconcile(&submission(None, Some(&station), &lines));

        assert_eq!(outcome.station, None);
    }

    #[test]
    fn test_rows_without_station_are_skipped() {
        let station = station_widget();
        let lines = [line(NO_STATION_MARKER, "2"), line("   ", "4"), line(" Aid Station A ", "1")];

        let outcome = reconcile(&submission(None, Some(&station), &lines));

        assert_eq!(outcome.station.map(|o| o.value), Some("5".to_string()));
    }

    #[test]
    fn test_explicit_station_not_overridden() {
        let station = station_widget().with_value(Some("5"));
        let lines = [line("Aid Station B", "3")];

        let outcome = reconcile(&submission(None, Some(&station), &lines));

        assert_eq!(outcome.station, None);
    }

    #[test]
    fn test_label_match_is_exact() {
        let station = station_widget();
        let lines = [line("aid station b", "3")];

        assert_eq!(infer_station(&station, &lines, NO_STATION_MARKER), None);
    }

    #[test]
    fn test_quantity_parsing() {
        assert!(line("", "2").quantity_is_positive());
        assert!(line("", " 0.5 ").quantity_is_positive());
        assert!(!line("", "").quantity_is_positive());
        assert!(!line("", "-1").quantity_is_positive());
        assert!(!line("", "abc").quantity_is_positive());
    }

    #[test]
    fn test_selected_person_clears_free_text() {
        let person = person_widget(Some("Ana"));
        let outcome = reconcile(&submission(Some(&person), None, &[]));
        assert!(outcome.clear_new_person);

        let mut board = WidgetBoard::new();
        let mut new_person = "Someone Else".to_string();
        outcome.apply(&mut board, &mut new_person);
        assert_eq!(new_person, "");
    }

    #[test]
    fn test_placeholder_person_keeps_free_text() {
        let person = person_widget(None);
        let outcome = reconcile(&submission(Some(&person), None, &[]));
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_apply_selects_inferred_station() {
        let mut board = WidgetBoard::new();
        board.insert(station_widget());
        let lines = [line("Aid Station B", "3")];

        let outcome = reconcile(&ReturnSubmission::from_board(&board, &lines, NO_STATION_MARKER));
        let mut new_person = String::new();
        outcome.apply(&mut board, &mut new_person);

        assert_eq!(board.get(WidgetId::StationFilter).unwrap().value(), "6");
    }

    #[test]
    fn test_configured_marker_skips_rows() {
        let config = HostConfig::from_json(r#"{"no_station_marker": "-"}"#).unwrap();
        let mut board = WidgetBoard::new();
        board.insert(station_widget());
        let lines = [line("-", "2"), line("Aid Station A", "1")];

        let outcome = reconcile(&ReturnSubmission::from_board(&board, &lines, &config.no_station_marker));
        assert_eq!(outcome.station.map(|o| o.value), Some("5".to_string()));

        // With the default marker "-" is a station name, matches nothing, and stops the scan
        let outcome = reconcile(&ReturnSubmission::from_board(&board, &lines, NO_STATION_MARKER));
        assert_eq!(outcome.station, None);
    }
}
