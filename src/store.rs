//! Page State Store
//!
//! Uses Leptos reactive_stores for field-level reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{PageData, PageKind};
use crate::reconcile::ReturnLine;
use crate::rows::{RowEditor, RowTemplate};
use crate::widgets::{SelectOption, SelectWidget, WidgetBoard, WidgetId};

/// Everything the page lets the user edit before posting a form
#[derive(Clone, Debug, Default, Store)]
pub struct PageState {
    pub page: PageKind,
    /// Standalone selects present on this page
    pub widgets: WidgetBoard,
    /// Checkout line items (issue page)
    pub rows: RowEditor,
    /// Unreturned lines with their return quantities (return page)
    pub return_lines: Vec<ReturnLine>,
    /// Free-text fallback for a person not yet in the list
    pub new_person: String,
    /// Free-text fallback for a marathon not yet in the list
    pub new_marathon: String,
    /// Free-text fallback for a station not yet in the list
    pub new_station: String,
}

impl PageState {
    pub fn from_page_data(data: &PageData) -> Self {
        let mut widgets = WidgetBoard::new();
        let (marathon_id, station_id, person_id) = match data.page {
            PageKind::Issue => (WidgetId::MarathonSelect, WidgetId::StationSelect, WidgetId::PersonSelect),
            PageKind::Return => (WidgetId::MarathonFilter, WidgetId::StationFilter, WidgetId::PersonSelectReturn),
        };
        widgets.insert(
            SelectWidget::from_entities(marathon_id, "marathon", "-- Select marathon --", &data.marathons)
                .with_value(data.selected_marathon.as_deref()),
        );
        widgets.insert(
            SelectWidget::from_entities(station_id, "station", "-- Select station --", &data.stations)
                .with_value(data.selected_station.as_deref()),
        );
        widgets.insert(SelectWidget::new(person_id, "person", person_options(&data.persons)));

        let rows = match (data.page, data.line_items) {
            (PageKind::Issue, true) => {
                let mut equipment = vec![SelectOption::placeholder("-- Select equipment --")];
                equipment.extend(data.equipment.iter().map(SelectOption::from));
                RowEditor::new(RowTemplate::new(equipment))
            }
            _ => RowEditor::without_template(),
        };

        Self {
            page: data.page,
            widgets,
            rows,
            return_lines: data.unreturned.iter().map(ReturnLine::from).collect(),
            new_person: String::new(),
            new_marathon: String::new(),
            new_station: String::new(),
        }
    }
}

pub fn person_options(persons: &[String]) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::placeholder("-- Select person --")];
    options.extend(persons.iter().map(|p| SelectOption::new(p.clone(), p.clone())));
    options
}

/// Type alias for the store
pub type PageStore = Store<PageState>;

/// Get the page store from context
pub fn use_page_store() -> PageStore {
    expect_context::<PageStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Refreshes the person select from a newer list of names
pub fn store_set_persons(store: &PageStore, persons: &[String]) {
    let options = person_options(persons);
    let field = store.widgets();
    let mut widgets = field.write();
    for id in [WidgetId::PersonSelect, WidgetId::PersonSelectReturn] {
        if let Some(widget) = widgets.get_mut(id) {
            widget.replace_options(options.clone());
        }
    }
}
