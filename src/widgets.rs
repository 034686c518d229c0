//! Select Widgets
//!
//! Page-wide model of the lookup selects and the broadcast that pushes a
//! freshly registered entity into every select of its kind.

use crate::models::{LookupEntity, LookupKind};
use crate::rows::EQUIPMENT_FIELD;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The "-- choose --" entry; an empty value means nothing is selected
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::new("", label)
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<&LookupEntity> for SelectOption {
    fn from(entity: &LookupEntity) -> Self {
        Self::new(entity.id.to_string(), entity.name.clone())
    }
}

/// Identity of a select on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetId {
    MarathonSelect,
    MarathonFilter,
    StationSelect,
    StationFilter,
    PersonSelect,
    PersonSelectReturn,
    /// Equipment select of the line item with this key
    EquipmentLine(u32),
}

impl WidgetId {
    /// Element id the widget renders with, if it has one
    pub fn dom_id(&self) -> Option<&'static str> {
        match self {
            WidgetId::MarathonSelect => Some("marathon-select"),
            WidgetId::MarathonFilter => Some("marathon-select-return"),
            WidgetId::StationSelect => Some("station-select"),
            WidgetId::StationFilter => Some("station-select-return"),
            WidgetId::PersonSelect => Some("person-select"),
            WidgetId::PersonSelectReturn => Some("person-select-return"),
            WidgetId::EquipmentLine(_) => None,
        }
    }
}

/// A single `<select>`: ordered options plus the selected index.
///
/// Index 0 is conventionally the placeholder. A widget always holds at least
/// one option so the selected index stays valid.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectWidget {
    pub id: WidgetId,
    /// Form field name
    pub name: &'static str,
    options: Vec<SelectOption>,
    selected: usize,
}

impl SelectWidget {
    pub fn new(id: WidgetId, name: &'static str, mut options: Vec<SelectOption>) -> Self {
        if options.is_empty() {
            options.push(SelectOption::placeholder(""));
        }
        Self {
            id,
            name,
            options,
            selected: 0,
        }
    }

    /// Builds a widget from a lookup list, headed by a placeholder
    pub fn from_entities(id: WidgetId, name: &'static str, placeholder: &str, entities: &[LookupEntity]) -> Self {
        let mut options = vec![SelectOption::placeholder(placeholder)];
        options.extend(entities.iter().map(SelectOption::from));
        Self::new(id, name, options)
    }

    /// Preselects `value` when given and present
    pub fn with_value(mut self, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.select_value(value);
        }
        self
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.options.get(self.selected)
    }

    /// Current value, `""` for the placeholder
    pub fn value(&self) -> &str {
        self.selected_option().map(|o| o.value.as_str()).unwrap_or("")
    }

    pub fn has_value(&self) -> bool {
        !self.value().is_empty()
    }

    pub fn append(&mut self, option: SelectOption) {
        self.options.push(option);
    }

    /// Selects the first option carrying `value`. Unknown values leave the
    /// selection untouched.
    pub fn select_value(&mut self, value: &str) -> bool {
        match self.options.iter().position(|o| o.value == value) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    pub fn select_index(&mut self, idx: usize) -> bool {
        if idx < self.options.len() {
            self.selected = idx;
            true
        } else {
            false
        }
    }

    /// First option whose label equals `label` exactly
    pub fn find_by_label(&self, label: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.label == label)
    }

    /// Swaps the option list, keeping the selected value if it survives
    pub fn replace_options(&mut self, options: Vec<SelectOption>) {
        let current = self.value().to_string();
        *self = Self::new(self.id, self.name, options);
        self.select_value(&current);
    }
}

/// Matches widgets either by identity or by form field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetSelector {
    Id(WidgetId),
    Name(&'static str),
}

impl WidgetSelector {
    pub fn matches(&self, widget: &SelectWidget) -> bool {
        match self {
            WidgetSelector::Id(id) => widget.id == *id,
            WidgetSelector::Name(name) => widget.name == *name,
        }
    }
}

const MARATHON_TARGETS: &[WidgetSelector] = &[
    WidgetSelector::Id(WidgetId::MarathonSelect),
    WidgetSelector::Id(WidgetId::MarathonFilter),
    WidgetSelector::Name("marathon"),
];

const STATION_TARGETS: &[WidgetSelector] = &[
    WidgetSelector::Id(WidgetId::StationSelect),
    WidgetSelector::Id(WidgetId::StationFilter),
];

const EQUIPMENT_TARGETS: &[WidgetSelector] = &[WidgetSelector::Name(EQUIPMENT_FIELD)];

/// Widgets whose listeners must hear about a programmatic selection
const CHANGE_SIGNAL_WIDGETS: &[WidgetId] = &[WidgetId::MarathonFilter];

/// Selectors that receive a newly registered entity of `kind`
pub fn targets(kind: LookupKind) -> &'static [WidgetSelector] {
    match kind {
        LookupKind::Marathon => MARATHON_TARGETS,
        LookupKind::Station => STATION_TARGETS,
        LookupKind::Equipment => EQUIPMENT_TARGETS,
    }
}

/// Anything that owns selects a broadcast can reach
pub trait SelectHost {
    /// Appends `option` to every hosted select matched by any of `targets`
    /// (once per select), selecting it when `select` is set. Returns the ids
    /// of the selects that changed.
    fn receive(&mut self, targets: &[WidgetSelector], option: &SelectOption, select: bool) -> Vec<WidgetId>;
}

/// Shared receive step for one select
pub(crate) fn receive_into(widget: &mut SelectWidget, targets: &[WidgetSelector], option: &SelectOption, select: bool) -> bool {
    if !targets.iter().any(|t| t.matches(widget)) {
        return false;
    }
    widget.append(option.clone());
    if select {
        widget.select_index(widget.options.len() - 1);
    }
    true
}

/// The standalone selects present on the current page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetBoard {
    widgets: Vec<SelectWidget>,
}

impl WidgetBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a widget, replacing any existing one with the same id
    pub fn insert(&mut self, widget: SelectWidget) {
        match self.widgets.iter_mut().find(|w| w.id == widget.id) {
            Some(existing) => *existing = widget,
            None => self.widgets.push(widget),
        }
    }

    pub fn get(&self, id: WidgetId) -> Option<&SelectWidget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut SelectWidget> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    #[cfg(test)]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.get(id).is_some()
    }
}

impl SelectHost for WidgetBoard {
    fn receive(&mut self, targets: &[WidgetSelector], option: &SelectOption, select: bool) -> Vec<WidgetId> {
        self.widgets
            .iter_mut()
            .filter_map(|w| receive_into(w, targets, option, select).then_some(w.id))
            .collect()
    }
}

/// What a broadcast touched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    /// Every select that gained the new option
    pub updated: Vec<WidgetId>,
    /// Selects that need a synthetic change notification
    pub change_signals: Vec<WidgetId>,
}

impl SyncReport {
    pub fn merge(&mut self, other: SyncReport) {
        self.updated.extend(other.updated);
        self.change_signals.extend(other.change_signals);
    }
}

/// Pushes `entity` into one host's selects of the kind's target set
pub fn broadcast_to(host: &mut dyn SelectHost, kind: LookupKind, entity: &LookupEntity) -> SyncReport {
    let option = SelectOption::from(entity);
    let updated = host.receive(targets(kind), &option, kind.selects_created());
    let change_signals = updated
        .iter()
        .copied()
        .filter(|id| CHANGE_SIGNAL_WIDGETS.contains(id))
        .collect();
    SyncReport { updated, change_signals }
}

/// Pushes `entity` into every host, in order
pub fn broadcast(hosts: &mut [&mut dyn SelectHost], kind: LookupKind, entity: &LookupEntity) -> SyncReport {
    let mut report = SyncReport::default();
    for host in hosts.iter_mut() {
        report.merge(broadcast_to(&mut **host, kind, entity));
    }
    report
}
