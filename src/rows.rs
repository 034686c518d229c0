//! Line Item Rows
//!
//! Row model behind the checkout table. New rows are rendered from the
//! canonical template the page was started with, never copied from whatever
//! row happens to be first in the table.

use crate::widgets::{receive_into, SelectHost, SelectOption, SelectWidget, WidgetId, WidgetSelector};

pub const EQUIPMENT_FIELD: &str = "equipment[]";
pub const QUANTITY_FIELD: &str = "quantity[]";
pub const NEW_EQUIPMENT_FIELD: &str = "new_equipment[]";

/// Field kinds and defaults of one line item
#[derive(Debug, Clone, PartialEq)]
pub struct RowTemplate {
    pub equipment: Vec<SelectOption>,
    pub default_quantity: u32,
}

impl RowTemplate {
    pub fn new(equipment: Vec<SelectOption>) -> Self {
        Self {
            equipment,
            default_quantity: 1,
        }
    }

    fn instantiate(&self, key: u32) -> ItemRow {
        ItemRow {
            key,
            equipment: SelectWidget::new(WidgetId::EquipmentLine(key), EQUIPMENT_FIELD, self.equipment.clone()),
            quantity: self.default_quantity.to_string(),
            new_equipment: String::new(),
        }
    }
}

/// One editable line: equipment choice, quantity, optional new equipment name
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    /// Stable identity, never reused within one editor
    pub key: u32,
    pub equipment: SelectWidget,
    /// Raw value of the number input
    pub quantity: String,
    pub new_equipment: String,
}

/// The rows of one repeatable table.
///
/// Once a template exists the editor always holds at least one row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowEditor {
    template: Option<RowTemplate>,
    rows: Vec<ItemRow>,
    next_key: u32,
}

impl RowEditor {
    /// Editor with a single fresh row
    pub fn new(template: RowTemplate) -> Self {
        let first = template.instantiate(0);
        Self {
            template: Some(template),
            rows: vec![first],
            next_key: 1,
        }
    }

    /// Editor for a host table that provided no template row
    pub fn without_template() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[ItemRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row with every field at its default. Returns the new key,
    /// or `None` when there is no template to render from.
    pub fn add_row(&mut self) -> Option<u32> {
        let template = self.template.as_ref()?;
        let key = self.next_key;
        self.rows.push(template.instantiate(key));
        self.next_key += 1;
        Some(key)
    }

    /// Whether a remove control currently has any effect
    pub fn can_remove(&self) -> bool {
        self.rows.len() > 1
    }

    /// Removes the row with `key` unless it is the last one left
    pub fn remove_row(&mut self, key: u32) -> bool {
        if !self.can_remove() {
            return false;
        }
        let before = self.rows.len();
        self.rows.retain(|row| row.key != key);
        self.rows.len() != before
    }

    pub fn row_mut(&mut self, key: u32) -> Option<&mut ItemRow> {
        self.rows.iter_mut().find(|row| row.key == key)
    }

    pub fn set_quantity(&mut self, key: u32, value: String) {
        if let Some(row) = self.row_mut(key) {
            row.quantity = value;
        }
    }

    pub fn set_new_equipment(&mut self, key: u32, value: String) {
        if let Some(row) = self.row_mut(key) {
            row.new_equipment = value;
        }
    }

    pub fn select_equipment(&mut self, key: u32, idx: usize) {
        if let Some(row) = self.row_mut(key) {
            row.equipment.select_index(idx);
        }
    }
}

impl SelectHost for RowEditor {
    fn receive(&mut self, targets: &[WidgetSelector], option: &SelectOption, select: bool) -> Vec<WidgetId> {
        // rows rendered later must carry the option as well
        if let Some(template) = self.template.as_mut() {
            if targets.iter().any(|t| matches!(t, WidgetSelector::Name(name) if *name == EQUIPMENT_FIELD)) {
                template.equipment.push(option.clone());
            }
        }
        self.rows
            .iter_mut()
            .filter_map(|row| receive_into(&mut row.equipment, targets, option, select).then_some(row.equipment.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equipment_options() -> Vec<SelectOption> {
        vec![
            SelectOption::placeholder("-- Equipment --"),
            SelectOption::new("1", "Cone"),
            SelectOption::new("2", "Barrier"),
        ]
    }

    fn editor_with_rows(n: usize) -> RowEditor {
        let mut editor = RowEditor::new(RowTemplate::new(equipment_options()));
        for _ in 1..n {
            editor.add_row();
        }
        editor
    }

    #[test]
    fn test_add_row_resets_fields() {
        let mut editor = editor_with_rows(1);
        editor.select_equipment(0, 2);
        editor.set_quantity(0, "5".to_string());
        editor.set_new_equipment(0, "Tent".to_string());

        let key = editor.add_row().unwrap();

        assert_eq!(editor.len(), 2);
        let row = &editor.rows()[1];
        assert_eq!(row.key, key);
        assert_eq!(row.quantity, "1");
        assert_eq!(row.new_equipment, "");
        assert_eq!(row.equipment.selected_index(), 0);
        // the edited first row is untouched
        assert_eq!(editor.rows()[0].quantity, "5");
        assert_eq!(editor.rows()[0].equipment.value(), "2");
    }

    #[test]
    fn test_add_row_grows_by_one() {
        for n in 1..5 {
            let mut editor = editor_with_rows(n);
            editor.add_row();
            assert_eq!(editor.len(), n + 1);
            assert!(editor.rows().iter().all(|r| r.quantity == "1" && r.equipment.selected_index() == 0));
        }
    }

    #[test]
    fn test_remove_any_row_when_several() {
        let mut editor = editor_with_rows(3);
        let middle = editor.rows()[1].key;

        assert!(editor.remove_row(middle));
        assert_eq!(editor.len(), 2);
        assert!(editor.rows().iter().all(|r| r.key != middle));
    }

    #[test]
    fn test_last_row_cannot_be_removed() {
        let mut editor = editor_with_rows(2);
        let first = editor.rows()[0].key;
        let second = editor.rows()[1].key;

        assert!(editor.remove_row(first));
        assert!(!editor.can_remove());
        assert!(!editor.remove_row(second));
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn test_remove_is_repeatable() {
        let mut editor = editor_with_rows(3);
        let key = editor.rows()[2].key;

        assert!(editor.remove_row(key));
        assert!(!editor.remove_row(key));
        assert_eq!(editor.len(), 2);
    }

    #[test]
    fn test_keys_not_reused() {
        let mut editor = editor_with_rows(2);
        let removed = editor.rows()[1].key;
        editor.remove_row(removed);
        let added = editor.add_row().unwrap();
        assert_ne!(added, removed);
    }

    #[test]
    fn test_without_template_add_row_is_noop() {
        let mut editor = RowEditor::without_template();
        assert_eq!(editor.add_row(), None);
        assert!(editor.is_empty());
        assert!(!editor.remove_row(0));
    }

    #[test]
    fn test_received_option_reaches_later_rows() {
        let mut editor = editor_with_rows(1);
        let targets = [WidgetSelector::Name(EQUIPMENT_FIELD)];
        let radio = SelectOption::new("9", "Radio");

        let touched = editor.receive(&targets, &radio, false);
        assert_eq!(touched, vec![WidgetId::EquipmentLine(0)]);

        editor.add_row();
        let added = &editor.rows()[1];
        assert_eq!(added.equipment.options().last(), Some(&radio));
        assert_eq!(added.equipment.options().len(), 4);
    }
}
