//! Lookup Registration
//!
//! Name validation, the create-dialog state, and the step that turns a
//! finished registration into widget updates.

use crate::error::RegistrationError;
use crate::models::{LookupEntity, LookupKind};
use crate::widgets::{broadcast, SelectHost, SyncReport};

/// Trims `raw`; an empty result is rejected before any request is made
pub fn validate_name(kind: LookupKind, raw: &str) -> Result<String, RegistrationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(RegistrationError::EmptyName(kind));
    }
    Ok(name.to_string())
}

/// State of one "add marathon/station/equipment" dialog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupDialog {
    pub open: bool,
    pub name: String,
}

impl LookupDialog {
    pub fn show(&mut self) {
        self.open = true;
    }

    /// Closes the dialog and clears its input for the next creation
    pub fn dismiss(&mut self) {
        self.open = false;
        self.name.clear();
    }
}

/// Applies a finished registration.
///
/// On success the entity is broadcast to `hosts` and the dialog dismissed.
/// On failure nothing is touched and the error is handed back for display.
pub fn complete_registration(
    kind: LookupKind,
    result: Result<LookupEntity, RegistrationError>,
    hosts: &mut [&mut dyn SelectHost],
    dialog: &mut LookupDialog,
) -> Result<SyncReport, RegistrationError> {
    let entity = result?;
    let report = broadcast(hosts, kind, &entity);
    dialog.dismiss();
    Ok(report)
}
