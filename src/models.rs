//! Frontend Models
//!
//! Data structures matching what the tracker backend renders and returns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three lookup tables that share the "register from a modal" flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupKind {
    Marathon,
    Station,
    Equipment,
}

impl LookupKind {
    /// Lowercase name used in endpoint paths and element ids
    pub fn slug(&self) -> &'static str {
        match self {
            LookupKind::Marathon => "marathon",
            LookupKind::Station => "station",
            LookupKind::Equipment => "equipment",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LookupKind::Marathon => "Marathon",
            LookupKind::Station => "Station",
            LookupKind::Equipment => "Equipment",
        }
    }

    /// Whether a freshly created entity becomes the current selection
    /// of every widget it was added to
    pub fn selects_created(&self) -> bool {
        !matches!(self, LookupKind::Equipment)
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A server-assigned lookup row (marathon, station or equipment)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupEntity {
    pub id: u32,
    pub name: String,
}

/// One issued-but-not-returned aggregate, as listed on the return page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnreturnedLine {
    #[serde(default)]
    pub station_id: Option<u32>,
    /// Display name of the station, "—" when the issue had none
    pub station: String,
    pub equipment_id: u32,
    pub equipment: String,
    pub missing: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    #[default]
    Issue,
    Return,
}

/// Bootstrap data the server embeds in the page as JSON
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageData {
    pub page: PageKind,
    pub marathons: Vec<LookupEntity>,
    pub stations: Vec<LookupEntity>,
    pub equipment: Vec<LookupEntity>,
    pub persons: Vec<String>,
    pub unreturned: Vec<UnreturnedLine>,
    pub selected_marathon: Option<String>,
    pub selected_station: Option<String>,
    /// Whether the page hosts a line-item table template
    #[serde(default = "default_true")]
    pub line_items: bool,
}

fn default_true() -> bool {
    true
}
