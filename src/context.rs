//! Page Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;

use crate::config::HostConfig;
use crate::filter::{BrowserNavigator, FilterController};

/// Page-wide handles provided via context
#[derive(Clone, Copy)]
pub struct PageContext {
    /// Host configuration, read once at start-up
    pub config: StoredValue<HostConfig>,
    /// Owner of the filter change handlers
    pub filter: FilterController<BrowserNavigator>,
}

impl PageContext {
    pub fn new(config: HostConfig) -> Self {
        Self {
            config: StoredValue::new(config),
            filter: FilterController::new(BrowserNavigator),
        }
    }

    pub fn no_station_marker(&self) -> String {
        self.config.with_value(|c| c.no_station_marker.clone())
    }
}

pub fn use_page_context() -> PageContext {
    use_context::<PageContext>().expect("PageContext should be provided")
}
