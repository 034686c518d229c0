//! Host Configuration
//!
//! Element ids and endpoints the host page agrees on. The page may override
//! any of them with a JSON `<script id="checkout-config">` element.

use serde::{Deserialize, Serialize};

use crate::reconcile::NO_STATION_MARKER;

/// Id of the optional config element
pub const CONFIG_ELEMENT_ID: &str = "checkout-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Element the app mounts into
    pub mount_id: String,
    /// JSON script element holding the page bootstrap data
    pub page_data_id: String,
    /// Prefix of the JSON API, without trailing slash
    pub api_base: String,
    /// Station cell text meaning "no station"
    pub no_station_marker: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            mount_id: "app".to_string(),
            page_data_id: "page-data".to_string(),
            api_base: "/api".to_string(),
            no_station_marker: NO_STATION_MARKER.to_string(),
        }
    }
}

impl HostConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Absolute path of an API endpoint, e.g. `endpoint("persons")`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Reads the config element if the page has one, defaults otherwise
    pub fn load() -> Self {
        let Some(text) = read_json_script(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        match Self::from_json(&text) {
            Ok(config) => config,
            Err(e) => {
                web_sys::console::error_1(&format!("[APP] Ignoring malformed config: {}", e).into());
                Self::default()
            }
        }
    }
}

/// Text content of a `<script type="application/json">` element
pub fn read_json_script(id: &str) -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .text_content()
        .filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(HostConfig::from_json("{}").unwrap(), HostConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = HostConfig::from_json(r#"{"api_base": "/tracker/api/", "no_station_marker": "-"}"#).unwrap();
        assert_eq!(config.api_base, "/tracker/api/");
        assert_eq!(config.no_station_marker, "-");
        assert_eq!(config.mount_id, "app");
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let mut config = HostConfig::default();
        assert_eq!(config.endpoint("add_marathon"), "/api/add_marathon");
        config.api_base = "/tracker/api/".to_string();
        assert_eq!(config.endpoint("/persons"), "/tracker/api/persons");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(HostConfig::from_json(r#"{"api_base": 5}"#).is_err());
    }
}
