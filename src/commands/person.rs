//! Person Commands

use crate::config::HostConfig;
use crate::error::RequestError;
use super::get_json;

/// Names of everyone who ever issued or returned equipment, sorted by the server
pub async fn list_persons(config: &HostConfig) -> Result<Vec<String>, RequestError> {
    get_json(&config.endpoint("persons")).await
}
