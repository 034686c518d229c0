//! Lookup Commands
//!
//! Creation endpoints for marathons, stations and equipment.

use serde::Serialize;

use crate::config::HostConfig;
use crate::error::{RegistrationError, RequestError};
use crate::models::{LookupEntity, LookupKind};
use crate::registration::validate_name;
use super::post_json;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
pub struct CreateLookupArgs<'a> {
    pub name: &'a str,
}

// ========================
// Commands
// ========================

/// `POST {api}/add_{kind}` with `{name}`, answered by `{id, name}`
pub async fn create_lookup(config: &HostConfig, kind: LookupKind, name: &str) -> Result<LookupEntity, RequestError> {
    let url = config.endpoint(&format!("add_{}", kind.slug()));
    post_json(&url, &CreateLookupArgs { name }).await
}

/// Validates `raw_name` and creates the entity. A blank name fails before
/// any request is sent.
pub async fn register(config: &HostConfig, kind: LookupKind, raw_name: &str) -> Result<LookupEntity, RegistrationError> {
    let name = validate_name(kind, raw_name)?;
    web_sys::console::log_1(&format!("[LOOKUP] Creating {} {:?}", kind, name).into());
    let entity = create_lookup(config, kind, &name).await?;
    web_sys::console::log_1(&format!("[LOOKUP] Created {} #{}", kind, entity.id).into());
    Ok(entity)
}
