//! Error types for backend requests and lookup registration.

use thiserror::Error;

use crate::models::LookupKind;

/// Failure of one JSON request to the backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("Server returned HTTP {0}")]
    Status(u16),

    #[error("Unexpected response: {0}")]
    Malformed(String),
}

/// Why a lookup registration did not produce an entity
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistrationError {
    #[error("Enter {0} name")]
    EmptyName(LookupKind),

    #[error(transparent)]
    Request(#[from] RequestError),
}
