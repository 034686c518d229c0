//! Backend Request Wrappers
//!
//! Frontend bindings to the tracker's JSON API, organized by domain.

mod lookup;
mod person;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::error::RequestError;

// Re-export all public items
pub use lookup::*;
pub use person::*;

/// POST `args` as JSON and decode the JSON reply
async fn post_json<A: Serialize, T: DeserializeOwned>(url: &str, args: &A) -> Result<T, RequestError> {
    let body = serde_json::to_string(args).map_err(|e| RequestError::Malformed(e.to_string()))?;
    let result = fetch("POST", url, Some(body)).await?;
    serde_wasm_bindgen::from_value(result).map_err(|e| RequestError::Malformed(e.to_string()))
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, RequestError> {
    let result = fetch("GET", url, None).await?;
    serde_wasm_bindgen::from_value(result).map_err(|e| RequestError::Malformed(e.to_string()))
}

/// One `window.fetch` round trip; non-2xx statuses are errors
async fn fetch(method: &str, url: &str, body: Option<String>) -> Result<JsValue, RequestError> {
    let window = web_sys::window().ok_or_else(|| RequestError::Network("no window".to_string()))?;

    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }
    let request = Request::new_with_str_and_init(url, &opts).map_err(network_error)?;
    request.headers().set("Accept", "application/json").map_err(network_error)?;
    if body.is_some() {
        request.headers().set("Content-Type", "application/json").map_err(network_error)?;
    }

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network_error)?
        .dyn_into()
        .map_err(|_| RequestError::Malformed("fetch did not yield a Response".to_string()))?;
    if !response.ok() {
        return Err(RequestError::Status(response.status()));
    }

    let json = response.json().map_err(malformed_error)?;
    JsFuture::from(json).await.map_err(malformed_error)
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| js_sys::JSON::stringify(value).ok().and_then(|s| s.as_string()))
        .unwrap_or_else(|| format!("{:?}", value))
}

fn network_error(value: JsValue) -> RequestError {
    RequestError::Network(describe(&value))
}

fn malformed_error(value: JsValue) -> RequestError {
    RequestError::Malformed(describe(&value))
}
