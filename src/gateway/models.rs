//! Wire schema for todo service payloads.
//!
//! Request bodies and response decoding live here, separate from the domain
//! types, so that payload validation happens once at the gateway boundary.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::domain::{Backend, Result, TodoError, TodoItem};

/// Body of a create request: `{"name": "..."}`.
#[derive(Debug, Serialize)]
pub struct NewTodo<'a> {
    pub name: &'a str,
}

/// Decodes a list response body.
///
/// The Go service encodes an empty table as `null`, so anything that is not a
/// JSON array (including bytes that are not JSON at all) yields an empty list.
/// Elements of an array are validated strictly.
///
/// # Errors
///
/// Returns [`TodoError::MalformedResponse`] when an array element is not a
/// `{id, name}` object.
pub fn decode_list(backend: Backend, body: &[u8]) -> Result<Vec<TodoItem>> {
    let value: JsonValue = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(backend = %backend, error = %e, "list body is not JSON, treating as empty");
            return Ok(Vec::new());
        }
    };

    let JsonValue::Array(entries) = value else {
        tracing::debug!(backend = %backend, body = %value, "list body is not an array, treating as empty");
        return Ok(Vec::new());
    };

    entries
        .into_iter()
        .map(|entry| decode_value(backend, entry))
        .collect()
}

/// Decodes the body returned by a create request.
///
/// # Errors
///
/// Returns [`TodoError::MalformedResponse`] when the body is not JSON or lacks
/// a valid `id` or `name`.
pub fn decode_created(backend: Backend, body: &[u8]) -> Result<TodoItem> {
    serde_json::from_slice(body).map_err(|e| TodoError::MalformedResponse {
        backend,
        reason: e.to_string(),
    })
}

fn decode_value(backend: Backend, value: JsonValue) -> Result<TodoItem> {
    serde_json::from_value(value).map_err(|e| TodoError::MalformedResponse {
        backend,
        reason: e.to_string(),
    })
}
