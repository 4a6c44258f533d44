//! Shared response envelope types for API handlers.
//!
//! Every success body carries `"ok": true` next to its payload key, e.g.
//! `{ "ok": true, "modelos": [...] }`. The payload key varies per resource,
//! so envelopes are built from a one-field struct flattened into [`Ok`].

use serde::Serialize;

/// `{ "ok": true, ...payload }` response envelope.
///
/// `T` must serialize to a JSON object; its fields sit beside `ok`.
///
/// # Example
///
/// ```ignore
/// #[derive(Serialize)]
/// struct Models { modelos: Vec<DeviceModel> }
///
/// Ok(Json(OkResponse::new(Models { modelos })))
/// ```
#[derive(Debug, Serialize)]
pub struct OkResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Serialize> OkResponse<T> {
    pub fn new(payload: T) -> Self {
        Self { ok: true, payload }
    }
}

/// Bare `{ "ok": true, "message": ... }` body for mutations with no payload.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub ok: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }
}
