use axum::http::StatusCode;
use axum::response::IntoResponse;

use todoapi_core::{ItemDraft, ItemId};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /item` and `PUT /item/:id`.
///
/// Any `id` in the body is ignored; missing fields are unset / `false`.
pub type ItemRequest = ItemDraft;

// -------------------------
// Mapping helpers
// -------------------------

/// Canonical location of an item resource.
pub fn item_location(id: ItemId) -> String {
    format!("/item/{id}")
}

/// Parse an `:id` path segment.
pub fn parse_item_id(raw: &str) -> Result<ItemId, axum::response::Response> {
    raw.parse::<ItemId>().map_err(|e| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string())
    })
}

/// 200 with no body; used for a get on an unknown id.
pub fn empty_ok() -> axum::response::Response {
    StatusCode::OK.into_response()
}
