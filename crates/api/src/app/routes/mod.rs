use axum::Router;

pub mod items;
pub mod system;

/// Router for the item endpoints.
pub fn router() -> Router {
    items::router()
}
