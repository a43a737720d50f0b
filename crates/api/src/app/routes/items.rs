use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};

use todoapi_core::Mutation;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Every item route uses the same leading-slash scheme.
pub fn router() -> Router {
    Router::new()
        .route("/items", get(list_items))
        .route("/item", post(create_item))
        .route(
            "/item/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
}

pub async fn list_items(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.store().list().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::store_error_to_response("list_items", e),
    }
}

/// An unknown id is not an error here: 200 with an empty body.
pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.store().get(id).await {
        Ok(Some(item)) => (StatusCode::OK, Json(item)).into_response(),
        Ok(None) => {
            tracing::debug!(item_id = %id, "get: no such item");
            dto::empty_ok()
        }
        Err(e) => errors::store_error_to_response("get_item", e),
    }
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ItemRequest>,
) -> axum::response::Response {
    let item = match services.store().create(body).await {
        Ok(item) => item,
        Err(e) => return errors::store_error_to_response("create_item", e),
    };

    (
        StatusCode::CREATED,
        [(header::LOCATION, dto::item_location(item.id))],
        Json(item),
    )
        .into_response()
}

/// Wholesale replace; fields missing from the body are cleared.
pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::ItemRequest>,
) -> axum::response::Response {
    let id = match dto::parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.store().update(id, body).await {
        Ok(Mutation::Applied) => StatusCode::NO_CONTENT.into_response(),
        Ok(Mutation::NotFound) => {
            tracing::debug!(item_id = %id, "update: no such item");
            errors::not_found("item not found")
        }
        Err(e) => errors::store_error_to_response("update_item", e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.store().delete(id).await {
        Ok(Mutation::Applied) => StatusCode::OK.into_response(),
        Ok(Mutation::NotFound) => {
            tracing::debug!(item_id = %id, "delete: no such item");
            errors::not_found("item not found")
        }
        Err(e) => errors::store_error_to_response("delete_item", e),
    }
}
