use axum::http::StatusCode;

pub async fn hello() -> &'static str {
    "Hello World!"
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
