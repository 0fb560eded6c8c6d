use axum::{http::StatusCode, response::Html};

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// `GET /`: the dashboard page. It renders client-side from the JSON endpoints.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
