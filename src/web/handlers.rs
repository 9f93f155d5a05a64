//! HTTP handlers for the landing page and the scrape endpoint.

use crate::metrics::{encode_text, text_content_type};
use crate::web::router::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, error};

/// Run a fresh gather and render it in the text exposition format.
pub async fn metrics(State(state): State<AppState>) -> Response {
    let families = state.registry.gather().await;
    debug!(families = families.len(), "gathered metric families");

    match encode_text(&families) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, text_content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Static landing page linking to the metrics path.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(landing_page(&state.metrics_path))
}

fn landing_page(metrics_path: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>DigitalOcean Exporter</title>
</head>
<body>
    <h1>DigitalOcean Exporter</h1>
    <p><a href="{path}">Metrics</a></p>
</body>
</html>
"#,
        path = metrics_path
    )
}
