use axum::{
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{self, AppState};

/// Route serving the API description.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.yml";

/// API description compiled into the binary so docs work regardless of working directory.
const OPENAPI_YAML: &str = include_str!("../openapi.yml");

async fn serve_openapi_spec() -> impl IntoResponse {
    (
        [(axum::http::header::CONTENT_TYPE, "text/yaml")],
        OPENAPI_YAML,
    )
}

/// Minimal Swagger UI page loading the bundle from unpkg.
async fn serve_swagger_ui() -> impl IntoResponse {
    Html(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Contact Intake API docs</title>
<link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
<div id="swagger-ui"></div>
<script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
<script>SwaggerUIBundle({{ url: "{}", dom_id: "#swagger-ui" }});</script>
</body>
</html>"##,
        OPENAPI_PATH
    ))
}

/// Builds the full router: contact endpoint, health check, docs, tracing and CORS.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/docs", get(serve_swagger_ui))
        .route(OPENAPI_PATH, get(serve_openapi_spec))
        .route("/api/contact", post(handlers::submit_contact))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // The static site may be served from a different origin than the API
                .layer(CorsLayer::permissive()),
        )
}
