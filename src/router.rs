use crate::handlers::{self, AppState};
use crate::models::{
    BreachSummary, CountryInfo, DataQuality, ErrorBody, HealthResponse, Location,
    NumberComponentsView, PhoneDetails, PhoneIntelligenceReport, ReportMetadata, RiskInfo,
    ValidationInfo,
};
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// Lookups never take a body; anything bigger is rejected early.
const MAX_BODY_BYTES: usize = 10 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::phone_info, handlers::health),
    components(schemas(
        PhoneIntelligenceReport,
        PhoneDetails,
        Location,
        NumberComponentsView,
        CountryInfo,
        ValidationInfo,
        RiskInfo,
        BreachSummary,
        ReportMetadata,
        DataQuality,
        ErrorBody,
        HealthResponse
    )),
    info(title = "Phone Intelligence API")
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document.
async fn serve_openapi_spec() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Serves the Swagger UI HTML page.
///
/// The page loads the OpenAPI document served by `serve_openapi_spec`.
async fn serve_swagger_ui() -> impl IntoResponse {
    let html = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Phone Intelligence API - Swagger UI</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body { margin: 0; padding: 0; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: "/api-docs/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>
"#;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid allowed origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Build the application router.
///
/// The lookup route is rate limited per client IP when
/// `config.lookup_rate_limit` is set; the limiter needs connection info, so
/// serve with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn build_router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let lookup_routes: Router<Arc<AppState>> = Router::new().route(
        "/api/phone-info",
        get(handlers::phone_info).fallback(handlers::method_not_allowed),
    );

    let lookup_routes = match state.config.lookup_rate_limit {
        Some(limit) => {
            let governor_conf = Arc::new(
                GovernorConfigBuilder::default()
                    .per_second(limit.replenish_secs)
                    .burst_size(limit.burst)
                    .key_extractor(SmartIpKeyExtractor)
                    .finish()
                    .ok_or_else(|| anyhow::anyhow!("Invalid lookup rate limit settings"))?,
            );
            tracing::info!(
                "Lookup rate limit: burst {}, one request per {}s",
                limit.burst,
                limit.replenish_secs
            );
            lookup_routes.layer(GovernorLayer {
                config: governor_conf,
            })
        }
        None => lookup_routes,
    };

    let api_routes = lookup_routes.layer(SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate"),
    ));

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/docs", get(serve_swagger_ui))
        .route("/api-docs/openapi.json", get(serve_openapi_spec))
        .merge(api_routes)
        .fallback(handlers::not_found)
        .with_state(state.clone())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors_layer(&state.config.allowed_origins))
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_lookup_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert!(doc["paths"]["/api/phone-info"]["get"].is_object());
        assert!(doc["components"]["schemas"]["PhoneIntelligenceReport"].is_object());
    }
}
