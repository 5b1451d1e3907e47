use crate::config::Config;
use crate::credentials::CredentialPool;
use crate::errors::AppError;
use crate::lookup::lookup_phone;
use crate::models::{ErrorBody, HealthResponse, PhoneInfoParams, PhoneIntelligenceReport};
use crate::providers::{build_http_client, AbstractClient, NumverifyClient};
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state injected into handlers.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Primary provider keys; the rotation cursor is shared by all requests.
    pub primary_keys: CredentialPool,
    /// Primary validation provider.
    pub numverify: NumverifyClient,
    /// Enrichment provider, `None` when no key is configured.
    pub abstract_client: Option<AbstractClient>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let http = build_http_client(Duration::from_secs(config.provider_timeout_secs))?;
        let primary_keys = CredentialPool::from_list(&config.numverify_api_keys);

        if primary_keys.is_empty() {
            tracing::warn!("NUMVERIFY_API_KEY not configured. Running in SIMULATION MODE only.");
        } else {
            tracing::info!(
                "✓ Loaded {} API key(s) for load balancing",
                primary_keys.len()
            );
        }

        let abstract_client = AbstractClient::from_config(&config, http.clone());
        if abstract_client.is_some() {
            tracing::info!("✓ Enrichment provider configured");
        }

        Ok(Self {
            numverify: NumverifyClient::new(&config, http),
            abstract_client,
            primary_keys,
            config,
        })
    }
}

/// Extract the `number` query parameter.
///
/// A literal `+` is kept as `+` instead of being decoded to a space, so
/// `?number=+14155552671` works unencoded. `%2B` is accepted too.
pub fn phone_info_params(raw_query: Option<&str>) -> PhoneInfoParams {
    let Some(query) = raw_query else {
        return PhoneInfoParams::default();
    };

    let escaped = query.replace('+', "%2B");
    let number = url::form_urlencoded::parse(escaped.as_bytes())
        .find(|(key, _)| key == "number")
        .map(|(_, value)| value.into_owned());

    PhoneInfoParams { number }
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            primary_keys: state.primary_keys.len(),
            keys_served: state.primary_keys.served(),
            enrichment_enabled: state.abstract_client.is_some(),
        }),
    )
}

/// GET /api/phone-info?number=<E.164>
///
/// Returns the canonical intelligence report. Provider outages degrade the
/// data but still answer 200.
#[utoipa::path(
    get,
    path = "/api/phone-info",
    params(("number" = String, Query, description = "Phone number in E.164 form, e.g. +14155552671")),
    responses(
        (status = 200, description = "Report assembled", body = PhoneIntelligenceReport),
        (status = 400, description = "Missing or malformed number", body = ErrorBody),
        (status = 404, description = "Provider reports the number invalid", body = ErrorBody),
        (status = 429, description = "Rate limited"),
        (status = 500, description = "Unexpected failure", body = ErrorBody)
    )
)]
pub async fn phone_info(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<PhoneIntelligenceReport>, AppError> {
    let params = phone_info_params(query.as_deref());
    tracing::info!("GET /api/phone-info");

    let report = lookup_phone(&state, params.number.as_deref()).await?;
    Ok(Json(report))
}

pub async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            error: "Method not allowed".to_string(),
        }),
    )
}

pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Resource not found".to_string(),
        }),
    )
}
