use crate::config::Config;
use crate::credentials::Credential;
use crate::errors::{AppError, ProviderError};
use crate::models::{PrimaryRecord, SecondaryRecord};
use crate::provider_models::{AbstractResponse, NumverifyResponse};
use crate::validation::PhoneNumber;
use reqwest::{header, Client};
use std::time::Duration;

const USER_AGENT: &str = "PhoneSint/1.0";

/// Build the HTTP client shared by both providers.
///
/// Every request is bounded by `timeout`, and redirects are not followed so
/// a 3xx counts as a failed call.
pub fn build_http_client(timeout: Duration) -> Result<Client, AppError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to create HTTP client: {}", e)))
}

// ============ Primary: numverify-style validation API ============

/// Client for the primary validation provider. Issues exactly one request
/// per call; rotation lives in [`crate::retry`].
#[derive(Clone)]
pub struct NumverifyClient {
    client: Client,
    base_url: String,
}

impl NumverifyClient {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            base_url: config.numverify_base_url.clone(),
        }
    }

    /// Validate `number` using one credential.
    ///
    /// Transport errors, non-2xx answers, undecodable bodies and bodies with
    /// `success: false` are all errors.
    pub async fn validate(
        &self,
        credential: &Credential,
        number: &PhoneNumber,
    ) -> Result<PrimaryRecord, ProviderError> {
        // Build URL with proper parameter encoding to prevent injection attacks
        let url = reqwest::Url::parse_with_params(
            &self.base_url,
            &[
                ("access_key", credential.expose()),
                ("number", number.e164.as_str()),
                ("format", "1"),
            ],
        )
        .map_err(|e| ProviderError::Malformed(format!("Failed to build URL: {}", e)))?;

        // Redact key from logs to prevent credential exposure
        tracing::debug!(
            "Numverify URL: {}?access_key=[REDACTED]&number={}&format=1 ({})",
            self.base_url,
            number.e164,
            credential
        );

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let payload: NumverifyResponse = response.json().await?;
        if payload.is_rejected() {
            return Err(ProviderError::Rejected(payload.rejection_reason()));
        }

        Ok(PrimaryRecord::from(payload))
    }
}

// ============ Secondary: abstract-style intelligence API ============

/// Client for the optional enrichment provider. Single key, no retry.
#[derive(Clone)]
pub struct AbstractClient {
    client: Client,
    base_url: String,
    api_key: Credential,
}

impl AbstractClient {
    /// `None` when no enrichment key is configured.
    pub fn from_config(config: &Config, client: Client) -> Option<Self> {
        let api_key = config.abstract_api_key.as_ref()?;
        Some(Self {
            client,
            base_url: config.abstract_api_url.clone(),
            api_key: Credential::new(api_key.clone()),
        })
    }

    pub async fn lookup(&self, number: &PhoneNumber) -> Result<SecondaryRecord, ProviderError> {
        // This provider expects the number without the leading `+`
        let url = reqwest::Url::parse_with_params(
            &self.base_url,
            &[
                ("api_key", self.api_key.expose()),
                ("phone", number.digits()),
            ],
        )
        .map_err(|e| ProviderError::Malformed(format!("Failed to build URL: {}", e)))?;

        tracing::debug!(
            "Abstract URL: {}?api_key=[REDACTED]&phone={}",
            self.base_url,
            number.digits()
        );

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let payload: AbstractResponse = response.json().await?;
        Ok(SecondaryRecord::from(payload))
    }
}
