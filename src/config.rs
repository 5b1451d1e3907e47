use serde::Deserialize;
use std::fmt;

/// Public numverify-compatible validation endpoint.
pub const DEFAULT_NUMVERIFY_BASE_URL: &str = "https://apilayer.net/api/validate";
/// Public abstract-compatible phone intelligence endpoint.
pub const DEFAULT_ABSTRACT_API_URL: &str = "https://phoneintelligence.abstractapi.com/v1/";
/// Literal shipped in example env files; treated as "not configured".
pub const PLACEHOLDER_KEY: &str = "YOUR_API_KEY_HERE";

/// Per-IP limiter settings for the lookup endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateLimitConfig {
    /// Seconds needed to replenish one request token.
    pub replenish_secs: u64,
    /// Requests allowed in a burst.
    pub burst: u32,
}

#[derive(Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Raw comma-separated primary provider keys, filtered by `CredentialPool`.
    pub numverify_api_keys: String,
    pub abstract_api_key: Option<String>,
    pub numverify_base_url: String,
    pub abstract_api_url: String,
    pub provider_timeout_secs: u64,
    pub allowed_origins: Vec<String>,
    /// Answer 404 when the primary provider explicitly reports the number invalid.
    pub reject_unverified_numbers: bool,
    /// `None` disables the lookup rate limiter.
    pub lookup_rate_limit: Option<RateLimitConfig>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("numverify_api_keys", &"[REDACTED]")
            .field(
                "abstract_api_key",
                &self.abstract_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("numverify_base_url", &self.numverify_base_url)
            .field("abstract_api_url", &self.abstract_api_url)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("allowed_origins", &self.allowed_origins)
            .field("reject_unverified_numbers", &self.reject_unverified_numbers)
            .field("lookup_rate_limit", &self.lookup_rate_limit)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            numverify_api_keys: String::new(),
            abstract_api_key: None,
            numverify_base_url: DEFAULT_NUMVERIFY_BASE_URL.to_string(),
            abstract_api_url: DEFAULT_ABSTRACT_API_URL.to_string(),
            provider_timeout_secs: 8,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            reject_unverified_numbers: false,
            lookup_rate_limit: Some(RateLimitConfig {
                replenish_secs: 45,
                burst: 20,
            }),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            numverify_api_keys: std::env::var("NUMVERIFY_API_KEY").unwrap_or_default(),
            abstract_api_key: std::env::var("ABSTRACT_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty() && key != PLACEHOLDER_KEY),
            numverify_base_url: url_var("NUMVERIFY_BASE_URL", DEFAULT_NUMVERIFY_BASE_URL)?,
            abstract_api_url: url_var("ABSTRACT_API_URL", DEFAULT_ABSTRACT_API_URL)?,
            provider_timeout_secs: std::env::var("PROVIDER_TIMEOUT_SECS")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().parse::<u64>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("PROVIDER_TIMEOUT_SECS must be a whole number"))?
                .unwrap_or(defaults.provider_timeout_secs),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|s| split_list(&s))
                .filter(|origins| !origins.is_empty())
                .unwrap_or(defaults.allowed_origins),
            reject_unverified_numbers: match std::env::var("REJECT_UNVERIFIED_NUMBERS") {
                Ok(flag) => parse_flag(&flag).ok_or_else(|| {
                    anyhow::anyhow!("REJECT_UNVERIFIED_NUMBERS must be true or false")
                })?,
                Err(_) => defaults.reject_unverified_numbers,
            },
            lookup_rate_limit: rate_limit_from_env(defaults.lookup_rate_limit)?,
        };

        if config.provider_timeout_secs == 0 {
            anyhow::bail!("PROVIDER_TIMEOUT_SECS must be greater than zero");
        }

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Numverify URL: {}", config.numverify_base_url);
        tracing::debug!("Abstract URL: {}", config.abstract_api_url);
        tracing::debug!(
            "Enrichment provider configured: {}",
            config.abstract_api_key.is_some()
        );
        tracing::debug!("Allowed origins: {:?}", config.allowed_origins);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

fn url_var(name: &str, default: &str) -> anyhow::Result<String> {
    let value = std::env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string());

    let parsed = url::Url::parse(&value)
        .map_err(|e| anyhow::anyhow!("{} is not a valid URL: {}", name, e))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("{} must start with http:// or https://", name);
    }
    Ok(value)
}

fn rate_limit_from_env(
    default: Option<RateLimitConfig>,
) -> anyhow::Result<Option<RateLimitConfig>> {
    let Some(default) = default else {
        return Ok(None);
    };

    let burst: u32 = match std::env::var("LOOKUP_RATE_BURST") {
        Ok(v) => v
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("LOOKUP_RATE_BURST must be a whole number"))?,
        Err(_) => default.burst,
    };
    let replenish_secs: u64 = match std::env::var("LOOKUP_RATE_REPLENISH_SECS") {
        Ok(v) => v
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("LOOKUP_RATE_REPLENISH_SECS must be a whole number"))?,
        Err(_) => default.replenish_secs,
    };

    // A zero burst switches the limiter off
    if burst == 0 {
        return Ok(None);
    }
    if replenish_secs == 0 {
        anyhow::bail!("LOOKUP_RATE_REPLENISH_SECS must be greater than zero");
    }

    Ok(Some(RateLimitConfig {
        replenish_secs,
        burst,
    }))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
