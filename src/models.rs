use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============ Normalized Provider Records ============

/// Primary validation provider output after adaptation.
///
/// Every field is optional because providers omit or null them freely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryRecord {
    pub valid: Option<bool>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub carrier: Option<String>,
    pub line_type: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub local_format: Option<String>,
    pub international_format: Option<String>,
}

/// Enrichment provider output after adaptation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecondaryRecord {
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub carrier: Option<String>,
    pub line_type: Option<String>,
    pub national_format: Option<String>,
    pub international_format: Option<String>,
    pub is_valid: Option<bool>,
    pub line_status: Option<String>,
    pub is_voip: Option<bool>,
    pub risk_level: Option<String>,
    pub is_disposable: Option<bool>,
    pub is_abuse_detected: Option<bool>,
    pub breaches: Option<BreachSummary>,
}

/// Why a record is synthetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedReason {
    /// No primary credentials configured.
    NoCredentials,
    /// Every attempted credential failed.
    AllAttemptsFailed,
}

/// Provider output tagged with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderData<T> {
    /// Returned by the provider.
    Real(T),
    /// Synthetic placeholder standing in for provider data.
    Degraded { record: T, reason: DegradedReason },
}

impl<T> ProviderData<T> {
    pub fn record(&self) -> &T {
        match self {
            ProviderData::Real(record) => record,
            ProviderData::Degraded { record, .. } => record,
        }
    }

    pub fn is_real(&self) -> bool {
        matches!(self, ProviderData::Real(_))
    }

    pub fn degraded_reason(&self) -> Option<DegradedReason> {
        match self {
            ProviderData::Real(_) => None,
            ProviderData::Degraded { reason, .. } => Some(*reason),
        }
    }
}

/// Derived national-format pieces of a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberComponents {
    pub calling_code: String,
    pub area_code: String,
    pub subscriber_number: String,
    pub national_format: String,
    pub international_format: String,
    pub area_code_length: String,
}

// ============ Canonical Report ============

/// Canonical response returned by `GET /api/phone-info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhoneIntelligenceReport {
    /// Cleaned E.164 input.
    pub input_number: String,
    /// Flag glyph of the resolved country.
    pub flag: String,
    pub phone_details: PhoneDetails,
    pub country_info: CountryInfo,
    pub validation: ValidationInfo,
    pub risk: RiskInfo,
    /// Present only when the enrichment provider supplied breach data.
    pub breaches: Option<BreachSummary>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhoneDetails {
    pub country: String,
    pub country_code: String,
    pub location: Location,
    pub carrier: String,
    pub line_type: String,
    pub line_type_icon: String,
    pub line_type_label: String,
    pub timezone: String,
    pub timezone_offset: String,
    pub international_prefix: String,
    pub number_components: NumberComponentsView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub city: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumberComponentsView {
    pub national_format: String,
    pub international_format: String,
    pub area_code: String,
    pub subscriber_number: String,
    pub area_code_length: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountryInfo {
    pub capital: String,
    pub languages: String,
    pub currency: String,
    pub emergency_numbers: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationInfo {
    pub is_valid: Option<bool>,
    pub line_status: String,
    pub is_voip: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskInfo {
    pub level: String,
    pub is_disposable: Option<bool>,
    pub is_abuse_detected: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BreachSummary {
    pub total_breaches: Option<u64>,
    pub date_first_breached: Option<String>,
    pub date_last_breached: Option<String>,
}

/// Whether the report is backed by provider data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataQuality {
    Real,
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub data_quality: DataQuality,
    /// Providers that contributed data, e.g. `["numverify", "abstract"]`.
    pub sources: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Query parameters of the lookup endpoint.
#[derive(Debug, Clone, Default)]
pub struct PhoneInfoParams {
    pub number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub primary_keys: usize,
    pub keys_served: u64,
    pub enrichment_enabled: bool,
}
