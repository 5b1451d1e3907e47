//! Wire payloads of the upstream providers and their adapters into the
//! normalized records used by the merger.

use crate::models::{BreachSummary, PrimaryRecord, SecondaryRecord};
use serde::{Deserialize, Serialize};

/// Numverify-style validation response.
///
/// Error responses carry `success: false` plus an `error` object and none
/// of the data fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NumverifyResponse {
    pub success: Option<bool>,
    pub error: Option<NumverifyError>,
    pub valid: Option<bool>,
    pub number: Option<String>,
    pub local_format: Option<String>,
    pub international_format: Option<String>,
    pub country_prefix: Option<String>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    /// City-level location string.
    pub location: Option<String>,
    pub region: Option<String>,
    pub carrier: Option<String>,
    pub line_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NumverifyError {
    pub code: Option<i64>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub info: Option<String>,
}

impl NumverifyResponse {
    /// Explicitly flagged unsuccessful by the provider.
    pub fn is_rejected(&self) -> bool {
        self.success == Some(false)
    }

    /// Human-readable reason for a rejected call.
    pub fn rejection_reason(&self) -> String {
        self.error
            .as_ref()
            .and_then(|e| e.info.clone().or_else(|| e.type_.clone()))
            .unwrap_or_else(|| "success=false".to_string())
    }
}

impl From<NumverifyResponse> for PrimaryRecord {
    fn from(raw: NumverifyResponse) -> Self {
        PrimaryRecord {
            valid: raw.valid,
            country_name: non_empty(raw.country_name),
            country_code: non_empty(raw.country_code),
            carrier: non_empty(raw.carrier),
            line_type: non_empty(raw.line_type),
            city: non_empty(raw.location),
            region: non_empty(raw.region),
            local_format: non_empty(raw.local_format),
            international_format: non_empty(raw.international_format),
        }
    }
}

/// Abstract-style phone intelligence response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AbstractResponse {
    pub phone_location: Option<AbstractLocation>,
    pub phone_carrier: Option<AbstractCarrier>,
    pub phone_format: Option<AbstractFormat>,
    pub phone_validation: Option<AbstractValidation>,
    pub phone_risk: Option<AbstractRisk>,
    pub phone_breaches: Option<AbstractBreaches>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AbstractLocation {
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AbstractCarrier {
    pub name: Option<String>,
    pub line_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AbstractFormat {
    pub national: Option<String>,
    pub international: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AbstractValidation {
    pub is_valid: Option<bool>,
    pub line_status: Option<String>,
    pub is_voip: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AbstractRisk {
    pub risk_level: Option<String>,
    pub is_disposable: Option<bool>,
    pub is_abuse_detected: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AbstractBreaches {
    pub total_breaches: Option<u64>,
    pub date_first_breached: Option<String>,
    pub date_last_breached: Option<String>,
}

impl From<AbstractResponse> for SecondaryRecord {
    fn from(raw: AbstractResponse) -> Self {
        let location = raw.phone_location.unwrap_or_default();
        let carrier = raw.phone_carrier.unwrap_or_default();
        let format = raw.phone_format.unwrap_or_default();
        let validation = raw.phone_validation.unwrap_or_default();
        let risk = raw.phone_risk.unwrap_or_default();

        SecondaryRecord {
            country_name: non_empty(location.country_name),
            country_code: non_empty(location.country_code),
            city: non_empty(location.city),
            region: non_empty(location.region),
            carrier: non_empty(carrier.name),
            line_type: non_empty(carrier.line_type),
            national_format: non_empty(format.national),
            international_format: non_empty(format.international),
            is_valid: validation.is_valid,
            line_status: non_empty(validation.line_status),
            is_voip: validation.is_voip,
            risk_level: non_empty(risk.risk_level),
            is_disposable: risk.is_disposable,
            is_abuse_detected: risk.is_abuse_detected,
            breaches: raw.phone_breaches.map(|b| BreachSummary {
                total_breaches: b.total_breaches,
                date_first_breached: non_empty(b.date_first_breached),
                date_last_breached: non_empty(b.date_last_breached),
            }),
        }
    }
}

/// Providers send `""` for unknown values; treat it as missing.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
