//! Phone lookup pipeline shared by the HTTP handler and tests.
//!
//! One request runs strictly in sequence:
//! 1. Validate the raw input
//! 2. Primary provider with credential rotation (never fails)
//! 3. Optional enrichment provider (failures become "absent")
//! 4. Reference data, component parsing and merge

use crate::errors::AppError;
use crate::handlers::AppState;
use crate::merger::merge;
use crate::models::{PhoneIntelligenceReport, PrimaryRecord, ProviderData, SecondaryRecord};
use crate::retry::fetch_primary;
use crate::validation::{validate_phone_number, PhoneNumber};
use chrono::Utc;

/// Run the full lookup for `raw`.
///
/// Only invalid input (400) and, when enabled, an explicitly invalid
/// number (404) are errors; provider failures degrade the report instead.
pub async fn lookup_phone(
    state: &AppState,
    raw: Option<&str>,
) -> Result<PhoneIntelligenceReport, AppError> {
    let number = validate_phone_number(raw)?;
    tracing::info!("Looking up {}", number.e164);

    let primary = fetch_primary(&state.primary_keys, &state.numverify, &number).await;
    let secondary = fetch_secondary(state, &number).await;

    if state.config.reject_unverified_numbers && is_reported_invalid(&primary, secondary.as_ref())
    {
        tracing::info!("Primary provider reports {} as invalid", number.e164);
        return Err(AppError::NotFound(
            "The phone number is invalid or could not be found.".to_string(),
        ));
    }

    let report = merge(&number, &primary, secondary.as_ref(), Utc::now());

    tracing::info!(
        "Lookup complete for {}: quality={:?}, sources={:?}",
        report.input_number,
        report.metadata.data_quality,
        report.metadata.sources
    );

    Ok(report)
}

/// Query the enrichment provider if configured. Any failure is logged and
/// treated as no data.
pub async fn fetch_secondary(state: &AppState, number: &PhoneNumber) -> Option<SecondaryRecord> {
    let client = state.abstract_client.as_ref()?;

    match client.lookup(number).await {
        Ok(record) => {
            tracing::info!("Enrichment lookup succeeded for {}", number.e164);
            Some(record)
        }
        Err(e) => {
            tracing::warn!("Enrichment lookup failed for {}: {}", number.e164, e);
            None
        }
    }
}

/// The primary provider genuinely answered `valid: false` and nothing else
/// vouches for the number.
fn is_reported_invalid(
    primary: &ProviderData<PrimaryRecord>,
    secondary: Option<&SecondaryRecord>,
) -> bool {
    matches!(primary, ProviderData::Real(record) if record.valid == Some(false))
        && secondary.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DegradedReason;

    #[test]
    fn test_reported_invalid_requires_real_primary() {
        let invalid = ProviderData::Real(PrimaryRecord {
            valid: Some(false),
            ..PrimaryRecord::default()
        });
        assert!(is_reported_invalid(&invalid, None));
        assert!(!is_reported_invalid(
            &invalid,
            Some(&SecondaryRecord::default())
        ));

        let degraded = ProviderData::Degraded {
            record: PrimaryRecord {
                valid: Some(false),
                ..PrimaryRecord::default()
            },
            reason: DegradedReason::AllAttemptsFailed,
        };
        assert!(!is_reported_invalid(&degraded, None));

        let unknown = ProviderData::Real(PrimaryRecord::default());
        assert!(!is_reported_invalid(&unknown, None));
    }
}
