//! Credential-rotating retry loop around the primary provider.

use crate::credentials::CredentialPool;
use crate::models::{DegradedReason, PrimaryRecord, ProviderData};
use crate::providers::NumverifyClient;
use crate::validation::PhoneNumber;

/// Upper bound on credentials tried per request.
pub const MAX_ATTEMPTS: usize = 3;

/// Carrier shown when no primary credentials are configured.
pub const SIMULATED_CARRIER: &str = "Simulated Carrier";
/// Carrier shown when every attempted credential failed.
pub const UNAVAILABLE_CARRIER: &str = "Carrier Lookup Unavailable";

/// Synthetic record standing in for primary provider data.
pub fn fallback_record(reason: DegradedReason) -> PrimaryRecord {
    let carrier = match reason {
        DegradedReason::NoCredentials => SIMULATED_CARRIER,
        DegradedReason::AllAttemptsFailed => UNAVAILABLE_CARRIER,
    };

    PrimaryRecord {
        valid: Some(true),
        country_name: Some("United States".to_string()),
        country_code: Some("US".to_string()),
        carrier: Some(carrier.to_string()),
        line_type: Some("mobile".to_string()),
        ..PrimaryRecord::default()
    }
}

/// Query the primary provider, rotating through up to `min(pool, 3)`
/// credentials.
///
/// The first structurally successful response wins, whatever its content.
/// Never fails: exhaustion or an empty pool yields a degraded record.
pub async fn fetch_primary(
    pool: &CredentialPool,
    client: &NumverifyClient,
    number: &PhoneNumber,
) -> ProviderData<PrimaryRecord> {
    if pool.is_empty() {
        tracing::info!("No primary API keys configured, using simulated record");
        return degraded(DegradedReason::NoCredentials);
    }

    let attempts = pool.len().min(MAX_ATTEMPTS);
    for attempt in 1..=attempts {
        let Some(credential) = pool.next() else {
            break;
        };

        match client.validate(&credential, number).await {
            Ok(record) => {
                tracing::info!(
                    "Primary lookup succeeded on attempt {}/{} with {}",
                    attempt,
                    attempts,
                    credential
                );
                return ProviderData::Real(record);
            }
            Err(e) => {
                tracing::warn!(
                    "Primary lookup attempt {}/{} with {} failed: {}",
                    attempt,
                    attempts,
                    credential,
                    e
                );
            }
        }
    }

    tracing::warn!("All primary API keys failed, using fallback record");
    degraded(DegradedReason::AllAttemptsFailed)
}

fn degraded(reason: DegradedReason) -> ProviderData<PrimaryRecord> {
    ProviderData::Degraded {
        record: fallback_record(reason),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_records_differ_only_in_carrier() {
        let none = fallback_record(DegradedReason::NoCredentials);
        let failed = fallback_record(DegradedReason::AllAttemptsFailed);

        assert_eq!(none.carrier.as_deref(), Some(SIMULATED_CARRIER));
        assert_eq!(failed.carrier.as_deref(), Some(UNAVAILABLE_CARRIER));
        assert_eq!(none.country_code, failed.country_code);
        assert_eq!(none.country_code.as_deref(), Some("US"));
        assert_eq!(none.valid, Some(true));
    }
}
