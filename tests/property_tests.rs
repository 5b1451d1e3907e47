/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
use chrono::{TimeZone, Utc};
use phone_intel_api::components::parse_components;
use phone_intel_api::credentials::{Credential, CredentialPool};
use phone_intel_api::merger::merge;
use phone_intel_api::models::{DegradedReason, PrimaryRecord, ProviderData};
use phone_intel_api::reference_data::UNKNOWN;
use phone_intel_api::retry::fallback_record;
use phone_intel_api::validation::validate_phone_number;
use proptest::prelude::*;

// Property: validation never panics and only accepts E.164
proptest! {
    #[test]
    fn phone_validation_never_panics(phone in "\\PC*") {
        let _ = validate_phone_number(Some(&phone));
    }

    #[test]
    fn accepted_numbers_are_e164(phone in "\\PC*") {
        if let Ok(number) = validate_phone_number(Some(&phone)) {
            prop_assert!(number.e164.starts_with('+'));
            let digits = &number.e164[1..];
            prop_assert!(digits.chars().all(|c| c.is_ascii_digit()));
            prop_assert!((10..=15).contains(&digits.len()));
        }
    }

    #[test]
    fn well_formed_numbers_accepted(digits in "[0-9]{10,15}") {
        let raw = format!("+{}", digits);
        let number = validate_phone_number(Some(&raw)).unwrap();
        prop_assert_eq!(number.e164, raw);
    }

    #[test]
    fn formatting_chars_are_ignored(
        area in 200u16..=999u16,
        exchange in 200u16..=999u16,
        line in 0u16..=9999u16,
        use_parens in proptest::bool::ANY,
        use_dash in proptest::bool::ANY
    ) {
        let area = if use_parens { format!("({})", area) } else { area.to_string() };
        let sep = if use_dash { "-" } else { " " };
        let raw = format!("+1 {} {}{}{:04}", area, exchange, sep, line);

        let number = validate_phone_number(Some(&raw)).unwrap();
        prop_assert_eq!(number.e164.len(), 12);
    }

    #[test]
    fn missing_plus_rejected(digits in "[0-9]{10,15}") {
        prop_assert!(validate_phone_number(Some(&digits)).is_err());
    }
}

// Property: component parsing never panics and is consistent
proptest! {
    #[test]
    fn component_parsing_never_panics(number in "\\PC*", country in "[A-Z]{0,3}") {
        let _ = parse_components(&number, &country);
    }

    #[test]
    fn components_reassemble_national_number(
        country in prop::sample::select(vec!["US", "GB", "DE", "FR", "BR", "IN", "JP", "ZZ"]),
        national in "[1-9][0-9]{6,11}"
    ) {
        let parts = parse_components(&format!("+{}", national), country);
        if parts.area_code != UNKNOWN && parts.subscriber_number != UNKNOWN {
            prop_assert_eq!(
                parts.national_format,
                format!("{}-{}", parts.area_code, parts.subscriber_number)
            );
            prop_assert_eq!(
                parts.area_code_length,
                format!("{} Digit", parts.area_code.len())
            );
        }
        prop_assert!(parts.international_format.starts_with('+'));
    }
}

// Property: rotation visits keys cyclically from any starting point
proptest! {
    #[test]
    fn pool_rotation_is_cyclic(size in 1usize..8, draws in 1usize..40) {
        let keys: Vec<Credential> = (0..size)
            .map(|i| Credential::new(format!("{:0>40}", i)))
            .collect();
        let pool = CredentialPool::new(keys.clone());

        for i in 0..draws {
            let served = pool.next().unwrap();
            prop_assert_eq!(served.expose(), keys[i % size].expose());
        }
        prop_assert_eq!(pool.served(), draws as u64);
    }
}

// Property: every textual report field is definite for any valid number
proptest! {
    #[test]
    fn degraded_report_fields_never_empty(digits in "[0-9]{10,15}", no_keys in proptest::bool::ANY) {
        let number = validate_phone_number(Some(&format!("+{}", digits))).unwrap();
        let reason = if no_keys {
            DegradedReason::NoCredentials
        } else {
            DegradedReason::AllAttemptsFailed
        };
        let primary: ProviderData<PrimaryRecord> = ProviderData::Degraded {
            record: fallback_record(reason),
            reason,
        };
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let report = merge(&number, &primary, None, now);
        let details = &report.phone_details;
        for field in [
            &details.country,
            &details.country_code,
            &details.location.city,
            &details.location.region,
            &details.carrier,
            &details.line_type,
            &details.timezone,
            &details.timezone_offset,
            &details.number_components.national_format,
            &details.number_components.area_code,
            &report.country_info.capital,
            &report.risk.level,
            &report.validation.line_status,
        ] {
            prop_assert!(!field.is_empty());
        }
        prop_assert!(report.breaches.is_none());
    }
}
