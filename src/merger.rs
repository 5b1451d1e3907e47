//! Assembly of the canonical report from normalized provider records,
//! reference data and derived number components.
//!
//! Field precedence, highest first: enrichment provider, primary provider,
//! derived value, `"Unknown"`. A synthetic primary record is ignored when
//! enrichment data is present.

use crate::components::parse_components;
use crate::models::{
    CountryInfo, DataQuality, Location, NumberComponentsView, PhoneDetails,
    PhoneIntelligenceReport, PrimaryRecord, ProviderData, ReportMetadata, RiskInfo,
    SecondaryRecord, ValidationInfo,
};
use crate::reference_data::{
    country_metadata, format_timezone_offset_at, timezone, LineType, UNKNOWN,
};
use crate::validation::PhoneNumber;
use chrono::{DateTime, Utc};

/// Country assumed when neither provider reports one.
pub const DEFAULT_COUNTRY_CODE: &str = "US";
pub const INTERNATIONAL_PREFIX: &str = "00 or +";

pub const SOURCE_PRIMARY: &str = "numverify";
pub const SOURCE_SECONDARY: &str = "abstract";
pub const SOURCE_FALLBACK: &str = "fallback";
pub const SOURCE_REFERENCE: &str = "reference_data";

/// First present value, else `default`.
fn first_of<'a, const N: usize>(candidates: [Option<&'a str>; N], default: &'a str) -> &'a str {
    candidates.into_iter().flatten().next().unwrap_or(default)
}

/// Build the report for one request. `now` fixes the instant used for the
/// timezone offset and the metadata timestamp.
pub fn merge(
    number: &PhoneNumber,
    primary: &ProviderData<PrimaryRecord>,
    secondary: Option<&SecondaryRecord>,
    now: DateTime<Utc>,
) -> PhoneIntelligenceReport {
    // A synthetic primary only stands in when nothing real is available
    let empty = PrimaryRecord::default();
    let p = match (primary, secondary) {
        (ProviderData::Degraded { .. }, Some(_)) => &empty,
        _ => primary.record(),
    };
    let s = secondary;

    let country_code = first_of(
        [
            s.and_then(|s| s.country_code.as_deref()),
            p.country_code.as_deref(),
        ],
        DEFAULT_COUNTRY_CODE,
    )
    .to_string();

    let country = country_metadata(&country_code);
    let zone = timezone(&country_code);
    let components = parse_components(&number.e164, &country_code);

    let line_type_raw = first_of(
        [
            s.and_then(|s| s.line_type.as_deref()),
            p.line_type.as_deref(),
        ],
        UNKNOWN,
    );
    let line_type = LineType::parse(line_type_raw);

    let phone_details = PhoneDetails {
        country: first_of(
            [
                s.and_then(|s| s.country_name.as_deref()),
                p.country_name.as_deref(),
            ],
            UNKNOWN,
        )
        .to_string(),
        country_code: country_code.clone(),
        location: Location {
            city: first_of(
                [s.and_then(|s| s.city.as_deref()), p.city.as_deref()],
                UNKNOWN,
            )
            .to_string(),
            region: first_of(
                [s.and_then(|s| s.region.as_deref()), p.region.as_deref()],
                UNKNOWN,
            )
            .to_string(),
        },
        carrier: first_of(
            [s.and_then(|s| s.carrier.as_deref()), p.carrier.as_deref()],
            UNKNOWN,
        )
        .to_string(),
        line_type: line_type_raw.to_string(),
        line_type_icon: line_type.icon().to_string(),
        line_type_label: line_type.label().to_string(),
        timezone: zone.to_string(),
        timezone_offset: format_timezone_offset_at(zone, now),
        international_prefix: INTERNATIONAL_PREFIX.to_string(),
        number_components: NumberComponentsView {
            national_format: first_of(
                [
                    s.and_then(|s| s.national_format.as_deref()),
                    p.local_format.as_deref(),
                ],
                &components.national_format,
            )
            .to_string(),
            international_format: first_of(
                [
                    s.and_then(|s| s.international_format.as_deref()),
                    p.international_format.as_deref(),
                ],
                &components.international_format,
            )
            .to_string(),
            area_code: components.area_code.clone(),
            subscriber_number: components.subscriber_number.clone(),
            area_code_length: components.area_code_length.clone(),
        },
    };

    let validation = ValidationInfo {
        is_valid: s.and_then(|s| s.is_valid).or(p.valid),
        line_status: first_of([s.and_then(|s| s.line_status.as_deref())], UNKNOWN).to_string(),
        is_voip: s.and_then(|s| s.is_voip),
    };

    let risk = RiskInfo {
        level: first_of([s.and_then(|s| s.risk_level.as_deref())], UNKNOWN).to_string(),
        is_disposable: s.and_then(|s| s.is_disposable),
        is_abuse_detected: s.and_then(|s| s.is_abuse_detected),
    };

    let primary_source = if primary.is_real() {
        SOURCE_PRIMARY
    } else {
        SOURCE_FALLBACK
    };
    let mut sources = vec![primary_source.to_string()];
    if secondary.is_some() {
        sources.push(SOURCE_SECONDARY.to_string());
    }
    sources.push(SOURCE_REFERENCE.to_string());

    PhoneIntelligenceReport {
        input_number: number.e164.clone(),
        flag: country.flag.to_string(),
        phone_details,
        country_info: CountryInfo {
            capital: country.capital.to_string(),
            languages: country.languages.to_string(),
            currency: country.currency.to_string(),
            emergency_numbers: country.emergency.to_string(),
        },
        validation,
        risk,
        breaches: s.and_then(|s| s.breaches.clone()),
        metadata: ReportMetadata {
            data_quality: if primary.is_real() {
                DataQuality::Real
            } else {
                DataQuality::Degraded
            },
            sources,
            timestamp: now,
        },
    }
}
