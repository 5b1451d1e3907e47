//! Positional split of a phone number into calling code, area code and
//! subscriber number, driven by the per-country template table.
//!
//! This is a fixed-width heuristic, not a numbering-plan parser.

use crate::models::NumberComponents;
use crate::reference_data::{number_template, CountryNumberTemplate, UNKNOWN};

const DEFAULT_AREA_DIGITS: usize = 3;
const DEFAULT_SUBSCRIBER_DIGITS: usize = 7;

/// Template for `country_code`, synthesized with default widths when the
/// table has no entry. The synthesized calling code is the country code
/// itself.
pub fn template_for(country_code: &str) -> CountryNumberTemplate {
    number_template(country_code).unwrap_or_else(|| CountryNumberTemplate {
        calling_code: country_code.to_string(),
        area_digits: DEFAULT_AREA_DIGITS,
        subscriber_digits: DEFAULT_SUBSCRIBER_DIGITS,
    })
}

pub fn parse_components(number: &str, country_code: &str) -> NumberComponents {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    let template = template_for(country_code);

    let national = digits
        .strip_prefix(template.calling_code.as_str())
        .unwrap_or(&digits);

    let split_at = template.area_digits.min(national.len());
    let (area, subscriber) = national.split_at(split_at);

    let national_format = if area.is_empty() {
        subscriber.to_string()
    } else {
        format!("{}-{}", area, subscriber)
    };

    NumberComponents {
        calling_code: template.calling_code.clone(),
        area_code: or_unknown(area),
        subscriber_number: or_unknown(subscriber),
        national_format,
        international_format: format!("+{} {}-{}", template.calling_code, area, subscriber),
        area_code_length: if area.is_empty() {
            UNKNOWN.to_string()
        } else {
            format!("{} Digit", area.len())
        },
    }
}

fn or_unknown(slice: &str) -> String {
    if slice.is_empty() {
        UNKNOWN.to_string()
    } else {
        slice.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_number() {
        let parts = parse_components("+14155552671", "US");
        assert_eq!(parts.calling_code, "1");
        assert_eq!(parts.area_code, "415");
        assert_eq!(parts.subscriber_number, "5552671");
        assert_eq!(parts.national_format, "415-5552671");
        assert_eq!(parts.international_format, "+1 415-5552671");
        assert_eq!(parts.area_code_length, "3 Digit");
    }

    #[test]
    fn test_gb_uses_four_digit_area() {
        let parts = parse_components("+442071838750", "GB");
        assert_eq!(parts.calling_code, "44");
        assert_eq!(parts.area_code, "2071");
        assert_eq!(parts.subscriber_number, "838750");
        assert_eq!(parts.area_code_length, "4 Digit");
    }

    #[test]
    fn test_unlisted_country_synthesizes_template() {
        let parts = parse_components("+27215551234", "ZA");
        assert_eq!(parts.calling_code, "ZA");
        // Letters never prefix a digit string, so nothing is stripped
        assert_eq!(parts.area_code, "272");
        assert_eq!(parts.subscriber_number, "15551234");
        assert_eq!(parts.international_format, "+ZA 272-15551234");
    }

    #[test]
    fn test_number_without_calling_code_prefix() {
        let parts = parse_components("+4155552671", "BR");
        assert_eq!(parts.area_code, "41");
        assert_eq!(parts.subscriber_number, "55552671");
    }

    #[test]
    fn test_empty_slices_become_unknown() {
        let parts = parse_components("+1", "US");
        assert_eq!(parts.area_code, UNKNOWN);
        assert_eq!(parts.subscriber_number, UNKNOWN);
        assert_eq!(parts.area_code_length, UNKNOWN);
        assert_eq!(parts.national_format, "");

        let short = parse_components("+141", "US");
        assert_eq!(short.area_code, "41");
        assert_eq!(short.subscriber_number, UNKNOWN);
        assert_eq!(short.national_format, "41-");
    }
}
