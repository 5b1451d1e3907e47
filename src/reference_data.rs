//! Bundled reference tables: country metadata, timezones, line types and
//! national number templates. All lookups are pure.

use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;

pub const UNKNOWN: &str = "Unknown";
pub const GENERIC_FLAG: &str = "🏳️";

/// Static facts about a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryMetadata {
    pub flag: &'static str,
    pub currency: &'static str,
    pub emergency: &'static str,
    pub capital: &'static str,
    pub languages: &'static str,
}

const FALLBACK_COUNTRY: CountryMetadata = CountryMetadata {
    flag: GENERIC_FLAG,
    currency: UNKNOWN,
    emergency: UNKNOWN,
    capital: UNKNOWN,
    languages: UNKNOWN,
};

macro_rules! country {
    ($code:literal, $flag:literal, $currency:literal, $emergency:literal, $capital:literal, $languages:literal) => {
        (
            $code,
            CountryMetadata {
                flag: $flag,
                currency: $currency,
                emergency: $emergency,
                capital: $capital,
                languages: $languages,
            },
        )
    };
}

static COUNTRIES: &[(&str, CountryMetadata)] = &[
    country!("US", "🇺🇸", "USD ($)", "911", "Washington D.C.", "English"),
    country!("CA", "🇨🇦", "CAD ($)", "911", "Ottawa", "English, French"),
    country!("GB", "🇬🇧", "GBP (£)", "999, 112", "London", "English"),
    country!("DE", "🇩🇪", "EUR (€)", "112", "Berlin", "German"),
    country!("FR", "🇫🇷", "EUR (€)", "112", "Paris", "French"),
    country!("IT", "🇮🇹", "EUR (€)", "112", "Rome", "Italian"),
    country!("ES", "🇪🇸", "EUR (€)", "112", "Madrid", "Spanish"),
    country!("AU", "🇦🇺", "AUD ($)", "000", "Canberra", "English"),
    country!("NZ", "🇳🇿", "NZD ($)", "111", "Wellington", "English, Māori"),
    country!("JP", "🇯🇵", "JPY (¥)", "110, 119", "Tokyo", "Japanese"),
    country!("CN", "🇨🇳", "CNY (¥)", "110, 120, 119", "Beijing", "Chinese"),
    country!("IN", "🇮🇳", "INR (₹)", "112", "New Delhi", "Hindi, English"),
    country!("BR", "🇧🇷", "BRL (R$)", "190, 192, 193", "Brasília", "Portuguese"),
    country!("MX", "🇲🇽", "MXN ($)", "911", "Mexico City", "Spanish"),
    country!("RU", "🇷🇺", "RUB (₽)", "102, 103, 104", "Moscow", "Russian"),
    country!("NP", "🇳🇵", "NPR (Rs)", "100, 102, 103", "Kathmandu", "Nepali"),
    country!("PK", "🇵🇰", "PKR (Rs)", "15, 16, 115", "Islamabad", "Urdu, English"),
    country!("BD", "🇧🇩", "BDT (৳)", "999", "Dhaka", "Bengali"),
    country!("SG", "🇸🇬", "SGD ($)", "999", "Singapore", "English, Malay, Chinese, Tamil"),
    country!("MY", "🇲🇾", "MYR (RM)", "999", "Kuala Lumpur", "Malay, English"),
    country!("TH", "🇹🇭", "THB (฿)", "191", "Bangkok", "Thai"),
    country!("PH", "🇵🇭", "PHP (₱)", "911", "Manila", "Filipino, English"),
    country!("ID", "🇮🇩", "IDR (Rp)", "110, 118, 119", "Jakarta", "Indonesian"),
    country!("VN", "🇻🇳", "VND (₫)", "113, 114, 115", "Hanoi", "Vietnamese"),
    country!("KR", "🇰🇷", "KRW (₩)", "112, 119", "Seoul", "Korean"),
    country!("ZA", "🇿🇦", "ZAR (R)", "10111, 10177", "Pretoria", "Afrikaans, English, Zulu"),
    country!("AE", "🇦🇪", "AED (د.إ)", "999", "Abu Dhabi", "Arabic"),
    country!("SA", "🇸🇦", "SAR (ر.س)", "999", "Riyadh", "Arabic"),
    country!("TR", "🇹🇷", "TRY (₺)", "112", "Ankara", "Turkish"),
    country!("NL", "🇳🇱", "EUR (€)", "112", "Amsterdam", "Dutch"),
    country!("BE", "🇧🇪", "EUR (€)", "112", "Brussels", "Dutch, French, German"),
    country!("CH", "🇨🇭", "CHF (Fr)", "117, 118, 144", "Bern", "German, French, Italian"),
    country!("SE", "🇸🇪", "SEK (kr)", "112", "Stockholm", "Swedish"),
    country!("NO", "🇳🇴", "NOK (kr)", "110, 112, 113", "Oslo", "Norwegian"),
    country!("DK", "🇩🇰", "DKK (kr)", "112", "Copenhagen", "Danish"),
    country!("FI", "🇫🇮", "EUR (€)", "112", "Helsinki", "Finnish, Swedish"),
    country!("PL", "🇵🇱", "PLN (zł)", "112", "Warsaw", "Polish"),
    country!("AT", "🇦🇹", "EUR (€)", "122, 133, 144", "Vienna", "German"),
    country!("GR", "🇬🇷", "EUR (€)", "100, 166, 199", "Athens", "Greek"),
    country!("PT", "🇵🇹", "EUR (€)", "112", "Lisbon", "Portuguese"),
    country!("IE", "🇮🇪", "EUR (€)", "999, 112", "Dublin", "Irish, English"),
    country!("AR", "🇦🇷", "ARS ($)", "911", "Buenos Aires", "Spanish"),
    country!("CL", "🇨🇱", "CLP ($)", "133", "Santiago", "Spanish"),
    country!("CO", "🇨🇴", "COP ($)", "123", "Bogotá", "Spanish"),
    country!("PE", "🇵🇪", "PEN (S/.)", "105", "Lima", "Spanish"),
    country!("EG", "🇪🇬", "EGP (£)", "122", "Cairo", "Arabic"),
    country!("NG", "🇳🇬", "NGN (₦)", "112", "Abuja", "English"),
    country!("KE", "🇰🇪", "KES (KSh)", "999, 112", "Nairobi", "Swahili, English"),
    country!("GH", "🇬🇭", "GHS (₵)", "191, 193, 195", "Accra", "English"),
    country!("IL", "🇮🇱", "ILS (₪)", "100, 101, 102", "Jerusalem", "Hebrew, Arabic"),
    country!("HK", "🇭🇰", "HKD ($)", "999", "Hong Kong", "Chinese, English"),
    country!("TW", "🇹🇼", "TWD (NT$)", "110, 119", "Taipei", "Chinese"),
];

static TIMEZONES: &[(&str, &[&str])] = &[
    (
        "US",
        &[
            "America/New_York",
            "America/Chicago",
            "America/Denver",
            "America/Los_Angeles",
        ],
    ),
    ("GB", &["Europe/London"]),
    ("DE", &["Europe/Berlin"]),
    ("FR", &["Europe/Paris"]),
    ("CA", &["America/Toronto", "America/Vancouver"]),
    ("AU", &["Australia/Sydney", "Australia/Melbourne"]),
    ("NP", &["Asia/Kathmandu"]),
    ("IN", &["Asia/Kolkata"]),
    ("CN", &["Asia/Shanghai"]),
    ("JP", &["Asia/Tokyo"]),
    ("BR", &["America/Sao_Paulo"]),
    ("MX", &["America/Mexico_City"]),
    ("RU", &["Europe/Moscow"]),
    ("IT", &["Europe/Rome"]),
    ("ES", &["Europe/Madrid"]),
];

/// Fixed-width national numbering layout for a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryNumberTemplate {
    pub calling_code: String,
    pub area_digits: usize,
    pub subscriber_digits: usize,
}

static NUMBER_TEMPLATES: &[(&str, &str, usize, usize)] = &[
    ("US", "1", 3, 7),
    ("CA", "1", 3, 7),
    ("GB", "44", 4, 6),
    ("DE", "49", 3, 7),
    ("FR", "33", 1, 8),
    ("NP", "977", 3, 7),
    ("IN", "91", 4, 6),
    ("CN", "86", 3, 8),
    ("JP", "81", 3, 8),
    ("AU", "61", 2, 8),
    ("BR", "55", 2, 9),
    ("MX", "52", 3, 7),
    ("RU", "7", 3, 7),
    ("IT", "39", 3, 7),
    ("ES", "34", 3, 6),
];

/// Closed taxonomy of line types reported by providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Mobile,
    Landline,
    Voip,
    TollFree,
    PremiumRate,
    SharedCost,
    PersonalNumber,
    Pager,
    Uan,
    Voicemail,
    SpecialServices,
    Unknown,
}

impl LineType {
    /// Case-insensitive parse; anything unrecognized is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mobile" => LineType::Mobile,
            "landline" => LineType::Landline,
            "voip" => LineType::Voip,
            "toll_free" => LineType::TollFree,
            "premium_rate" => LineType::PremiumRate,
            "shared_cost" => LineType::SharedCost,
            "personal_number" => LineType::PersonalNumber,
            "pager" => LineType::Pager,
            "uan" => LineType::Uan,
            "voicemail" => LineType::Voicemail,
            "special_services" => LineType::SpecialServices,
            _ => LineType::Unknown,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            LineType::Mobile => "📱",
            LineType::Landline => "📞",
            LineType::Voip => "🌐",
            LineType::TollFree => "🆓",
            LineType::PremiumRate => "💰",
            LineType::SharedCost => "💵",
            LineType::PersonalNumber => "👤",
            LineType::Pager => "📟",
            LineType::Uan => "🏢",
            LineType::Voicemail => "📬",
            LineType::SpecialServices => "⚙️",
            LineType::Unknown => "❓",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LineType::Mobile => "Mobile",
            LineType::Landline => "Landline",
            LineType::Voip => "VoIP",
            LineType::TollFree => "Toll-Free",
            LineType::PremiumRate => "Premium Rate",
            LineType::SharedCost => "Shared Cost",
            LineType::PersonalNumber => "Personal Number",
            LineType::Pager => "Pager",
            LineType::Uan => "UAN",
            LineType::Voicemail => "Voicemail",
            LineType::SpecialServices => "Special Services",
            LineType::Unknown => UNKNOWN,
        }
    }
}

/// Country metadata, or the generic fallback for unlisted codes.
pub fn country_metadata(country_code: &str) -> CountryMetadata {
    COUNTRIES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(country_code))
        .map(|(_, meta)| *meta)
        .unwrap_or(FALLBACK_COUNTRY)
}

/// All zones listed for a country, representative zone first.
pub fn timezones(country_code: &str) -> &'static [&'static str] {
    TIMEZONES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(country_code))
        .map(|(_, zones)| *zones)
        .unwrap_or(&[])
}

/// Representative zone for a country, or `"Unknown"`.
pub fn timezone(country_code: &str) -> &'static str {
    timezones(country_code).first().copied().unwrap_or(UNKNOWN)
}

/// Template for a country; `None` when the table has no entry.
pub fn number_template(country_code: &str) -> Option<CountryNumberTemplate> {
    NUMBER_TEMPLATES
        .iter()
        .find(|(code, ..)| code.eq_ignore_ascii_case(country_code))
        .map(|(_, calling, area, subscriber)| CountryNumberTemplate {
            calling_code: calling.to_string(),
            area_digits: *area,
            subscriber_digits: *subscriber,
        })
}

/// Current UTC offset of `zone`, e.g. `UTC-7`, `UTC+5:45`, `UTC+0`.
pub fn format_timezone_offset(zone: &str) -> String {
    format_timezone_offset_at(zone, Utc::now())
}

/// Offset of `zone` at `instant`; `"Unknown"` when the zone does not resolve.
///
/// The result depends on daylight saving at `instant`.
pub fn format_timezone_offset_at(zone: &str, instant: DateTime<Utc>) -> String {
    let tz: Tz = match zone.parse() {
        Ok(tz) => tz,
        Err(_) => return UNKNOWN.to_string(),
    };

    let seconds = instant.with_timezone(&tz).offset().fix().local_minus_utc();
    if seconds == 0 {
        return "UTC+0".to_string();
    }

    let sign = if seconds < 0 { '-' } else { '+' };
    let total_minutes = seconds.unsigned_abs() / 60;
    let (hours, minutes) = (total_minutes / 60, total_minutes % 60);

    if minutes == 0 {
        format!("UTC{}{}", sign, hours)
    } else {
        format!("UTC{}{}:{:02}", sign, hours, minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_known_country() {
        let us = country_metadata("US");
        assert_eq!(us.flag, "🇺🇸");
        assert_eq!(us.capital, "Washington D.C.");
        assert_eq!(us.emergency, "911");
        assert_eq!(COUNTRIES.len(), 52);
    }

    #[test]
    fn test_unknown_country_fallback() {
        let meta = country_metadata("ZZ");
        assert_eq!(meta.flag, GENERIC_FLAG);
        assert_eq!(meta.currency, UNKNOWN);
        assert_eq!(meta.emergency, UNKNOWN);
        assert_eq!(meta.capital, UNKNOWN);
        assert_eq!(meta.languages, UNKNOWN);
    }

    #[test]
    fn test_timezone_picks_first_zone() {
        assert_eq!(timezone("US"), "America/New_York");
        assert_eq!(timezones("AU").len(), 2);
        assert_eq!(timezone("ZA"), UNKNOWN);
    }

    #[test]
    fn test_offset_formats() {
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();

        assert_eq!(format_timezone_offset_at("America/New_York", winter), "UTC-5");
        assert_eq!(format_timezone_offset_at("America/New_York", summer), "UTC-4");
        assert_eq!(format_timezone_offset_at("Europe/London", winter), "UTC+0");
        assert_eq!(format_timezone_offset_at("Asia/Kathmandu", winter), "UTC+5:45");
        assert_eq!(format_timezone_offset_at("Asia/Kolkata", winter), "UTC+5:30");
    }

    #[test]
    fn test_offset_unknown_zone() {
        assert_eq!(format_timezone_offset(UNKNOWN), UNKNOWN);
        assert_eq!(format_timezone_offset("Mars/Olympus_Mons"), UNKNOWN);
    }

    #[test]
    fn test_line_type_taxonomy() {
        assert_eq!(LineType::parse("MOBILE"), LineType::Mobile);
        assert_eq!(LineType::parse("toll_free").label(), "Toll-Free");
        assert_eq!(LineType::parse("satellite"), LineType::Unknown);
        assert_eq!(LineType::parse("").icon(), "❓");
    }

    #[test]
    fn test_number_template_lookup() {
        let gb = number_template("GB").unwrap();
        assert_eq!(gb.calling_code, "44");
        assert_eq!(gb.area_digits, 4);
        assert!(number_template("ZZ").is_none());
    }
}
