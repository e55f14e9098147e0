//! Country dictionary for location inputs
//!
//! The backend stores ISO 3166-1 alpha-2 codes (`country_residence: "IN"`),
//! while users may type full names.

/// Display label and ISO code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub label: &'static str,
    pub code: &'static str,
}

const fn country(label: &'static str, code: &'static str) -> Country {
    Country { label, code }
}

pub const COUNTRIES: &[Country] = &[
    country("Afghanistan", "AF"),
    country("Australia", "AU"),
    country("Austria", "AT"),
    country("Bangladesh", "BD"),
    country("Belgium", "BE"),
    country("Brazil", "BR"),
    country("Canada", "CA"),
    country("Chile", "CL"),
    country("China", "CN"),
    country("Colombia", "CO"),
    country("Czech Republic", "CZ"),
    country("Denmark", "DK"),
    country("Egypt", "EG"),
    country("Finland", "FI"),
    country("France", "FR"),
    country("Germany", "DE"),
    country("Greece", "GR"),
    country("Hong Kong", "HK"),
    country("Hungary", "HU"),
    country("India", "IN"),
    country("Indonesia", "ID"),
    country("Ireland", "IE"),
    country("Israel", "IL"),
    country("Italy", "IT"),
    country("Japan", "JP"),
    country("Kenya", "KE"),
    country("Malaysia", "MY"),
    country("Mexico", "MX"),
    country("Netherlands", "NL"),
    country("New Zealand", "NZ"),
    country("Nigeria", "NG"),
    country("Norway", "NO"),
    country("Pakistan", "PK"),
    country("Philippines", "PH"),
    country("Poland", "PL"),
    country("Portugal", "PT"),
    country("Romania", "RO"),
    country("Russia", "RU"),
    country("Saudi Arabia", "SA"),
    country("Singapore", "SG"),
    country("South Africa", "ZA"),
    country("South Korea", "KR"),
    country("Spain", "ES"),
    country("Sweden", "SE"),
    country("Switzerland", "CH"),
    country("Taiwan", "TW"),
    country("Thailand", "TH"),
    country("Turkey", "TR"),
    country("Ukraine", "UA"),
    country("United Arab Emirates", "AE"),
    country("United Kingdom", "GB"),
    country("United States", "US"),
    country("Vietnam", "VN"),
];

/// Normalize a country name or code to its ISO code.
///
/// Exact codes win, then case-insensitive labels. Unknown input is returned
/// trimmed so the backend can reject it.
pub fn country_code(label_or_code: &str) -> String {
    let trimmed = label_or_code.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    COUNTRIES
        .iter()
        .find(|c| c.code == trimmed)
        .or_else(|| COUNTRIES.iter().find(|c| c.label.eq_ignore_ascii_case(trimmed)))
        .map_or_else(|| trimmed.to_string(), |c| c.code.to_string())
}

/// Display label for an ISO code, falling back to the code itself.
pub fn country_label(code: &str) -> String {
    COUNTRIES.iter().find(|c| c.code == code).map_or_else(|| code.to_string(), |c| c.label.to_string())
}

/// Normalize an optional country field, dropping blanks.
pub fn normalize_country(value: Option<&str>) -> Option<String> {
    value.map(country_code).filter(|code| !code.is_empty())
}
