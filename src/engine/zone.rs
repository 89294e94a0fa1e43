/// Strategy for deriving a zone label from a free-text address, so keyword
/// matching can be swapped for real geofencing without touching the cost
/// calculator.
pub trait ZoneResolver {
    fn zone_of(&self, address_text: &str) -> String;
}

/// Known area keywords and the canonical zone label each maps to.
const GAZETTEER: &[(&str, &str)] = &[
    ("jakarta", "JAKARTA"),
    ("bandung", "BANDUNG"),
    ("bogor", "BOGOR"),
    ("depok", "DEPOK"),
    ("tangerang", "TANGERANG"),
    ("bekasi", "BEKASI"),
    ("surabaya", "SURABAYA"),
    ("semarang", "SEMARANG"),
    ("yogyakarta", "YOGYAKARTA"),
    ("jogja", "YOGYAKARTA"),
    ("medan", "MEDAN"),
    ("makassar", "MAKASSAR"),
];

const UNKNOWN_ZONE: &str = "UNKNOWN";

/// Case-insensitive substring match against the gazetteer, falling back to
/// the first word of at least 4 characters, uppercased.
///
/// The fallback is known to produce odd labels for real addresses (street
/// prefixes beat city names); it is kept as-is for compatibility with
/// existing zone tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordZoneResolver;

impl ZoneResolver for KeywordZoneResolver {
    fn zone_of(&self, address_text: &str) -> String {
        let lowered = address_text.to_lowercase();

        for (keyword, label) in GAZETTEER {
            if lowered.contains(keyword) {
                return (*label).to_string();
            }
        }

        if let Some(word) = address_text
            .split_whitespace()
            .find(|word| word.chars().count() >= 4)
        {
            return word.to_uppercase();
        }

        let trimmed = address_text.trim();
        if trimmed.is_empty() {
            UNKNOWN_ZONE.to_string()
        } else {
            trimmed.to_uppercase()
        }
    }
}
