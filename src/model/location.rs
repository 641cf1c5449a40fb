use serde::{Deserialize, Serialize};

/// Where the courier picks up and delivers.
///
/// A zero latitude or longitude means "no GPS fix yet" and is treated the
/// same as an absent coordinate by validation; the backend refuses orders
/// without a real fix, so we refuse them first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address_text: String,
    pub city: String,
    pub country: String,
}

impl CustomerLocation {
    pub fn new(
        latitude: f64,
        longitude: f64,
        address_text: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            address_text: address_text.into(),
            city: city.into(),
            country: country.into(),
        }
    }

    /// True when both coordinates are present and non-zero.
    pub fn has_gps_fix(&self) -> bool {
        self.latitude != 0.0 && self.longitude != 0.0
    }

    /// City, falling back to the second-to-last comma segment of the address
    /// text when the city field was never filled in (common when the address
    /// came from a map tap rather than a form).
    pub fn city_or_fallback(&self) -> String {
        if !self.city.trim().is_empty() {
            return self.city.trim().to_string();
        }
        address_segment(&self.address_text, 1).unwrap_or_default()
    }

    /// Country, falling back to the last comma segment of the address text.
    pub fn country_or_fallback(&self) -> String {
        if !self.country.trim().is_empty() {
            return self.country.trim().to_string();
        }
        address_segment(&self.address_text, 0).unwrap_or_default()
    }
}

/// Returns the `n`-th comma-separated segment of `text`, counted from the
/// end (0 = last). Segments are trimmed; empty segments are skipped.
fn address_segment(text: &str, n: usize) -> Option<String> {
    text.rsplit(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .nth(n)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_coordinate_is_not_a_fix() {
        let loc = CustomerLocation::new(0.0, 32.58, "somewhere", "", "");
        assert!(!loc.has_gps_fix());
        let loc = CustomerLocation::new(0.39, 32.58, "somewhere", "", "");
        assert!(loc.has_gps_fix());
    }

    #[test]
    fn falls_back_to_address_segments() {
        let loc = CustomerLocation::new(0.39, 32.58, "Plot 4, Kira Rd, Kampala, Uganda", "", "");
        assert_eq!(loc.city_or_fallback(), "Kampala");
        assert_eq!(loc.country_or_fallback(), "Uganda");
    }

    #[test]
    fn explicit_fields_win_over_fallback() {
        let loc = CustomerLocation::new(0.39, 32.58, "Kira Rd, Kampala, Uganda", "Entebbe", "Uganda");
        assert_eq!(loc.city_or_fallback(), "Entebbe");
    }
}
