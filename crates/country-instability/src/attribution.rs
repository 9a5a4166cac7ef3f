//! Country attribution
//!
//! Maps free-text mentions and coordinates to tier-1 country codes.
//!
//! Text: keyword dictionary first (substring, case-insensitive), then full
//! country names. Coordinates: precise polygon lookup restricted to the
//! whitelist, then bounding-box containment. Anything that does not land on
//! a whitelisted code resolves to `None` and the caller drops the event.

use crate::countries::{tier1_code, COUNTRY_BOUNDS, COUNTRY_KEYWORDS, TIER1_COUNTRIES};

/// Precise point-in-polygon lookup supplied by the host application
pub trait PolygonLookup: Send + Sync {
    /// Country containing (lat, lon), restricted to `candidates`
    fn country_at(&self, lat: f64, lon: f64, candidates: &[&'static str]) -> Option<String>;
}

/// Lookup with no polygon data - every query falls through to bounding boxes
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPolygonLookup;

impl PolygonLookup for NoPolygonLookup {
    fn country_at(&self, _lat: f64, _lon: f64, _candidates: &[&'static str]) -> Option<String> {
        None
    }
}

pub struct CountryAttribution {
    polygons: Box<dyn PolygonLookup>,
    candidates: Vec<&'static str>,
}

impl CountryAttribution {
    pub fn new() -> Self {
        Self::with_polygons(Box::new(NoPolygonLookup))
    }

    pub fn with_polygons(polygons: Box<dyn PolygonLookup>) -> Self {
        Self {
            polygons,
            candidates: TIER1_COUNTRIES.iter().map(|(code, _)| *code).collect(),
        }
    }

    /// Resolve free text to the first matching tier-1 country
    pub fn resolve_text(&self, text: &str) -> Option<&'static str> {
        let lower = text.to_lowercase();
        if lower.trim().is_empty() {
            return None;
        }

        COUNTRY_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(*k)))
            .map(|(code, _)| *code)
            .or_else(|| {
                TIER1_COUNTRIES
                    .iter()
                    .find(|(_, name)| lower.contains(&name.to_lowercase()))
                    .map(|(code, _)| *code)
            })
    }

    /// Every tier-1 country mentioned in `text`, in whitelist order
    pub fn mentioned_countries(&self, text: &str) -> Vec<&'static str> {
        let lower = text.to_lowercase();

        TIER1_COUNTRIES
            .iter()
            .map(|(code, _)| *code)
            .filter(|code| {
                let by_keyword = COUNTRY_KEYWORDS
                    .iter()
                    .filter(|(c, _)| c == code)
                    .any(|(_, keywords)| keywords.iter().any(|k| lower.contains(*k)));
                by_keyword
                    || TIER1_COUNTRIES
                        .iter()
                        .any(|(c, name)| c == code && lower.contains(&name.to_lowercase()))
            })
            .collect()
    }

    /// Resolve coordinates to a tier-1 country
    pub fn resolve_coordinates(&self, lat: f64, lon: f64) -> Option<&'static str> {
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }

        if let Some(code) = self
            .polygons
            .country_at(lat, lon, &self.candidates)
            .and_then(|c| tier1_code(&c))
        {
            return Some(code);
        }

        COUNTRY_BOUNDS
            .iter()
            .find(|&&(lat_min, lat_max, lon_min, lon_max, _)| {
                lat >= lat_min && lat <= lat_max && lon >= lon_min && lon <= lon_max
            })
            .map(|b| b.4)
    }

    /// Resolve a field that may hold an ISO code or a country name
    pub fn resolve_country(&self, code_or_name: &str) -> Option<&'static str> {
        tier1_code(code_or_name).or_else(|| self.resolve_text(code_or_name))
    }

    /// Country field first, coordinates as fallback
    pub fn resolve_event(&self, country: &str, lat: Option<f64>, lon: Option<f64>) -> Option<&'static str> {
        self.resolve_country(country).or_else(|| match (lat, lon) {
            (Some(lat), Some(lon)) => self.resolve_coordinates(lat, lon),
            _ => None,
        })
    }
}

impl Default for CountryAttribution {
    fn default() -> Self {
        Self::new()
    }
}
