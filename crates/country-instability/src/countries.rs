//! Tier-1 country registry
//!
//! Static per-country reference data: display names, attribution keywords,
//! baseline structural risk, event multipliers and fallback bounding boxes.
//!
//! # Event Multiplier
//!
//! | Range   | Meaning |
//! |---------|---------|
//! | > 1.0   | Closed / authoritarian state, each reported event carries more weight |
//! | 0.7-1.0 | Typical reporting volume |
//! | < 0.7   | Open, high media-volume state, raw counts are log-compressed |

/// Baseline risk for whitelisted countries without an explicit entry
pub const DEFAULT_BASELINE_RISK: f64 = 20.0;

/// Event multiplier for whitelisted countries without an explicit entry
pub const DEFAULT_EVENT_MULTIPLIER: f64 = 1.0;

/// Multipliers below this are treated as high media-volume
pub const HIGH_VOLUME_MULTIPLIER: f64 = 0.7;

/// Tier-1 whitelist: (ISO 3166-1 alpha-2, display name)
pub const TIER1_COUNTRIES: &[(&str, &str)] = &[
    ("US", "United States"),
    ("RU", "Russia"),
    ("CN", "China"),
    ("UA", "Ukraine"),
    ("IR", "Iran"),
    ("IL", "Israel"),
    ("TW", "Taiwan"),
    ("KP", "North Korea"),
    ("SA", "Saudi Arabia"),
    ("TR", "Turkey"),
    ("PL", "Poland"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("IN", "India"),
    ("PK", "Pakistan"),
    ("SY", "Syria"),
    ("YE", "Yemen"),
    ("MM", "Myanmar"),
    ("VE", "Venezuela"),
];

/// Structural instability independent of current events (0-100)
const BASELINE_RISK: &[(&str, f64)] = &[
    ("US", 5.0),
    ("RU", 35.0),
    ("CN", 25.0),
    ("UA", 50.0),
    ("IR", 40.0),
    ("IL", 45.0),
    ("TW", 30.0),
    ("KP", 45.0),
    ("SA", 20.0),
    ("TR", 25.0),
    ("PL", 10.0),
    ("DE", 5.0),
    ("FR", 10.0),
    ("GB", 5.0),
    ("IN", 20.0),
    ("PK", 35.0),
    ("SY", 50.0),
    ("YE", 50.0),
    ("MM", 45.0),
    ("VE", 40.0),
];

const EVENT_MULTIPLIER: &[(&str, f64)] = &[
    ("US", 0.3),
    ("RU", 2.0),
    ("CN", 2.5),
    ("UA", 0.8),
    ("IR", 2.0),
    ("IL", 0.7),
    ("TW", 1.5),
    ("KP", 3.0),
    ("SA", 2.0),
    ("TR", 1.2),
    ("PL", 0.8),
    ("DE", 0.5),
    ("FR", 0.6),
    ("GB", 0.5),
    ("IN", 0.8),
    ("PK", 1.5),
    ("SY", 0.7),
    ("YE", 0.7),
    ("MM", 1.8),
    ("VE", 1.8),
];

/// Attribution keywords (lowercase): cities, leaders, demonyms. Bare country
/// names are matched separately as a fallback. The first country with a
/// matching keyword wins.
pub const COUNTRY_KEYWORDS: &[(&str, &[&str])] = &[
    ("UA", &["ukrainian", "kyiv", "kiev", "zelensky", "donbas", "kharkiv", "odesa"]),
    ("RU", &["russian", "moscow", "kremlin", "putin"]),
    ("CN", &["chinese", "beijing", "xi jinping", "shanghai"]),
    ("IR", &["iranian", "tehran", "khamenei", "irgc"]),
    ("IL", &["israeli", "tel aviv", "netanyahu", "gaza", "west bank"]),
    ("TW", &["taiwanese", "taipei"]),
    ("KP", &["pyongyang", "kim jong", "dprk"]),
    ("SA", &["saudi", "riyadh"]),
    ("TR", &["turkish", "ankara", "erdogan", "istanbul"]),
    ("PL", &["warsaw"]),
    ("DE", &["german", "berlin", "bundeswehr"]),
    ("FR", &["french", "paris", "macron", "elysee"]),
    ("GB", &["britain", "british", "london", "downing street"]),
    ("IN", &["indian", "new delhi", "narendra modi"]),
    ("PK", &["pakistani", "islamabad", "karachi"]),
    ("SY", &["syrian", "damascus", "aleppo"]),
    ("YE", &["yemeni", "sanaa", "houthi"]),
    ("MM", &["burma", "burmese", "naypyidaw", "yangon"]),
    ("VE", &["venezuelan", "caracas", "maduro"]),
    ("US", &["washington", "pentagon", "white house", "u.s."]),
];

/// Fallback bounding boxes (lat_min, lat_max, lon_min, lon_max, code).
/// Simplified lookup - precise polygons come from a `PolygonLookup`.
/// The first matching box wins, so smaller countries come BEFORE the larger
/// boxes that contain them. Irregular countries are split into several boxes
/// that keep clear of their neighbours (Gulf states, Iraq, South Korea, Japan).
pub const COUNTRY_BOUNDS: &[(f64, f64, f64, f64, &str)] = &[
    (29.5, 33.3, 34.3, 35.9, "IL"),
    (21.9, 25.3, 120.0, 122.0, "TW"),
    // North Korea, south edge kept north of the DMZ
    (38.0, 40.5, 124.2, 127.5, "KP"),
    (38.65, 40.5, 127.5, 129.7, "KP"),
    (40.5, 42.0, 126.0, 130.7, "KP"),
    (32.3, 37.3, 35.7, 42.4, "SY"),
    (12.1, 19.0, 42.5, 54.5, "YE"),
    // Ukraine: south and Crimea, far west, north, Kharkiv-Donetsk, Luhansk
    (44.4, 49.0, 29.6, 36.7, "UA"),
    (48.0, 49.0, 22.1, 29.6, "UA"),
    (49.0, 52.4, 23.6, 35.0, "UA"),
    (46.8, 50.4, 35.0, 38.3, "UA"),
    (47.8, 50.1, 38.3, 39.9, "UA"),
    // Kaliningrad
    (54.3, 55.3, 19.6, 22.9, "RU"),
    (49.0, 54.8, 14.1, 24.2, "PL"),
    (36.0, 42.1, 26.0, 36.5, "TR"),
    (37.0, 41.5, 36.5, 43.5, "TR"),
    (37.5, 39.8, 43.5, 44.5, "TR"),
    (23.6, 30.5, 62.3, 70.0, "PK"),
    (29.5, 37.1, 69.3, 74.7, "PK"),
    (9.8, 16.8, 97.3, 98.8, "MM"),
    (15.5, 21.0, 92.2, 97.8, "MM"),
    (20.3, 22.2, 93.6, 101.2, "MM"),
    (22.2, 24.5, 93.6, 99.0, "MM"),
    (24.5, 28.6, 94.9, 98.7, "MM"),
    (8.0, 26.3, 68.2, 88.5, "IN"),
    (26.3, 32.5, 70.0, 81.0, "IN"),
    (32.5, 35.5, 74.7, 80.0, "IN"),
    (25.3, 29.5, 89.7, 97.4, "IN"),
    // Saudi Arabia, east edge at lon 50.2 (Bahrain and Qatar excluded)
    (24.0, 28.0, 35.5, 50.2, "SA"),
    (16.4, 24.0, 38.8, 50.2, "SA"),
    (18.5, 22.6, 50.2, 55.6, "SA"),
    (28.0, 29.3, 34.6, 38.0, "SA"),
    (29.3, 31.0, 37.6, 44.0, "SA"),
    // Iran, west edge east of Iraq, Gulf coast north of the Arab states
    (37.0, 38.8, 44.5, 49.0, "IR"),
    (34.0, 37.0, 45.5, 49.0, "IR"),
    (34.0, 37.3, 49.0, 61.2, "IR"),
    (32.0, 34.0, 46.0, 61.0, "IR"),
    (30.0, 32.0, 48.0, 60.8, "IR"),
    (26.5, 30.0, 50.2, 62.0, "IR"),
    (25.2, 26.5, 57.3, 61.6, "IR"),
    // Russia: north of 56, European south-west, Caucasus, Volga, Siberia, Far East
    (56.0, 78.0, 30.0, 180.0, "RU"),
    (50.5, 56.0, 32.0, 47.0, "RU"),
    (42.5, 50.5, 37.3, 48.5, "RU"),
    (51.5, 56.0, 47.0, 61.0, "RU"),
    (54.9, 56.0, 61.0, 78.0, "RU"),
    (51.0, 56.0, 78.0, 88.0, "RU"),
    (50.5, 56.0, 88.0, 119.5, "RU"),
    (42.3, 45.0, 131.0, 140.0, "RU"),
    (45.0, 48.3, 133.5, 140.0, "RU"),
    (48.3, 56.0, 135.0, 180.0, "RU"),
    (53.6, 56.0, 119.5, 135.0, "RU"),
    // China: east, south coast, Hainan, Tibet-Qinghai, Kashgar, Dzungaria, north-east
    (23.5, 41.0, 98.7, 122.5, "CN"),
    (21.5, 23.5, 108.0, 117.5, "CN"),
    (18.1, 21.5, 108.5, 111.2, "CN"),
    (30.5, 42.5, 80.0, 98.7, "CN"),
    (28.4, 30.5, 84.0, 98.7, "CN"),
    (36.0, 40.5, 74.9, 80.0, "CN"),
    (42.5, 49.2, 80.5, 91.0, "CN"),
    (41.0, 53.6, 119.5, 135.1, "CN"),
    (47.3, 55.1, 5.9, 15.0, "DE"),
    (41.3, 51.1, -5.0, 9.6, "FR"),
    (49.9, 60.9, -8.6, 1.8, "GB"),
    (0.6, 12.2, -73.4, -59.8, "VE"),
    (24.5, 49.5, -125.0, -66.0, "US"),
    (51.2, 71.4, -179.9, -129.9, "US"),
];

/// Canonical whitelisted code for `code`, if tracked
pub fn tier1_code(code: &str) -> Option<&'static str> {
    let code = code.trim();
    TIER1_COUNTRIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(c, _)| *c)
}

pub fn is_tier1(code: &str) -> bool {
    tier1_code(code).is_some()
}

/// Display name for a tier-1 code
pub fn country_name(code: &str) -> Option<&'static str> {
    TIER1_COUNTRIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

pub fn baseline_risk(code: &str) -> f64 {
    BASELINE_RISK
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, risk)| *risk)
        .unwrap_or(DEFAULT_BASELINE_RISK)
}

pub fn event_multiplier(code: &str) -> f64 {
    EVENT_MULTIPLIER
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, m)| *m)
        .unwrap_or(DEFAULT_EVENT_MULTIPLIER)
}
