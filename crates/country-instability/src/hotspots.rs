//! Hotspot activity tracking
//!
//! Accumulates proximity-weighted activity per country against three static
//! registries. Each ingested event within a registry entry's radius credits
//! the entry's countries with `weight × multiplier`.
//!
//! | Registry            | Radius (km) | Multiplier |
//! |---------------------|-------------|------------|
//! | Point hotspots      | 150         | 1.0        |
//! | Conflict zones      | 300         | 2.0        |
//! | Strategic waterways | 200         | 1.5        |
//!
//! The boost is `min(10, activity × 1.5)` so proximity nudges the composite
//! score but never dominates it.

use crate::haversine_km;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Maximum composite contribution from hotspot activity
pub const MAX_HOTSPOT_BOOST: f64 = 10.000000000;

/// Activity → boost scale factor
pub const HOTSPOT_BOOST_SCALE: f64 = 1.500000000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegistryKind {
    PointHotspot,
    ConflictZone,
    StrategicWaterway,
}

impl RegistryKind {
    pub fn radius_km(&self) -> f64 {
        match self {
            RegistryKind::PointHotspot => 150.000000000,
            RegistryKind::ConflictZone => 300.000000000,
            RegistryKind::StrategicWaterway => 200.000000000,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            RegistryKind::PointHotspot => 1.000000000,
            RegistryKind::ConflictZone => 2.000000000,
            RegistryKind::StrategicWaterway => 1.500000000,
        }
    }
}

/// A static point of known geopolitical sensitivity
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegistryEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    /// Tier-1 countries credited when activity lands nearby
    pub countries: &'static [&'static str],
}

const fn entry(
    id: &'static str,
    name: &'static str,
    latitude: f64,
    longitude: f64,
    countries: &'static [&'static str],
) -> RegistryEntry {
    RegistryEntry { id, name, latitude, longitude, countries }
}

pub const POINT_HOTSPOTS: &[RegistryEntry] = &[
    entry("kyiv", "Kyiv", 50.4501, 30.5234, &["UA"]),
    entry("moscow", "Moscow", 55.7558, 37.6173, &["RU"]),
    entry("beijing", "Beijing", 39.9042, 116.4074, &["CN"]),
    entry("taipei", "Taipei", 25.0330, 121.5654, &["TW"]),
    entry("pyongyang", "Pyongyang", 39.0392, 125.7625, &["KP"]),
    entry("tehran", "Tehran", 35.6892, 51.3890, &["IR"]),
    entry("jerusalem", "Jerusalem", 31.7683, 35.2137, &["IL"]),
    entry("damascus", "Damascus", 33.5138, 36.2765, &["SY"]),
    entry("sanaa", "Sanaa", 15.3694, 44.1910, &["YE"]),
    entry("riyadh", "Riyadh", 24.7136, 46.6753, &["SA"]),
    entry("ankara", "Ankara", 39.9334, 32.8597, &["TR"]),
    entry("islamabad", "Islamabad", 33.6844, 73.0479, &["PK"]),
    entry("new-delhi", "New Delhi", 28.6139, 77.2090, &["IN"]),
    entry("naypyidaw", "Naypyidaw", 19.7633, 96.0785, &["MM"]),
    entry("caracas", "Caracas", 10.4806, -66.9036, &["VE"]),
    entry("washington", "Washington DC", 38.9072, -77.0369, &["US"]),
    entry("kaliningrad", "Kaliningrad", 54.7104, 20.4522, &["RU", "PL"]),
];

pub const CONFLICT_ZONES: &[RegistryEntry] = &[
    entry("donbas", "Donbas Front", 48.0159, 37.8029, &["UA", "RU"]),
    entry("zaporizhzhia", "Zaporizhzhia Front", 47.4, 35.5, &["UA", "RU"]),
    entry("gaza", "Gaza Strip", 31.5017, 34.4668, &["IL"]),
    entry("south-lebanon", "Israel-Lebanon Border", 33.2, 35.4, &["IL"]),
    entry("northern-syria", "Northern Syria", 36.2, 37.2, &["SY", "TR"]),
    entry("yemen-frontlines", "Marib / Hodeidah", 15.5, 44.0, &["YE", "SA"]),
    entry("kashmir", "Line of Control", 34.5, 74.5, &["IN", "PK"]),
    entry("sagaing", "Sagaing Region", 22.0, 95.5, &["MM"]),
];

pub const STRATEGIC_WATERWAYS: &[RegistryEntry] = &[
    entry("hormuz", "Strait of Hormuz", 26.5667, 56.25, &["IR"]),
    entry("taiwan-strait", "Taiwan Strait", 24.5, 119.5, &["TW", "CN"]),
    entry("bab-el-mandeb", "Bab el-Mandeb", 12.5833, 43.3333, &["YE"]),
    entry("bosphorus", "Bosphorus", 41.1190, 29.0750, &["TR"]),
    entry("kerch", "Kerch Strait", 45.3, 36.5, &["UA", "RU"]),
    entry("south-china-sea", "South China Sea", 12.0, 114.0, &["CN"]),
    entry("english-channel", "English Channel", 50.5, 0.5, &["GB", "FR"]),
];

/// All registries with their kind
pub fn registries() -> [(RegistryKind, &'static [RegistryEntry]); 3] {
    [
        (RegistryKind::PointHotspot, POINT_HOTSPOTS),
        (RegistryKind::ConflictZone, CONFLICT_ZONES),
        (RegistryKind::StrategicWaterway, STRATEGIC_WATERWAYS),
    ]
}

/// Per-country accumulated hotspot activity
#[derive(Debug, Clone, Default)]
pub struct HotspotTracker {
    activity: HashMap<String, f64>,
}

impl HotspotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit every registry entry within range of (lat, lon)
    pub fn track_activity(&mut self, lat: f64, lon: f64, weight: f64) {
        if !lat.is_finite() || !lon.is_finite() || weight <= 0.0 {
            return;
        }

        for (kind, entries) in registries() {
            for e in entries {
                let dist = haversine_km(lat, lon, e.latitude, e.longitude);
                if dist > kind.radius_km() {
                    continue;
                }

                let credit = weight * kind.multiplier();
                for code in e.countries {
                    *self.activity.entry(code.to_string()).or_insert(0.0) += credit;
                }
                debug!("Hotspot {} ({:?}) +{:.2} at {:.0}km", e.id, kind, credit, dist);
            }
        }
    }

    /// Raw accumulated activity for a country
    pub fn activity(&self, code: &str) -> f64 {
        self.activity.get(code).copied().unwrap_or(0.0)
    }

    /// Capped composite contribution for a country
    pub fn boost(&self, code: &str) -> f64 {
        (self.activity(code) * HOTSPOT_BOOST_SCALE).min(MAX_HOTSPOT_BOOST)
    }

    pub fn clear(&mut self) {
        self.activity.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.activity.is_empty()
    }
}
