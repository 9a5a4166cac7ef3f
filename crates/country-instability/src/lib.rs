//! Country Instability Index (CII)
//!
//! Fuses heterogeneous intelligence signals (unrest, armed conflict, military
//! tracks, clustered news, internet outages, displacement, climate) into a
//! 0-100 instability score for each tier-1 country.
//!
//! # Scoring Model
//!
//! ```text
//! E     = 0.25·U + 0.30·C + 0.20·S + 0.25·I
//! B     = 0.4·R + 0.6·E + H + N + F + D + K
//! Score = round(min(100, max(floor, B)))
//! ```
//!
//! | Term  | Description |
//! |-------|-------------|
//! | U     | Unrest (protests, fatalities, internet blackouts) |
//! | C     | Conflict (armed-conflict events or summary fallback) |
//! | S     | Security (own + foreign military presence) |
//! | I     | Information (news volume, velocity, alerts) |
//! | R     | Baseline structural risk (per country, default 20) |
//! | H     | Hotspot proximity boost (0-10) |
//! | N     | News urgency boost (0, 3, 5) |
//! | F     | Focal-point urgency boost (0, 4, 8) |
//! | D     | Displacement outflow boost (0, 4, 8) |
//! | K     | Climate stress (0, 8, 15) |
//! | floor | Conflict intensity: war 70, minor 50, otherwise 0 |
//!
//! The engine is synchronous and single-caller: an [`InstabilityEngine`]
//! owns every piece of mutable state, so each scoring session (or test)
//! constructs its own.

use std::f64::consts::PI;
use thiserror::Error;

pub mod attribution;
pub mod components;
pub mod composite;
pub mod config;
pub mod countries;
pub mod engine;
pub mod hotspots;
pub mod learning;
pub mod loader;
pub mod signals;

pub use attribution::{CountryAttribution, NoPolygonLookup, PolygonLookup};
pub use components::{ComponentScores, CountryData};
pub use composite::{CountryScore, ScoreLevel, Trend};
pub use config::CiiConfig;
pub use engine::InstabilityEngine;
pub use hotspots::HotspotTracker;
pub use learning::{LearningMode, LearningStatus};
pub use signals::*;

/// Earth radius in km (9 decimal precision)
pub const EARTH_RADIUS_KM: f64 = 6371.000000000;

#[derive(Error, Debug)]
pub enum CiiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CiiError>;

/// Haversine distance between two points in km (9 decimal precision)
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1 * PI / 180.000000000;
    let lat2_rad = lat2 * PI / 180.000000000;
    let dlat = (lat2 - lat1) * PI / 180.000000000;
    let dlon = (lon2 - lon1) * PI / 180.000000000;

    let a = (dlat / 2.000000000).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.000000000).sin().powi(2);
    let c = 2.000000000 * a.sqrt().atan2((1.000000000 - a).sqrt());

    EARTH_RADIUS_KM * c
}
