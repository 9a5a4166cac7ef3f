//! Composite scoring
//!
//! Blends baseline risk, weighted component scores and additive boosts into
//! the final 0-100 index, then applies the conflict-intensity floor.

use crate::components::{ComponentScores, CountryData};
use crate::config::CiiConfig;
use crate::signals::{ConflictIntensity, FocalUrgency};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Severity band for a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreLevel {
    /// 0 - 30
    Low,
    /// 31 - 50
    Normal,
    /// 51 - 65
    Elevated,
    /// 66 - 80
    High,
    /// 81 - 100
    Critical,
}

impl ScoreLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            81.. => ScoreLevel::Critical,
            66..=80 => ScoreLevel::High,
            51..=65 => ScoreLevel::Elevated,
            31..=50 => ScoreLevel::Normal,
            _ => ScoreLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLevel::Low => "low",
            ScoreLevel::Normal => "normal",
            ScoreLevel::Elevated => "elevated",
            ScoreLevel::High => "high",
            ScoreLevel::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Stable,
    Falling,
}

impl Trend {
    pub fn from_delta(delta: i16, threshold: i16) -> Self {
        if delta >= threshold {
            Trend::Rising
        } else if delta <= -threshold {
            Trend::Falling
        } else {
            Trend::Stable
        }
    }
}

/// Rounded component breakdown reported alongside the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub unrest: u8,
    pub conflict: u8,
    pub security: u8,
    pub information: u8,
}

impl From<&ComponentScores> for ScoreBreakdown {
    fn from(c: &ComponentScores) -> Self {
        Self {
            unrest: to_score(c.unrest),
            conflict: to_score(c.conflict),
            security: to_score(c.security),
            information: to_score(c.information),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryScore {
    pub code: String,
    pub name: String,
    pub score: u8,
    pub level: ScoreLevel,
    pub trend: Trend,
    pub change_24h: i16,
    pub components: ScoreBreakdown,
    pub last_updated: DateTime<Utc>,
}

/// Everything besides the components that feeds one country's composite
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeInputs {
    pub baseline_risk: f64,
    pub hotspot_boost: f64,
    pub focal_urgency: Option<FocalUrgency>,
    pub displacement_outflow: u64,
    pub climate_stress: f64,
    pub conflict_intensity: Option<ConflictIntensity>,
}

impl CompositeInputs {
    pub fn from_data(data: &CountryData, baseline_risk: f64, hotspot_boost: f64, focal_urgency: Option<FocalUrgency>) -> Self {
        Self {
            baseline_risk,
            hotspot_boost,
            focal_urgency,
            displacement_outflow: data.displacement_outflow,
            climate_stress: data.climate_stress,
            conflict_intensity: data.conflict_intensity,
        }
    }
}

fn to_score(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}

/// Weighted event score (E)
pub fn event_score(components: &ComponentScores, config: &CiiConfig) -> f64 {
    components.unrest * config.w_unrest
        + components.conflict * config.w_conflict
        + components.security * config.w_security
        + components.information * config.w_information
}

pub fn news_urgency_boost(information: f64) -> f64 {
    if information >= 70.0 {
        5.0
    } else if information >= 50.0 {
        3.0
    } else {
        0.0
    }
}

pub fn displacement_boost(outflow: u64) -> f64 {
    if outflow >= 1_000_000 {
        8.0
    } else if outflow >= 100_000 {
        4.0
    } else {
        0.0
    }
}

/// Score floor from the external conflict-intensity classification
pub fn intensity_floor(code: &str, intensity: Option<ConflictIntensity>) -> f64 {
    match intensity {
        Some(ConflictIntensity::Unrecognized) => {
            warn!("Unrecognized conflict intensity for {}, applying no floor", code);
            0.0
        }
        Some(i) => i.score_floor(),
        None => 0.0,
    }
}

/// Final composite score (0-100)
pub fn composite_score(code: &str, components: &ComponentScores, inputs: &CompositeInputs, config: &CiiConfig) -> u8 {
    let blended = inputs.baseline_risk * config.w_baseline
        + event_score(components, config) * config.w_events
        + inputs.hotspot_boost
        + news_urgency_boost(components.information)
        + inputs.focal_urgency.map(|u| u.boost()).unwrap_or(0.0)
        + displacement_boost(inputs.displacement_outflow)
        + inputs.climate_stress;

    let floor = intensity_floor(code, inputs.conflict_intensity);
    to_score(blended.max(floor).min(100.0))
}
