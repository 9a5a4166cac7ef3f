//! Upstream signal records consumed by the engine
//!
//! Each feed (protests, ACLED-style conflict events, conflict-intensity
//! classifications, humanitarian summaries, displacement, climate, military
//! tracks, clustered news, outages, focal points) is collected outside this
//! crate; only its output shape lives here.

use serde::{Deserialize, Serialize};

/// Protest severity as reported by the unrest feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtestSeverity {
    Low,
    Medium,
    High,
}

/// A civil unrest event (protest, riot, strike)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtestEvent {
    pub id: String,
    /// Country name or ISO 3166-1 alpha-2 code
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub severity: ProtestSeverity,
    #[serde(default)]
    pub fatalities: u32,
}

/// Armed-conflict event classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictEventType {
    Battle,
    Explosion,
    ViolenceAgainstCivilians,
    Riot,
    #[serde(other)]
    Other,
}

/// An armed-conflict event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictEvent {
    pub id: String,
    /// Country name or ISO 3166-1 alpha-2 code
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub event_type: ConflictEventType,
    #[serde(default)]
    pub fatalities: u32,
}

/// Externally supplied conflict-intensity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictIntensity {
    War,
    Minor,
    #[serde(rename = "none", alias = "inactive")]
    Inactive,
    #[serde(other)]
    Unrecognized,
}

impl ConflictIntensity {
    /// Minimum composite score guaranteed by this classification
    pub fn score_floor(&self) -> f64 {
        match self {
            ConflictIntensity::War => 70.0,
            ConflictIntensity::Minor => 50.0,
            ConflictIntensity::Inactive => 0.0,
            ConflictIntensity::Unrecognized => 0.0,
        }
    }
}

/// Humanitarian conflict summary used when no primary events exist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConflictSummary {
    #[serde(default)]
    pub political_violence_events: u32,
    #[serde(default)]
    pub civilian_targeting_events: u32,
    #[serde(default)]
    pub fatalities: u32,
}

/// Displacement outflow attributed to an origin country
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplacementFlow {
    /// Origin country name or ISO code
    pub origin: String,
    /// Refugees + asylum seekers originating from the country
    pub outflow: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClimateSeverity {
    Normal,
    Moderate,
    Extreme,
}

impl ClimateSeverity {
    /// Additive climate stress contribution
    pub fn stress(&self) -> f64 {
        match self {
            ClimateSeverity::Extreme => 15.0,
            ClimateSeverity::Moderate => 8.0,
            ClimateSeverity::Normal => 0.0,
        }
    }
}

/// Temperature / precipitation anomaly over a monitored zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimateAnomaly {
    /// Zone label, e.g. "Ukraine" or "Sahel"
    pub zone: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub severity: ClimateSeverity,
}

/// Military aircraft track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilitaryFlight {
    pub id: String,
    #[serde(default)]
    pub callsign: Option<String>,
    /// Operator country name or ISO code
    pub operator_country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Military vessel track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilitaryVessel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Operator country name or ISO code
    pub operator_country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A clustered news event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsCluster {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub source_count: u32,
    /// Distinct sources reporting per hour
    #[serde(default)]
    pub sources_per_hour: f64,
    #[serde(default)]
    pub is_alert: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutageSeverity {
    Total,
    Major,
    Partial,
}

/// Internet outage report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternetOutage {
    pub id: String,
    /// Country name or ISO code
    pub country: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub severity: OutageSeverity,
}

/// Focal-point detector urgency for a country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocalUrgency {
    Critical,
    Elevated,
    #[serde(other)]
    Watch,
}

impl FocalUrgency {
    pub fn boost(&self) -> f64 {
        match self {
            FocalUrgency::Critical => 8.0,
            FocalUrgency::Elevated => 4.0,
            FocalUrgency::Watch => 0.0,
        }
    }
}
