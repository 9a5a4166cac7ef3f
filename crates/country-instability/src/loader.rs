//! Signal snapshot loading from JSON files

use crate::engine::InstabilityEngine;
use crate::signals::{
    ClimateAnomaly, ConflictEvent, ConflictIntensity, ConflictSummary, DisplacementFlow, FocalUrgency,
    InternetOutage, MilitaryFlight, MilitaryVessel, NewsCluster, ProtestEvent,
};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Validate latitude is in valid range
fn is_valid_latitude(lat: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && lat.is_finite()
}

/// Validate longitude is in valid range
fn is_valid_longitude(lon: f64) -> bool {
    (-180.0..=180.0).contains(&lon) && lon.is_finite()
}

fn is_valid_point(lat: f64, lon: f64) -> bool {
    is_valid_latitude(lat) && is_valid_longitude(lon)
}

/// Sanitize record ID (alphanumeric, dash, underscore, colon only)
fn sanitize_id(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_' || *c == ':')
        .take(128) // Max length
        .collect()
}

/// One polling cycle's worth of upstream signals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalSnapshot {
    pub protests: Vec<ProtestEvent>,
    pub conflicts: Vec<ConflictEvent>,
    pub conflict_intensity: HashMap<String, ConflictIntensity>,
    pub conflict_summaries: HashMap<String, ConflictSummary>,
    pub displacement: Vec<DisplacementFlow>,
    pub climate: Vec<ClimateAnomaly>,
    pub military_flights: Vec<MilitaryFlight>,
    pub military_vessels: Vec<MilitaryVessel>,
    pub news: Vec<NewsCluster>,
    pub outages: Vec<InternetOutage>,
    pub focal_points: HashMap<String, FocalUrgency>,
}

impl SignalSnapshot {
    /// Drop point records with out-of-range coordinates. Optional positions
    /// that are out of range are cleared so text attribution still applies.
    /// Returns the number of records dropped.
    pub fn sanitize(&mut self) -> usize {
        let before = self.protests.len() + self.conflicts.len() + self.military_flights.len() + self.military_vessels.len();

        self.protests.retain(|p| is_valid_point(p.latitude, p.longitude));
        self.conflicts.retain(|c| is_valid_point(c.latitude, c.longitude));
        self.military_flights.retain(|f| is_valid_point(f.latitude, f.longitude));
        self.military_vessels.retain(|v| is_valid_point(v.latitude, v.longitude));

        let after = self.protests.len() + self.conflicts.len() + self.military_flights.len() + self.military_vessels.len();

        for o in &mut self.outages {
            if !matches!((o.latitude, o.longitude), (Some(lat), Some(lon)) if is_valid_point(lat, lon)) {
                o.latitude = None;
                o.longitude = None;
            }
        }
        for a in &mut self.climate {
            if !matches!((a.latitude, a.longitude), (Some(lat), Some(lon)) if is_valid_point(lat, lon)) {
                a.latitude = None;
                a.longitude = None;
            }
        }

        for p in &mut self.protests {
            p.id = sanitize_id(&p.id);
        }
        for c in &mut self.conflicts {
            c.id = sanitize_id(&c.id);
        }
        for f in &mut self.military_flights {
            f.id = sanitize_id(&f.id);
        }
        for v in &mut self.military_vessels {
            v.id = sanitize_id(&v.id);
        }
        for n in &mut self.news {
            n.id = sanitize_id(&n.id);
        }
        for o in &mut self.outages {
            o.id = sanitize_id(&o.id);
        }

        before - after
    }

    pub fn record_count(&self) -> usize {
        self.protests.len()
            + self.conflicts.len()
            + self.conflict_intensity.len()
            + self.conflict_summaries.len()
            + self.displacement.len()
            + self.climate.len()
            + self.military_flights.len()
            + self.military_vessels.len()
            + self.news.len()
            + self.outages.len()
            + self.focal_points.len()
    }

    /// Feed every batch into the engine. Returns the number of records attributed.
    pub fn ingest_into(&self, engine: &mut InstabilityEngine) -> usize {
        let mut attributed = 0;
        attributed += engine.ingest_protests(&self.protests);
        attributed += engine.ingest_conflicts(&self.conflicts);
        attributed += engine.ingest_conflict_intensity(&self.conflict_intensity);
        attributed += engine.ingest_conflict_summaries(&self.conflict_summaries);
        attributed += engine.ingest_displacement(&self.displacement);
        attributed += engine.ingest_climate(&self.climate);
        attributed += engine.ingest_military(&self.military_flights, &self.military_vessels);
        attributed += engine.ingest_news(&self.news);
        attributed += engine.ingest_outages(&self.outages);
        attributed += engine.ingest_focal_points(&self.focal_points);

        info!("Ingested snapshot: {} attributed of {} records", attributed, self.record_count());
        attributed
    }
}

/// Load a signal snapshot from a JSON file
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<SignalSnapshot> {
    let path = path.as_ref();
    info!("Loading signal snapshot from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut snapshot: SignalSnapshot = serde_json::from_reader(reader)?;

    let skipped = snapshot.sanitize();
    info!(
        "Loaded {} signal records ({} skipped for invalid coords)",
        snapshot.record_count(),
        skipped
    );

    Ok(snapshot)
}

/// Load a previous-score snapshot (`{"UA": 62, ...}`)
pub fn load_previous_scores(path: impl AsRef<Path>) -> Result<HashMap<String, u8>> {
    let path = path.as_ref();
    info!("Loading previous scores from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let scores: HashMap<String, u8> = serde_json::from_reader(reader)?;

    info!("Loaded {} previous scores", scores.len());
    Ok(scores)
}
