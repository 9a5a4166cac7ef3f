//! Instability engine
//!
//! Owns every piece of mutable scoring state: per-country signal data,
//! hotspot activity, focal-point urgencies, the previous-score snapshot and
//! learning mode. One engine per scoring session; callers serialize access.
//!
//! Scalar fields (displacement outflow, climate stress) are reset for every
//! known country and rewritten on each batch. List fields append until
//! [`InstabilityEngine::clear`].

use crate::attribution::{CountryAttribution, PolygonLookup};
use crate::components::{ComponentScores, CountryData};
use crate::composite::{composite_score, CompositeInputs, CountryScore, ScoreBreakdown, ScoreLevel, Trend};
use crate::config::CiiConfig;
use crate::countries::{baseline_risk, country_name, event_multiplier, tier1_code, TIER1_COUNTRIES};
use crate::hotspots::HotspotTracker;
use crate::learning::{LearningMode, LearningStatus};
use crate::signals::{
    ClimateAnomaly, ConflictEvent, ConflictIntensity, ConflictSummary, DisplacementFlow, FocalUrgency,
    InternetOutage, MilitaryFlight, MilitaryVessel, NewsCluster, ProtestEvent, ProtestSeverity,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};

/// Hotspot weights applied at ingestion
const PROTEST_WEIGHT_HIGH: f64 = 2.000000000;
const PROTEST_WEIGHT: f64 = 1.000000000;
const CONFLICT_WEIGHT_FATAL: f64 = 2.000000000;
const CONFLICT_WEIGHT: f64 = 1.500000000;
const MILITARY_WEIGHT: f64 = 1.000000000;

/// Foreign military presence counts double
const FOREIGN_PRESENCE_WEIGHT: u32 = 2;

pub struct InstabilityEngine {
    config: CiiConfig,
    attribution: CountryAttribution,
    countries: HashMap<String, CountryData>,
    hotspots: HotspotTracker,
    focal_points: HashMap<String, FocalUrgency>,
    previous_scores: HashMap<String, u8>,
    learning: LearningMode,
}

impl InstabilityEngine {
    pub fn new() -> Self {
        Self::with_config(CiiConfig::default())
    }

    pub fn with_config(config: CiiConfig) -> Self {
        Self::build(config, CountryAttribution::new())
    }

    /// Engine backed by a precise polygon lookup for coordinate attribution
    pub fn with_polygons(config: CiiConfig, polygons: Box<dyn PolygonLookup>) -> Self {
        Self::build(config, CountryAttribution::with_polygons(polygons))
    }

    fn build(config: CiiConfig, attribution: CountryAttribution) -> Self {
        let learning = LearningMode::new(config.learning_minutes);
        Self {
            config,
            attribution,
            countries: HashMap::new(),
            hotspots: HotspotTracker::new(),
            focal_points: HashMap::new(),
            previous_scores: HashMap::new(),
            learning,
        }
    }

    pub fn hotspots(&self) -> &HotspotTracker {
        &self.hotspots
    }

    fn data_mut(&mut self, code: &'static str) -> &mut CountryData {
        self.countries.entry(code.to_string()).or_default()
    }

    // ------------------------------------------------------------------
    // Ingestion
    // ------------------------------------------------------------------

    /// Append civil-unrest events. Returns the number attributed.
    pub fn ingest_protests(&mut self, events: &[ProtestEvent]) -> usize {
        let mut attributed = 0;
        for event in events {
            let Some(code) =
                self.attribution
                    .resolve_event(&event.country, Some(event.latitude), Some(event.longitude))
            else {
                debug!("Dropping protest {}: no tier-1 country", event.id);
                continue;
            };

            self.data_mut(code).protests.push(event.clone());
            let weight = match event.severity {
                ProtestSeverity::High => PROTEST_WEIGHT_HIGH,
                _ => PROTEST_WEIGHT,
            };
            self.hotspots.track_activity(event.latitude, event.longitude, weight);
            attributed += 1;
        }

        debug!("Ingested {}/{} protests", attributed, events.len());
        attributed
    }

    /// Append armed-conflict events. Returns the number attributed.
    pub fn ingest_conflicts(&mut self, events: &[ConflictEvent]) -> usize {
        let mut attributed = 0;
        for event in events {
            let Some(code) =
                self.attribution
                    .resolve_event(&event.country, Some(event.latitude), Some(event.longitude))
            else {
                debug!("Dropping conflict event {}: no tier-1 country", event.id);
                continue;
            };

            self.data_mut(code).conflicts.push(event.clone());
            let weight = if event.fatalities > 0 { CONFLICT_WEIGHT_FATAL } else { CONFLICT_WEIGHT };
            self.hotspots.track_activity(event.latitude, event.longitude, weight);
            attributed += 1;
        }

        debug!("Ingested {}/{} conflict events", attributed, events.len());
        attributed
    }

    /// Store the latest intensity classification per country code
    pub fn ingest_conflict_intensity(&mut self, classifications: &HashMap<String, ConflictIntensity>) -> usize {
        let mut stored = 0;
        for (code, intensity) in classifications {
            if let Some(code) = tier1_code(code) {
                self.data_mut(code).conflict_intensity = Some(*intensity);
                stored += 1;
            }
        }

        debug!("Stored {}/{} conflict classifications", stored, classifications.len());
        stored
    }

    /// Store the latest fallback conflict summary per country code
    pub fn ingest_conflict_summaries(&mut self, summaries: &HashMap<String, ConflictSummary>) -> usize {
        let mut stored = 0;
        for (code, summary) in summaries {
            if let Some(code) = tier1_code(code) {
                self.data_mut(code).conflict_summary = Some(summary.clone());
                stored += 1;
            }
        }

        debug!("Stored {}/{} conflict summaries", stored, summaries.len());
        stored
    }

    /// Replace displacement outflow for every country from one batch
    pub fn ingest_displacement(&mut self, flows: &[DisplacementFlow]) -> usize {
        let mut totals: HashMap<&'static str, u64> = HashMap::new();
        for flow in flows {
            if let Some(code) = self.attribution.resolve_country(&flow.origin) {
                let total = totals.entry(code).or_insert(0);
                *total = total.saturating_add(flow.outflow);
            }
        }

        for data in self.countries.values_mut() {
            data.displacement_outflow = 0;
        }
        for (code, outflow) in &totals {
            self.data_mut(*code).displacement_outflow = *outflow;
        }

        debug!("Displacement outflow set for {} countries", totals.len());
        totals.len()
    }

    /// Replace climate stress for every country from one batch
    pub fn ingest_climate(&mut self, anomalies: &[ClimateAnomaly]) -> usize {
        let mut stress: HashMap<&'static str, f64> = HashMap::new();
        for anomaly in anomalies {
            let code = match (anomaly.latitude, anomaly.longitude) {
                (Some(lat), Some(lon)) => self.attribution.resolve_coordinates(lat, lon),
                _ => None,
            }
            .or_else(|| self.attribution.resolve_text(&anomaly.zone));

            if let Some(code) = code {
                let value = stress.entry(code).or_insert(0.0);
                *value = value.max(anomaly.severity.stress());
            }
        }

        for data in self.countries.values_mut() {
            data.climate_stress = 0.0;
        }
        for (code, value) in &stress {
            self.data_mut(*code).climate_stress = *value;
        }

        debug!("Climate stress set for {} countries", stress.len());
        stress.len()
    }

    /// Credit operators with their own tracks and territories with foreign presence
    pub fn ingest_military(&mut self, flights: &[MilitaryFlight], vessels: &[MilitaryVessel]) -> usize {
        let mut attributed = 0;

        for flight in flights {
            let operator = self.attribution.resolve_country(&flight.operator_country);
            let location = self.attribution.resolve_coordinates(flight.latitude, flight.longitude);

            if let Some(code) = operator {
                self.data_mut(code).military_flights.push(flight.clone());
            }
            if let Some(code) = location.filter(|loc| Some(*loc) != operator) {
                self.data_mut(code).foreign_flight_presence += FOREIGN_PRESENCE_WEIGHT;
            }
            if operator.is_some() || location.is_some() {
                self.hotspots.track_activity(flight.latitude, flight.longitude, MILITARY_WEIGHT);
                attributed += 1;
            }
        }

        for vessel in vessels {
            let operator = self.attribution.resolve_country(&vessel.operator_country);
            let location = self.attribution.resolve_coordinates(vessel.latitude, vessel.longitude);

            if let Some(code) = operator {
                self.data_mut(code).military_vessels.push(vessel.clone());
            }
            if let Some(code) = location.filter(|loc| Some(*loc) != operator) {
                self.data_mut(code).foreign_vessel_presence += FOREIGN_PRESENCE_WEIGHT;
            }
            if operator.is_some() || location.is_some() {
                self.hotspots.track_activity(vessel.latitude, vessel.longitude, MILITARY_WEIGHT);
                attributed += 1;
            }
        }

        debug!(
            "Ingested {}/{} military tracks",
            attributed,
            flights.len() + vessels.len()
        );
        attributed
    }

    /// Credit each news cluster to every tier-1 country its title mentions
    pub fn ingest_news(&mut self, clusters: &[NewsCluster]) -> usize {
        let mut attributed = 0;
        for cluster in clusters {
            let codes = self.attribution.mentioned_countries(&cluster.title);
            if codes.is_empty() {
                continue;
            }
            for code in codes {
                self.data_mut(code).news.push(cluster.clone());
            }
            attributed += 1;
        }

        debug!("Ingested {}/{} news clusters", attributed, clusters.len());
        attributed
    }

    pub fn ingest_outages(&mut self, outages: &[InternetOutage]) -> usize {
        let mut attributed = 0;
        for outage in outages {
            let Some(code) = self
                .attribution
                .resolve_event(&outage.country, outage.latitude, outage.longitude)
            else {
                debug!("Dropping outage {}: no tier-1 country", outage.id);
                continue;
            };
            self.data_mut(code).outages.push(outage.clone());
            attributed += 1;
        }

        debug!("Ingested {}/{} outages", attributed, outages.len());
        attributed
    }

    /// Replace the focal-point urgency snapshot
    pub fn ingest_focal_points(&mut self, urgencies: &HashMap<String, FocalUrgency>) -> usize {
        self.focal_points = urgencies
            .iter()
            .filter_map(|(code, urgency)| tier1_code(code).map(|c| (c.to_string(), *urgency)))
            .collect();

        debug!("Focal points set for {} countries", self.focal_points.len());
        self.focal_points.len()
    }

    // ------------------------------------------------------------------
    // Scoring
    // ------------------------------------------------------------------

    fn score_for(&self, code: &'static str, now: DateTime<Utc>) -> CountryScore {
        let empty = CountryData::default();
        let data = self.countries.get(code).unwrap_or(&empty);

        let components = ComponentScores::calculate(data, event_multiplier(code));
        let inputs = CompositeInputs::from_data(
            data,
            baseline_risk(code),
            self.hotspots.boost(code),
            self.focal_points.get(code).copied(),
        );
        let score = composite_score(code, &components, &inputs, &self.config);

        let change_24h = self
            .previous_scores
            .get(code)
            .map(|prev| i16::from(score) - i16::from(*prev))
            .unwrap_or(0);

        CountryScore {
            code: code.to_string(),
            name: country_name(code).unwrap_or(code).to_string(),
            score,
            level: ScoreLevel::from_score(score),
            trend: Trend::from_delta(change_24h, self.config.trend_threshold),
            change_24h,
            components: ScoreBreakdown::from(&components),
            last_updated: now,
        }
    }

    /// Score every tier-1 country, ranked, and advance the previous-score snapshot
    pub fn calculate_scores_at(&mut self, now: DateTime<Utc>) -> Vec<CountryScore> {
        let mut scores: Vec<CountryScore> = TIER1_COUNTRIES
            .iter()
            .map(|(code, _)| self.score_for(code, now))
            .collect();

        scores.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.code.cmp(&b.code)));

        for s in &scores {
            debug!(
                "{} {} [U{} C{} S{} I{}] {:?}",
                s.code,
                s.score,
                s.components.unrest,
                s.components.conflict,
                s.components.security,
                s.components.information,
                s.trend
            );
            self.previous_scores.insert(s.code.clone(), s.score);
        }

        if let Some(top) = scores.first() {
            info!("Scored {} countries, highest {} at {}", scores.len(), top.code, top.score);
        }

        scores
    }

    pub fn calculate_scores(&mut self) -> Vec<CountryScore> {
        self.calculate_scores_at(Utc::now())
    }

    /// Highest `n` scores. Runs a full scoring pass.
    pub fn top_unstable(&mut self, n: usize) -> Vec<CountryScore> {
        let mut scores = self.calculate_scores();
        scores.truncate(n);
        scores
    }

    /// Score one country without touching the previous-score snapshot
    pub fn country_score(&self, code: &str) -> Option<CountryScore> {
        tier1_code(code).map(|c| self.score_for(c, Utc::now()))
    }

    pub fn country_data(&self, code: &str) -> Option<&CountryData> {
        tier1_code(code).and_then(|c| self.countries.get(c))
    }

    // ------------------------------------------------------------------
    // Temporal state
    // ------------------------------------------------------------------

    pub fn start_learning(&mut self) {
        self.learning.start();
    }

    pub fn start_learning_at(&mut self, now: DateTime<Utc>) {
        self.learning.start_at(now);
    }

    pub fn learning_status(&mut self) -> LearningStatus {
        self.learning.status()
    }

    pub fn learning_status_at(&mut self, now: DateTime<Utc>) -> LearningStatus {
        self.learning.status_at(now)
    }

    pub fn is_in_learning(&mut self) -> bool {
        self.learning.is_in_learning()
    }

    pub fn set_has_cached_scores(&mut self, cached: bool) {
        self.learning.set_has_cached_scores(cached);
    }

    pub fn previous_scores(&self) -> &HashMap<String, u8> {
        &self.previous_scores
    }

    /// Load a prior snapshot so the first pass has a trend baseline
    pub fn seed_previous_scores(&mut self, scores: &HashMap<String, u8>) -> usize {
        let mut seeded = 0;
        for (code, score) in scores {
            if let Some(code) = tier1_code(code) {
                self.previous_scores.insert(code.to_string(), (*score).min(100));
                seeded += 1;
            }
        }

        info!("Seeded {} previous scores", seeded);
        seeded
    }

    /// Drop all country data and hotspot activity
    pub fn clear(&mut self) {
        self.countries.clear();
        self.hotspots.clear();
        info!("Cleared country data and hotspot activity");
    }
}

impl Default for InstabilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{ClimateSeverity, OutageSeverity};
    use chrono::{Duration, TimeZone};

    fn protest(id: &str, country: &str, lat: f64, lon: f64, severity: ProtestSeverity) -> ProtestEvent {
        ProtestEvent {
            id: id.to_string(),
            country: country.to_string(),
            latitude: lat,
            longitude: lon,
            severity,
            fatalities: 0,
        }
    }

    fn flow(origin: &str, outflow: u64) -> DisplacementFlow {
        DisplacementFlow {
            origin: origin.to_string(),
            outflow,
        }
    }

    fn flight(id: &str, operator: &str, lat: f64, lon: f64) -> MilitaryFlight {
        MilitaryFlight {
            id: id.to_string(),
            callsign: None,
            operator_country: operator.to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    fn score_of(scores: &[CountryScore], code: &str) -> u8 {
        scores.iter().find(|s| s.code == code).map(|s| s.score).unwrap()
    }

    #[test]
    fn test_empty_engine_scores_baseline() {
        let mut engine = InstabilityEngine::new();
        let scores = engine.calculate_scores();

        assert_eq!(scores.len(), TIER1_COUNTRIES.len());
        for s in &scores {
            let expected = (baseline_risk(&s.code) * 0.4).round() as u8;
            assert_eq!(s.score, expected, "{}", s.code);
            assert_eq!(s.trend, Trend::Stable);
            assert_eq!(s.change_24h, 0);
        }
    }

    #[test]
    fn test_ranking_and_top_n() {
        let mut engine = InstabilityEngine::new();
        let top: Vec<String> = engine.top_unstable(3).into_iter().map(|s| s.code).collect();
        // SY, UA and YE share the highest baseline; ties break by code
        assert_eq!(top, vec!["SY", "UA", "YE"]);
    }

    #[test]
    fn test_high_protest_example() {
        let mut engine = InstabilityEngine::new();
        let events: Vec<_> = (0..3)
            .map(|i| protest(&format!("p{}", i), "TR", 39.93, 32.86, ProtestSeverity::High))
            .collect();
        assert_eq!(engine.ingest_protests(&events), 3);

        let score = engine.country_score("TR").unwrap();
        // min(50, 28.8) + min(20, 36)
        assert_eq!(score.components.unrest, 49);
        assert!(engine.hotspots().activity("TR") > 0.0);
    }

    #[test]
    fn test_unattributed_events_dropped() {
        let mut engine = InstabilityEngine::new();
        // Cairo
        let events = vec![protest("p1", "Egypt", 30.04, 31.24, ProtestSeverity::Medium)];
        assert_eq!(engine.ingest_protests(&events), 0);
        assert!(engine.country_data("EG").is_none());
        assert!(engine.hotspots().is_empty());
    }

    #[test]
    fn test_war_classification_floor() {
        let mut engine = InstabilityEngine::new();
        let mut classes = HashMap::new();
        classes.insert("de".to_string(), ConflictIntensity::War);
        classes.insert("XX".to_string(), ConflictIntensity::War);
        assert_eq!(engine.ingest_conflict_intensity(&classes), 1);

        let score = engine.country_score("DE").unwrap();
        assert_eq!(score.score, 70);
        assert_eq!(score.level, ScoreLevel::High);
    }

    #[test]
    fn test_conflict_summary_fallback() {
        let mut engine = InstabilityEngine::new();
        let mut summaries = HashMap::new();
        summaries.insert(
            "MM".to_string(),
            ConflictSummary {
                political_violence_events: 5,
                civilian_targeting_events: 2,
                fatalities: 40,
            },
        );
        engine.ingest_conflict_summaries(&summaries);

        // (5×2 + 2×3) × 1.8 = 28.8
        assert_eq!(engine.country_score("MM").unwrap().components.conflict, 29);
    }

    #[test]
    fn test_displacement_replaced_not_accumulated() {
        let mut engine = InstabilityEngine::new();
        engine.ingest_displacement(&[flow("SY", 1_000_000), flow("Syria", 500_000), flow("UA", 200_000)]);
        assert_eq!(engine.country_data("SY").unwrap().displacement_outflow, 1_500_000);
        assert_eq!(engine.country_score("SY").unwrap().score, 28);

        engine.ingest_displacement(&[flow("SY", 50_000)]);
        assert_eq!(engine.country_data("SY").unwrap().displacement_outflow, 50_000);
        assert_eq!(engine.country_data("UA").unwrap().displacement_outflow, 0);
        assert_eq!(engine.country_score("SY").unwrap().score, 20);
    }

    #[test]
    fn test_climate_takes_batch_maximum() {
        let mut engine = InstabilityEngine::new();
        let anomalies = vec![
            ClimateAnomaly {
                zone: "North India Plains".to_string(),
                latitude: Some(28.61),
                longitude: Some(77.21),
                severity: ClimateSeverity::Moderate,
            },
            ClimateAnomaly {
                zone: "North India Plains".to_string(),
                latitude: Some(28.61),
                longitude: Some(77.21),
                severity: ClimateSeverity::Extreme,
            },
            ClimateAnomaly {
                zone: "Tehran basin".to_string(),
                latitude: None,
                longitude: None,
                severity: ClimateSeverity::Moderate,
            },
        ];
        assert_eq!(engine.ingest_climate(&anomalies), 2);
        assert_eq!(engine.country_data("IN").unwrap().climate_stress, 15.0);
        assert_eq!(engine.country_data("IR").unwrap().climate_stress, 8.0);

        engine.ingest_climate(&[]);
        assert_eq!(engine.country_data("IN").unwrap().climate_stress, 0.0);
    }

    #[test]
    fn test_military_foreign_presence() {
        let mut engine = InstabilityEngine::new();
        // Russian aircraft over Kyiv, Ukrainian aircraft at home
        let flights = vec![flight("f1", "RU", 50.45, 30.52), flight("f2", "Ukraine", 50.45, 30.52)];
        let vessels = vec![MilitaryVessel {
            id: "v1".to_string(),
            name: Some("Shandong".to_string()),
            operator_country: "CN".to_string(),
            latitude: 25.03,
            longitude: 121.56,
        }];
        assert_eq!(engine.ingest_military(&flights, &vessels), 3);

        let ua = engine.country_data("UA").unwrap();
        assert_eq!(ua.military_flights.len(), 1);
        assert_eq!(ua.foreign_flight_presence, 2);
        assert_eq!(ua.flight_count(), 3);
        assert_eq!(engine.country_data("RU").unwrap().military_flights.len(), 1);
        assert_eq!(engine.country_data("TW").unwrap().foreign_vessel_presence, 2);

        assert_eq!(engine.country_score("UA").unwrap().components.security, 9);
        assert_eq!(engine.country_score("TW").unwrap().components.security, 10);
    }

    #[test]
    fn test_tracks_near_borders_add_no_false_presence() {
        let mut engine = InstabilityEngine::new();
        // US aircraft at Kadena, Russian aircraft at Belgorod
        let flights = vec![flight("f1", "US", 26.35, 127.77), flight("f2", "RU", 50.60, 36.60)];
        // US vessel alongside in Bahrain
        let vessels = vec![MilitaryVessel {
            id: "v1".to_string(),
            name: None,
            operator_country: "US".to_string(),
            latitude: 26.21,
            longitude: 50.61,
        }];
        assert_eq!(engine.ingest_military(&flights, &vessels), 3);

        assert!(engine.country_data("IR").is_none());
        assert!(engine.country_data("UA").is_none());
        assert!(engine.country_data("CN").is_none());

        let ru = engine.country_data("RU").unwrap();
        assert_eq!(ru.flight_count(), 1);
        assert_eq!(ru.foreign_flight_presence, 0);
        let us = engine.country_data("US").unwrap();
        assert_eq!(us.flight_count(), 1);
        assert_eq!(us.vessel_count(), 1);
    }

    #[test]
    fn test_news_credits_every_mentioned_country() {
        let mut engine = InstabilityEngine::new();
        let clusters = vec![
            NewsCluster {
                id: "n1".to_string(),
                title: "Iran warns Israel after strike near Damascus".to_string(),
                source_count: 12,
                sources_per_hour: 1.0,
                is_alert: false,
            },
            NewsCluster {
                id: "n2".to_string(),
                title: "Global markets steady".to_string(),
                source_count: 3,
                sources_per_hour: 0.5,
                is_alert: false,
            },
        ];
        assert_eq!(engine.ingest_news(&clusters), 1);
        for code in ["IR", "IL", "SY"] {
            assert_eq!(engine.country_data(code).unwrap().news.len(), 1, "{}", code);
        }
    }

    #[test]
    fn test_outage_falls_back_to_coordinates() {
        let mut engine = InstabilityEngine::new();
        let outages = vec![InternetOutage {
            id: "o1".to_string(),
            country: String::new(),
            latitude: Some(10.48),
            longitude: Some(-66.90),
            severity: OutageSeverity::Total,
        }];
        assert_eq!(engine.ingest_outages(&outages), 1);
        assert_eq!(engine.country_score("VE").unwrap().components.unrest, 30);
    }

    #[test]
    fn test_focal_points_replace_snapshot() {
        let mut engine = InstabilityEngine::new();
        let mut focal = HashMap::new();
        focal.insert("PL".to_string(), FocalUrgency::Critical);
        engine.ingest_focal_points(&focal);
        // 10×0.4 + 8
        assert_eq!(engine.country_score("PL").unwrap().score, 12);

        engine.ingest_focal_points(&HashMap::new());
        assert_eq!(engine.country_score("PL").unwrap().score, 4);
    }

    #[test]
    fn test_trend_across_passes() {
        let mut engine = InstabilityEngine::new();
        let mut seed = HashMap::new();
        seed.insert("UA".to_string(), 10);
        seed.insert("ZZ".to_string(), 50);
        assert_eq!(engine.seed_previous_scores(&seed), 1);

        let scores = engine.calculate_scores();
        let ua = scores.iter().find(|s| s.code == "UA").unwrap();
        assert_eq!(ua.change_24h, 10);
        assert_eq!(ua.trend, Trend::Rising);
        assert_eq!(engine.previous_scores().get("UA"), Some(&20));

        let scores = engine.calculate_scores();
        assert_eq!(score_of(&scores, "UA"), 20);
        assert!(scores.iter().all(|s| s.trend == Trend::Stable));
    }

    #[test]
    fn test_country_score_does_not_advance_snapshot() {
        let engine = InstabilityEngine::new();
        engine.country_score("UA");
        assert!(engine.previous_scores().is_empty());
        assert!(engine.country_score("Atlantis").is_none());
    }

    #[test]
    fn test_list_fields_accumulate_until_clear() {
        let mut engine = InstabilityEngine::new();
        let events = vec![protest("p1", "FR", 48.85, 2.35, ProtestSeverity::Low)];
        engine.ingest_protests(&events);
        engine.ingest_protests(&events);
        assert_eq!(engine.country_data("FR").unwrap().protests.len(), 2);

        engine.calculate_scores();
        engine.clear();
        assert!(engine.country_data("FR").is_none());
        assert!(engine.hotspots().is_empty());
        assert_eq!(engine.previous_scores().len(), TIER1_COUNTRIES.len());
    }

    #[test]
    fn test_learning_through_engine() {
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut engine = InstabilityEngine::new();
        engine.start_learning_at(t0);
        assert!(engine.learning_status_at(t0).in_learning);
        assert_eq!(engine.learning_status_at(t0).progress, 0.0);

        let later = engine.learning_status_at(t0 + Duration::minutes(16));
        assert!(!later.in_learning);
        assert_eq!(later.progress, 100.0);
        assert!(!engine.learning_status_at(t0 + Duration::minutes(10)).in_learning);
        assert!(!engine.is_in_learning());

        let mut engine = InstabilityEngine::new();
        engine.start_learning_at(t0);
        engine.set_has_cached_scores(true);
        assert!(!engine.learning_status_at(t0).in_learning);
    }

    #[test]
    fn test_custom_learning_window() {
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let config = CiiConfig {
            learning_minutes: 5,
            ..Default::default()
        };
        let mut engine = InstabilityEngine::with_config(config);
        engine.start_learning_at(t0);
        assert!(!engine.learning_status_at(t0 + Duration::minutes(5)).in_learning);
        assert!(!engine.learning_status_at(t0 + Duration::minutes(4)).in_learning);
    }
}
