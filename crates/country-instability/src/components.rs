//! Component scorers
//!
//! Four independent 0-100 sub-scores computed from a country's accumulated
//! signals. Every internal term is capped before summation.
//!
//! ```text
//! U = min(100, min(50, 8·V_u) + min(30, 5·F·m) + min(20, 10·H·m) + min(50, 30·T + 15·M + 5·P))
//! C = min(100, max(min(50, (3·B + 4·X + 5·A)·m) + min(40, 5·√F·m) + min(10, 3·A), fallback))
//! S = min(100, min(50, 3·flights) + min(30, 5·vessels))
//! I = min(100, min(40, 5·V_i) + velocity + alert)
//! ```
//!
//! `m` is the country's event multiplier. Below 0.7 (high media volume)
//! raw counts are log-compressed: `V = log2(n + 1)·m·k`, otherwise `V = n·m`.

use crate::countries::HIGH_VOLUME_MULTIPLIER;
use crate::signals::{
    ConflictEvent, ConflictEventType, ConflictIntensity, ConflictSummary, InternetOutage,
    MilitaryFlight, MilitaryVessel, NewsCluster, OutageSeverity, ProtestEvent, ProtestSeverity,
};
use serde::{Deserialize, Serialize};

/// Accumulated signals for one tier-1 country
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryData {
    pub protests: Vec<ProtestEvent>,
    pub conflicts: Vec<ConflictEvent>,
    pub conflict_intensity: Option<ConflictIntensity>,
    pub conflict_summary: Option<ConflictSummary>,
    pub military_flights: Vec<MilitaryFlight>,
    pub military_vessels: Vec<MilitaryVessel>,
    /// Foreign aircraft over this country, pre-weighted ×2
    pub foreign_flight_presence: u32,
    /// Foreign vessels in this country's waters, pre-weighted ×2
    pub foreign_vessel_presence: u32,
    pub news: Vec<NewsCluster>,
    pub outages: Vec<InternetOutage>,
    /// Replaced on every displacement batch
    pub displacement_outflow: u64,
    /// Replaced on every climate batch (0, 8 or 15)
    pub climate_stress: f64,
}

impl CountryData {
    pub fn flight_count(&self) -> u32 {
        self.military_flights.len() as u32 + self.foreign_flight_presence
    }

    pub fn vessel_count(&self) -> u32 {
        self.military_vessels.len() as u32 + self.foreign_vessel_presence
    }

    /// True when no signal of any kind has been ingested
    pub fn is_empty(&self) -> bool {
        self.protests.is_empty()
            && self.conflicts.is_empty()
            && self.conflict_intensity.is_none()
            && self.conflict_summary.is_none()
            && self.flight_count() == 0
            && self.vessel_count() == 0
            && self.news.is_empty()
            && self.outages.is_empty()
            && self.displacement_outflow == 0
            && self.climate_stress == 0.0
    }
}

/// The four sub-scores, unrounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub unrest: f64,
    pub conflict: f64,
    pub security: f64,
    pub information: f64,
}

impl ComponentScores {
    pub fn calculate(data: &CountryData, multiplier: f64) -> Self {
        Self {
            unrest: unrest_score(data, multiplier),
            conflict: conflict_score(data, multiplier),
            security: security_score(data),
            information: information_score(data, multiplier),
        }
    }
}

fn is_high_volume(multiplier: f64) -> bool {
    multiplier < HIGH_VOLUME_MULTIPLIER
}

/// Count adjusted for regime openness
fn adjusted_volume(count: usize, multiplier: f64, log_scale: f64) -> f64 {
    let n = count as f64;
    if is_high_volume(multiplier) {
        (n + 1.0).log2() * multiplier * log_scale
    } else {
        n * multiplier
    }
}

/// Civil unrest score (0-100)
pub fn unrest_score(data: &CountryData, multiplier: f64) -> f64 {
    let protests = &data.protests;

    let volume = (adjusted_volume(protests.len(), multiplier, 5.0) * 8.0).min(50.0);

    let fatalities: u32 = protests.iter().map(|p| p.fatalities).sum();
    let fatality_term = (fatalities as f64 * 5.0 * multiplier).min(30.0);

    let high_severity = protests
        .iter()
        .filter(|p| p.severity == ProtestSeverity::High)
        .count();
    let severity_term = (high_severity as f64 * 10.0 * multiplier).min(20.0);

    // Internet blackouts count as an independent instability signal
    let (total, major, partial) = data.outages.iter().fold((0u32, 0u32, 0u32), |acc, o| match o.severity {
        OutageSeverity::Total => (acc.0 + 1, acc.1, acc.2),
        OutageSeverity::Major => (acc.0, acc.1 + 1, acc.2),
        OutageSeverity::Partial => (acc.0, acc.1, acc.2 + 1),
    });
    let outage_term = (total as f64 * 30.0 + major as f64 * 15.0 + partial as f64 * 5.0).min(50.0);

    (volume + fatality_term + severity_term + outage_term).min(100.0)
}

/// Armed conflict score (0-100)
pub fn conflict_score(data: &CountryData, multiplier: f64) -> f64 {
    let events = &data.conflicts;
    if events.is_empty() && data.conflict_summary.is_none() {
        return 0.0;
    }

    let count = |kind: ConflictEventType| events.iter().filter(|e| e.event_type == kind).count() as f64;
    let battles = count(ConflictEventType::Battle);
    let explosions = count(ConflictEventType::Explosion);
    let civilian = count(ConflictEventType::ViolenceAgainstCivilians);
    let fatalities: u32 = events.iter().map(|e| e.fatalities).sum();

    let event_term = ((battles * 3.0 + explosions * 4.0 + civilian * 5.0) * multiplier).min(50.0);
    let fatality_term = ((fatalities as f64).sqrt() * 5.0 * multiplier).min(40.0);
    let civilian_bonus = (civilian * 3.0).min(10.0);
    let primary = event_term + fatality_term + civilian_bonus;

    let fallback = match (&data.conflict_summary, events.is_empty()) {
        (Some(summary), true) => ((summary.political_violence_events as f64 * 2.0
            + summary.civilian_targeting_events as f64 * 3.0)
            * multiplier)
            .min(60.0),
        _ => 0.0,
    };

    primary.max(fallback).min(100.0)
}

/// Military presence score (0-100)
pub fn security_score(data: &CountryData) -> f64 {
    let flights = (data.flight_count() as f64 * 3.0).min(50.0);
    let vessels = (data.vessel_count() as f64 * 5.0).min(30.0);
    (flights + vessels).min(100.0)
}

/// Information environment score (0-100)
pub fn information_score(data: &CountryData, multiplier: f64) -> f64 {
    let news = &data.news;
    if news.is_empty() {
        return 0.0;
    }

    let volume = (adjusted_volume(news.len(), multiplier, 3.0) * 5.0).min(40.0);

    let avg_velocity = news.iter().map(|n| n.sources_per_hour).sum::<f64>() / news.len() as f64;
    let threshold = if is_high_volume(multiplier) { 5.0 } else { 2.0 };
    let velocity_boost = if avg_velocity > threshold {
        ((avg_velocity - threshold) * 10.0 * multiplier).min(40.0)
    } else {
        0.0
    };

    let alert_boost = if news.iter().any(|n| n.is_alert) {
        20.0 * multiplier
    } else {
        0.0
    };

    (volume + velocity_boost + alert_boost).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn protest(severity: ProtestSeverity, fatalities: u32) -> ProtestEvent {
        ProtestEvent {
            id: "p".to_string(),
            country: "XX".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            severity,
            fatalities,
        }
    }

    fn conflict(event_type: ConflictEventType, fatalities: u32) -> ConflictEvent {
        ConflictEvent {
            id: "c".to_string(),
            country: "XX".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            event_type,
            fatalities,
        }
    }

    fn news(sources_per_hour: f64, is_alert: bool) -> NewsCluster {
        NewsCluster {
            id: "n".to_string(),
            title: "headline".to_string(),
            source_count: 3,
            sources_per_hour,
            is_alert,
        }
    }

    fn outage(severity: OutageSeverity) -> InternetOutage {
        InternetOutage {
            id: "o".to_string(),
            country: "XX".to_string(),
            latitude: None,
            longitude: None,
            severity,
        }
    }

    #[test]
    fn test_empty_data_scores_zero() {
        let data = CountryData::default();
        assert!(data.is_empty());
        assert_eq!(ComponentScores::calculate(&data, 1.0), ComponentScores::default());
    }

    #[test]
    fn test_unrest_three_high_protests() {
        let data = CountryData {
            protests: (0..3).map(|_| protest(ProtestSeverity::High, 0)).collect(),
            ..Default::default()
        };
        // min(50, 3·1.2·8) + 0 + min(20, 3·10·1.2) = 28.8 + 20
        let score = unrest_score(&data, 1.2);
        assert!((score - 48.8).abs() < 1e-9, "unrest: {}", score);
        assert_eq!(score.round(), 49.0);
    }

    #[test]
    fn test_unrest_log_compression_for_high_volume() {
        let volume = |n: usize, m: f64| {
            let data = CountryData {
                protests: (0..n).map(|_| protest(ProtestSeverity::Low, 0)).collect(),
                ..Default::default()
            };
            unrest_score(&data, m)
        };

        let linear_growth = volume(4, 1.0) / volume(2, 1.0);
        let log_growth = volume(4, 0.5) / volume(2, 0.5);
        assert!((linear_growth - 2.0).abs() < 1e-9);
        assert!(log_growth < linear_growth, "log {} vs linear {}", log_growth, linear_growth);
    }

    #[test]
    fn test_unrest_outage_term() {
        let data = CountryData {
            outages: vec![outage(OutageSeverity::Total), outage(OutageSeverity::Major), outage(OutageSeverity::Partial)],
            ..Default::default()
        };
        assert_eq!(unrest_score(&data, 1.0), 50.0);

        let data = CountryData {
            outages: vec![outage(OutageSeverity::Partial), outage(OutageSeverity::Partial)],
            ..Default::default()
        };
        assert_eq!(unrest_score(&data, 3.0), 10.0);
    }

    #[test]
    fn test_unrest_capped_at_100() {
        let data = CountryData {
            protests: (0..50).map(|_| protest(ProtestSeverity::High, 10)).collect(),
            outages: (0..5).map(|_| outage(OutageSeverity::Total)).collect(),
            ..Default::default()
        };
        assert_eq!(unrest_score(&data, 3.0), 100.0);
    }

    #[test]
    fn test_conflict_requires_events_or_summary() {
        let data = CountryData {
            conflict_intensity: Some(ConflictIntensity::War),
            ..Default::default()
        };
        assert_eq!(conflict_score(&data, 1.0), 0.0);
    }

    #[test]
    fn test_conflict_primary_terms() {
        let data = CountryData {
            conflicts: vec![
                conflict(ConflictEventType::Battle, 4),
                conflict(ConflictEventType::Explosion, 0),
                conflict(ConflictEventType::ViolenceAgainstCivilians, 5),
                conflict(ConflictEventType::Riot, 0),
            ],
            ..Default::default()
        };
        // events (3 + 4 + 5) = 12, fatalities √9·5 = 15, civilian bonus 3
        let score = conflict_score(&data, 1.0);
        assert!((score - 30.0).abs() < 1e-9, "conflict: {}", score);
    }

    #[test]
    fn test_conflict_summary_fallback() {
        let data = CountryData {
            conflict_summary: Some(ConflictSummary {
                political_violence_events: 10,
                civilian_targeting_events: 5,
                fatalities: 0,
            }),
            ..Default::default()
        };
        // (10·2 + 5·3)·1.5 = 52.5
        assert!((conflict_score(&data, 1.5) - 52.5).abs() < 1e-9);

        let data = CountryData {
            conflict_summary: Some(ConflictSummary {
                political_violence_events: 100,
                civilian_targeting_events: 100,
                fatalities: 0,
            }),
            ..Default::default()
        };
        assert_eq!(conflict_score(&data, 1.0), 60.0);
    }

    #[test]
    fn test_conflict_summary_ignored_with_primary_events() {
        let data = CountryData {
            conflicts: vec![conflict(ConflictEventType::Battle, 0)],
            conflict_summary: Some(ConflictSummary {
                political_violence_events: 100,
                civilian_targeting_events: 100,
                fatalities: 0,
            }),
            ..Default::default()
        };
        assert!((conflict_score(&data, 1.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_security_counts_foreign_presence() {
        let data = CountryData {
            foreign_flight_presence: 4,
            foreign_vessel_presence: 2,
            ..Default::default()
        };
        assert_eq!(security_score(&data), 4.0 * 3.0 + 2.0 * 5.0);

        let data = CountryData {
            foreign_flight_presence: 40,
            foreign_vessel_presence: 40,
            ..Default::default()
        };
        assert_eq!(security_score(&data), 80.0);
    }

    #[test]
    fn test_information_velocity_threshold() {
        // Normal-volume country: threshold 2 sources/hour
        let data = CountryData {
            news: vec![news(4.0, false), news(4.0, false)],
            ..Default::default()
        };
        // volume min(40, 2·1·5) = 10, velocity (4 - 2)·10 = 20
        assert!((information_score(&data, 1.0) - 30.0).abs() < 1e-9);

        // High-volume country: threshold 5, no velocity boost at 4/h
        let score = information_score(&data, 0.5);
        let expected = (3.0f64).log2() * 0.5 * 3.0 * 5.0;
        assert!((score - expected).abs() < 1e-9, "information: {}", score);
    }

    #[test]
    fn test_information_alert_boost() {
        let data = CountryData {
            news: vec![news(0.0, true)],
            ..Default::default()
        };
        // volume 1·2·5 + alert 20·2
        assert!((information_score(&data, 2.0) - 50.0).abs() < 1e-9);
    }

    fn protest_severity() -> impl Strategy<Value = ProtestSeverity> {
        prop_oneof![
            Just(ProtestSeverity::Low),
            Just(ProtestSeverity::Medium),
            Just(ProtestSeverity::High),
        ]
    }

    fn conflict_type() -> impl Strategy<Value = ConflictEventType> {
        prop_oneof![
            Just(ConflictEventType::Battle),
            Just(ConflictEventType::Explosion),
            Just(ConflictEventType::ViolenceAgainstCivilians),
            Just(ConflictEventType::Riot),
            Just(ConflictEventType::Other),
        ]
    }

    fn outage_severity() -> impl Strategy<Value = OutageSeverity> {
        prop_oneof![
            Just(OutageSeverity::Total),
            Just(OutageSeverity::Major),
            Just(OutageSeverity::Partial),
        ]
    }

    fn country_data() -> impl Strategy<Value = CountryData> {
        (
            prop::collection::vec((protest_severity(), 0u32..500), 0..80),
            prop::collection::vec((conflict_type(), 0u32..2_000), 0..80),
            prop::option::of((0u32..500, 0u32..500, 0u32..5_000)),
            0u32..60,
            0u32..60,
            0u32..100,
            0u32..100,
            prop::collection::vec((0.0f64..50.0, any::<bool>()), 0..40),
            prop::collection::vec(outage_severity(), 0..10),
        )
            .prop_map(
                |(protests, conflicts, summary, flights, vessels, foreign_flights, foreign_vessels, news_items, outages)| {
                    CountryData {
                        protests: protests.into_iter().map(|(s, f)| protest(s, f)).collect(),
                        conflicts: conflicts.into_iter().map(|(t, f)| conflict(t, f)).collect(),
                        conflict_summary: summary.map(|(pv, ct, fatalities)| ConflictSummary {
                            political_violence_events: pv,
                            civilian_targeting_events: ct,
                            fatalities,
                        }),
                        military_flights: (0..flights)
                            .map(|i| MilitaryFlight {
                                id: format!("f{}", i),
                                callsign: None,
                                operator_country: "XX".to_string(),
                                latitude: 0.0,
                                longitude: 0.0,
                            })
                            .collect(),
                        military_vessels: (0..vessels)
                            .map(|i| MilitaryVessel {
                                id: format!("v{}", i),
                                name: None,
                                operator_country: "XX".to_string(),
                                latitude: 0.0,
                                longitude: 0.0,
                            })
                            .collect(),
                        foreign_flight_presence: foreign_flights,
                        foreign_vessel_presence: foreign_vessels,
                        news: news_items.into_iter().map(|(v, alert)| news(v, alert)).collect(),
                        outages: outages.into_iter().map(outage).collect(),
                        ..Default::default()
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn prop_components_in_range(data in country_data(), multiplier in 0.3f64..=3.0) {
            let c = ComponentScores::calculate(&data, multiplier);
            for value in [c.unrest, c.conflict, c.security, c.information] {
                prop_assert!((0.0..=100.0).contains(&value), "component {} out of range: {:?}", value, c);
            }
        }
    }
}
