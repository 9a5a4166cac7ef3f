//! Learning mode
//!
//! One-shot warm-up window. Scores computed before it completes are
//! provisional. Completion happens when the window elapses or when a cached
//! score snapshot is reported, and is permanent.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LearningStatus {
    pub in_learning: bool,
    /// Elapsed share of the window, 0-100
    pub progress: f64,
    pub remaining_minutes: u32,
    pub has_cached_scores: bool,
}

#[derive(Debug, Clone)]
pub struct LearningMode {
    window: Duration,
    started_at: Option<DateTime<Utc>>,
    has_cached_scores: bool,
    complete: bool,
}

impl LearningMode {
    pub fn new(window_minutes: u32) -> Self {
        Self {
            window: Duration::minutes(i64::from(window_minutes.max(1))),
            started_at: None,
            has_cached_scores: false,
            complete: false,
        }
    }

    /// Start the window. Later calls keep the original start time.
    pub fn start_at(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            info!("Learning mode started ({} min window)", self.window.num_minutes());
            self.started_at = Some(now);
        }
    }

    pub fn start(&mut self) {
        self.start_at(Utc::now());
    }

    pub fn set_has_cached_scores(&mut self, cached: bool) {
        self.has_cached_scores = cached;
        if cached && !self.complete {
            info!("Cached scores available, learning mode bypassed");
            self.complete = true;
        }
    }

    fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        match self.started_at {
            Some(start) => (now - start).max(Duration::zero()),
            None => Duration::zero(),
        }
    }

    /// Once the window has elapsed at `now`, completion is latched and an
    /// earlier clock reading no longer reopens it.
    pub fn is_in_learning_at(&mut self, now: DateTime<Utc>) -> bool {
        if self.complete {
            return false;
        }
        if self.started_at.is_none() {
            return true;
        }
        if self.elapsed(now) >= self.window {
            info!("Learning mode complete");
            self.complete = true;
            return false;
        }
        true
    }

    pub fn is_in_learning(&mut self) -> bool {
        self.is_in_learning_at(Utc::now())
    }

    pub fn status_at(&mut self, now: DateTime<Utc>) -> LearningStatus {
        let in_learning = self.is_in_learning_at(now);
        if !in_learning {
            return LearningStatus {
                in_learning,
                progress: 100.0,
                remaining_minutes: 0,
                has_cached_scores: self.has_cached_scores,
            };
        }

        let elapsed_ms = self.elapsed(now).num_milliseconds() as f64;
        let window_ms = self.window.num_milliseconds() as f64;
        let progress = (elapsed_ms / window_ms * 100.0).clamp(0.0, 100.0);
        let remaining_ms = (window_ms - elapsed_ms).max(0.0);

        LearningStatus {
            in_learning,
            progress,
            remaining_minutes: (remaining_ms / 60_000.0).ceil() as u32,
            has_cached_scores: self.has_cached_scores,
        }
    }

    pub fn status(&mut self) -> LearningStatus {
        self.status_at(Utc::now())
    }
}

impl Default for LearningMode {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LEARNING_MINUTES)
    }
}
