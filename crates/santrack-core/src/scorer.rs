//! Inspection risk scoring.
//!
//! Maps a checklist onto a score in `[0, 10]`, lower is better:
//!
//! 1. Sum the weight of every factor *not* marked present.
//! 2. Divide by [`RAW_SCORE_DIVISOR`].
//! 3. Clamp to `[MIN_RISK_SCORE, MAX_RISK_SCORE]`.
//! 4. Round to two decimal places.
//!
//! A checklist that cannot be decoded scores [`MAX_RISK_SCORE`].

use std::fmt;

use tracing::debug;

use crate::checklist::{Checklist, ChecklistError};
use crate::weights::RiskWeights;

pub const MIN_RISK_SCORE: f64 = 0.0;
pub const MAX_RISK_SCORE: f64 = 10.0;
pub const RAW_SCORE_DIVISOR: f64 = 20.0;

/// A normalised risk score, always within `[0, 10]` and rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RiskScore(f64);

impl RiskScore {
    pub const MAX: RiskScore = RiskScore(MAX_RISK_SCORE);

    /// Normalise a raw weighted sum.
    pub fn from_raw(raw: i64) -> Self {
        let scaled = (raw as f64 / RAW_SCORE_DIVISOR).clamp(MIN_RISK_SCORE, MAX_RISK_SCORE);
        Self((scaled * 100.0).round() / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Stateless scorer over a fixed weight table.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    weights: RiskWeights,
}

impl RiskScorer {
    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }

    /// Weighted sum of every factor not marked present.
    pub fn raw_sum(&self, checklist: &Checklist) -> i64 {
        self.weights
            .iter()
            .filter(|(factor, _)| !checklist.is_present(*factor))
            .map(|(_, weight)| i64::from(weight))
            .sum()
    }

    pub fn score_checklist(&self, checklist: &Checklist) -> RiskScore {
        RiskScore::from_raw(self.raw_sum(checklist))
    }

    /// Score a decode result, substituting [`RiskScore::MAX`] for bad data.
    pub fn score_decoded(&self, decoded: Result<Checklist, ChecklistError>) -> RiskScore {
        match decoded {
            Ok(checklist) => self.score_checklist(&checklist),
            Err(e) => {
                debug!(error = %e, "unscorable checklist, using maximum risk");
                RiskScore::MAX
            }
        }
    }

    /// Score a raw checklist document.
    pub fn score(&self, raw: &str) -> RiskScore {
        self.score_decoded(Checklist::parse(raw))
    }

    /// Score a possibly-NULL checklist column.
    pub fn score_column(&self, raw: Option<&str>) -> RiskScore {
        self.score_decoded(Checklist::parse_column(raw))
    }
}
