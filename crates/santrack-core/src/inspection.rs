//! Inspection records as seen by the scoring job.

/// Status written alongside a freshly computed risk score.
pub const SCORED_STATUS: &str = "scored";

/// An inspection whose `risk_score` is still NULL.
///
/// Only the columns the scorer needs are projected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInspection {
    pub id: i64,
    /// Raw checklist document. `None` when the column is NULL.
    pub checklist: Option<String>,
}
