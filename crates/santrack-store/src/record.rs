//! The record store contract the scoring pipeline runs against.

use santrack_core::{PendingInspection, RiskScore};

use crate::StoreError;

/// Result of a single point update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The row was pending and now carries the new score.
    Scored,
    /// The row was already scored (or has vanished) and was left untouched.
    AlreadyScored,
}

/// A relational store holding inspection records.
///
/// An implementation owns exactly one connection. Dropping the store closes
/// it and discards any transaction that was begun but not committed.
pub trait RecordStore {
    /// All inspections whose `risk_score` is NULL, in store order.
    fn fetch_pending(&self) -> Result<Vec<PendingInspection>, StoreError>;

    /// Number of inspections whose `risk_score` is NULL.
    fn pending_count(&self) -> Result<usize, StoreError>;

    fn begin(&self) -> Result<(), StoreError>;

    /// Set `risk_score` and `status` on a still-pending inspection.
    fn update_score(
        &self,
        id: i64,
        score: RiskScore,
        status: &str,
    ) -> Result<UpdateOutcome, StoreError>;

    fn commit(&self) -> Result<(), StoreError>;

    fn rollback(&self) -> Result<(), StoreError>;
}
