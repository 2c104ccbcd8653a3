//! Scoring pipeline: fetch pending inspections, score them, write back, commit.

use std::time::Instant;

use anyhow::Context;
use chrono::{DateTime, Utc};
use santrack_core::{PendingInspection, RiskScorer, SCORED_STATUS};
use santrack_store::{RecordStore, StoreError, UpdateOutcome};
use tracing::{error, info, warn};

pub struct EtlStats {
    /// Inspections selected as pending.
    pub pending: usize,
    /// Inspections scored and committed.
    pub processed: usize,
    /// Pending inspections already scored by someone else by update time.
    pub skipped: usize,
    pub started_at: DateTime<Utc>,
    pub elapsed_secs: f64,
}

/// Run one batch pass over every pending inspection.
///
/// `connect` acquires the store; the store is dropped (and its connection
/// closed) before this returns on every path. Updates are staged inside a
/// single transaction that is committed once at the end. An empty pending
/// set returns early without opening a transaction.
pub fn run_etl<S, F>(connect: F, scorer: &RiskScorer) -> anyhow::Result<EtlStats>
where
    S: RecordStore,
    F: FnOnce() -> Result<S, StoreError>,
{
    let start = Instant::now();
    let started_at = Utc::now();
    println!("Starting SanTrack ETL...");

    // 1. Connect.
    let store = connect()
        .inspect_err(|e| report_failure("connect", e))
        .context("connecting to inspection store")?;

    // 2. Select.
    let pending = store
        .fetch_pending()
        .inspect_err(|e| report_failure("select", e))
        .context("fetching pending inspections")?;
    println!("Found {} pending inspections", pending.len());
    info!(count = pending.len(), "selected pending inspections");

    let mut stats = EtlStats {
        pending: pending.len(),
        processed: 0,
        skipped: 0,
        started_at,
        elapsed_secs: 0.0,
    };

    if pending.is_empty() {
        println!("No pending data - ETL up to date!");
        stats.elapsed_secs = start.elapsed().as_secs_f64();
        return Ok(stats);
    }

    // 3. Score and stage.
    store
        .begin()
        .inspect_err(|e| report_failure("begin", e))
        .context("beginning transaction")?;
    if let Err(e) = stage_scores(&store, scorer, &pending, &mut stats) {
        if let Err(rb) = store.rollback() {
            warn!(error = %rb, "rollback after failed update did not succeed");
        }
        return Err(e);
    }

    // 4. Commit.
    store
        .commit()
        .inspect_err(|e| report_failure("commit", e))
        .context("committing scored inspections")?;

    stats.elapsed_secs = start.elapsed().as_secs_f64();
    println!();
    println!("ETL COMPLETE! Processed {} inspections", stats.processed);
    info!(
        processed = stats.processed,
        skipped = stats.skipped,
        elapsed_secs = stats.elapsed_secs,
        "committed scored inspections"
    );
    Ok(stats)
}

fn stage_scores<S: RecordStore>(
    store: &S,
    scorer: &RiskScorer,
    pending: &[PendingInspection],
    stats: &mut EtlStats,
) -> anyhow::Result<()> {
    for inspection in pending {
        let score = scorer.score_column(inspection.checklist.as_deref());
        let outcome = store
            .update_score(inspection.id, score, SCORED_STATUS)
            .inspect_err(|e| report_failure("update", e))
            .with_context(|| format!("updating inspection {}", inspection.id))?;
        match outcome {
            UpdateOutcome::Scored => {
                println!("ID {}: Risk Score = {score}", inspection.id);
                stats.processed += 1;
            }
            UpdateOutcome::AlreadyScored => {
                warn!(id = inspection.id, "inspection already scored, skipped");
                stats.skipped += 1;
            }
        }
    }
    Ok(())
}

/// Number of pending inspections, without writing anything.
pub fn count_pending<S, F>(connect: F) -> anyhow::Result<usize>
where
    S: RecordStore,
    F: FnOnce() -> Result<S, StoreError>,
{
    let store = connect()
        .inspect_err(|e| report_failure("connect", e))
        .context("connecting to inspection store")?;
    store
        .pending_count()
        .inspect_err(|e| report_failure("select", e))
        .context("counting pending inspections")
}

fn report_failure(phase: &'static str, e: &StoreError) {
    println!("DB Error: {e}");
    error!(phase, error = %e, "inspection store failure");
}
