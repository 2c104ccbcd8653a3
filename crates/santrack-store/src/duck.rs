//! DuckDB-backed inspection store.

use std::cell::Cell;
use std::path::Path;

use arrow::array::{Array, Int64Array, LargeStringArray, StringArray};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use duckdb::{Connection, params};
use santrack_core::{PendingInspection, RiskScore};
use tracing::{debug, info, warn};

use crate::{RecordStore, StoreError, UpdateOutcome};

const SELECT_PENDING: &str = "SELECT CAST(id AS BIGINT) AS id, \
     CAST(checklist AS VARCHAR) AS checklist \
     FROM inspections WHERE risk_score IS NULL";

const COUNT_PENDING: &str =
    "SELECT count(*)::BIGINT AS cnt FROM inspections WHERE risk_score IS NULL";

const UPDATE_SCORE: &str = "UPDATE inspections SET risk_score = ?, status = ? \
     WHERE id = ? AND risk_score IS NULL";

/// DuckDB store over the `inspections` table.
///
/// Owns a single connection for its whole lifetime. Transactions are driven
/// explicitly through [`RecordStore::begin`] / [`RecordStore::commit`]; a
/// transaction still open when the store is dropped is rolled back.
pub struct DuckStore {
    conn: Connection,
    in_transaction: Cell<bool>,
}

impl DuckStore {
    /// Open an in-memory DuckDB database.
    pub fn open() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(conn))
    }

    /// Open an existing DuckDB database file.
    ///
    /// Unlike `Connection::open`, a missing file is an error rather than a
    /// fresh empty database: the job never creates the schema itself.
    pub fn open_persistent(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::DatabaseNotFound(path.to_path_buf()));
        }
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened inspection database");
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            in_transaction: Cell::new(false),
        }
    }

    fn query_arrow(&self, sql: &str) -> Result<Vec<RecordBatch>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let batches: Vec<RecordBatch> = stmt.query_arrow([])?.collect();
        Ok(batches)
    }
}

impl RecordStore for DuckStore {
    fn fetch_pending(&self) -> Result<Vec<PendingInspection>, StoreError> {
        let batches = self.query_arrow(SELECT_PENDING)?;
        let mut pending = Vec::new();
        for batch in &batches {
            pending.extend(pending_from_batch(batch)?);
        }
        debug!(count = pending.len(), "fetched pending inspections");
        Ok(pending)
    }

    fn pending_count(&self) -> Result<usize, StoreError> {
        let batches = self.query_arrow(COUNT_PENDING)?;
        let batch = batches.first().ok_or(StoreError::NoResults)?;
        let col = batch
            .column(0)
            .as_any()
            .downcast_ref::<Int64Array>()
            .ok_or_else(|| StoreError::Other("count column not i64".into()))?;
        Ok(col.value(0) as usize)
    }

    fn begin(&self) -> Result<(), StoreError> {
        if self.in_transaction.get() {
            return Err(StoreError::TransactionOpen);
        }
        self.conn.execute_batch("BEGIN TRANSACTION")?;
        self.in_transaction.set(true);
        Ok(())
    }

    fn update_score(
        &self,
        id: i64,
        score: RiskScore,
        status: &str,
    ) -> Result<UpdateOutcome, StoreError> {
        let changed = self
            .conn
            .execute(UPDATE_SCORE, params![score.value(), status, id])?;
        Ok(if changed == 0 {
            UpdateOutcome::AlreadyScored
        } else {
            UpdateOutcome::Scored
        })
    }

    fn commit(&self) -> Result<(), StoreError> {
        if !self.in_transaction.get() {
            return Err(StoreError::NoTransaction);
        }
        // A failed COMMIT aborts the transaction in DuckDB.
        self.in_transaction.set(false);
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback(&self) -> Result<(), StoreError> {
        if !self.in_transaction.get() {
            return Err(StoreError::NoTransaction);
        }
        self.in_transaction.set(false);
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }
}

impl Drop for DuckStore {
    fn drop(&mut self) {
        if self.in_transaction.get() {
            warn!("closing connection with an uncommitted transaction, rolling back");
            if let Err(e) = self.rollback() {
                warn!(error = %e, "rollback on close failed");
            }
        }
    }
}

/// Decode `(id BIGINT, checklist VARCHAR)` rows.
///
/// Handles both `Utf8` (StringArray) and `LargeUtf8` (LargeStringArray).
fn pending_from_batch(batch: &RecordBatch) -> Result<Vec<PendingInspection>, StoreError> {
    let ids = batch
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| {
            ArrowError::CastError(format!(
                "id column is {:?}, expected Int64",
                batch.column(0).data_type()
            ))
        })?;
    let col = batch.column(1);
    let checklist_at = |i: usize| -> Result<Option<String>, StoreError> {
        if col.is_null(i) {
            return Ok(None);
        }
        if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
            Ok(Some(arr.value(i).to_string()))
        } else if let Some(arr) = col.as_any().downcast_ref::<LargeStringArray>() {
            Ok(Some(arr.value(i).to_string()))
        } else {
            Err(ArrowError::CastError(format!(
                "checklist column is {:?}, expected Utf8",
                col.data_type()
            ))
            .into())
        }
    };

    let mut rows = Vec::with_capacity(batch.num_rows());
    for i in 0..batch.num_rows() {
        if ids.is_null(i) {
            return Err(StoreError::Other("inspection with NULL id".into()));
        }
        rows.push(PendingInspection {
            id: ids.value(i),
            checklist: checklist_at(i)?,
        });
    }
    Ok(rows)
}
