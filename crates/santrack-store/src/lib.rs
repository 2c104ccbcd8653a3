//! Storage layer: the `RecordStore` seam and its DuckDB implementation.

mod error;
mod record;
pub use error::StoreError;
pub use record::{RecordStore, UpdateOutcome};

#[cfg(feature = "duckdb")]
mod duck;
#[cfg(feature = "duckdb")]
pub use duck::DuckStore;
