use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database not found: {0}")]
    DatabaseNotFound(std::path::PathBuf),

    #[error("no results for query")]
    NoResults,

    #[error("no open transaction")]
    NoTransaction,

    #[error("transaction already open")]
    TransactionOpen,

    #[cfg(feature = "duckdb")]
    #[error("duckdb error: {0}")]
    DuckDb(#[from] ::duckdb::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("{0}")]
    Other(String),
}
