//! Synthetic product seeding for PostgreSQL.
//!
//! - Rows come from a [`RowSource`] (pseudo-random by default, seedable).
//! - The full row buffer is split into bounded batches by [`partition`].
//! - Each batch is streamed through `COPY ... FROM STDIN` by a [`BulkLoader`].
//!
//! Data shape:
//! - `ProductRow { name, description, price }`, all text columns.
//! - Batches are borrowed slices of the one owned row buffer.

mod codec;
mod config;
mod driver;
mod generator;
mod partition;
mod store;

pub use crate::codec::CopyTextEncoder;
pub use crate::config::{SeedConfig, DEFAULT_BATCH_SIZE, DEFAULT_TABLE};
pub use crate::driver::{run, seed, Progress, SeedEvent, SeedSummary, TracingProgress, PROGRESS_EVERY};
pub use crate::generator::{FakeProducts, ProductRow, RowSource};
pub use crate::partition::{batch_count, partition, PartitionError};
pub use crate::store::{BulkLoader, Identifier, PgStore};

use thiserror::Error;

/// Failure of a single bulk-load call or transaction statement.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Postgres(#[from] tokio_postgres::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Error type returned by this crate when not using `anyhow`.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to connect to database: {source}")]
    Connection {
        #[source]
        source: tokio_postgres::Error,
    },
    #[error(transparent)]
    Partition(#[from] PartitionError),
    #[error("chunk {batch}/{batches} failed: {source}")]
    Load {
        batch: usize,
        batches: usize,
        #[source]
        source: LoadError,
    },
    #[error("transaction {stage} failed: {source}")]
    Transaction {
        stage: &'static str,
        #[source]
        source: LoadError,
    },
}

pub type SeedResult<T> = std::result::Result<T, SeedError>;
