use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::{pin_mut, SinkExt};
use std::fmt;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};
use tokio_util::codec::Encoder;

use crate::{CopyTextEncoder, LoadError, ProductRow, SeedError, SeedResult};

// Flush the COPY stream in ~1 MiB frames
const COPY_FRAME_BYTES: usize = 1 << 20;

/// A table or column name, rendered double-quoted for SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.replace('"', "\"\""))
    }
}

/// `COPY "table" ("col", ...) FROM STDIN` for the text format.
pub(crate) fn copy_statement(table: &Identifier, columns: &[&str]) -> String {
    let columns = columns
        .iter()
        .map(|c| Identifier::new(*c).to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("COPY {table} ({columns}) FROM STDIN")
}

/// Destination for batches of rows.
#[async_trait]
pub trait BulkLoader: Send {
    /// Transfer `rows` in one operation, returning how many the store accepted.
    async fn copy_from(
        &mut self,
        table: &Identifier,
        columns: &[&str],
        rows: &[ProductRow],
    ) -> Result<u64, LoadError>;

    async fn begin(&mut self) -> Result<(), LoadError>;

    async fn commit(&mut self) -> Result<(), LoadError>;

    async fn rollback(&mut self) -> Result<(), LoadError>;
}

/// An exclusively owned PostgreSQL connection.
pub struct PgStore {
    client: Client,
    connection: JoinHandle<()>,
}

impl PgStore {
    pub async fn connect(dsn: &str) -> SeedResult<Self> {
        let (client, connection) = tokio_postgres::connect(dsn, NoTls)
            .await
            .map_err(|source| SeedError::Connection { source })?;

        // The connection future performs the actual socket I/O
        let connection = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "connection error");
            }
        });

        Ok(Self { client, connection })
    }

    /// Drop the client and wait for the connection task to wind down.
    pub async fn close(self) {
        drop(self.client);
        if let Err(e) = self.connection.await {
            tracing::warn!(error = %e, "connection task did not shut down cleanly");
        }
    }
}

#[async_trait]
impl BulkLoader for PgStore {
    async fn copy_from(
        &mut self,
        table: &Identifier,
        columns: &[&str],
        rows: &[ProductRow],
    ) -> Result<u64, LoadError> {
        let statement = copy_statement(table, columns);
        let sink = self.client.copy_in::<_, Bytes>(statement.as_str()).await?;
        pin_mut!(sink);

        let mut encoder = CopyTextEncoder::new();
        let mut frame = BytesMut::with_capacity(COPY_FRAME_BYTES);
        for row in rows {
            encoder.encode(row, &mut frame)?;
            if frame.len() >= COPY_FRAME_BYTES {
                sink.as_mut().send(frame.split().freeze()).await?;
            }
        }
        if !frame.is_empty() {
            sink.as_mut().send(frame.freeze()).await?;
        }

        Ok(sink.as_mut().finish().await?)
    }

    async fn begin(&mut self) -> Result<(), LoadError> {
        Ok(self.client.batch_execute("BEGIN").await?)
    }

    async fn commit(&mut self) -> Result<(), LoadError> {
        Ok(self.client.batch_execute("COMMIT").await?)
    }

    async fn rollback(&mut self) -> Result<(), LoadError> {
        Ok(self.client.batch_execute("ROLLBACK").await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(Identifier::new("products").to_string(), "\"products\"");
        assert_eq!(Identifier::new("odd\"name").to_string(), "\"odd\"\"name\"");
    }

    #[test]
    fn copy_statement_lists_columns() {
        let sql = copy_statement(&Identifier::new("products"), &ProductRow::COLUMNS);
        assert_eq!(
            sql,
            "COPY \"products\" (\"name\", \"description\", \"price\") FROM STDIN"
        );
    }
}
