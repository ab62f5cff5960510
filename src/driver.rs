use crate::{
    partition, BulkLoader, FakeProducts, LoadError, PgStore, ProductRow, RowSource, SeedConfig,
    SeedError, SeedResult,
};

/// Emit a generation progress event every this many rows.
pub const PROGRESS_EVERY: usize = 10_000;

// Upfront reservation is bounded; past this the buffer grows on demand.
fn initial_capacity(config: &SeedConfig) -> usize {
    config.count.min(config.batch_size.saturating_mul(4))
}

/// Milestones of a seeding run, in the order they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedEvent {
    Connected,
    Generating { count: usize },
    Generated { done: usize, total: usize },
    Loading { batches: usize },
    BatchLoaded { batch: usize, batches: usize, inserted: u64 },
    BatchFailed { batch: usize, batches: usize },
    Committed,
    RolledBack,
    Finished { inserted: u64 },
}

/// Receiver for run milestones. Passed explicitly so callers choose the sink.
pub trait Progress {
    fn on_event(&mut self, event: SeedEvent);
}

/// Renders events as `tracing` log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl Progress for TracingProgress {
    fn on_event(&mut self, event: SeedEvent) {
        match event {
            SeedEvent::Connected => tracing::info!("Connected to database"),
            SeedEvent::Generating { count } => {
                tracing::info!(count, "Creating new products in DB")
            }
            SeedEvent::Generated { done, total } => tracing::info!("Progress: {done}/{total}"),
            SeedEvent::Loading { batches } => {
                tracing::info!(batches, "Attempting to insert values")
            }
            SeedEvent::BatchLoaded {
                batch,
                batches,
                inserted,
            } => tracing::info!(num_inserted = inserted, "Chunk {batch}/{batches} finished"),
            SeedEvent::BatchFailed { batch, batches } => {
                tracing::error!("Chunk {batch}/{batches} failed")
            }
            SeedEvent::Committed => tracing::info!("Transaction committed"),
            SeedEvent::RolledBack => tracing::warn!("Transaction rolled back"),
            SeedEvent::Finished { inserted } => {
                tracing::info!(inserted, "Finished inserting rows")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub generated: usize,
    pub batches: usize,
    pub inserted: u64,
}

/// Connect, generate, load, and close the connection on every path.
pub async fn seed<P: Progress>(config: &SeedConfig, progress: &mut P) -> SeedResult<SeedSummary> {
    let mut store = PgStore::connect(&config.dsn).await?;
    progress.on_event(SeedEvent::Connected);

    let mut source = FakeProducts::new(config.seed);
    let outcome = run(config, &mut source, &mut store, progress).await;

    store.close().await;
    outcome
}

/// Generate `config.count` rows and load them batch by batch, stopping at the
/// first failed batch.
pub async fn run<S, L, P>(
    config: &SeedConfig,
    source: &mut S,
    loader: &mut L,
    progress: &mut P,
) -> SeedResult<SeedSummary>
where
    S: RowSource,
    L: BulkLoader,
    P: Progress,
{
    progress.on_event(SeedEvent::Generating {
        count: config.count,
    });

    let mut rows = Vec::with_capacity(initial_capacity(config));
    for i in 0..config.count {
        rows.push(source.next_row());
        if i % PROGRESS_EVERY == 0 {
            progress.on_event(SeedEvent::Generated {
                done: i,
                total: config.count,
            });
        }
    }

    let batches = partition(&rows, config.batch_size)?;
    progress.on_event(SeedEvent::Loading {
        batches: batches.len(),
    });

    let atomic = config.atomic && !batches.is_empty();
    if atomic {
        loader.begin().await.map_err(|source| SeedError::Transaction {
            stage: "begin",
            source,
        })?;
    }

    let mut inserted = 0u64;
    for (i, batch) in batches.iter().enumerate() {
        match loader
            .copy_from(&config.table, &ProductRow::COLUMNS, batch)
            .await
        {
            Ok(n) => {
                inserted += n;
                progress.on_event(SeedEvent::BatchLoaded {
                    batch: i + 1,
                    batches: batches.len(),
                    inserted: n,
                });
            }
            Err(source) => {
                progress.on_event(SeedEvent::BatchFailed {
                    batch: i + 1,
                    batches: batches.len(),
                });
                if atomic {
                    abort(loader, progress).await?;
                }
                return Err(SeedError::Load {
                    batch: i + 1,
                    batches: batches.len(),
                    source,
                });
            }
        }
    }

    if atomic {
        loader.commit().await.map_err(|source| SeedError::Transaction {
            stage: "commit",
            source,
        })?;
        progress.on_event(SeedEvent::Committed);
    }

    progress.on_event(SeedEvent::Finished { inserted });
    Ok(SeedSummary {
        generated: rows.len(),
        batches: batches.len(),
        inserted,
    })
}

async fn abort<L: BulkLoader, P: Progress>(loader: &mut L, progress: &mut P) -> SeedResult<()> {
    loader
        .rollback()
        .await
        .map_err(|source: LoadError| SeedError::Transaction {
            stage: "rollback",
            source,
        })?;
    progress.on_event(SeedEvent::RolledBack);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_is_bounded_by_batch_size() {
        let config = SeedConfig {
            count: usize::MAX,
            batch_size: 100_000,
            ..Default::default()
        };
        assert_eq!(initial_capacity(&config), 400_000);

        let config = SeedConfig {
            count: 50,
            ..config
        };
        assert_eq!(initial_capacity(&config), 50);

        let config = SeedConfig {
            count: 10,
            batch_size: usize::MAX,
            ..Default::default()
        };
        assert_eq!(initial_capacity(&config), 10);
    }
}
