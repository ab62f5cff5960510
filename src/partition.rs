use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PartitionError {
    #[error("invalid batch size {size}: must be at least 1")]
    InvalidArgument { size: usize },
}

/// Number of batches `len` items split into with at most `size` per batch.
pub fn batch_count(len: usize, size: usize) -> Result<usize, PartitionError> {
    if size == 0 {
        return Err(PartitionError::InvalidArgument { size });
    }
    Ok(len.div_ceil(size))
}

/// Split `items` into consecutive borrowed batches of at most `size` items.
///
/// Every batch but the last holds exactly `size` items. An empty input yields
/// no batches, and an input shorter than `size` yields a single batch.
pub fn partition<T>(items: &[T], size: usize) -> Result<Vec<&[T]>, PartitionError> {
    let mut batches = Vec::with_capacity(batch_count(items.len(), size)?);
    batches.extend(items.chunks(size));
    Ok(batches)
}
