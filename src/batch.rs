//! Record batching.
//!
//! The remote embedding service accepts a bounded number of inputs per
//! call, so normalized records are partitioned into order-preserving
//! batches before dispatch.

use crate::models::Record;

/// Partition `records` into batches of at most `batch_size`.
///
/// Batches preserve record order and concatenate back to the input
/// exactly; no batch is empty. An empty input produces no batches.
///
/// # Panics
///
/// Panics if `batch_size` is zero; [`crate::config::load_config`]
/// rejects that configuration up front.
pub fn into_batches(records: Vec<Record>, batch_size: usize) -> Vec<Vec<Record>> {
    assert!(batch_size > 0, "batch_size must be > 0");

    let mut batches = Vec::with_capacity(records.len().div_ceil(batch_size));
    let mut current = Vec::with_capacity(batch_size.min(records.len()));

    for record in records {
        current.push(record);
        if current.len() == batch_size {
            batches.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }

    batches
}
