//! Bounded concurrent parts fetch
//!
//! The resolver starts at most one fetch per request, the moment a
//! submodel or configuration becomes resolvable, and later performs exactly
//! one bounded wait on the handle. A fetch that outlives the ceiling is
//! detached, never cancelled: the task keeps running, its eventual send
//! fails against the dropped receiver, and the response ships with an
//! empty batch. Fetch failure is handled the same way: non-fatal, the
//! response ships without parts.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;

use fitment_core::{PartsBatch, VehicleDescriptor};

use crate::error::CatalogResult;
use crate::metrics;
use crate::source::CatalogSource;

/// Handle to the single in-flight parts fetch of one request
///
/// Single-use: joining consumes the handle, so a second wait on the same
/// fetch cannot be expressed.
pub struct PartsFetch {
    rx: oneshot::Receiver<CatalogResult<PartsBatch>>,
    ceiling: Duration,
    brand_scope: Vec<i64>,
    page: usize,
    count: usize,
}

/// Start fetching parts for the descriptor as an independent task
pub fn spawn_parts_fetch(
    source: Arc<dyn CatalogSource>,
    descriptor: VehicleDescriptor,
    brand_scope: Vec<i64>,
    page: usize,
    count: usize,
    ceiling: Duration,
) -> PartsFetch {
    let (tx, rx) = oneshot::channel();
    let scope = brand_scope.clone();

    tokio::spawn(async move {
        let result = source.parts_for(&descriptor, page, count, &scope).await;
        // Nobody is listening after a timeout; the late result is dropped.
        let _ = tx.send(result);
    });

    PartsFetch {
        rx,
        ceiling,
        brand_scope,
        page,
        count,
    }
}

impl PartsFetch {
    /// Wait out the fetch, up to the ceiling
    ///
    /// Never fails: timeout, backend error, and a vanished task all
    /// normalize to an empty batch.
    pub async fn join(self) -> PartsBatch {
        let started = Instant::now();
        let PartsFetch {
            rx,
            ceiling,
            brand_scope,
            page,
            count,
        } = self;

        let received = match tokio::time::timeout(ceiling, rx).await {
            Ok(Ok(Ok(batch))) => {
                metrics::record_parts_fetch(metrics::OUTCOME_OK, started.elapsed());
                Some(batch)
            }
            Ok(Ok(Err(err))) => {
                tracing::warn!(error = %err, "parts fetch failed, continuing without parts");
                metrics::record_parts_fetch(metrics::OUTCOME_ERROR, started.elapsed());
                None
            }
            Ok(Err(_closed)) => {
                tracing::warn!("parts fetch task dropped its channel, continuing without parts");
                metrics::record_parts_fetch(metrics::OUTCOME_ERROR, started.elapsed());
                None
            }
            Err(_elapsed) => {
                tracing::warn!(
                    ceiling_ms = ceiling.as_millis() as u64,
                    "parts fetch exceeded ceiling, abandoning task"
                );
                metrics::record_parts_fetch(metrics::OUTCOME_TIMEOUT, started.elapsed());
                None
            }
        };

        received.unwrap_or_else(|| PartsBatch::empty(brand_scope, page, count))
    }
}
