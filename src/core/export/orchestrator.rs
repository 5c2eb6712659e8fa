//! Parallel fetch orchestration
//!
//! Runs the paginated fetcher across all configured asset types with a
//! bounded worker pool. One asset type's permanent failure never
//! cancels the others; every asset type ends up with its own outcome in
//! the returned list. A shutdown signal interrupts in-flight fetches
//! and marks them cancelled.

use crate::adapters::catalog::{AssetSource, FetchFailure};
use crate::domain::{AssetTypeRequest, CartaError, CatalogError, RawAssetRecord};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Successfully fetched record set for one asset type
#[derive(Debug)]
pub struct FetchedAssets {
    /// Records in API page order
    pub records: Vec<RawAssetRecord>,

    /// Wall-clock time spent fetching this asset type
    pub duration: Duration,
}

/// A failed asset type with whatever was fetched before the failure
#[derive(Debug)]
pub struct FailedFetch {
    pub error: CartaError,

    /// Records from pages that completed before the failure
    pub partial: Vec<RawAssetRecord>,

    pub duration: Duration,
}

/// Per-asset-type result of an orchestrated run
#[derive(Debug)]
pub struct AssetTypeOutcome {
    pub request: AssetTypeRequest,
    pub result: Result<FetchedAssets, FailedFetch>,
}

/// Bounded worker pool over asset-type requests
///
/// # Example
///
/// ```no_run
/// use carta::core::export::Orchestrator;
/// use carta::adapters::catalog::CatalogClient;
/// use carta::domain::AssetTypeRequest;
/// use std::sync::Arc;
/// use tokio::sync::watch;
///
/// # async fn example(client: CatalogClient) {
/// let (_shutdown_tx, shutdown_rx) = watch::channel(false);
/// let orchestrator = Orchestrator::new(Arc::new(client), 5, shutdown_rx);
///
/// let outcomes = orchestrator
///     .run(vec![AssetTypeRequest::new("00000000-0000-0000-0000-000000000001")])
///     .await;
/// # }
/// ```
pub struct Orchestrator {
    source: Arc<dyn AssetSource>,
    concurrency: usize,
    shutdown: watch::Receiver<bool>,
}

impl Orchestrator {
    /// Create an orchestrator over the given source
    pub fn new(
        source: Arc<dyn AssetSource>,
        concurrency: usize,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            source,
            concurrency,
            shutdown,
        }
    }

    /// Fetch all asset types, at most `concurrency` in flight at a time
    ///
    /// Outcomes are returned in request order regardless of completion
    /// order.
    pub async fn run(&self, requests: Vec<AssetTypeRequest>) -> Vec<AssetTypeOutcome> {
        tracing::info!(
            asset_types = requests.len(),
            concurrency = self.concurrency,
            "Starting fetch across asset types"
        );

        let mut outcomes: Vec<(usize, AssetTypeOutcome)> = stream::iter(
            requests
                .into_iter()
                .enumerate()
                .map(|(index, request)| async move { (index, self.fetch_one(request).await) }),
        )
        .buffer_unordered(self.concurrency)
        .collect()
        .await;

        outcomes.sort_by_key(|(index, _)| *index);
        outcomes.into_iter().map(|(_, outcome)| outcome).collect()
    }

    /// Run one asset type to completion or cancellation
    async fn fetch_one(&self, request: AssetTypeRequest) -> AssetTypeOutcome {
        let started = Instant::now();
        let mut shutdown = self.shutdown.clone();

        tracing::info!(
            asset_type = request.effective_name(),
            asset_type_id = %request.id,
            "Fetching asset type"
        );

        let result = tokio::select! {
            result = self.source.fetch_assets(&request.id) => match result {
                Ok(records) => Ok(FetchedAssets {
                    records,
                    duration: started.elapsed(),
                }),
                Err(FetchFailure { partial, error }) => Err(FailedFetch {
                    error: error.into(),
                    partial,
                    duration: started.elapsed(),
                }),
            },
            _ = stop_requested(&mut shutdown) => Err(FailedFetch {
                error: CatalogError::Cancelled.into(),
                partial: Vec::new(),
                duration: started.elapsed(),
            }),
        };

        match &result {
            Ok(fetched) => tracing::info!(
                asset_type = request.effective_name(),
                records = fetched.records.len(),
                duration_ms = fetched.duration.as_millis() as u64,
                "Asset type fetched"
            ),
            Err(failed) => tracing::error!(
                asset_type = request.effective_name(),
                error = %failed.error,
                partial_records = failed.partial.len(),
                "Asset type failed"
            ),
        }

        AssetTypeOutcome { request, result }
    }
}

/// Resolve only when a stop was actually signalled
///
/// A closed channel is not a stop request; pending forever keeps the
/// select on the fetch branch.
async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}
