//! Concurrent import pipeline
//!
//! One blocking reader task parses the source into a bounded record channel.
//! A fixed pool of workers drains that channel and upserts each record,
//! while a separate task counts the rows the reader rejected. Once every
//! worker has finished, the id sequence is re-synced and an
//! [`ImportSummary`] is produced.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn};

use super::config::ImportConfig;
use super::counters::ImportCounters;
use super::error::{ImportError, ReadError};
use super::reader::SourceReader;
use super::report::ImportSummary;
use crate::models::FeiraLivre;
use crate::repository::FeiraLivreRepository;

type SharedReceiver = Arc<Mutex<mpsc::Receiver<FeiraLivre>>>;

/// Per-worker outcome, logged when the worker is joined
#[derive(Debug, Clone, Copy, Default)]
struct WorkerStats {
    processed: u64,
    failed: u64,
}

/// Imports CSV sources into a [`FeiraLivreRepository`]
pub struct ImportPipeline {
    repository: Arc<dyn FeiraLivreRepository>,
    config: ImportConfig,
}

impl ImportPipeline {
    pub fn new(
        repository: Arc<dyn FeiraLivreRepository>,
        config: ImportConfig,
    ) -> Result<Self, ImportError> {
        config.validate()?;
        Ok(Self { repository, config })
    }

    /// Imports the file at `path`
    ///
    /// Fails only if the file cannot be opened or has no readable header;
    /// the store is not touched in that case.
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn import_file(&self, path: &Path) -> Result<ImportSummary, ImportError> {
        let path = path.to_path_buf();
        let delimiter = self.config.delimiter;
        let source =
            tokio::task::spawn_blocking(move || SourceReader::open(&path, delimiter)).await??;
        Ok(self.run(source).await)
    }

    /// Imports from any byte source that starts with a header row
    #[tracing::instrument(skip(self, source))]
    pub async fn import_reader<R>(&self, source: R) -> Result<ImportSummary, ImportError>
    where
        R: Read + Send + 'static,
    {
        let delimiter = self.config.delimiter;
        let source =
            tokio::task::spawn_blocking(move || SourceReader::from_reader(source, delimiter))
                .await??;
        Ok(self.run(source).await)
    }

    async fn run<R>(&self, source: SourceReader<R>) -> ImportSummary
    where
        R: Read + Send + 'static,
    {
        let counters = Arc::new(ImportCounters::new());
        let (record_tx, record_rx) = mpsc::channel(self.config.channel_capacity);
        let (error_tx, error_rx) = mpsc::channel(self.config.channel_capacity);

        info!(workers = self.config.workers, "Reading and processing source");

        let reader = tokio::task::spawn_blocking(move || source.run(record_tx, error_tx));
        let error_consumer = tokio::spawn(count_read_errors(error_rx, Arc::clone(&counters)));

        let records: SharedReceiver = Arc::new(Mutex::new(record_rx));
        let mut handles = Vec::with_capacity(self.config.workers);
        for worker_num in 0..self.config.workers {
            let records = Arc::clone(&records);
            let repository = Arc::clone(&self.repository);
            let counters = Arc::clone(&counters);

            let handle = tokio::spawn(async move {
                run_worker(worker_num, records, repository, counters).await
            });
            handles.push(handle);
        }
        // Only workers may keep the receiver alive, so the reader stops once
        // they are all gone.
        drop(records);

        debug!("Draining workers");
        for (idx, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(stats) => {
                    debug!(
                        worker = idx,
                        processed = stats.processed,
                        failed = stats.failed,
                        "Worker completed"
                    );
                },
                Err(e) => {
                    error!(worker = idx, error = %e, "Worker panicked");
                },
            }
        }

        match reader.await {
            Ok(stats) => {
                debug!(records = stats.records, rejected = stats.rejected, "Reader completed")
            },
            Err(e) => error!(error = %e, "Reader panicked"),
        }
        if let Err(e) = error_consumer.await {
            error!(error = %e, "Read error consumer panicked");
        }

        info!("Syncing id sequence");
        let sync_error = match self.repository.sync_sequence().await {
            Ok(next_id) => {
                debug!(next_id, "Id sequence synced");
                None
            },
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Could not sync id sequence");
                Some(format!("{e:#}"))
            },
        };

        let summary = ImportSummary::new(counters.snapshot(), sync_error);
        info!(
            total_read = summary.totals.total_read(),
            imported = summary.totals.imported(),
            errors = summary.totals.total_errors(),
            "Import finished"
        );
        summary
    }
}

/// Upserts records until the channel is closed and drained
async fn run_worker(
    worker_num: usize,
    records: SharedReceiver,
    repository: Arc<dyn FeiraLivreRepository>,
    counters: Arc<ImportCounters>,
) -> WorkerStats {
    let mut stats = WorkerStats::default();

    loop {
        let next = records.lock().await.recv().await;
        let Some(feira) = next else {
            break;
        };

        counters.record_read();
        stats.processed += 1;

        if let Err(e) = repository.create_or_update(&feira).await {
            counters.import_error();
            stats.failed += 1;
            warn!(
                worker = worker_num,
                feira_id = feira.id,
                error = %format!("{e:#}"),
                "Failed to import feira livre"
            );
        }
    }

    stats
}

async fn count_read_errors(mut errors: mpsc::Receiver<ReadError>, counters: Arc<ImportCounters>) {
    while let Some(err) = errors.recv().await {
        counters.read_error();
        debug!(error = %err, "Row skipped");
    }
}
