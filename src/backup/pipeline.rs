use super::compression::{calculate_sha256, Compressor};
use super::dump::Dumper;
use super::job::BackupJob;
use super::upload::Uploader;
use crate::command::CommandExecutor;
use crate::config::{BackupConfig, CompressionFailurePolicy};
use crate::notify::{notify, Notification, Notifier};
use crate::upload::ObjectUploader;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Uploaded { url: String },
    UploadFailed,
    /// Only produced under [`CompressionFailurePolicy::Abort`].
    CompressionFailed,
    DumpFailed,
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Uploaded { .. } | RunOutcome::UploadFailed => 0,
            RunOutcome::CompressionFailed | RunOutcome::DumpFailed => 1,
        }
    }
}

#[derive(Debug)]
pub struct BackupResult {
    pub database: String,
    pub outcome: RunOutcome,
    pub compressed: bool,
    pub file_path: Option<PathBuf>,
    pub file_size: Option<u64>,
    pub file_hash: Option<String>,
    pub duration_secs: u64,
}

/// Dump, compress, upload, report: once, in that order.
pub struct Pipeline<'a> {
    config: &'a BackupConfig,
    executor: &'a dyn CommandExecutor,
    notifier: &'a dyn Notifier,
    store: &'a dyn ObjectUploader,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a BackupConfig,
        executor: &'a dyn CommandExecutor,
        notifier: &'a dyn Notifier,
        store: &'a dyn ObjectUploader,
    ) -> Self {
        Self {
            config,
            executor,
            notifier,
            store,
        }
    }

    pub async fn run(&self, job: &BackupJob) -> BackupResult {
        let start = Instant::now();
        info!("Starting backup of {} ({})", job.database.name, job.timestamp);
        notify(self.notifier, &Notification::Started).await;

        let dumper = Dumper::new(self.executor, self.notifier, &self.config.dump_command);
        if dumper.run(job).await.is_err() {
            return self.finish(job, start, RunOutcome::DumpFailed, false);
        }

        let compressor = Compressor::new(self.executor, self.notifier, &self.config.compress_command);
        let compressed = compressor.run(job).await.is_ok();
        if !compressed {
            match self.config.compression_failure {
                CompressionFailurePolicy::Abort => {
                    warn!("Compression failed, skipping upload");
                    return self.finish(job, start, RunOutcome::CompressionFailed, false);
                }
                CompressionFailurePolicy::Continue => {
                    warn!(
                        "Compression failed, attempting upload of {} anyway",
                        job.compressed_path.display()
                    );
                }
            }
        }

        let outcome = match Uploader::new(self.store, self.notifier).run(job).await {
            Some(url) => {
                notify(
                    self.notifier,
                    &Notification::Succeeded {
                        database: job.database.name.clone(),
                        url: url.clone(),
                    },
                )
                .await;
                RunOutcome::Uploaded { url }
            }
            None => {
                notify(self.notifier, &Notification::CompletedWithoutUpload).await;
                RunOutcome::UploadFailed
            }
        };

        self.finish(job, start, outcome, compressed)
    }

    fn finish(
        &self,
        job: &BackupJob,
        start: Instant,
        outcome: RunOutcome,
        compressed: bool,
    ) -> BackupResult {
        let archive = job
            .compressed_path
            .exists()
            .then(|| job.compressed_path.clone());
        let file_size = archive
            .as_ref()
            .and_then(|path| fs::metadata(path).ok())
            .map(|m| m.len());
        let file_hash = archive
            .as_ref()
            .and_then(|path| calculate_sha256(path).ok());

        BackupResult {
            database: job.database.name.clone(),
            outcome,
            compressed,
            file_path: archive,
            file_size,
            file_hash,
            duration_secs: start.elapsed().as_secs(),
        }
    }
}
