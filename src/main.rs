mod backup;
mod command;
mod config;
mod error;
mod log;
mod notify;
mod upload;

use backup::{BackupJob, Pipeline, RunOutcome};
use chrono::Local;
use command::SystemExecutor;
use notify::TelegramNotifier;
use tracing::{error, info, warn};
use upload::MinioUploader;

#[tokio::main]
async fn main() {
    log::init();

    info!("MySQL to MinIO backup starting...");

    if let Err(e) = ctrlc::set_handler(|| {
        eprintln!("\nInterrupted, abandoning backup run");
        std::process::exit(130);
    }) {
        warn!("Could not install signal handler: {}", e);
    }

    let config = match config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let notifier = match TelegramNotifier::new(&config.telegram) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let store = match MinioUploader::new(&config.minio) {
        Ok(u) => u,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let job = BackupJob::new(&config, Local::now().naive_local());
    let result = Pipeline::new(&config, &SystemExecutor, &notifier, &store)
        .run(&job)
        .await;

    match &result.outcome {
        RunOutcome::Uploaded { url } => info!(
            "Backup of {} uploaded to {} from {} ({} bytes, sha256 {}) in {} sec",
            result.database,
            url,
            result.file_path.as_deref().map(|p| p.display().to_string()).unwrap_or_default(),
            result.file_size.unwrap_or(0),
            result.file_hash.as_deref().unwrap_or("N/A"),
            result.duration_secs
        ),
        RunOutcome::UploadFailed => warn!(
            "Backup of {} finished without upload (compressed: {}) in {} sec",
            result.database, result.compressed, result.duration_secs
        ),
        RunOutcome::CompressionFailed => error!("Backup of {} stopped: compression failed", result.database),
        RunOutcome::DumpFailed => error!("Backup of {} failed: dump unsuccessful", result.database),
    }

    std::process::exit(result.outcome.exit_code());
}
