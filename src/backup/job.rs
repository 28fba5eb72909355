use crate::config::{BackupConfig, DatabaseConfig};
use chrono::NaiveDateTime;
use std::path::PathBuf;

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const COMPRESSION_SUFFIX: &str = ".gz";

/// Everything one run needs to know, fixed at start-up.
#[derive(Debug, Clone)]
pub struct BackupJob {
    pub database: DatabaseConfig,
    pub timestamp: NaiveDateTime,
    pub backup_dir: PathBuf,
    pub dump_path: PathBuf,
    pub compressed_path: PathBuf,
    pub object_key: String,
}

impl BackupJob {
    pub fn new(config: &BackupConfig, timestamp: NaiveDateTime) -> Self {
        let dump_file = format!(
            "{}_{}.sql",
            config.database.name,
            timestamp.format(TIMESTAMP_FORMAT)
        );
        let compressed_file = format!("{}{}", dump_file, COMPRESSION_SUFFIX);

        Self {
            database: config.database.clone(),
            timestamp,
            backup_dir: config.backup_dir.clone(),
            dump_path: config.backup_dir.join(&dump_file),
            compressed_path: config.backup_dir.join(&compressed_file),
            object_key: config.minio.object_key(&compressed_file),
        }
    }
}
