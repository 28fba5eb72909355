mod types;

pub use types::*;

use crate::error::{BackupError, Result};
use std::path::PathBuf;
use tracing::debug;

/// Reads the configuration from the process environment, after loading a
/// `.env` file from the working directory when one exists.
pub fn from_env() -> Result<BackupConfig> {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => return Err(BackupError::Config(format!("invalid .env file: {}", e))),
    }

    from_lookup(|key| std::env::var(key).ok())
}

pub fn from_lookup<F>(lookup: F) -> Result<BackupConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| -> Result<String> {
        lookup(key).ok_or_else(|| {
            BackupError::Config(format!("missing required environment variable {}", key))
        })
    };
    let non_empty = |key: &str| -> Result<String> {
        let value = required(key)?;
        if value.trim().is_empty() {
            return Err(BackupError::Config(format!(
                "environment variable {} must not be empty",
                key
            )));
        }
        Ok(value)
    };
    let optional = |key: &str, default: &str| -> String {
        lookup(key)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let database = DatabaseConfig {
        host: non_empty("DB_HOST")?,
        name: non_empty("DB_NAME")?,
        user: non_empty("DB_USER")?,
        password: required("DB_PASS")?,
    };

    let minio = MinioConfig {
        url: non_empty("MINIO_URL")?,
        bucket: non_empty("MINIO_BUCKET")?,
        path: required("MINIO_PATH")?,
    };

    let telegram = TelegramConfig {
        bot_token: non_empty("TELEGRAM_BOT_TOKEN")?,
        chat_id: non_empty("TELEGRAM_CHAT_ID")?,
        api_url: optional("TELEGRAM_API_URL", DEFAULT_TELEGRAM_API)
            .trim_end_matches('/')
            .to_string(),
    };

    let compression_failure = match lookup("COMPRESSION_FAILURE").filter(|v| !v.trim().is_empty()) {
        Some(value) => value.parse().map_err(BackupError::Config)?,
        None => CompressionFailurePolicy::default(),
    };

    let config = BackupConfig {
        database,
        minio,
        telegram,
        backup_dir: PathBuf::from(non_empty("BACKUP_PATH")?),
        compression_failure,
        dump_command: optional("MYSQLDUMP_BIN", DEFAULT_DUMP_COMMAND),
        compress_command: optional("GZIP_BIN", DEFAULT_COMPRESS_COMMAND),
    };

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}
