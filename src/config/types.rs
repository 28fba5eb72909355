use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DUMP_COMMAND: &str = "mysqldump";
pub const DEFAULT_COMPRESS_COMMAND: &str = "gzip";
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// S3-compatible bucket reached without credentials.
#[derive(Debug, Clone)]
pub struct MinioConfig {
    /// Base URL as configured, e.g. `http://minio.local:9000`.
    pub url: String,
    pub bucket: String,
    /// Key prefix inside the bucket; may be empty.
    pub path: String,
}

impl MinioConfig {
    /// `host:port` with any scheme removed.
    pub fn endpoint(&self) -> String {
        self.url
            .trim_start_matches("http://")
            .trim_start_matches("https://")
            .trim_end_matches('/')
            .to_string()
    }

    pub fn object_key(&self, file_name: &str) -> String {
        let prefix = self.path.trim_matches('/');
        if prefix.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", prefix, file_name)
        }
    }
}

#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_url: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"***")
            .field("chat_id", &self.chat_id)
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompressionFailurePolicy {
    /// Report the failure and still attempt the upload.
    #[default]
    Continue,
    /// Report the failure and end the run with a non-zero status.
    Abort,
}

impl FromStr for CompressionFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(CompressionFailurePolicy::Continue),
            "abort" => Ok(CompressionFailurePolicy::Abort),
            other => Err(format!(
                "unknown compression failure policy '{}' (expected 'continue' or 'abort')",
                other
            )),
        }
    }
}

impl std::fmt::Display for CompressionFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompressionFailurePolicy::Continue => write!(f, "continue"),
            CompressionFailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackupConfig {
    pub database: DatabaseConfig,
    pub minio: MinioConfig,
    pub telegram: TelegramConfig,
    pub backup_dir: PathBuf,
    pub compression_failure: CompressionFailurePolicy,
    pub dump_command: String,
    pub compress_command: String,
}
