use crate::error::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Pipeline events reported to the operator channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Started,
    DumpFailed { stderr: String },
    CompressionFailed { error: String },
    UploadFailed { error: String },
    Succeeded { database: String, url: String },
    CompletedWithoutUpload,
}

impl Notification {
    pub fn text(&self) -> String {
        match self {
            Notification::Started => "⏳ Starting MySQL Backup...".to_string(),
            Notification::DumpFailed { stderr } => {
                format!("❌ MySQL Backup Failed!\nError: {}", stderr)
            }
            Notification::CompressionFailed { error } => {
                format!("❌ Compression Failed: {}", error)
            }
            Notification::UploadFailed { error } => {
                format!("❌ Upload to MinIO Failed!\nError: {}", error)
            }
            Notification::Succeeded { database, url } => format!(
                "✅ MySQL Backup Successful!\n\
                 📁 Database: {}\n\
                 ☁️ Uploaded to MinIO:\n{}",
                database, url
            ),
            Notification::CompletedWithoutUpload => {
                "❌ Backup completed but upload to MinIO failed!".to_string()
            }
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &str) -> Result<()>;
    fn name(&self) -> &'static str;
}

/// Sends `event` once. Delivery problems are logged and never propagated.
pub async fn notify(notifier: &dyn Notifier, event: &Notification) {
    let text = event.text();
    match notifier.send(&text).await {
        Ok(()) => debug!("Sent {:?} notification via {}", event, notifier.name()),
        Err(e) => warn!("Could not deliver notification via {}: {}", notifier.name(), e),
    }
}
