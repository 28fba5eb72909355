use super::job::BackupJob;
use crate::notify::{notify, Notification, Notifier};
use crate::upload::ObjectUploader;
use tracing::{error, info};

pub struct Uploader<'a> {
    store: &'a dyn ObjectUploader,
    notifier: &'a dyn Notifier,
}

impl<'a> Uploader<'a> {
    pub fn new(store: &'a dyn ObjectUploader, notifier: &'a dyn Notifier) -> Self {
        Self { store, notifier }
    }

    /// Returns the public URL of the archive, or `None` once the failure has
    /// been reported.
    pub async fn run(&self, job: &BackupJob) -> Option<String> {
        match self.store.put_file(&job.object_key, &job.compressed_path).await {
            Ok(object) => {
                let url = object.url();
                info!("Uploaded to {}: {}", self.store.name(), url);
                Some(url)
            }
            Err(e) => {
                error!("Upload to {} failed: {}", self.store.name(), e);
                notify(
                    self.notifier,
                    &Notification::UploadFailed {
                        error: e.to_string(),
                    },
                )
                .await;
                None
            }
        }
    }
}
