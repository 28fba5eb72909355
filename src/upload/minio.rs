use super::uploader::{ObjectUploader, RemoteObject};
use crate::config::MinioConfig;
use crate::error::{BackupError, Result};
use async_trait::async_trait;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload, RetryConfig};
use std::path::Path;
use tracing::{debug, info};

/// Anonymous S3 `PutObject` against a MinIO server over plain HTTP.
pub struct MinioUploader {
    config: MinioConfig,
    store: AmazonS3,
}

impl MinioUploader {
    pub fn new(config: &MinioConfig) -> Result<Self> {
        let store = AmazonS3Builder::new()
            .with_endpoint(format!("http://{}", config.endpoint()))
            .with_bucket_name(config.bucket.clone())
            .with_region("us-east-1")
            .with_allow_http(true)
            .with_skip_signature(true)
            .with_retry(RetryConfig {
                max_retries: 0,
                ..Default::default()
            })
            .build()?;

        Ok(Self {
            config: config.clone(),
            store,
        })
    }
}

#[async_trait]
impl ObjectUploader for MinioUploader {
    async fn put_file(&self, key: &str, file_path: &Path) -> Result<RemoteObject> {
        let bytes = tokio::fs::read(file_path).await?;
        let location = ObjectPath::from(key);

        info!(
            "Uploading {} ({} bytes) to {}/{}",
            file_path.display(),
            bytes.len(),
            self.config.bucket,
            location
        );

        let put_result = self.store.put(&location, PutPayload::from(bytes)).await?;
        debug!(?put_result, "Object {}/{} stored", self.config.bucket, location);

        Ok(RemoteObject {
            base_url: self.config.url.clone(),
            bucket: self.config.bucket.clone(),
            key: location.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "MinIO"
    }
}
