use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Where an uploaded archive can be fetched from.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteObject {
    pub base_url: String,
    pub bucket: String,
    pub key: String,
}

impl RemoteObject {
    /// Public URL of the object, each key segment percent-encoded.
    pub fn url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let mut url = match reqwest::Url::parse(base) {
            Ok(url) => url,
            Err(_) => return format!("{}/{}/{}", base, self.bucket, self.key),
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&self.bucket)
                .extend(self.key.split('/'));
        }
        url.to_string()
    }
}

#[async_trait]
pub trait ObjectUploader: Send + Sync {
    async fn put_file(&self, key: &str, file_path: &Path) -> Result<RemoteObject>;
    fn name(&self) -> &'static str;
}
