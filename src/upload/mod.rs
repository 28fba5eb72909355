mod minio;
mod uploader;

pub use minio::MinioUploader;
pub use uploader::{ObjectUploader, RemoteObject};
