use std::fmt;
use std::io;
#[derive(Debug)]
pub enum BackupError {
    Config(String),
    Command(String),
    Dump(String),
    Compression(String),
    Upload(String),
    Notify(String),
    Io(io::Error),
}

impl fmt::Display for BackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupError::Config(msg) => write!(f, "Configuration error: {}", msg),
            BackupError::Command(msg) => write!(f, "Command error: {}", msg),
            BackupError::Dump(msg) => write!(f, "Dump error: {}", msg),
            BackupError::Compression(msg) => write!(f, "Compression error: {}", msg),
            BackupError::Upload(msg) => write!(f, "Upload error: {}", msg),
            BackupError::Notify(msg) => write!(f, "Notification error: {}", msg),
            BackupError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for BackupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackupError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for BackupError {
    fn from(err: io::Error) -> Self {
        BackupError::Io(err)
    }
}

impl From<object_store::Error> for BackupError {
    fn from(err: object_store::Error) -> Self {
        BackupError::Upload(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BackupError>;
