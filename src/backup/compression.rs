use super::job::BackupJob;
use crate::command::{CommandExecutor, CommandSpec};
use crate::error::{BackupError, Result};
use crate::notify::{notify, Notification, Notifier};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{error, info};

/// Compresses the dump in place with an external gzip-compatible tool.
pub struct Compressor<'a> {
    executor: &'a dyn CommandExecutor,
    notifier: &'a dyn Notifier,
    program: &'a str,
}

impl<'a> Compressor<'a> {
    pub fn new(
        executor: &'a dyn CommandExecutor,
        notifier: &'a dyn Notifier,
        program: &'a str,
    ) -> Self {
        Self {
            executor,
            notifier,
            program,
        }
    }

    pub async fn run(&self, job: &BackupJob) -> Result<()> {
        info!("Compressing {}", job.dump_path.display());

        let spec = CommandSpec::new(self.program).arg(job.dump_path.to_string_lossy());
        let reason = match self.executor.run(&spec).await {
            Ok(output) if output.success => {
                info!("Compressed to {}", job.compressed_path.display());
                return Ok(());
            }
            Ok(output) => output.failure_reason(self.program),
            Err(e) => e.to_string(),
        };

        error!("Compression failed: {}", reason);
        notify(
            self.notifier,
            &Notification::CompressionFailed {
                error: reason.clone(),
            },
        )
        .await;
        Err(BackupError::Compression(reason))
    }
}

pub fn calculate_sha256(file_path: &Path) -> Result<String> {
    use sha2::{Digest, Sha256};

    let file = File::open(file_path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 64 * 1024];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::job::tests::{new_year, sample_config};
    use crate::backup::testing::{RecordingNotifier, ScriptedExecutor};
    use std::io::Write;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_compress_replaces_dump() {
        let dir = tempdir().unwrap();
        let job = BackupJob::new(&sample_config(dir.path()), new_year());
        std::fs::write(&job.dump_path, "-- dump").unwrap();
        let executor = ScriptedExecutor::default();
        let notifier = RecordingNotifier::default();

        Compressor::new(&executor, &notifier, "gzip").run(&job).await.unwrap();

        assert!(!job.dump_path.exists());
        assert!(job.compressed_path.exists());
        assert_eq!(
            executor.calls()[0].args,
            vec![job.dump_path.to_string_lossy().to_string()]
        );
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let dir = tempdir().unwrap();
        let job = BackupJob::new(&sample_config(dir.path()), new_year());
        let executor = ScriptedExecutor {
            compress_fails_with: Some("gzip: No space left on device".to_string()),
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();

        let err = Compressor::new(&executor, &notifier, "gzip")
            .run(&job)
            .await
            .unwrap_err();

        assert!(matches!(err, BackupError::Compression(_)));
        assert_eq!(
            notifier.messages(),
            vec!["❌ Compression Failed: gzip exited with status 2: gzip: No space left on device"]
        );
    }

    #[tokio::test]
    async fn test_missing_tool_is_reported() {
        let dir = tempdir().unwrap();
        let job = BackupJob::new(&sample_config(dir.path()), new_year());
        std::fs::write(&job.dump_path, "-- dump").unwrap();
        let executor = ScriptedExecutor {
            fails_to_start: Some("gzip".to_string()),
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();

        let err = Compressor::new(&executor, &notifier, "gzip")
            .run(&job)
            .await
            .unwrap_err();

        assert!(matches!(err, BackupError::Compression(_)));
        assert!(job.dump_path.exists());
        assert_eq!(
            notifier.messages(),
            vec!["❌ Compression Failed: Command error: failed to start gzip: No such file or directory"]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_real_gzip_when_available() {
        use crate::command::SystemExecutor;

        let available = std::process::Command::new("gzip")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if !available {
            return;
        }

        let dir = tempdir().unwrap();
        let job = BackupJob::new(&sample_config(dir.path()), new_year());
        std::fs::write(&job.dump_path, "CREATE TABLE t (id INT);\n".repeat(100)).unwrap();
        let notifier = RecordingNotifier::default();

        Compressor::new(&SystemExecutor, &notifier, "gzip")
            .run(&job)
            .await
            .unwrap();

        assert!(!job.dump_path.exists());
        let mut magic = [0u8; 2];
        File::open(&job.compressed_path)
            .unwrap()
            .read_exact(&mut magic)
            .unwrap();
        assert_eq!(magic, [0x1f, 0x8b]);
    }

    #[test]
    fn test_calculate_sha256() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"hello world").unwrap();

        let hash = calculate_sha256(&file_path).unwrap();
        assert_eq!(
            hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }
}
