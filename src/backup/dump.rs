use super::job::BackupJob;
use crate::command::{CommandExecutor, CommandSpec};
use crate::error::{BackupError, Result};
use crate::notify::{notify, Notification, Notifier};
use std::fs;
use tracing::{error, info};

pub struct Dumper<'a> {
    executor: &'a dyn CommandExecutor,
    notifier: &'a dyn Notifier,
    program: &'a str,
}

impl<'a> Dumper<'a> {
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

    fn command(&self, job: &BackupJob) -> CommandSpec {
        let db = &job.database;
        let mut spec = CommandSpec::new(self.program)
            .arg(format!("-h{}", db.host))
            .arg(format!("-u{}", db.user));
        // a bare `-p` makes mysqldump prompt on the terminal
        if !db.password.is_empty() {
            spec = spec.arg(format!("-p{}", db.password));
        }
        spec.arg(db.name.clone()).stdout_to(&job.dump_path)
    }

    /// Writes the dump to `job.dump_path`. On failure the operator has
    /// already been told and the partial file is gone.
    pub async fn run(&self, job: &BackupJob) -> Result<()> {
        info!(
            "Dumping database {} from {} to {}",
            job.database.name,
            job.database.host,
            job.dump_path.display()
        );

        match self.dump(job).await {
            Ok(()) => {
                let size = fs::metadata(&job.dump_path).map(|m| m.len()).unwrap_or(0);
                info!("Dump of {} complete: {} bytes", job.database.name, size);
                Ok(())
            }
            Err(e) => {
                error!("Dump of {} failed: {}", job.database.name, e);
                let _ = fs::remove_file(&job.dump_path);
                let stderr = match &e {
                    BackupError::Dump(reason) => reason.clone(),
                    other => other.to_string(),
                };
                notify(self.notifier, &Notification::DumpFailed { stderr }).await;
                Err(e)
            }
        }
    }

    async fn dump(&self, job: &BackupJob) -> Result<()> {
        fs::create_dir_all(&job.backup_dir)?;

        let output = self.executor.run(&self.command(job)).await?;
        if !output.success {
            let stderr = output.stderr.trim();
            let reason = if stderr.is_empty() {
                output.failure_reason(self.program)
            } else {
                stderr.to_string()
            };
            return Err(BackupError::Dump(reason));
        }
        Ok(())
    }
}
