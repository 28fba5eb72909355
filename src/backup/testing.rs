//! Scripted stand-ins for the external tools, the notifier and the object
//! store, shared by the backup stage tests.

use crate::command::{CommandExecutor, CommandOutput, CommandSpec};
use crate::error::{BackupError, Result};
use crate::notify::Notifier;
use crate::upload::{ObjectUploader, RemoteObject};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Behaves like `mysqldump` and `gzip` without touching a database.
#[derive(Default)]
pub struct ScriptedExecutor {
    pub dump_fails_with: Option<String>,
    pub compress_fails_with: Option<String>,
    /// Program name that behaves as if it were not installed.
    pub fails_to_start: Option<String>,
    pub calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedExecutor {
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.program).collect()
    }
}

fn failed(stderr: &str) -> CommandOutput {
    CommandOutput {
        success: false,
        code: Some(2),
        stderr: stderr.to_string(),
    }
}

fn succeeded() -> CommandOutput {
    CommandOutput {
        success: true,
        code: Some(0),
        stderr: String::new(),
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(spec.clone());

        if self.fails_to_start.as_deref() == Some(spec.program.as_str()) {
            return Err(BackupError::Command(format!(
                "failed to start {}: No such file or directory",
                spec.program
            )));
        }

        if spec.program == "gzip" {
            let source = PathBuf::from(&spec.args[0]);
            if let Some(stderr) = &self.compress_fails_with {
                return Ok(failed(stderr));
            }
            let mut target = source.clone().into_os_string();
            target.push(".gz");
            fs::rename(&source, target)?;
            return Ok(succeeded());
        }

        let out = spec
            .stdout_path
            .as_ref()
            .ok_or_else(|| BackupError::Command("dump without output file".to_string()))?;
        if let Some(stderr) = &self.dump_fails_with {
            fs::write(out, "-- partial")?;
            return Ok(failed(stderr));
        }
        fs::write(out, "-- dump\nCREATE TABLE orders (id INT);\n")?;
        Ok(succeeded())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &str) -> Result<()> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Accepts any existing file unless told to reject it.
#[derive(Default)]
pub struct ScriptedUploader {
    pub fails_with: Option<String>,
    pub uploads: Mutex<Vec<(String, PathBuf)>>,
}

impl ScriptedUploader {
    pub fn uploads(&self) -> Vec<(String, PathBuf)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectUploader for ScriptedUploader {
    async fn put_file(&self, key: &str, file_path: &Path) -> Result<RemoteObject> {
        self.uploads
            .lock()
            .unwrap()
            .push((key.to_string(), file_path.to_path_buf()));

        if !file_path.exists() {
            return Err(BackupError::Upload(format!(
                "{} does not exist",
                file_path.display()
            )));
        }
        if let Some(reason) = &self.fails_with {
            return Err(BackupError::Upload(reason.clone()));
        }
        Ok(RemoteObject {
            base_url: "http://minio.local".to_string(),
            bucket: "backups".to_string(),
            key: key.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
