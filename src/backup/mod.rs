pub mod compression;
pub mod dump;
pub mod job;
pub mod pipeline;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use job::BackupJob;
pub use pipeline::{Pipeline, RunOutcome};
