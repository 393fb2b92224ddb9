//! Per-input conversion tasks and the sequential processing loop

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error::TaskError;
use crate::ffmpeg::BinaryLocation;
use crate::runner;

/// Suffix appended to the input's base name to form the output name.
const OUTPUT_SUFFIX: &str = "_muted";

/// Outcome of one conversion attempt.
#[derive(Debug)]
pub enum TaskStatus {
    Pending,
    Succeeded,
    Failed(TaskError),
}

/// One requested file, tracked from request to completion.
#[derive(Debug)]
pub struct ConversionTask {
    pub input: PathBuf,
    pub output: PathBuf,
    pub status: TaskStatus,
}

impl ConversionTask {
    pub fn new(input: PathBuf) -> Self {
        let output = derive_output_path(&input);
        Self {
            input,
            output,
            status: TaskStatus::Pending,
        }
    }

    /// Attempt the conversion exactly once, recording the outcome.
    pub async fn run(&mut self, binary: &BinaryLocation) {
        self.status = match self.attempt(binary).await {
            Ok(()) => TaskStatus::Succeeded,
            Err(e) => TaskStatus::Failed(e),
        };
    }

    async fn attempt(&self, binary: &BinaryLocation) -> Result<(), TaskError> {
        if !tokio::fs::try_exists(&self.input).await? {
            return Err(TaskError::InputNotFound(self.input.clone()));
        }
        runner::run(binary, &self.input, &self.output).await
    }
}

/// `{dir}/{stem}_muted{ext}`: same directory and extension as the source.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let mut name = OsString::from(stem);
    name.push(OUTPUT_SUFFIX);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Process every input strictly sequentially. Per-file failures are reported
/// and do not stop the loop; every input is attempted exactly once. Returns
/// the completed tasks for summary reporting.
pub async fn process_all(binary: &BinaryLocation, inputs: Vec<PathBuf>) -> Vec<ConversionTask> {
    let mut tasks = Vec::with_capacity(inputs.len());

    for input in inputs {
        let mut task = ConversionTask::new(input);
        info!("processing {}", task.input.display());
        task.run(binary).await;

        match &task.status {
            TaskStatus::Succeeded => {
                println!("muted video written to {}", task.output.display());
            }
            TaskStatus::Failed(e) => {
                error!("{}: {e}", task.input.display());
            }
            TaskStatus::Pending => unreachable!("task completed without a status"),
        }
        tasks.push(task);
    }

    tasks
}
