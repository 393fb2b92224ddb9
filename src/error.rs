//! Error taxonomy for the bootstrap and conversion phases
//!
//! Two tiers: `AcquireError` is fatal (no usable FFmpeg means no run),
//! `TaskError` is scoped to a single input file and never aborts the loop.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Failure while locating or acquiring the FFmpeg binary. Always fatal.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("unsupported platform: {os}")]
    UnsupportedPlatform { os: String },

    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Archive entry whose path would land outside the extraction root.
    #[error("archive entry escapes extraction root: {name}")]
    UnsafeEntry { name: String },

    /// Extracted payload did not contain the binary where expected.
    #[error("binary not found in extracted archive at {expected}")]
    BinaryMissing { expected: PathBuf },

    /// `ffmpeg -version` probe on the system path did not succeed.
    #[error("ffmpeg is not installed or not on PATH: {reason}")]
    Probe { reason: String },

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure scoped to one conversion task. Reported, then skipped.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// FFmpeg exited non-zero; `stderr` carries its diagnostic text verbatim.
    #[error("ffmpeg failed ({status}): {stderr}")]
    Tool { status: ExitStatus, stderr: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
