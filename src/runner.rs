//! FFmpeg subprocess invocation
//!
//! Single-shot, non-interactive: both output streams are captured in full and
//! a non-zero exit carries the stderr text as the diagnostic payload.

use std::path::Path;
use std::process::Stdio;

use log::debug;

use crate::error::TaskError;
use crate::ffmpeg::BinaryLocation;

/// Invoke `<ffmpeg> -i <input> -c copy -an <output>`: copy every stream,
/// drop audio. Paths are passed as discrete argv entries, so embedded spaces
/// need no shell quoting. stdin is closed; if the output file already exists
/// ffmpeg refuses to overwrite and the task fails with its diagnostic text
/// instead of clobbering silently.
pub async fn run(binary: &BinaryLocation, input: &Path, output: &Path) -> Result<(), TaskError> {
    debug!(
        "running {} -i {} -c copy -an {}",
        binary.as_path().display(),
        input.display(),
        output.display()
    );

    let result = tokio::process::Command::new(binary.as_path())
        .arg("-i")
        .arg(input)
        .args(["-c", "copy", "-an"])
        .arg(output)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !result.status.success() {
        return Err(TaskError::Tool {
            status: result.status,
            stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
        });
    }

    Ok(())
}
