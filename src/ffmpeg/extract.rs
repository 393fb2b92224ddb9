//! Streaming zip extraction with coalesced progress reporting

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use zip::ZipArchive;

use crate::error::AcquireError;
use crate::progress::{ProgressEvent, ProgressGate, Reporter, Stage};

/// Extract every entry of `archive_path` under `target_dir`, reproducing the
/// archive's relative directory structure exactly. Percentage progress is
/// computed against the summed uncompressed entry sizes and emitted with the
/// same ≥10-point coalescing as the downloader.
///
/// Entries whose paths would escape `target_dir` (parent-directory segments,
/// absolute paths) are rejected rather than trusted.
pub async fn extract(
    archive_path: &Path,
    target_dir: &Path,
    reporter: Arc<dyn Reporter>,
) -> Result<(), AcquireError> {
    let archive_path = archive_path.to_path_buf();
    let target_dir = target_dir.to_path_buf();

    // Zip decompression is CPU-bound; keep it off the async workers.
    tokio::task::spawn_blocking(move || extract_blocking(&archive_path, &target_dir, &*reporter))
        .await?
}

fn extract_blocking(
    archive_path: &Path,
    target_dir: &Path,
    reporter: &dyn Reporter,
) -> Result<(), AcquireError> {
    let mut archive = ZipArchive::new(File::open(archive_path)?)?;

    let total: u64 = (0..archive.len())
        .map(|i| archive.by_index(i).map(|entry| entry.size()))
        .sum::<Result<u64, _>>()?;

    let mut extracted: u64 = 0;
    let mut gate = ProgressGate::default();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let dest = mapped_path(target_dir, entry.enclosed_name(), entry.name())?;

        if entry.is_dir() {
            std::fs::create_dir_all(&dest)?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&dest)?;
        std::io::copy(&mut entry, &mut out)?;

        extracted += entry.size();
        if let Some(percent) = gate.advance(extracted, total) {
            reporter.on_progress(ProgressEvent::Percent {
                stage: Stage::Extract,
                bytes: extracted,
                total,
                percent,
            });
        }
    }

    Ok(())
}

/// Map an entry name into `target_dir`, refusing names that escape it.
fn mapped_path(
    target_dir: &Path,
    enclosed: Option<PathBuf>,
    raw_name: &str,
) -> Result<PathBuf, AcquireError> {
    match enclosed {
        Some(relative) => Ok(target_dir.join(relative)),
        None => Err(AcquireError::UnsafeEntry {
            name: raw_name.to_string(),
        }),
    }
}
