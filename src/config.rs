//! Bootstrap configuration
//!
//! The production constants (archive URL, cache layout, binary names) live
//! here as defaults on an injectable struct so tests can point the resolver
//! at a local fixture archive and a scratch cache directory.

use std::path::PathBuf;
use std::time::Duration;

/// Hard-coded source for the Windows FFmpeg build archive.
pub const FFMPEG_ARCHIVE_URL: &str =
    "https://www.gyan.dev/ffmpeg/builds/ffmpeg-release-essentials.zip";

/// Where to find and how to fetch the FFmpeg binary.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Remote archive containing the prebuilt binary (Windows acquisition path).
    pub archive_url: String,
    /// Cache directory that ends up holding the binary at its root.
    pub cache_dir: PathBuf,
    /// Filename the binary is cached under, e.g. `ffmpeg.exe`.
    pub binary_name: String,
    /// Filename the downloaded archive is written to inside `cache_dir`.
    pub archive_name: String,
    /// Relative path from the extracted top-level directory to the binary.
    pub binary_subpath: PathBuf,
    /// Bare command name probed on the system path (Unix acquisition path).
    pub system_command: String,
    /// Initial-connection timeout for the archive download.
    pub connect_timeout: Duration,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            archive_url: FFMPEG_ARCHIVE_URL.to_string(),
            cache_dir: default_cache_dir(),
            binary_name: "ffmpeg.exe".to_string(),
            archive_name: "ffmpeg.zip".to_string(),
            binary_subpath: PathBuf::from("bin").join("ffmpeg.exe"),
            system_command: "ffmpeg".to_string(),
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl BootstrapConfig {
    /// Final resting place of the cached binary.
    pub fn cached_binary_path(&self) -> PathBuf {
        self.cache_dir.join(&self.binary_name)
    }

    /// Where the downloaded archive is staged before extraction.
    pub fn archive_path(&self) -> PathBuf {
        self.cache_dir.join(&self.archive_name)
    }
}

/// `{app cache base}/vidmute/ffmpeg`, falling back to a path relative to the
/// current directory when the platform reports no cache base.
fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vidmute")
        .join("ffmpeg")
}
