//! Binary resolution: locate → verify → download → extract → relocate → validate

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use log::{debug, info};

use crate::config::BootstrapConfig;
use crate::error::AcquireError;
use crate::progress::Reporter;

use super::download::download;
use super::extract::extract;
use super::platform::AcquisitionStrategy;

/// A resolved, invocable path to the FFmpeg binary. Either an absolute cache
/// path (prebuilt-archive strategy) or a bare command name the OS resolves
/// (system-path strategy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryLocation(pub PathBuf);

impl BinaryLocation {
    pub fn as_path(&self) -> &std::path::Path {
        &self.0
    }
}

/// Resolves one usable FFmpeg binary per process run.
pub struct FfmpegResolver {
    config: BootstrapConfig,
    reporter: Arc<dyn Reporter>,
}

impl FfmpegResolver {
    pub fn new(config: BootstrapConfig, reporter: Arc<dyn Reporter>) -> Self {
        Self { config, reporter }
    }

    /// Resolve using the strategy detected for the current host.
    pub async fn resolve(&self) -> Result<BinaryLocation, AcquireError> {
        self.resolve_with(AcquisitionStrategy::detect()).await
    }

    /// Resolve with an explicit strategy.
    pub async fn resolve_with(
        &self,
        strategy: AcquisitionStrategy,
    ) -> Result<BinaryLocation, AcquireError> {
        match strategy {
            AcquisitionStrategy::PrebuiltArchive => self.resolve_prebuilt().await,
            AcquisitionStrategy::SystemPath => self.probe_system_path().await,
            AcquisitionStrategy::Unsupported => Err(AcquireError::UnsupportedPlatform {
                os: std::env::consts::OS.to_string(),
            }),
        }
    }

    /// Cache-first acquisition: a previously placed binary short-circuits
    /// without any network access.
    async fn resolve_prebuilt(&self) -> Result<BinaryLocation, AcquireError> {
        let binary_path = self.config.cached_binary_path();
        if tokio::fs::try_exists(&binary_path).await? {
            debug!("using cached ffmpeg at {}", binary_path.display());
            return Ok(BinaryLocation(binary_path));
        }

        self.reporter
            .on_message("FFmpeg not found, downloading a prebuilt archive...");
        tokio::fs::create_dir_all(&self.config.cache_dir).await?;

        let archive_path = self.config.archive_path();
        let client = reqwest::Client::builder()
            .connect_timeout(self.config.connect_timeout)
            .user_agent(concat!("vidmute/", env!("CARGO_PKG_VERSION")))
            .build()?;
        download(
            &client,
            &self.config.archive_url,
            &archive_path,
            &*self.reporter,
        )
        .await?;

        extract(&archive_path, &self.config.cache_dir, self.reporter.clone()).await?;

        // The archive unpacks into a single versioned directory; the binary
        // sits at a fixed sub-path beneath it.
        let extracted_root = self.first_extracted_dir().await?;
        let extracted_binary = extracted_root.join(&self.config.binary_subpath);
        if !tokio::fs::try_exists(&extracted_binary).await? {
            return Err(AcquireError::BinaryMissing {
                expected: extracted_binary,
            });
        }

        // Relocation is the last placement step, so nothing binary-shaped
        // exists at the final path unless the whole chain succeeded.
        tokio::fs::rename(&extracted_binary, &binary_path).await?;

        tokio::fs::remove_file(&archive_path).await?;
        tokio::fs::remove_dir_all(&extracted_root).await?;

        self.reporter.on_message("FFmpeg downloaded and installed.");
        info!("ffmpeg cached at {}", binary_path.display());
        Ok(BinaryLocation(binary_path))
    }

    /// First subdirectory under the cache root, i.e. the extracted payload.
    async fn first_extracted_dir(&self) -> Result<PathBuf, AcquireError> {
        let mut entries = tokio::fs::read_dir(&self.config.cache_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                return Ok(entry.path());
            }
        }
        Err(AcquireError::BinaryMissing {
            expected: self.config.cache_dir.join(&self.config.binary_subpath),
        })
    }

    /// Verify a system-installed binary answers a version query with exit 0.
    async fn probe_system_path(&self) -> Result<BinaryLocation, AcquireError> {
        let command = &self.config.system_command;
        let status = tokio::process::Command::new(command)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| AcquireError::Probe {
                reason: format!("failed to spawn `{command} -version`: {e}"),
            })?;

        if !status.success() {
            return Err(AcquireError::Probe {
                reason: format!("`{command} -version` exited with {status}"),
            });
        }

        debug!("system ffmpeg probe succeeded");
        Ok(BinaryLocation(PathBuf::from(command)))
    }
}
