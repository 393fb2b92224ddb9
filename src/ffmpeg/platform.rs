//! Acquisition strategy selection from the host platform

use once_cell::sync::OnceCell;

/// How the FFmpeg binary gets onto this machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionStrategy {
    /// Download a prebuilt build archive and extract the binary (Windows).
    PrebuiltArchive,
    /// Assume the binary is installed and resolvable by bare name (Unix family).
    SystemPath,
    /// No acquisition path exists; fatal for the whole run.
    Unsupported,
}

/// Global cache for strategy selection (decided once, immutable afterwards)
static STRATEGY_CACHE: OnceCell<AcquisitionStrategy> = OnceCell::new();

impl AcquisitionStrategy {
    /// Detect the strategy for the current host (cached after first call).
    pub fn detect() -> Self {
        *STRATEGY_CACHE.get_or_init(|| strategy_for(std::env::consts::OS))
    }
}

/// Pure mapping from an OS identifier to a strategy.
pub fn strategy_for(os: &str) -> AcquisitionStrategy {
    match os {
        "windows" => AcquisitionStrategy::PrebuiltArchive,
        "linux" | "macos" | "freebsd" | "netbsd" | "openbsd" | "dragonfly" | "solaris"
        | "illumos" | "android" => AcquisitionStrategy::SystemPath,
        _ => AcquisitionStrategy::Unsupported,
    }
}
