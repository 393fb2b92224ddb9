//! Progress reporting for long-running bootstrap operations
//!
//! The downloader and extractor emit coarse-grained events through the
//! [`Reporter`] trait instead of writing to the console directly, so the
//! bootstrap components stay testable without capturing real output.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

/// Which bootstrap stage a progress event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Download,
    Extract,
}

/// One coalesced progress observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Total size known: cumulative bytes plus the percentage they represent.
    Percent {
        stage: Stage,
        bytes: u64,
        total: u64,
        percent: u8,
    },
    /// Total size unknown: raw cumulative byte count.
    Bytes { stage: Stage, bytes: u64 },
}

/// Sink for bootstrap progress and status messages.
pub trait Reporter: Send + Sync {
    fn on_progress(&self, event: ProgressEvent);
    fn on_message(&self, text: &str);
}

/// Emission gate that suppresses progress events until cumulative progress
/// has advanced by at least `threshold` percentage points since the last
/// emission. Bounds console volume to at most `100 / threshold` events per
/// operation regardless of chunk count.
#[derive(Debug)]
pub struct ProgressGate {
    threshold: f64,
    last_emitted: f64,
}

impl ProgressGate {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            last_emitted: 0.0,
        }
    }

    /// Feed the current cumulative byte count; returns the whole percentage
    /// to report if the gate opens, `None` while coalescing.
    pub fn advance(&mut self, bytes: u64, total: u64) -> Option<u8> {
        if total == 0 {
            return None;
        }
        let percent = (bytes as f64 / total as f64) * 100.0;
        if percent - self.last_emitted >= self.threshold {
            self.last_emitted = percent;
            Some(percent.round() as u8)
        } else {
            None
        }
    }
}

impl Default for ProgressGate {
    fn default() -> Self {
        Self::new(10.0)
    }
}

/// Console reporter backed by an indicatif bar, one bar per stage.
pub struct ConsoleReporter {
    bar: Mutex<Option<(Stage, ProgressBar)>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_for(&self, stage: Stage, total: Option<u64>) -> ProgressBar {
        let mut guard = match self.bar.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some((current, bar)) = guard.as_ref()
            && *current == stage
        {
            return bar.clone();
        }
        if let Some((_, old)) = guard.take() {
            old.finish_and_clear();
        }
        let bar = match total {
            Some(len) => {
                let bar = ProgressBar::new(len);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("   [{bar:50.cyan/blue}] {bytes}/{total_bytes}  {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("█▓░"),
                );
                bar
            }
            None => ProgressBar::new_spinner(),
        };
        bar.set_message(match stage {
            Stage::Download => "downloading ffmpeg",
            Stage::Extract => "extracting archive",
        });
        *guard = Some((stage, bar.clone()));
        bar
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn on_progress(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Percent {
                stage,
                bytes,
                total,
                ..
            } => {
                let bar = self.bar_for(stage, Some(total));
                bar.set_position(bytes);
            }
            ProgressEvent::Bytes { stage, bytes } => {
                let bar = self.bar_for(stage, None);
                bar.set_position(bytes);
            }
        }
    }

    fn on_message(&self, text: &str) {
        let mut guard = match self.bar.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some((_, bar)) = guard.take() {
            bar.finish_and_clear();
        }
        println!("{text}");
    }
}
