//! FFmpeg bootstrap subsystem
//!
//! Locates or acquires a usable `ffmpeg` binary exactly once per run and
//! hands back one canonical invocable path.
//!
//! ## Module Organization
//!
//! - `platform` - Acquisition strategy selection from the host OS
//! - `download` - Streaming archive download with coalesced progress
//! - `extract` - Streaming zip extraction with coalesced progress
//! - `resolve` - Orchestration: locate → download → extract → relocate → validate

mod download;
mod extract;
mod platform;
mod resolve;

pub use platform::AcquisitionStrategy;
pub use resolve::{BinaryLocation, FfmpegResolver};
