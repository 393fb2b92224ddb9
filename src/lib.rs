//! vidmute library
//!
//! Strips audio tracks from video files by delegating to FFmpeg, acquiring
//! the binary on demand. The binary crate in `main.rs` wires these modules
//! to the command line.

pub mod cli;
pub mod config;
pub mod error;
pub mod ffmpeg;
pub mod progress;
pub mod runner;
pub mod task;
