use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Strip audio tracks from video files without re-encoding")]
pub struct Args {
    /// Video files to mute; each produces a sibling `{name}_muted{ext}` file
    pub files: Vec<PathBuf>,
}
