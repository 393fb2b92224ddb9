use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use vidmute::config::BootstrapConfig;
use vidmute::ffmpeg::FfmpegResolver;
use vidmute::progress::ConsoleReporter;
use vidmute::task::TaskStatus;
use vidmute::{cli, task};

fn main() {
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Info)
        .init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("FATAL: Failed to create Tokio runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(real_main()) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn real_main() -> Result<()> {
    let args = cli::Args::parse();

    println!("Strips the audio track from the given video files.");

    // One resolution per run; every task reuses the same binary.
    let reporter = Arc::new(ConsoleReporter::new());
    let resolver = FfmpegResolver::new(BootstrapConfig::default(), reporter);
    let binary = resolver
        .resolve()
        .await
        .context("Failed to set up FFmpeg")?;

    if args.files.is_empty() {
        println!("Usage: vidmute <video files...>");
        println!("Pass one or more video files; each produces a sibling *_muted file.");
        return Ok(());
    }

    let tasks = task::process_all(&binary, args.files).await;

    let failed = tasks
        .iter()
        .filter(|t| matches!(t.status, TaskStatus::Failed(_)))
        .count();
    println!(
        "Finished: {} succeeded, {} failed.",
        tasks.len() - failed,
        failed
    );

    Ok(())
}
