//! Resolver integration tests against a local fixture archive
//!
//! Exercises the full prebuilt-archive chain (download → extract → relocate →
//! cleanup) with a wiremock server standing in for the remote build host.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use vidmute::config::BootstrapConfig;
use vidmute::ffmpeg::{AcquisitionStrategy, FfmpegResolver};
use vidmute::progress::{ProgressEvent, Reporter};

struct NullReporter;

impl Reporter for NullReporter {
    fn on_progress(&self, _event: ProgressEvent) {}
    fn on_message(&self, _text: &str) {}
}

/// Mimics the real archive layout: one versioned top-level directory with the
/// binary at `bin/ffmpeg.exe` beneath it.
fn fixture_archive() -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    let mut writer = ZipWriter::new(&mut buf);
    let options = SimpleFileOptions::default();
    writer
        .add_directory("ffmpeg-7.1-essentials_build", options)
        .unwrap();
    writer
        .add_directory("ffmpeg-7.1-essentials_build/bin", options)
        .unwrap();
    writer
        .start_file("ffmpeg-7.1-essentials_build/bin/ffmpeg.exe", options)
        .unwrap();
    writer.write_all(b"fake ffmpeg binary").unwrap();
    writer
        .start_file("ffmpeg-7.1-essentials_build/LICENSE", options)
        .unwrap();
    writer.write_all(b"GPL").unwrap();
    writer.finish().unwrap();
    buf.into_inner()
}

fn test_config(cache_dir: &Path, url: String) -> BootstrapConfig {
    BootstrapConfig {
        archive_url: url,
        cache_dir: cache_dir.to_path_buf(),
        connect_timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

#[tokio::test]
async fn prebuilt_chain_places_binary_and_cleans_up() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ffmpeg-release-essentials.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(fixture_archive()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache_dir = dir.path().join("ffmpeg");
    let config = test_config(
        &cache_dir,
        format!("{}/ffmpeg-release-essentials.zip", server.uri()),
    );

    let resolver = FfmpegResolver::new(config, Arc::new(NullReporter));
    let binary = resolver
        .resolve_with(AcquisitionStrategy::PrebuiltArchive)
        .await
        .unwrap();

    // Binary relocated to the cache root with the archived bytes intact.
    assert_eq!(binary.as_path(), cache_dir.join("ffmpeg.exe"));
    assert_eq!(
        std::fs::read(binary.as_path()).unwrap(),
        b"fake ffmpeg binary"
    );

    // Archive and extracted subtree are gone; only the binary remains.
    assert!(!cache_dir.join("ffmpeg.zip").exists());
    assert!(!cache_dir.join("ffmpeg-7.1-essentials_build").exists());
    let leftovers: Vec<_> = std::fs::read_dir(&cache_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("ffmpeg.exe")]);
}

#[tokio::test]
async fn warm_cache_resolves_without_network() {
    let dir = tempfile::tempdir().unwrap();
    let cache_dir = dir.path().join("ffmpeg");
    std::fs::create_dir_all(&cache_dir).unwrap();
    std::fs::write(cache_dir.join("ffmpeg.exe"), b"cached").unwrap();

    // Unroutable URL: any network attempt would fail the test.
    let config = test_config(&cache_dir, "http://127.0.0.1:1/unreachable.zip".into());
    let resolver = FfmpegResolver::new(config, Arc::new(NullReporter));

    let first = resolver
        .resolve_with(AcquisitionStrategy::PrebuiltArchive)
        .await
        .unwrap();
    let second = resolver
        .resolve_with(AcquisitionStrategy::PrebuiltArchive)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.as_path(), cache_dir.join("ffmpeg.exe"));
}

#[tokio::test]
async fn download_failure_leaves_no_binary_at_final_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ffmpeg-release-essentials.zip"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache_dir = dir.path().join("ffmpeg");
    let config = test_config(
        &cache_dir,
        format!("{}/ffmpeg-release-essentials.zip", server.uri()),
    );

    let resolver = FfmpegResolver::new(config, Arc::new(NullReporter));
    let result = resolver
        .resolve_with(AcquisitionStrategy::PrebuiltArchive)
        .await;

    assert!(result.is_err());
    assert!(!cache_dir.join("ffmpeg.exe").exists());
}

#[tokio::test]
async fn unsupported_platform_fails_before_any_work() {
    let dir = tempfile::tempdir().unwrap();
    let cache_dir = dir.path().join("ffmpeg");
    let config = test_config(&cache_dir, "http://127.0.0.1:1/unreachable.zip".into());

    let resolver = FfmpegResolver::new(config, Arc::new(NullReporter));
    let err = resolver
        .resolve_with(AcquisitionStrategy::Unsupported)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        vidmute::error::AcquireError::UnsupportedPlatform { .. }
    ));
    // Nothing was created: not even the cache directory.
    assert!(!cache_dir.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn system_path_probe_classifies_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let cache_dir = dir.path().join("ffmpeg");

    // `true` ignores its arguments and exits 0.
    let ok_config = BootstrapConfig {
        system_command: "true".into(),
        ..test_config(&cache_dir, String::new())
    };
    let resolver = FfmpegResolver::new(ok_config, Arc::new(NullReporter));
    let binary = resolver
        .resolve_with(AcquisitionStrategy::SystemPath)
        .await
        .unwrap();
    assert_eq!(binary.as_path(), Path::new("true"));

    // `false` exits 1: installed but not runnable counts as a failure.
    let bad_config = BootstrapConfig {
        system_command: "false".into(),
        ..test_config(&cache_dir, String::new())
    };
    let resolver = FfmpegResolver::new(bad_config, Arc::new(NullReporter));
    let err = resolver
        .resolve_with(AcquisitionStrategy::SystemPath)
        .await
        .unwrap_err();
    assert!(matches!(err, vidmute::error::AcquireError::Probe { .. }));

    // Spawn failure (no such command) is also a probe failure.
    let missing_config = BootstrapConfig {
        system_command: "vidmute-no-such-command".into(),
        ..test_config(&cache_dir, String::new())
    };
    let resolver = FfmpegResolver::new(missing_config, Arc::new(NullReporter));
    let err = resolver
        .resolve_with(AcquisitionStrategy::SystemPath)
        .await
        .unwrap_err();
    assert!(matches!(err, vidmute::error::AcquireError::Probe { .. }));
}

#[tokio::test]
async fn archive_without_binary_is_an_error() {
    let mut buf = std::io::Cursor::new(Vec::new());
    let mut writer = ZipWriter::new(&mut buf);
    let options = SimpleFileOptions::default();
    writer.add_directory("ffmpeg-build", options).unwrap();
    writer.start_file("ffmpeg-build/README", options).unwrap();
    writer.write_all(b"no binary here").unwrap();
    writer.finish().unwrap();
    let body = buf.into_inner();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ffmpeg-release-essentials.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache_dir = dir.path().join("ffmpeg");
    let config = test_config(
        &cache_dir,
        format!("{}/ffmpeg-release-essentials.zip", server.uri()),
    );

    let resolver = FfmpegResolver::new(config, Arc::new(NullReporter));
    let result = resolver
        .resolve_with(AcquisitionStrategy::PrebuiltArchive)
        .await;

    assert!(result.is_err());
    assert!(!cache_dir.join("ffmpeg.exe").exists());
}
