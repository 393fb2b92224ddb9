//! Streaming archive download with coalesced progress reporting

use std::path::Path;

use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::error::AcquireError;
use crate::progress::{ProgressEvent, ProgressGate, Reporter, Stage};

/// Stream `url` into `dest` in fixed-size chunks, never buffering the whole
/// body. A non-2xx status fails before any bytes are written. When the server
/// advertises a content length, percentage progress is emitted only on ≥10
/// point advances; otherwise raw byte counts are emitted per chunk.
pub async fn download(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
    reporter: &dyn Reporter,
) -> Result<(), AcquireError> {
    let response = client.get(url).send().await?.error_for_status()?;
    let total = response.content_length();

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;
    let mut gate = ProgressGate::default();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        match total {
            Some(total) => {
                if let Some(percent) = gate.advance(downloaded, total) {
                    reporter.on_progress(ProgressEvent::Percent {
                        stage: Stage::Download,
                        bytes: downloaded,
                        total,
                        percent,
                    });
                }
            }
            None => reporter.on_progress(ProgressEvent::Bytes {
                stage: Stage::Download,
                bytes: downloaded,
            }),
        }
    }

    file.flush().await?;
    Ok(())
}
