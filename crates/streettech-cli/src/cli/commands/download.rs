//! `streettech download <url>` – process, then run the simulated download.

use anyhow::{bail, Result};
use std::io::Write;
use std::sync::Arc;
use streettech_core::error::DownloaderError;
use streettech_core::quality::Quality;
use streettech_core::session::Session;
use streettech_core::simulator::Progress;

use super::process::print_video;

const BAR_WIDTH: usize = 30;

fn progress_line(p: Progress) -> String {
    let filled = (p.value() / 100.0 * BAR_WIDTH as f64).floor() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "\r  [{}{}] {:>3}%",
        "#".repeat(filled),
        " ".repeat(BAR_WIDTH - filled),
        p.percent()
    )
}

pub async fn run_download(session: Arc<Session>, url: &str, quality: Quality) -> Result<()> {
    session.select_quality(quality);
    let info = session.process(url).await?;
    print_video(&info);

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<Progress>(16);
    let printer = tokio::spawn(async move {
        while let Some(p) = progress_rx.recv().await {
            let mut out = std::io::stdout().lock();
            let _ = out.write_all(progress_line(p).as_bytes());
            let _ = out.flush();
        }
        println!();
    });

    let interrupt = {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() && session.cancel_download() {
                tracing::info!("download interrupted");
            }
        })
    };

    let download = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.download(Some(progress_tx)).await })
    };
    let result = download.await?;
    interrupt.abort();
    printer.await?;

    match result {
        Ok(Some(entry)) => {
            println!("Saved to history ({} at {}).", entry.quality, entry.timestamp.to_rfc3339());
            Ok(())
        }
        Ok(None) => bail!("no video ready to download"),
        Err(DownloaderError::Cancelled) => {
            println!("Download cancelled.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
