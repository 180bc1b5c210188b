//! `hlsdl get`: run the whole download/combine pipeline for one playlist.

use anyhow::Result;
use hlsdl_core::checksum;
use hlsdl_core::concat::FfmpegMuxer;
use hlsdl_core::config::HlsdlConfig;
use hlsdl_core::downloader::{SegmentProgress, SegmentStatus};
use hlsdl_core::{DownloadRequest, RunSummary};
use std::io;
use std::sync::mpsc;
use tokio::task::JoinHandle;

use super::prompt;
use crate::cli::GetArgs;

pub async fn run_get(args: GetArgs, cfg: HlsdlConfig) -> Result<()> {
    let request = match args.url {
        Some(url) => {
            let request = DownloadRequest::new(url);
            match args.output {
                Some(name) => request.with_output_name(name),
                None => request,
            }
        }
        None => prompt::read_request(io::stdin().lock(), io::stdout(), args.output)?,
    };

    let (progress_tx, progress_rx) = mpsc::channel::<SegmentProgress>();
    let progress_handle = tokio::task::spawn_blocking(move || {
        for p in progress_rx {
            match p.status {
                SegmentStatus::Done { bytes } => {
                    println!("  [{}/{}] {} ({} bytes)", p.index + 1, p.total, p.url, bytes)
                }
                SegmentStatus::Failed { reason } => {
                    println!("  [{}/{}] skipped {}: {}", p.index + 1, p.total, p.url, reason)
                }
            }
        }
    });

    let muxer = FfmpegMuxer::from(&cfg.muxer);
    println!("Downloading {}", request.playlist_url.trim());
    let outcome = tokio::task::spawn_blocking(move || {
        let result = hlsdl_core::run(&request, &cfg, &muxer, Some(&progress_tx));
        drop(progress_tx);
        result
    })
    .await?;
    wait_for_printer(progress_handle).await;

    let summary = outcome?;
    print_summary(&summary);

    if args.checksum {
        let digest = checksum::sha256_path(&summary.output_path)?;
        println!("{}  {}", digest, summary.output_path.display());
    }
    Ok(())
}

/// Waits for the progress printer. Returns false if it panicked or was
/// cancelled; the run itself is unaffected either way.
async fn wait_for_printer(handle: JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("progress printer ended abnormally: {}", e);
            false
        }
    }
}

fn print_summary(summary: &RunSummary) {
    let mib = summary.bytes_downloaded as f64 / 1_048_576.0;
    println!("Saved {}", summary.output_path.display());
    println!(
        "  {} of {} segment(s), {:.1} MiB",
        summary.segments_downloaded, summary.segments_total, mib
    );
    if !summary.is_complete() {
        println!(
            "  {} segment(s) missing from the output:",
            summary.segments_skipped()
        );
        for s in &summary.skipped {
            println!("    #{} {}: {}", s.index + 1, s.url, s.reason);
        }
    }
}
