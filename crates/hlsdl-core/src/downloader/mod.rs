//! Segment downloader.
//!
//! Fetches every segment URL into the working folder. By default segments are
//! fetched one after another; with `max_concurrent > 1` a bounded pool of
//! worker threads pulls `(index, url)` items from a shared queue. Either way
//! the report is ordered by segment index, so reassembly order never depends
//! on completion order.
//!
//! A failed segment is logged and recorded; it never stops the others.

mod segment;

use crate::fetch::{FetchError, HttpOptions};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

/// A segment that reached disk under its final name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedSegment {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Result of one segment fetch, keyed by its position in the playlist.
#[derive(Debug)]
pub struct SegmentOutcome {
    pub index: usize,
    pub url: String,
    pub result: Result<DownloadedSegment, FetchError>,
}

/// Progress event sent after each segment finishes (success or failure).
#[derive(Debug, Clone)]
pub struct SegmentProgress {
    pub index: usize,
    pub total: usize,
    pub url: String,
    pub status: SegmentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentStatus {
    Done { bytes: u64 },
    Failed { reason: String },
}

/// Options for one `download_segments` call.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub http: HttpOptions,
    /// Segment fetches in flight at once; 0 and 1 both mean sequential.
    pub max_concurrent: usize,
    /// If set, a `SegmentProgress` is sent after each segment.
    pub progress: Option<mpsc::Sender<SegmentProgress>>,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            http: HttpOptions::default(),
            max_concurrent: 1,
            progress: None,
        }
    }
}

/// Per-segment outcomes of a download pass, ordered by index.
#[derive(Debug, Default)]
pub struct DownloadReport {
    pub outcomes: Vec<SegmentOutcome>,
}

impl DownloadReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failed(&self) -> impl Iterator<Item = &SegmentOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    pub fn downloaded_count(&self) -> usize {
        self.total() - self.failed_count()
    }

    /// URLs of the segments that made it to disk, in playlist order.
    pub fn downloaded_urls(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_ok())
            .map(|o| o.url.as_str())
            .collect()
    }

    pub fn total_bytes(&self) -> u64 {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|s| s.bytes)
            .sum()
    }
}

/// Downloads every URL in `urls` into `destination_folder` (created if missing).
///
/// Only creating the folder can fail the call; per-segment failures are
/// recorded in the report.
pub fn download_segments(
    urls: &[String],
    destination_folder: &Path,
    options: &DownloadOptions,
) -> io::Result<DownloadReport> {
    fs::create_dir_all(destination_folder)?;

    let count = urls.len();
    if count == 0 {
        return Ok(DownloadReport::default());
    }

    let workers = options.max_concurrent.clamp(1, count);
    tracing::info!(
        "downloading {} segment(s) into {} ({} at a time)",
        count,
        destination_folder.display(),
        workers
    );

    let mut outcomes = if workers == 1 {
        urls.iter()
            .enumerate()
            .map(|(index, url)| {
                fetch_and_report(index, url, count, destination_folder, options)
            })
            .collect()
    } else {
        download_pooled(urls, destination_folder, options, workers)
    };
    outcomes.sort_by_key(|o| o.index);

    Ok(DownloadReport { outcomes })
}

fn download_pooled(
    urls: &[String],
    destination_folder: &Path,
    options: &DownloadOptions,
    workers: usize,
) -> Vec<SegmentOutcome> {
    let count = urls.len();
    let work: Arc<Mutex<VecDeque<(usize, String)>>> =
        Arc::new(Mutex::new(urls.iter().cloned().enumerate().collect()));
    let (tx, rx) = mpsc::channel();
    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let work = Arc::clone(&work);
        let tx = tx.clone();
        let folder = destination_folder.to_path_buf();
        let opts = options.clone();
        handles.push(std::thread::spawn(move || loop {
            let next = match work.lock() {
                Ok(mut queue) => queue.pop_front(),
                Err(_) => None,
            };
            let Some((index, url)) = next else { break };
            let outcome = fetch_and_report(index, &url, count, &folder, &opts);
            if tx.send(outcome).is_err() {
                break;
            }
        }));
    }
    drop(tx);

    let outcomes: Vec<SegmentOutcome> = rx.iter().collect();
    for h in handles {
        if h.join().is_err() {
            tracing::error!("segment worker panicked");
        }
    }
    outcomes
}

fn fetch_and_report(
    index: usize,
    url: &str,
    total: usize,
    folder: &Path,
    options: &DownloadOptions,
) -> SegmentOutcome {
    tracing::debug!("segment {}/{}: GET {}", index + 1, total, url);
    let result = segment::download_one_segment(index, url, folder, &options.http);
    let status = match &result {
        Ok(seg) => {
            tracing::debug!(
                "segment {}/{}: wrote {} ({} bytes)",
                index + 1,
                total,
                seg.path.display(),
                seg.bytes
            );
            SegmentStatus::Done { bytes: seg.bytes }
        }
        Err(e) => {
            let reason = e.describe();
            tracing::warn!("segment {}/{} failed, skipping {}: {}", index + 1, total, url, reason);
            SegmentStatus::Failed { reason }
        }
    };
    if let Some(tx) = &options.progress {
        let _ = tx.send(SegmentProgress {
            index,
            total,
            url: url.to_string(),
            status,
        });
    }
    SegmentOutcome {
        index,
        url: url.to_string(),
        result,
    }
}
