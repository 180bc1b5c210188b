//! End-to-end run: resolve → fetch playlist → parse → download segments →
//! combine → clean up.
//!
//! Halts on URL, playlist, combine, and workspace failures. Segment failures
//! are tolerated or fatal according to `SegmentFailurePolicy`. Segments are
//! only removed after a successful combine, so a failed mux leaves them in
//! place for another attempt.

mod error;
mod summary;

pub use error::PipelineError;
pub use summary::{RunSummary, SkippedSegment};

use crate::concat::{self, Muxer};
use crate::config::{HlsdlConfig, SegmentFailurePolicy};
use crate::downloader::{self, DownloadOptions, SegmentProgress};
use crate::fetch::{self, HttpOptions};
use crate::playlist;
use crate::url_model;
use crate::workspace;
use std::sync::mpsc;

/// The two user inputs of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub playlist_url: String,
    /// Desired output filename; `None` or blank means the configured default.
    pub output_name: Option<String>,
}

impl DownloadRequest {
    pub fn new(playlist_url: impl Into<String>) -> Self {
        Self {
            playlist_url: playlist_url.into(),
            output_name: None,
        }
    }

    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    fn output_name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.output_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(default)
    }
}

/// Runs the whole pipeline for one playlist.
///
/// `progress`, if given, receives one event per finished segment.
pub fn run(
    request: &DownloadRequest,
    cfg: &HlsdlConfig,
    muxer: &dyn Muxer,
    progress: Option<&mpsc::Sender<SegmentProgress>>,
) -> Result<RunSummary, PipelineError> {
    let url = request.playlist_url.trim();

    let output_name =
        workspace::ensure_unique_name(&cfg.output_dir, request.output_name_or(&cfg.default_output_name));
    let output_path = cfg.output_dir.join(&output_name);

    let base_url = url_model::derive_base_url(url)?;
    let token = url_model::extract_signed_token(url)?;
    tracing::info!(
        "playlist {} -> base {} (signed: {})",
        url,
        base_url,
        !token.is_empty()
    );

    let http = HttpOptions::from(&cfg.http);
    let playlist_path = fetch::fetch_playlist(url, &cfg.temp_dir, &http).map_err(|source| {
        tracing::error!("playlist download failed: {}", source.describe());
        PipelineError::PlaylistFetch {
            url: url.to_string(),
            source,
        }
    })?;

    let segment_urls =
        playlist::extract_segment_urls(&playlist_path, &base_url, &token, &cfg.url_list_path())
            .map_err(|source| PipelineError::PlaylistRead {
                path: playlist_path.clone(),
                source,
            })?;
    if segment_urls.is_empty() {
        return Err(PipelineError::EmptyPlaylist {
            url: url.to_string(),
        });
    }

    let options = DownloadOptions {
        http,
        max_concurrent: cfg.max_concurrent_segments,
        progress: progress.cloned(),
    };
    let report = downloader::download_segments(&segment_urls, &cfg.temp_dir, &options)?;
    drop(options);

    let total = report.total();
    let failed = report.failed_count();
    if failed == total {
        return Err(PipelineError::NoSegmentsDownloaded { total });
    }
    if failed > 0 && cfg.segment_failure_policy == SegmentFailurePolicy::Abort {
        tracing::error!("{} of {} segment(s) failed; aborting before combine", failed, total);
        return Err(PipelineError::SegmentsFailed { failed, total });
    }

    let manifest = concat::build_file_manifest(
        &report.downloaded_urls(),
        &cfg.temp_dir,
        &cfg.file_list_path(),
    )?;
    concat::combine_segments(&manifest, &output_path, muxer).map_err(|source| {
        PipelineError::Combine {
            output: output_path.clone(),
            source,
        }
    })?;

    let segments_removed = if cfg.keep_segments {
        0
    } else {
        workspace::cleanup_segments(&cfg.temp_dir, &cfg.segment_extension)?
    };

    let skipped: Vec<SkippedSegment> = report
        .failed()
        .map(|o| SkippedSegment {
            index: o.index,
            url: o.url.clone(),
            reason: o
                .result
                .as_ref()
                .err()
                .map(|e| e.describe())
                .unwrap_or_default(),
        })
        .collect();

    let summary = RunSummary {
        output_path,
        playlist_path,
        segments_total: total,
        segments_downloaded: report.downloaded_count(),
        bytes_downloaded: report.total_bytes(),
        skipped,
        segments_removed,
    };
    if summary.is_complete() {
        tracing::info!(
            "run complete: {} ({} segment(s))",
            summary.output_path.display(),
            summary.segments_total
        );
    } else {
        tracing::warn!(
            "run complete with gaps: {} ({} of {} segment(s) skipped)",
            summary.output_path.display(),
            summary.segments_skipped(),
            summary.segments_total
        );
    }
    Ok(summary)
}
