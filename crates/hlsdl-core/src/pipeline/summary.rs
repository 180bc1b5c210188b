use std::path::PathBuf;

/// A segment left out of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSegment {
    pub index: usize,
    pub url: String,
    pub reason: String,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub playlist_path: PathBuf,
    pub segments_total: usize,
    pub segments_downloaded: usize,
    pub bytes_downloaded: u64,
    /// Gaps in the output, in playlist order.
    pub skipped: Vec<SkippedSegment>,
    /// Segment files deleted after combining (0 with `keep_segments`).
    pub segments_removed: usize,
}

impl RunSummary {
    pub fn segments_skipped(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
