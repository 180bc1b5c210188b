//! Single-segment streaming GET into the working folder.

use super::DownloadedSegment;
use crate::fetch::{self, FetchError, HttpOptions};
use crate::storage::PartFile;
use crate::url_model;
use std::path::Path;

/// Downloads segment `index` to `<folder>/<basename of url>`.
///
/// The body is staged in a per-index `.part` file and renamed only after a 2xx
/// response has been fully received; on any failure the `.part` file is
/// removed.
pub(super) fn download_one_segment(
    index: usize,
    url: &str,
    folder: &Path,
    http: &HttpOptions,
) -> Result<DownloadedSegment, FetchError> {
    let final_path = folder.join(url_model::segment_filename(url));
    let mut part = PartFile::create(&final_path, index)?;
    match fetch::get_to_writer(url, http, &mut part) {
        Ok(bytes) => {
            let path = part.finalize()?;
            Ok(DownloadedSegment { path, bytes })
        }
        Err(e) => {
            part.discard();
            Err(e)
        }
    }
}
