//! Playlist download: one buffered GET, body persisted verbatim.

use super::{get_bytes, FetchError, HttpOptions};
use crate::url_model;
use std::fs;
use std::path::{Path, PathBuf};

/// Downloads the playlist at `url` into `destination_folder` (created if missing)
/// and returns the local path, `<destination_folder>/<basename of url>`.
///
/// On a transport error or non-2xx status nothing is written.
pub fn fetch_playlist(
    url: &str,
    destination_folder: &Path,
    http: &HttpOptions,
) -> Result<PathBuf, FetchError> {
    fs::create_dir_all(destination_folder)?;
    let body = get_bytes(url, http)?;
    let path = destination_folder.join(url_model::playlist_filename(url));
    fs::write(&path, &body)?;
    tracing::info!(
        "downloaded playlist to {} ({} bytes)",
        path.display(),
        body.len()
    );
    Ok(path)
}
