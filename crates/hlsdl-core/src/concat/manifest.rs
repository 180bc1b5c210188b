//! ffmpeg concat-demuxer manifest (`file '<path>'` per line).

use crate::url_model;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Formats one manifest entry. Single quotes are escaped the concat demuxer way (`'\''`).
pub fn manifest_line(path: &Path) -> String {
    let escaped = path.to_string_lossy().replace('\'', r"'\''");
    format!("file '{}'", escaped)
}

/// Writes the manifest for `urls`, in order, to `manifest_path` and returns it.
///
/// Each entry points at the segment's local file inside `folder`, using the
/// same naming rule as the downloader. Paths are made absolute: ffmpeg
/// resolves relative entries against the manifest's own directory.
pub fn build_file_manifest<S: AsRef<str>>(
    urls: &[S],
    folder: &Path,
    manifest_path: &Path,
) -> io::Result<PathBuf> {
    let folder = std::path::absolute(folder)?;
    let mut out = String::new();
    for url in urls {
        let local = folder.join(url_model::segment_filename(url.as_ref()));
        out.push_str(&manifest_line(&local));
        out.push('\n');
    }
    fs::write(manifest_path, out)?;
    tracing::info!(
        "wrote muxer manifest with {} entr{} to {}",
        urls.len(),
        if urls.len() == 1 { "y" } else { "ies" },
        manifest_path.display()
    );
    Ok(manifest_path.to_path_buf())
}
