//! Filename extraction from a URL string.

/// Returns the final `/`-separated segment of `url`, with any query string
/// and fragment stripped first.
///
/// Works on the raw string rather than a parsed URL: segment URLs are built
/// by literal concatenation and need not be well-formed. Returns `None` when
/// the URL ends in `/`.
pub fn filename_from_url(url: &str) -> Option<String> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let without_query = &url[..end];
    let segment = without_query.rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }
    Some(segment.to_string())
}
