//! URL modeling for a playlist run.
//!
//! Derives the segment base URL and the signed-access token from the playlist
//! URL, and local filenames from playlist/segment URLs.

mod path;
mod sanitize;

use std::fmt;

pub use path::filename_from_url;
pub use sanitize::sanitize_filename_for_linux;

/// Query parameter carrying the time-limited access credential.
pub const SIGNED_TOKEN_PARAM: &str = "__gda__";

/// Fallback name for a playlist URL whose path yields nothing usable.
const DEFAULT_PLAYLIST_FILENAME: &str = "playlist.m3u8";

/// Fallback name for a segment URL whose path yields nothing usable.
const DEFAULT_SEGMENT_FILENAME: &str = "segment.bin";

/// The playlist URL could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid URL {url:?}")]
pub struct UrlError {
    pub url: String,
    #[source]
    pub source: url::ParseError,
}

fn parse(raw: &str) -> Result<url::Url, UrlError> {
    url::Url::parse(raw).map_err(|source| UrlError {
        url: raw.to_string(),
        source,
    })
}

/// Playlist URL minus its final path segment; always ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional `__gda__` credential, appended verbatim to every segment URL of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedToken(Option<String>);

impl SignedToken {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        SignedToken((!value.is_empty()).then_some(value))
    }

    pub fn none() -> Self {
        SignedToken(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn value(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// `?__gda__=<value>`, or the empty string when there is no token.
    pub fn suffix(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => write!(f, "?{}={}", SIGNED_TOKEN_PARAM, v),
            None => Ok(()),
        }
    }
}

/// Derives the base URL used to resolve relative segment references.
///
/// Keeps scheme, userinfo, host and port, and every path segment except the
/// last: `https://cdn.example.com/a/b/playlist.m3u8?x=y` → `https://cdn.example.com/a/b/`.
pub fn derive_base_url(playlist_url: &str) -> Result<BaseUrl, UrlError> {
    let parsed = parse(playlist_url)?;
    let origin = &parsed[..url::Position::BeforePath];
    let path = parsed.path();
    let dir = match path.rfind('/') {
        Some(i) => &path[..=i],
        None => "/",
    };
    Ok(BaseUrl(format!("{}{}", origin, dir)))
}

/// Extracts the signed-access token from the playlist URL's query string.
///
/// Blank `__gda__` values are ignored and the first non-blank one wins; with
/// none, the run is unsigned.
pub fn extract_signed_token(playlist_url: &str) -> Result<SignedToken, UrlError> {
    let parsed = parse(playlist_url)?;
    let token = parsed
        .query_pairs()
        .find(|(k, v)| k == SIGNED_TOKEN_PARAM && !v.is_empty())
        .map(|(_, v)| SignedToken::new(v.into_owned()))
        .unwrap_or_default();
    Ok(token)
}

/// Local filename for the downloaded playlist copy.
pub fn playlist_filename(url: &str) -> String {
    filename_or(url, DEFAULT_PLAYLIST_FILENAME)
}

/// Local filename for a downloaded segment. The muxer manifest uses the same rule.
pub fn segment_filename(url: &str) -> String {
    filename_or(url, DEFAULT_SEGMENT_FILENAME)
}

fn filename_or(url: &str, fallback: &str) -> String {
    filename_from_url(url)
        .map(|raw| sanitize_filename_for_linux(&raw))
        .filter(|s| !s.is_empty() && s != "." && s != "..")
        .unwrap_or_else(|| fallback.to_string())
}
