//! Media playlist parsing: segment URI lines → absolute segment URLs.
//!
//! Only URI lines matter for concatenation; every `#` line (tags such as
//! `#EXTINF`, `#EXT-X-ENDLIST`, and plain comments) is skipped.

use crate::url_model::{BaseUrl, SignedToken};
use std::fs;
use std::io;
use std::path::Path;

/// Marker that starts a tag or comment line.
const COMMENT_MARKER: char = '#';

const BOM: char = '\u{feff}';

/// Returns true if a trimmed line is a segment reference.
fn is_segment_line(line: &str) -> bool {
    !line.is_empty() && !line.starts_with(COMMENT_MARKER)
}

/// Resolves every segment line of `text`, preserving playlist order.
///
/// Each URL is `base_url + line + token suffix`, concatenated literally: a
/// line that is already absolute, or already carries a query string, is not
/// treated specially.
pub fn resolve_segment_urls(text: &str, base_url: &BaseUrl, token: &SignedToken) -> Vec<String> {
    let suffix = token.suffix();
    text.trim_start_matches(BOM)
        .lines()
        .map(str::trim)
        .filter(|line| is_segment_line(line))
        .map(|line| format!("{}{}{}", base_url, line, suffix))
        .collect()
}

/// Reads the local playlist copy, resolves its segment URLs, and writes them
/// one per line to `url_list_path`.
pub fn extract_segment_urls(
    playlist_path: &Path,
    base_url: &BaseUrl,
    token: &SignedToken,
    url_list_path: &Path,
) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(playlist_path)?;
    let urls = resolve_segment_urls(&text, base_url, token);

    let mut list = String::with_capacity(urls.iter().map(|u| u.len() + 1).sum());
    for url in &urls {
        list.push_str(url);
        list.push('\n');
    }
    fs::write(url_list_path, list)?;

    tracing::info!(
        "extracted {} segment URL(s) to {}",
        urls.len(),
        url_list_path.display()
    );
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url_model::derive_base_url;

    fn base(url: &str) -> BaseUrl {
        derive_base_url(url).unwrap()
    }

    #[test]
    fn skips_tags_and_blank_lines() {
        let text = "#EXTM3U\n#EXTINF:10,\nseg1.ts\n\n#EXTINF:10,\nseg2.ts\n#EXT-X-ENDLIST\n";
        let urls = resolve_segment_urls(text, &base("https://cdn/x/index.m3u8"), &SignedToken::none());
        assert_eq!(urls, vec!["https://cdn/x/seg1.ts", "https://cdn/x/seg2.ts"]);
    }

    #[test]
    fn preserves_source_order() {
        let text = "c.ts\na.ts\nb.ts\n";
        let urls = resolve_segment_urls(text, &base("https://cdn/v/p.m3u8"), &SignedToken::none());
        assert_eq!(
            urls,
            vec!["https://cdn/v/c.ts", "https://cdn/v/a.ts", "https://cdn/v/b.ts"]
        );
    }

    #[test]
    fn trims_whitespace_and_crlf() {
        let text = "#EXTM3U\r\n  seg1.ts  \r\n\t\r\n   # indented comment\r\nseg2.ts\r\n";
        let urls = resolve_segment_urls(text, &base("https://cdn/x/i.m3u8"), &SignedToken::none());
        assert_eq!(urls, vec!["https://cdn/x/seg1.ts", "https://cdn/x/seg2.ts"]);
    }

    #[test]
    fn leading_bom_is_not_a_segment() {
        let text = "\u{feff}#EXTM3U\nseg1.ts\n";
        let urls = resolve_segment_urls(text, &base("https://cdn/x/i.m3u8"), &SignedToken::none());
        assert_eq!(urls, vec!["https://cdn/x/seg1.ts"]);
    }

    #[test]
    fn token_appended_literally() {
        let token = SignedToken::new("abc");
        let text = "seg1.ts\nseg2.ts?part=2\n";
        let urls = resolve_segment_urls(text, &base("https://cdn/x/i.m3u8?__gda__=abc"), &token);
        assert_eq!(
            urls,
            vec![
                "https://cdn/x/seg1.ts?__gda__=abc",
                "https://cdn/x/seg2.ts?part=2?__gda__=abc",
            ]
        );
    }

    #[test]
    fn absolute_lines_are_concatenated_too() {
        let text = "https://other.example/seg1.ts\n";
        let urls = resolve_segment_urls(text, &base("https://cdn/x/i.m3u8"), &SignedToken::none());
        assert_eq!(urls, vec!["https://cdn/x/https://other.example/seg1.ts"]);
    }

    #[test]
    fn extract_writes_url_list() {
        let dir = tempfile::tempdir().unwrap();
        let playlist = dir.path().join("index.m3u8");
        fs::write(&playlist, "#EXTM3U\n#EXTINF:4.0,\na.ts\n#EXTINF:4.0,\nb.ts\n").unwrap();
        let list = dir.path().join("ts_urls_list.txt");

        let urls = extract_segment_urls(
            &playlist,
            &base("https://cdn/x/index.m3u8"),
            &SignedToken::new("t"),
            &list,
        )
        .unwrap();

        assert_eq!(urls.len(), 2);
        assert_eq!(
            fs::read_to_string(&list).unwrap(),
            "https://cdn/x/a.ts?__gda__=t\nhttps://cdn/x/b.ts?__gda__=t\n"
        );
    }

    #[test]
    fn extract_missing_playlist_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = extract_segment_urls(
            &dir.path().join("nope.m3u8"),
            &base("https://cdn/x/i.m3u8"),
            &SignedToken::none(),
            &dir.path().join("list.txt"),
        );
        assert!(res.is_err());
        assert!(!dir.path().join("list.txt").exists());
    }
}
