//! Interactive input when `get` is run without a URL.

use anyhow::{bail, Context, Result};
use hlsdl_core::DownloadRequest;
use std::io::{BufRead, Write};

const URL_PROMPT: &str = "Enter the .m3u8 URL: ";
const NAME_PROMPT: &str = "Enter output file name (with extension, e.g., video.mp4): ";

/// Asks for the playlist URL and, unless `output_name` is already known, the
/// output filename. A blank filename keeps the configured default.
pub fn read_request<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
    output_name: Option<String>,
) -> Result<DownloadRequest> {
    let url = ask(&mut input, &mut out, URL_PROMPT)?;
    if url.is_empty() {
        bail!("no playlist URL given");
    }
    let name = match output_name {
        Some(name) => name,
        None => ask(&mut input, &mut out, NAME_PROMPT)?,
    };
    Ok(DownloadRequest::new(url).with_output_name(name))
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<String> {
    out.write_all(question.as_bytes())?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("read from stdin")?;
    Ok(line.trim().to_string())
}
