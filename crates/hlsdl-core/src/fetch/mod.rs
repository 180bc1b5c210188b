//! HTTP GET over libcurl (the `curl` crate's easy interface).
//!
//! `get_bytes` buffers a whole response (the playlist); `get_to_writer`
//! streams a body straight to a sink (segments). Both follow redirects and
//! treat any non-2xx final status as a failure.

mod error;
mod playlist;

pub use error::FetchError;
pub use playlist::fetch_playlist;

use crate::config::HttpConfig;
use std::io::Write;
use std::time::Duration;

/// Transfer parameters applied to every GET of a run.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    pub timeout: Duration,
    pub buffer_size: usize,
    pub user_agent: Option<String>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        HttpOptions::from(&HttpConfig::default())
    }
}

impl From<&HttpConfig> for HttpOptions {
    fn from(cfg: &HttpConfig) -> Self {
        HttpOptions {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            low_speed_limit: cfg.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(cfg.low_speed_time_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            buffer_size: cfg.buffer_size,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

fn new_easy(url: &str, opts: &HttpOptions) -> Result<curl::easy::Easy, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    // Abort when throughput stays under low_speed_limit for low_speed_time.
    easy.low_speed_limit(opts.low_speed_limit)?;
    easy.low_speed_time(opts.low_speed_time)?;
    easy.timeout(opts.timeout)?;
    easy.buffer_size(opts.buffer_size)?;
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }
    Ok(easy)
}

fn check_status(easy: &mut curl::easy::Easy) -> Result<(), FetchError> {
    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(FetchError::Http { status });
    }
    Ok(())
}

/// Single non-streaming GET; returns the whole body.
pub fn get_bytes(url: &str, opts: &HttpOptions) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();
    let mut easy = new_easy(url, opts)?;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    check_status(&mut easy)?;
    Ok(body)
}

/// Streaming GET: each received chunk (at most `buffer_size` bytes) is written
/// to `sink` as it arrives. Returns the number of body bytes written.
///
/// The sink also receives the body of an error response; callers writing to
/// disk should stage into a temp file and drop it on `Err`.
pub fn get_to_writer<W: Write>(
    url: &str,
    opts: &HttpOptions,
    sink: &mut W,
) -> Result<u64, FetchError> {
    let mut written = 0u64;
    let mut write_error: Option<std::io::Error> = None;
    let mut easy = new_easy(url, opts)?;
    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match sink.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };
    if let Err(e) = performed {
        if e.is_write_error() {
            if let Some(io_err) = write_error.take() {
                return Err(FetchError::Storage(io_err));
            }
        }
        return Err(FetchError::Transport(e));
    }
    sink.flush()?;
    check_status(&mut easy)?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_from_config() {
        let cfg = HttpConfig {
            connect_timeout_secs: 5,
            user_agent: Some("hlsdl-test".to_string()),
            ..HttpConfig::default()
        };
        let opts = HttpOptions::from(&cfg);
        assert_eq!(opts.connect_timeout, Duration::from_secs(5));
        assert_eq!(opts.low_speed_limit, 1024);
        assert_eq!(opts.low_speed_time, Duration::from_secs(60));
        assert_eq!(opts.buffer_size, 8192);
        assert_eq!(opts.user_agent.as_deref(), Some("hlsdl-test"));
    }

    #[test]
    fn unreachable_host_is_transport_error() {
        // Port 9 on loopback (discard) is closed on any sane test machine.
        let opts = HttpOptions {
            connect_timeout: Duration::from_secs(2),
            ..HttpOptions::default()
        };
        let err = get_bytes("http://127.0.0.1:9/x.m3u8", &opts).unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
        assert_eq!(err.status(), None);
    }
}
