//! Fetch error type shared by the playlist and segment downloads.

use std::io;

/// Error returned by a single HTTP GET (transport failure, HTTP error, or local write failure).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, DNS, etc.).
    #[error(transparent)]
    Transport(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {status}")]
    Http { status: u32 },
    /// Disk write failed (e.g. disk full, permission denied).
    #[error("storage write failed")]
    Storage(#[from] io::Error),
}

impl FetchError {
    /// HTTP status for `Http` errors.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Message including the underlying cause, for logs and progress lines.
    pub fn describe(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(inner) = source {
            out.push_str(": ");
            out.push_str(&inner.to_string());
            source = inner.source();
        }
        out
    }
}
