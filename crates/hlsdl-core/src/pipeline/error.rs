use crate::concat::CombineError;
use crate::fetch::FetchError;
use crate::url_model::UrlError;
use std::io;
use std::path::PathBuf;

/// Why a run stopped. Individual segment failures only show up here when the
/// failure policy says to abort, or when nothing at all was downloaded.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),

    #[error("failed to download playlist {url}")]
    PlaylistFetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("failed to read playlist {}", .path.display())]
    PlaylistRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("playlist {url} lists no segments")]
    EmptyPlaylist { url: String },

    #[error("{failed} of {total} segment(s) failed to download")]
    SegmentsFailed { failed: usize, total: usize },

    #[error("none of the {total} segment(s) could be downloaded")]
    NoSegmentsDownloaded { total: usize },

    #[error("failed to combine segments into {}", .output.display())]
    Combine {
        output: PathBuf,
        #[source]
        source: CombineError,
    },

    #[error("working directory I/O failed")]
    Workspace(#[from] io::Error),
}
