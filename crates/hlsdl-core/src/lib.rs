pub mod config;
pub mod logging;

pub mod checksum;
pub mod concat;
pub mod downloader;
pub mod fetch;
pub mod pipeline;
pub mod playlist;
pub mod storage;
pub mod url_model;
pub mod workspace;

pub use pipeline::{run, DownloadRequest, PipelineError, RunSummary};
