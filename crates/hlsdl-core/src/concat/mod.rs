//! Joining downloaded segments into one output file.
//!
//! Lossless concatenation is delegated to an external muxer behind the narrow
//! [`Muxer`] trait. [`FfmpegMuxer`] drives ffmpeg's concat demuxer with
//! stream copy; tests plug in their own implementation.

mod ffmpeg;
mod manifest;

pub use ffmpeg::FfmpegMuxer;
pub use manifest::{build_file_manifest, manifest_line};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Muxer failure. The exit status is always checked.
#[derive(Debug, thiserror::Error)]
pub enum CombineError {
    /// The muxer process could not be started (e.g. ffmpeg not installed).
    #[error("could not run {}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The muxer ran and reported failure.
    #[error("muxer exited with {}", exit_description(.code))]
    Failed { code: Option<i32> },
    /// Preparing the output location failed.
    #[error("could not create output directory")]
    OutputDir(#[from] io::Error),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

/// Joins the segments listed in a concat manifest into `output`.
pub trait Muxer {
    fn combine(&self, manifest: &Path, output: &Path) -> Result<(), CombineError>;
}

impl<M: Muxer + ?Sized> Muxer for &M {
    fn combine(&self, manifest: &Path, output: &Path) -> Result<(), CombineError> {
        (**self).combine(manifest, output)
    }
}

impl<M: Muxer + ?Sized> Muxer for Box<M> {
    fn combine(&self, manifest: &Path, output: &Path) -> Result<(), CombineError> {
        (**self).combine(manifest, output)
    }
}

/// Creates the output directory, then hands `manifest_path` to `muxer`.
pub fn combine_segments(
    manifest_path: &Path,
    output_path: &Path,
    muxer: &dyn Muxer,
) -> Result<(), CombineError> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    tracing::info!(
        "combining segments from {} into {}",
        manifest_path.display(),
        output_path.display()
    );
    muxer.combine(manifest_path, output_path)?;
    tracing::info!("combined segments into {}", output_path.display());
    Ok(())
}
