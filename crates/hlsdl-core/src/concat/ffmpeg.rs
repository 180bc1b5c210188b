//! ffmpeg concat demuxer with stream copy (no re-encode).

use super::{CombineError, Muxer};
use crate::config::MuxerConfig;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Runs `ffmpeg -f concat -safe 0 -i <manifest> -c copy <output>`.
///
/// Never passes `-y`: the output name is made unique beforehand, and an
/// existing file must not be clobbered.
#[derive(Debug, Clone)]
pub struct FfmpegMuxer {
    program: PathBuf,
    log_level: String,
}

impl FfmpegMuxer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            log_level: MuxerConfig::default().log_level,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, manifest: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-hide_banner", "-nostdin", "-loglevel"])
            .arg(&self.log_level)
            .args(["-f", "concat", "-safe", "0", "-i"])
            .arg(manifest)
            .args(["-c", "copy"])
            .arg(output)
            .stdin(Stdio::null());
        cmd
    }
}

impl From<&MuxerConfig> for FfmpegMuxer {
    fn from(cfg: &MuxerConfig) -> Self {
        Self {
            program: cfg.program.clone(),
            log_level: cfg.log_level.clone(),
        }
    }
}

impl Default for FfmpegMuxer {
    fn default() -> Self {
        FfmpegMuxer::from(&MuxerConfig::default())
    }
}

impl Muxer for FfmpegMuxer {
    fn combine(&self, manifest: &Path, output: &Path) -> Result<(), CombineError> {
        let mut cmd = self.command(manifest, output);
        tracing::debug!("running {:?}", cmd);
        let status = cmd.status().map_err(|source| CombineError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        if status.success() {
            Ok(())
        } else {
            tracing::error!("{} failed: {}", self.program.display(), status);
            Err(CombineError::Failed {
                code: status.code(),
            })
        }
    }
}
