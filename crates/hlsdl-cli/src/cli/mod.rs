//! CLI for the hlsdl playlist downloader.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hlsdl_core::config::{self, HlsdlConfig, SegmentFailurePolicy};
use std::path::PathBuf;

use commands::{print_completions, print_man_page, run_checksum, run_get};

/// Top-level CLI for hlsdl.
#[derive(Debug, Parser)]
#[command(name = "hlsdl")]
#[command(about = "hlsdl: download an HLS playlist and combine its segments with ffmpeg", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every segment of a playlist and combine them into one file.
    Get(GetArgs),

    /// Compute SHA-256 of a file (e.g. a combined video).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

/// Options for `hlsdl get`. Anything left unset comes from config.toml.
#[derive(Debug, Args)]
pub struct GetArgs {
    /// Playlist (.m3u8) URL. Prompted for interactively when omitted.
    pub url: Option<String>,

    /// Output filename inside the output directory (default: combined_video.mp4).
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<String>,

    /// Working folder for the playlist copy and segments.
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Folder receiving the combined file.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Download up to N segments at once (default 1, strictly sequential).
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Stop before combining if any segment failed, instead of leaving a gap.
    #[arg(long)]
    pub abort_on_segment_failure: bool,

    /// Keep segment files after a successful combine.
    #[arg(long)]
    pub keep_segments: bool,

    /// ffmpeg executable to run.
    #[arg(long, value_name = "PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// Print the SHA-256 of the combined file when done.
    #[arg(long)]
    pub checksum: bool,
}

impl GetArgs {
    /// Layers the per-run flags over the loaded config.
    pub fn apply_to(&self, cfg: &mut HlsdlConfig) {
        if let Some(dir) = &self.temp_dir {
            cfg.temp_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(jobs) = self.jobs {
            cfg.max_concurrent_segments = jobs.max(1);
        }
        if self.abort_on_segment_failure {
            cfg.segment_failure_policy = SegmentFailurePolicy::Abort;
        }
        if self.keep_segments {
            cfg.keep_segments = true;
        }
        if let Some(program) = &self.ffmpeg {
            cfg.muxer.program = program.clone();
        }
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Get(args) => {
                let mut cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                args.apply_to(&mut cfg);
                run_get(args, cfg).await?;
            }
            CliCommand::Checksum { path } => run_checksum(&path).await?,
            CliCommand::Completions { shell } => print_completions(shell),
            CliCommand::Man => print_man_page()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
