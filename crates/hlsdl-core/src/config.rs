use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// HTTP transfer parameters (optional `[http]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Abort a transfer whose throughput stays below this many bytes/s...
    pub low_speed_limit_bytes: u32,
    /// ...for this many seconds.
    pub low_speed_time_secs: u64,
    /// Hard cap on a single transfer, in seconds.
    pub timeout_secs: u64,
    /// Receive buffer size; segment bodies reach disk in chunks of at most this many bytes.
    pub buffer_size: usize,
    /// Optional User-Agent header (None = libcurl default, which sends none).
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            timeout_secs: 3600,
            buffer_size: 8192,
            user_agent: None,
        }
    }
}

/// External muxer invocation (optional `[muxer]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuxerConfig {
    /// ffmpeg executable; looked up on PATH when not absolute.
    pub program: PathBuf,
    /// Value passed to ffmpeg's `-loglevel`.
    pub log_level: String,
}

impl Default for MuxerConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            log_level: "error".to_string(),
        }
    }
}

/// What a run does when some segments could not be downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentFailurePolicy {
    /// Log the failure, leave a gap, and combine what was downloaded.
    #[default]
    Skip,
    /// Stop before combining if any segment failed.
    Abort,
}

/// Global configuration loaded from `~/.config/hlsdl/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HlsdlConfig {
    /// Working folder for the playlist copy, segments and manifests.
    pub temp_dir: PathBuf,
    /// Folder receiving the combined output file.
    pub output_dir: PathBuf,
    /// Output name used when the user gives none.
    pub default_output_name: String,
    /// Files in `temp_dir` with this suffix are removed after a successful combine.
    pub segment_extension: String,
    /// Name of the resolved segment URL list written next to the playlist copy.
    pub url_list_name: String,
    /// Name of the ffmpeg concat manifest.
    pub file_list_name: String,
    /// Segment downloads in flight at once; 1 keeps the download strictly sequential.
    pub max_concurrent_segments: usize,
    pub segment_failure_policy: SegmentFailurePolicy,
    /// Leave segment files in `temp_dir` after a successful combine.
    pub keep_segments: bool,
    pub http: HttpConfig,
    pub muxer: MuxerConfig,
}

impl Default for HlsdlConfig {
    fn default() -> Self {
        Self {
            temp_dir: PathBuf::from("temp_files"),
            output_dir: PathBuf::from("output_video"),
            default_output_name: "combined_video.mp4".to_string(),
            segment_extension: ".ts".to_string(),
            url_list_name: "ts_urls_list.txt".to_string(),
            file_list_name: "file_list.txt".to_string(),
            max_concurrent_segments: 1,
            segment_failure_policy: SegmentFailurePolicy::Skip,
            keep_segments: false,
            http: HttpConfig::default(),
            muxer: MuxerConfig::default(),
        }
    }
}

impl HlsdlConfig {
    pub fn url_list_path(&self) -> PathBuf {
        self.temp_dir.join(&self.url_list_name)
    }

    pub fn file_list_path(&self) -> PathBuf {
        self.temp_dir.join(&self.file_list_name)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hlsdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HlsdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HlsdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit path. Missing keys take their defaults.
pub fn load_from_path(path: &Path) -> Result<HlsdlConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: HlsdlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
