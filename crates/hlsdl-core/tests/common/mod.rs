#![allow(dead_code)]

pub mod playlist_server;

use hlsdl_core::concat::{CombineError, Muxer};
use hlsdl_core::config::HlsdlConfig;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// Config whose working and output folders live under `root`.
pub fn config_in(root: &Path) -> HlsdlConfig {
    let mut cfg = HlsdlConfig {
        temp_dir: root.join("temp_files"),
        output_dir: root.join("output_video"),
        ..HlsdlConfig::default()
    };
    cfg.http.connect_timeout_secs = 5;
    cfg.http.timeout_secs = 30;
    cfg
}

/// Paths listed in an ffmpeg concat manifest, in order.
pub fn manifest_paths(manifest: &Path) -> Vec<PathBuf> {
    fs::read_to_string(manifest)
        .unwrap()
        .lines()
        .map(|line| {
            let quoted = line
                .strip_prefix("file '")
                .and_then(|s| s.strip_suffix('\''))
                .unwrap_or_else(|| panic!("bad manifest line: {line}"));
            PathBuf::from(quoted.replace(r"'\''", "'"))
        })
        .collect()
}

/// Stands in for ffmpeg: records each call and writes the byte-wise
/// concatenation of the listed files to the output.
#[derive(Default)]
pub struct RecordingMuxer {
    pub calls: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl RecordingMuxer {
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Muxer for RecordingMuxer {
    fn combine(&self, manifest: &Path, output: &Path) -> Result<(), CombineError> {
        self.calls
            .borrow_mut()
            .push((manifest.to_path_buf(), output.to_path_buf()));
        let mut joined = Vec::new();
        for path in manifest_paths(manifest) {
            joined.extend(fs::read(&path).map_err(CombineError::OutputDir)?);
        }
        fs::write(output, joined).map_err(CombineError::OutputDir)?;
        Ok(())
    }
}

/// Muxer that always reports a non-zero exit.
#[derive(Default)]
pub struct FailingMuxer {
    pub calls: RefCell<usize>,
}

impl Muxer for FailingMuxer {
    fn combine(&self, _manifest: &Path, _output: &Path) -> Result<(), CombineError> {
        *self.calls.borrow_mut() += 1;
        Err(CombineError::Failed { code: Some(1) })
    }
}

/// Names of the files directly inside `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
