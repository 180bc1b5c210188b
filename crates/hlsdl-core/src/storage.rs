//! Segment file lifecycle: stream into `<name>.<index>.part`, then atomically
//! rename to the final name once the transfer succeeded.
//!
//! The staging name carries the segment index: two playlist entries can map
//! to the same local name, and concurrent workers must never share a file.
//!
//! A failed transfer never leaves a file under the final name, so a partial
//! segment can't end up in the muxer manifest or survive as a "complete" one.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const PART_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.<index>.part` to the final path
/// (e.g. `seg1.ts`, index 4 → `seg1.ts.4.part`).
pub fn part_path(final_path: &Path, index: usize) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(format!(".{}{}", index, PART_SUFFIX));
    PathBuf::from(o)
}

/// An in-progress download target. Writes go to the `.part` file.
pub struct PartFile {
    file: File,
    part_path: PathBuf,
    final_path: PathBuf,
}

impl PartFile {
    /// Create (or truncate) `<final_path>.<index>.part`.
    pub fn create(final_path: &Path, index: usize) -> io::Result<Self> {
        let part_path = part_path(final_path, index);
        let file = File::create(&part_path)?;
        Ok(PartFile {
            file,
            part_path,
            final_path: final_path.to_path_buf(),
        })
    }

    pub fn part_path(&self) -> &Path {
        &self.part_path
    }

    /// Flush and rename to the final path. Consumes the handle and closes the file.
    pub fn finalize(mut self) -> io::Result<PathBuf> {
        self.file.flush()?;
        drop(self.file);
        std::fs::rename(&self.part_path, &self.final_path)?;
        Ok(self.final_path)
    }

    /// Close and remove the `.part` file.
    pub fn discard(self) {
        drop(self.file);
        if let Err(e) = std::fs::remove_file(&self.part_path) {
            tracing::debug!("could not remove {}: {}", self.part_path.display(), e);
        }
    }
}

impl Write for PartFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
