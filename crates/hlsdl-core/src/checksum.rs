//! SHA-256 of a finished output file, computed after the run rather than
//! inline with the download.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// SHA-256 of everything `reader` yields, as lowercase hex. Reads in 64 KiB chunks.
pub fn sha256_reader<R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// SHA-256 of the file at `path`, as lowercase hex.
pub fn sha256_path(path: &Path) -> Result<String> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    sha256_reader(f).with_context(|| format!("read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_input() {
        assert_eq!(
            sha256_reader(std::io::empty()).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn file_with_known_content() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hello\n").unwrap();
        f.flush().unwrap();
        assert_eq!(
            sha256_path(f.path()).unwrap(),
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
    }

    #[test]
    fn larger_than_one_buffer() {
        let data: Vec<u8> = (0u8..=255).cycle().take(BUF_SIZE * 2 + 17).collect();
        let chunked = sha256_reader(&data[..]).unwrap();
        assert_eq!(chunked, hex::encode(Sha256::digest(&data)));
    }

    #[test]
    fn missing_file_names_path() {
        let err = sha256_path(Path::new("/nonexistent/hlsdl/out.mp4")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/hlsdl/out.mp4"));
    }
}
