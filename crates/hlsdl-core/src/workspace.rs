//! Working/output directory housekeeping: collision-free output names and
//! segment cleanup after a successful combine.

use std::fs;
use std::io;
use std::path::Path;

/// Returns `desired` if `<output_folder>/<desired>` is free, otherwise the first
/// free `<base>_N<ext>` for N = 1, 2, ….
///
/// The extension split follows the usual rule: last `.` of the final path
/// component, ignoring leading dots (`.hidden` has no extension).
pub fn ensure_unique_name(output_folder: &Path, desired: &str) -> String {
    if !output_folder.join(desired).exists() {
        return desired.to_string();
    }
    let (base, ext) = split_extension(desired);
    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{}_{}{}", base, counter, ext);
        if !output_folder.join(&candidate).exists() {
            tracing::info!("{} exists, using {}", desired, candidate);
            return candidate;
        }
        counter += 1;
    }
}

fn split_extension(name: &str) -> (&str, &str) {
    let stem_start = name.rfind('/').map_or(0, |i| i + 1);
    match name.rfind('.') {
        Some(dot) if dot > stem_start && name[stem_start..dot].chars().any(|c| c != '.') => {
            name.split_at(dot)
        }
        _ => (name, ""),
    }
}

/// Deletes every regular file in `folder` whose name ends with `extension`.
/// Returns how many were removed. Other files are left untouched.
pub fn cleanup_segments(folder: &Path, extension: &str) -> io::Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(extension) {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    tracing::info!(
        "removed {} {} file(s) from {}",
        removed,
        extension,
        folder.display()
    );
    Ok(removed)
}
