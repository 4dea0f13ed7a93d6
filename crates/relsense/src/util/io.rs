//! I/O utility functions

use std::fs;
use std::io;
use std::path::Path;

/// Write bytes to a file atomically using write-then-rename pattern.
///
/// The content is first written to a sibling temporary file, then renamed
/// over the target, so an interrupted export never leaves a half-written
/// table behind. Missing parent directories are created.
///
/// # Example
/// ```ignore
/// atomic_write(Path::new("outputs/tri_sensitivity.csv"), &csv_bytes)?;
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;

    Ok(())
}
