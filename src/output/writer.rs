use crate::output::sanitize_filename;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Writes extracted page text to `<dir>/<name>.txt`
///
/// The text is written to a temporary `.part` file in the same directory
/// and renamed into place, so a write failure never leaves a truncated
/// output file. If a file with the target name already exists, a numeric
/// suffix is appended (`name (2).txt`, `name (3).txt`, ...) rather than
/// overwriting a previously saved page.
///
/// # Arguments
///
/// * `dir` - The output directory (created if missing)
/// * `name` - The already-sanitized filename stem
/// * `text` - The cleaned page text
///
/// # Returns
///
/// The path the text was written to.
pub fn write_page_text(dir: &Path, name: &str, text: &str) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let target = next_free_path(dir, name);
    let partial = target.with_extension("txt.part");

    let write_result = fs::write(&partial, text).and_then(|_| fs::rename(&partial, &target));
    if write_result.is_err() {
        let _ = fs::remove_file(&partial);
    }
    write_result?;

    Ok(target)
}

/// Finds the first non-existing `<name>.txt` path, suffixing on collision
fn next_free_path(dir: &Path, name: &str) -> PathBuf {
    let first = dir.join(format!("{}.txt", name));
    if !first.exists() {
        return first;
    }

    let mut counter = 2;
    loop {
        let candidate = dir.join(format!("{} ({}).txt", name, counter));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Derives a destination filename for a downloaded artifact
///
/// Uses the last non-empty path segment of the URL; when the path has no
/// usable segment (e.g. a bare host), falls back to the whole URL string.
/// Either way the result passes through the filename sanitizer.
pub fn download_filename(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .map(|s| s.to_string());

    let raw = match segment {
        Some(s) => match url.query() {
            // Keep the query so distinct document requests get distinct files.
            Some(q) => format!("{} {}", s, q),
            None => s,
        },
        None => url.as_str().to_string(),
    };

    sanitize_filename(&raw)
}
