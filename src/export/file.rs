//! Markdown file export.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::ExportError;

const DEFAULT_NAME_BASE: &str = "profile";

/// `<base>-README.md`, with `profile` for a missing or blank base.
pub fn export_file_name(name_base: Option<&str>) -> String {
    let base = name_base
        .map(str::trim)
        .filter(|base| !base.is_empty())
        .unwrap_or(DEFAULT_NAME_BASE);
    let base: String = base
        .chars()
        .map(|ch| if matches!(ch, '/' | '\\') { '-' } else { ch })
        .collect();
    format!("{base}-README.md")
}

/// Write `text` byte-for-byte to `<out_dir>/<base>-README.md`.
///
/// The content goes to a temporary file in `out_dir` that is renamed into
/// place, so an existing export is never left half-written. The temporary
/// file is removed whenever the export fails.
///
/// # Errors
///
/// [`ExportError::EmptyBuffer`] when `text` is empty, [`ExportError::Io`] when
/// the file cannot be written.
pub fn download_as_file(
    text: &str,
    name_base: Option<&str>,
    out_dir: &Path,
) -> Result<PathBuf, ExportError> {
    if text.is_empty() {
        return Err(ExportError::EmptyBuffer);
    }

    let target = out_dir.join(export_file_name(name_base));
    let io_err = |source| ExportError::Io {
        path: target.clone(),
        source,
    };

    let mut staged = NamedTempFile::new_in(out_dir).map_err(io_err)?;
    staged.write_all(text.as_bytes()).map_err(io_err)?;
    staged.as_file().sync_all().map_err(io_err)?;
    staged
        .persist(&target)
        .map_err(|err| io_err(err.error))?;

    tracing::info!(path = %target.display(), bytes = text.len(), "exported markdown");
    Ok(target)
}
