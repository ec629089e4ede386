//! Hands the sanitized preview to the system browser.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempPath;

use super::ExportError;

const PAGE_STYLE: &str = "body{max-width:880px;margin:2rem auto;padding:0 1rem;\
font-family:-apple-system,Segoe UI,Helvetica,Arial,sans-serif;line-height:1.5}\
pre{background:#f6f8fa;padding:1rem;overflow:auto}\
table{border-collapse:collapse}td,th{border:1px solid #d0d7de;padding:4px 12px}\
img{max-width:100%}";

/// Standalone HTML page around already-sanitized `body_html`.
pub fn build_page(body_html: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
<style>{PAGE_STYLE}</style>\n</head>\n<body>\n<article>\n{body_html}\n</article>\n</body>\n</html>\n",
        ammonia::clean_text(title)
    )
}

/// Write the page to a temporary file and open it in the default browser.
///
/// The returned path deletes the file when dropped; keep it for as long as
/// the browser may still read it.
///
/// # Errors
///
/// [`ExportError::EmptyBuffer`] when there is nothing to show,
/// [`ExportError::Io`] when the page cannot be written and
/// [`ExportError::Launch`] when no browser could be started.
pub fn open_in_browser(body_html: &str, title: &str) -> Result<TempPath, ExportError> {
    if body_html.is_empty() {
        return Err(ExportError::EmptyBuffer);
    }

    let mut page = tempfile::Builder::new()
        .prefix("readme-studio-")
        .suffix(".html")
        .tempfile()
        .map_err(|source| ExportError::Io {
            path: std::env::temp_dir(),
            source,
        })?;
    let path = page.path().to_path_buf();
    page.write_all(build_page(body_html, title).as_bytes())
        .and_then(|()| page.flush())
        .map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

    let page = page.into_temp_path();
    launch(&page).map_err(ExportError::Launch)?;
    tracing::info!(path = %path.display(), "opened preview in browser");
    Ok(page)
}

fn launch(path: &Path) -> std::io::Result<()> {
    run_launcher(launcher(path))
}

fn launcher(path: &Path) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut command = Command::new("open");
        command.arg(path);
        command
    }
    #[cfg(target_os = "windows")]
    {
        let mut command = Command::new("cmd");
        command.arg("/C").arg("start").arg("").arg(path);
        command
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}

/// Run the opener and treat a non-zero exit (no handler registered, no
/// display) as a failure.
fn run_launcher(mut command: Command) -> std::io::Result<()> {
    let status = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!(
            "{} exited with {status}",
            command.get_program().to_string_lossy()
        )))
    }
}
