use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Mutex;

use tracing::{info, warn};

use crate::error::{IdentifierError, Result};
use crate::export::test_code::TestDialect;
use crate::trace::trace::timestamp_ms;

// ============================================================================
// File export
// ============================================================================

/// Attempts at a fresh file name before giving up.
const MAX_EXPORT_ATTEMPTS: usize = 100;

/// Write generated test code into `dir` as `<stem>_<timestamp><suffix>`.
///
/// Never overwrites: when that name is taken (two exports in the same
/// millisecond) a counter is added, `<stem>_<timestamp>_1<suffix>` and so
/// on. Returns `None` (after a warning) when the directory cannot be
/// created, the content is empty, or the write fails. Callers must not
/// assume success.
pub fn export_to_file(dir: &Path, content: &str, dialect: TestDialect) -> Option<PathBuf> {
    if content.trim().is_empty() {
        warn!("refusing to export empty test code");
        return None;
    }
    let stamp = timestamp_ms();
    let names = (0..MAX_EXPORT_ATTEMPTS).map(|attempt| match attempt {
        0 => format!("{}_{}{}", dialect.file_stem(), stamp, dialect.file_suffix()),
        n => format!("{}_{}_{}{}", dialect.file_stem(), stamp, n, dialect.file_suffix()),
    });
    finish_export(try_write_new(dir, names, content))
}

/// Same as [`export_to_file`] with a caller-chosen file name, replacing any
/// file already there.
pub fn export_to_named_file(dir: &Path, file_name: &str, content: &str) -> Option<PathBuf> {
    if content.trim().is_empty() {
        warn!("refusing to export empty test code");
        return None;
    }
    finish_export(try_write(dir, file_name, content))
}

fn finish_export(result: Result<PathBuf>) -> Option<PathBuf> {
    match result {
        Ok(path) => {
            info!(path = %path.display(), "exported UI test code");
            Some(path)
        }
        Err(e) => {
            warn!(error = %e, "UI test code export failed");
            None
        }
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .map_err(|e| IdentifierError::io(format!("creating {}", dir.display()), e))
}

fn try_write(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    create_dir(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, content)
        .map_err(|e| IdentifierError::io(format!("writing {}", path.display()), e))?;
    Ok(path)
}

/// Write into the first candidate name that does not exist yet.
fn try_write_new(
    dir: &Path,
    names: impl IntoIterator<Item = String>,
    content: &str,
) -> Result<PathBuf> {
    create_dir(dir)?;
    for name in names {
        let path = dir.join(name);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(IdentifierError::io(format!("creating {}", path.display()), e)),
        };
        file.write_all(content.as_bytes())
            .map_err(|e| IdentifierError::io(format!("writing {}", path.display()), e))?;
        return Ok(path);
    }
    Err(IdentifierError::io(
        format!("exporting into {}", dir.display()),
        std::io::Error::new(ErrorKind::AlreadyExists, "no free export file name"),
    ))
}

// ============================================================================
// Clipboard export
// ============================================================================

/// Destination for copied text.
pub trait ClipboardSink {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// System clipboard through the platform's command-line helper
/// (`pbcopy`, `wl-copy`, `xclip`, `clip`), tried in order.
#[derive(Debug, Clone, Default)]
pub struct SystemClipboard;

const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("clip", &[]),
];

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut last_error = String::from("no clipboard helper found");
        for (program, args) in CLIPBOARD_COMMANDS {
            match pipe_to(program, args, text) {
                Ok(()) => return Ok(()),
                Err(e) => last_error = e,
            }
        }
        Err(IdentifierError::Clipboard(last_error))
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> std::result::Result<(), String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| format!("failed to spawn {}: {}", program, e))?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| format!("failed to write to {}: {}", program, e))?;
    }
    // Close stdin so the helper sees EOF.
    drop(child.stdin.take());

    let status = child
        .wait()
        .map_err(|e| format!("failed to wait for {}: {}", program, e))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("{} exited with {}", program, status))
    }
}

/// Clipboard held in memory, for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut guard = self.contents.lock().map_err(|_| IdentifierError::LockPoisoned)?;
        *guard = Some(text.to_string());
        Ok(())
    }
}

/// Copy `text` to `sink`. Returns whether it worked; failures only warn.
pub fn copy_to_clipboard(sink: &dyn ClipboardSink, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    match sink.set_text(text) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "clipboard export failed");
            false
        }
    }
}
