use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::error::{IdentifierError, Result};
use crate::trace::trace::GenerationEvent;

/// JSONL file of generation events, one line per resolved element.
///
/// Opening reports its error to the caller. After that, a failed append is
/// logged at `warn` and the event is dropped; resolution carries on.
pub struct TraceLogger {
    sink: Option<TraceFile>,
}

struct TraceFile {
    path: PathBuf,
    file: Mutex<File>,
}

impl TraceLogger {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| IdentifierError::io(format!("opening trace {}", path.display()), e))?;
        Ok(Self {
            sink: Some(TraceFile {
                path,
                file: Mutex::new(file),
            }),
        })
    }

    /// A logger that drops every event.
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|s| s.path.as_path())
    }

    pub fn log(&self, event: &GenerationEvent) {
        let Some(sink) = &self.sink else {
            return;
        };
        if let Err(e) = sink.append(event) {
            warn!(path = %sink.path.display(), error = %e, "dropped trace event");
        }
    }
}

impl TraceFile {
    fn append(&self, event: &GenerationEvent) -> Result<()> {
        let mut line = serde_json::to_string(event)
            .map_err(|e| IdentifierError::json("serializing trace event", e))?;
        line.push('\n');

        let mut file = self.file.lock().map_err(|_| IdentifierError::LockPoisoned)?;
        file.write_all(line.as_bytes())
            .map_err(|e| IdentifierError::io(format!("writing {}", self.path.display()), e))
    }
}
