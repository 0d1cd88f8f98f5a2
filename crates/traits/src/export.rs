//! The hand-off point for a finished document.
//!
//! On a device this is the platform share sheet; elsewhere it may copy the file
//! somewhere or do nothing at all.

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Sharing is not available on this platform")]
    Unavailable,

    #[error("Export of '{path}' failed: {message}")]
    Failed { path: PathBuf, message: String },

    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),
}

/// A platform capability that offers a finished document to the user.
pub trait ExportSink: Send + Sync + Debug {
    /// Whether the sink can present the document at all.
    fn is_available(&self) -> bool;

    /// Offers the document at `path` to the user. The sink does not take
    /// ownership of the file; it may copy it.
    fn export(&self, path: &Path) -> Result<(), ExportError>;

    fn name(&self) -> &'static str;
}

/// A sink that records every exported path. It can be built unavailable to
/// model platforms without a share action.
#[derive(Debug)]
pub struct RecordingExportSink {
    available: bool,
    exported: Mutex<Vec<PathBuf>>,
}

impl RecordingExportSink {
    pub fn new() -> Self {
        Self {
            available: true,
            exported: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            exported: Mutex::new(Vec::new()),
        }
    }

    /// Paths exported so far, oldest first.
    pub fn exported(&self) -> Vec<PathBuf> {
        self.exported
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }
}

impl Default for RecordingExportSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportSink for RecordingExportSink {
    fn is_available(&self) -> bool {
        self.available
    }

    fn export(&self, path: &Path) -> Result<(), ExportError> {
        if !self.available {
            return Err(ExportError::Unavailable);
        }
        let mut exported = self.exported.lock().map_err(|_| ExportError::Failed {
            path: path.to_path_buf(),
            message: "export log lock poisoned".to_string(),
        })?;
        log::debug!("Recorded export of {}", path.display());
        exported.push(path.to_path_buf());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RecordingExportSink"
    }
}
