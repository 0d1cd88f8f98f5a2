//! Export sinks for environments without a share sheet.

use estimate_traits::{ExportError, ExportSink};
use std::fs;
use std::path::{Path, PathBuf};

/// Copies each finished document into a target directory, keeping its file name.
#[derive(Debug, Clone)]
pub struct DirectoryExportSink {
    target_dir: PathBuf,
}

impl DirectoryExportSink {
    pub fn new<P: AsRef<Path>>(target_dir: P) -> Self {
        Self {
            target_dir: target_dir.as_ref().to_path_buf(),
        }
    }

    /// Where `path` ends up after export.
    pub fn destination_for(&self, path: &Path) -> Result<PathBuf, ExportError> {
        let file_name = path.file_name().ok_or_else(|| ExportError::Failed {
            path: path.to_path_buf(),
            message: "path has no file name".to_string(),
        })?;
        Ok(self.target_dir.join(file_name))
    }
}

impl ExportSink for DirectoryExportSink {
    fn is_available(&self) -> bool {
        true
    }

    fn export(&self, path: &Path) -> Result<(), ExportError> {
        let destination = self.destination_for(path)?;
        if destination == path {
            return Ok(());
        }
        fs::create_dir_all(&self.target_dir)?;
        fs::copy(path, &destination)?;
        log::info!("Exported {} to {}", path.display(), destination.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "DirectoryExportSink"
    }
}

/// Leaves the document where the assembler wrote it.
///
/// The default sink: callers read `EncodedDocument::path` themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetainExportSink;

impl ExportSink for RetainExportSink {
    fn is_available(&self) -> bool {
        true
    }

    fn export(&self, path: &Path) -> Result<(), ExportError> {
        log::debug!("Keeping {} in place", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RetainExportSink"
    }
}
