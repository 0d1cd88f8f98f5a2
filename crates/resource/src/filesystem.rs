//! Filesystem-based resource provider.
//!
//! Attachments are referenced as `file://` URIs written by the device's camera
//! and document picker, or as paths relative to the form file.
//!
//! # Security
//!
//! A confined provider only serves files below its base directory. Both
//! absolute `file://` paths and relative paths are canonicalized and checked,
//! so `../../../etc/passwd` and `file:///etc/passwd` are refused.

use estimate_traits::{ResourceError, ResourceProvider, SharedResourceData};
use estimate_types::ResourceUri;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonicalized base path for confinement checks
    canonical_base: Option<PathBuf>,
    confined: bool,
}

impl FilesystemResourceProvider {
    /// A provider that resolves relative paths against `base_path` and refuses
    /// anything outside it.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // May fail if the directory doesn't exist yet
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
            confined: true,
        }
    }

    /// A provider that serves any readable `file://` URI. Relative paths are
    /// resolved against `base_path`.
    pub fn unconfined<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            confined: false,
            ..Self::new(base_path)
        }
    }

    /// Maps a URI or relative path to a file path, enforcing confinement.
    fn resolve(&self, uri: &str) -> Result<PathBuf, ResourceError> {
        let resource_uri = ResourceUri::new(uri);
        let candidate = if resource_uri.is_local_file() {
            resource_uri
                .local_path()
                .map(PathBuf::from)
                .ok_or_else(|| ResourceError::NotFound(uri.to_string()))?
        } else if uri.contains("://") {
            return Err(ResourceError::UnsupportedScheme(uri.to_string()));
        } else {
            let relative = Path::new(uri);
            if relative.is_absolute() {
                // Bare absolute paths must be spelled as file:// URIs.
                return Err(ResourceError::NotFound(format!(
                    "{} (absolute paths must use the file:// scheme)",
                    uri
                )));
            }
            self.base_path.join(relative)
        };

        if !self.confined {
            return Ok(candidate);
        }

        if let Ok(canonical) = candidate.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            if canonical.starts_with(base) {
                return Ok(canonical);
            }
            log::warn!("Refusing '{}': outside {}", uri, base.display());
            return Err(ResourceError::NotFound(format!("{} (outside base path)", uri)));
        }

        // Nothing to canonicalize; reject obvious traversal and let the read fail.
        if candidate
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            return Err(ResourceError::NotFound(format!(
                "{} (path traversal blocked)",
                uri
            )));
        }
        if candidate.is_absolute() && !candidate.starts_with(&self.base_path) {
            return Err(ResourceError::NotFound(format!("{} (outside base path)", uri)));
        }
        Ok(candidate)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, uri: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self.resolve(uri)?;
        log::debug!("Reading {} for '{}'", full_path.display(), uri);

        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(uri.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: uri.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, uri: &str) -> bool {
        self.resolve(uri).map(|p| p.is_file()).unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
