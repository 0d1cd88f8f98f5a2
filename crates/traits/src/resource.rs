//! ResourceProvider trait for abstracting resource loading.
//!
//! Form fields reference photos and attached PDFs by URI. This trait lets the
//! assembler fetch those bytes without being tied to filesystem access.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for resource loading operations.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Unsupported URI scheme: {0}")]
    UnsupportedScheme(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

/// A trait for loading the binary content behind a form reference.
///
/// # Implementations
///
/// - `FilesystemResourceProvider`: resolves `file://` URIs on the device (estimate-resource)
/// - `InMemoryResourceProvider`: loads from pre-populated memory
///
/// Loading is blocking; the assembler calls providers from tokio's blocking pool.
///
/// # Example
///
/// ```ignore
/// let provider = InMemoryResourceProvider::new();
/// provider.add("file:///photos/roof.jpg", jpeg_bytes)?;
/// let data = provider.load("file:///photos/roof.jpg")?;
/// ```
pub trait ResourceProvider: Send + Sync + Debug {
    /// Load a resource by its URI (or a path relative to the provider's base).
    fn load(&self, uri: &str) -> Result<SharedResourceData, ResourceError>;

    /// `true` if the resource exists and can be loaded.
    fn exists(&self, uri: &str) -> bool;

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory resource provider.
///
/// Resources are keyed by the exact URI the form will use and must be
/// pre-populated before use.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `uri`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, uri: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let uri = uri.into();
        let mut resources = self
            .resources
            .write()
            .map_err(|_| ResourceError::LoadFailed {
                path: uri.clone(),
                message: "resource store lock poisoned".to_string(),
            })?;
        resources.insert(uri, Arc::new(data));
        Ok(())
    }

    /// Number of stored resources; 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, uri: &str) -> Result<SharedResourceData, ResourceError> {
        let resources = self
            .resources
            .read()
            .map_err(|_| ResourceError::LoadFailed {
                path: uri.to_string(),
                message: "resource store lock poisoned".to_string(),
            })?;
        log::trace!("Loading '{}' from memory", uri);
        resources
            .get(uri)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(uri.to_string()))
    }

    fn exists(&self, uri: &str) -> bool {
        self.resources
            .read()
            .map(|r| r.contains_key(uri))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHOTO: &str = "file:///data/estimates/42/front.jpg";

    #[test]
    fn test_add_and_load_by_uri() {
        let provider = InMemoryResourceProvider::new();
        provider.add(PHOTO, vec![0xFF, 0xD8, 0xFF]).unwrap();

        let data = provider.load(PHOTO).unwrap();
        assert_eq!(&*data, &[0xFF, 0xD8, 0xFF]);
        assert!(provider.exists(PHOTO));
    }

    #[test]
    fn test_lookup_is_exact() {
        let provider = InMemoryResourceProvider::new();
        provider.add(PHOTO, vec![1]).unwrap();

        // A different case is a different URI.
        let result = provider.load("file:///data/estimates/42/FRONT.jpg");
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
        assert!(!provider.exists("front.jpg"));
    }

    #[test]
    fn test_overwrite_replaces_data() {
        let provider = InMemoryResourceProvider::new();
        provider.add(PHOTO, b"first".to_vec()).unwrap();
        provider.add(PHOTO, b"second".to_vec()).unwrap();

        assert_eq!(&*provider.load(PHOTO).unwrap(), b"second");
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_empty_provider() {
        let provider = InMemoryResourceProvider::new();
        assert!(provider.is_empty());
        assert_eq!(provider.name(), "InMemoryResourceProvider");
    }

    #[test]
    fn test_resource_error_display() {
        let err = ResourceError::LoadFailed {
            path: PHOTO.to_string(),
            message: "permission denied".to_string(),
        };
        assert!(err.to_string().contains(PHOTO));
        assert!(err.to_string().contains("permission denied"));

        let err = ResourceError::UnsupportedScheme("content://media/7".to_string());
        assert!(err.to_string().contains("content://media/7"));
    }

    #[test]
    fn test_resource_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let resource_err: ResourceError = io_err.into();
        assert!(matches!(resource_err, ResourceError::Io(_)));
    }
}
