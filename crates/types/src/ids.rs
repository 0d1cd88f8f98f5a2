//! Newtype wrappers for resource URIs.
//!
//! Form fields reference binary content (photos, attached PDFs) by URI. The
//! wrapper keeps those strings apart from ordinary field text and knows how to
//! take them apart.

use percent_encoding::percent_decode_str;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// The scheme prefix of a reference to a file on the device.
pub const LOCAL_FILE_SCHEME: &str = "file://";

/// A URI pointing at binary content, e.g. `file:///photos/roof.jpg`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ResourceUri(Arc<str>);

impl ResourceUri {
    /// Creates a new ResourceUri from a string
    pub fn new(uri: impl Into<Arc<str>>) -> Self {
        Self(uri.into())
    }

    /// Returns the string representation of this resource URI
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the URI uses the local-file scheme (case-insensitive).
    pub fn is_local_file(&self) -> bool {
        self.0
            .get(..LOCAL_FILE_SCHEME.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(LOCAL_FILE_SCHEME))
    }

    /// The lowercased extension of the last path segment, without the dot.
    ///
    /// Query strings and fragments are not stripped; device URIs never carry them.
    pub fn extension(&self) -> Option<String> {
        let last_segment = self.0.rsplit('/').next()?;
        let (stem, ext) = last_segment.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// The path part of a local-file URI (`file:///a/b.jpg` -> `/a/b.jpg`).
    ///
    /// Percent escapes are decoded as UTF-8; malformed escapes stay literal
    /// and invalid byte sequences become U+FFFD. Returns `None` for URIs with any other scheme.
    pub fn local_path(&self) -> Option<String> {
        if !self.is_local_file() {
            return None;
        }
        let rest = &self.0[LOCAL_FILE_SCHEME.len()..];
        // `file://localhost/a` and `file:///a` both name `/a`.
        let path = rest.strip_prefix("localhost").unwrap_or(rest);
        Some(percent_decode_str(path).decode_utf8_lossy().into_owned())
    }
}

impl From<String> for ResourceUri {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for ResourceUri {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<Arc<str>> for ResourceUri {
    fn from(s: Arc<str>) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ResourceUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
