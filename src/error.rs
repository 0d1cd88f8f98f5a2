// src/error.rs
use estimate_traits::ResourceError;
use estimate_types::FormError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that end an assembly run.
///
/// Only the page lookup and the encode/write/export stage produce these;
/// problems with individual attachments are reported as [`SkippedField`]s.
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("No form data for page '{0}'")]
    NoDataForPage(String),

    #[error("Failed to encode or write the document: {0}")]
    EncodingFailed(String),

    /// The document was generated and written, but the platform has no way to offer it.
    #[error("Sharing is not available; the document was saved to {}", path.display())]
    ExportUnavailable { path: PathBuf },

    #[error("Invalid assembler configuration: {0}")]
    Config(String),
}

/// Why a single image or attached document was left out.
#[derive(Error, Debug, Clone)]
pub enum ItemError {
    #[error("could not load: {0}")]
    Resource(#[from] ResourceError),

    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("could not read attached PDF: {0}")]
    Pdf(String),

    #[error("background task failed: {0}")]
    Join(String),
}

impl From<tokio::task::JoinError> for ItemError {
    fn from(err: tokio::task::JoinError) -> Self {
        ItemError::Join(err.to_string())
    }
}

/// A field whose referenced content could not be embedded.
#[derive(Debug, Clone)]
pub struct SkippedField {
    /// Dotted path of the field within the page, e.g. `Gutters[1].Photo`.
    pub path: String,
    pub uri: String,
    pub reason: ItemError,
}

/// Errors from loading or saving the form store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid form data: {0}")]
    Form(#[from] FormError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Page '{0}' holds a {1}, not a set of fields")]
    PageNotABag(String, &'static str),
}
