use crate::error::RenderError;
use crate::types::LaidOutDocument;
use estimate_types::Size;

/// A trait for document renderers, abstracting the PDF-writing primitives.
///
/// A renderer is used once: `render` then `finish`.
pub trait DocumentRenderer {
    /// Encodes every page slot of `document`, in order.
    fn render(&mut self, document: &LaidOutDocument, page_size: Size) -> Result<(), RenderError>;

    /// Number of pages written so far.
    fn page_count(&self) -> usize;

    /// Serializes the document and returns its bytes.
    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError>;
}
