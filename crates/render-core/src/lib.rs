//! Core rendering abstractions for estimate PDFs.
//!
//! - `LaidOutDocument` and its blocks: the paginated output of the assembler,
//!   before encoding
//! - `DocumentRenderer`: the trait PDF backends implement
//! - `RenderError`

mod error;
mod traits;
mod types;

pub use error::RenderError;
pub use traits::DocumentRenderer;
pub use types::{
    Block, ComposedPage, EmbeddedPages, EncodedImage, ImageBlock, LaidOutDocument, PageSlot,
    TextBlock,
};
