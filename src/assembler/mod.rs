//! The document assembler: form data in, paginated PDF out.
//!
//! A page's fields are walked depth-first; scalars become text lines wrapped
//! to the drawable width, photos are scaled and placed inline, attached PDFs
//! are spliced in whole.
//! A [`Cursor`] tracks the write position and breaks pages before anything
//! would cross the bottom margin.

mod builder;
mod classify;
mod config;
mod context;
mod cursor;
mod photo;
mod orchestrator;
mod traversal;
mod wrap;

pub use builder::AssemblerBuilder;
pub use classify::{Classification, classify, kind_from_uri};
pub use config::AssemblerConfig;
pub use context::AssemblyContext;
pub use cursor::Cursor;
pub use photo::{PreparedImage, prepare_image};
pub use orchestrator::{Assembler, EncodedDocument, LayoutOutcome};
pub use traversal::{LIST_ITEM_LABEL, Traversal, Visit, VisitKind};
pub use wrap::break_lines;
