//! PDF backend for estimate documents using lopdf.
//!
//! The whole document is built in memory: estimates are a handful of pages,
//! and attached PDFs have to be parsed whole to copy their pages anyway.

mod metrics;
mod renderer;
mod text;

pub use metrics::text_width;
pub use renderer::LopdfRenderer;
pub use text::encode_win_ansi;
