//! Assembles the pages of an estimate into PDF documents.
//!
//! Form data is a bag of pages, each page a bag of fields. [`Assembler`]
//! lays one page out as text lines, scaled photos and spliced-in PDF
//! attachments, encodes it with lopdf and hands the file to an
//! [`ExportSink`].
//!
//! ```ignore
//! let store = FormStore::from_file("estimate.json")?;
//! let assembler = AssemblerBuilder::new().with_output_dir("out").build()?;
//! let document = assembler.assemble("Inspection", store.as_bag()).await?;
//! println!("{} pages at {}", document.page_count, document.path.display());
//! ```

pub mod assembler;
pub mod error;
pub mod export;
pub mod store;

pub use assembler::{
    Assembler, AssemblerBuilder, AssemblerConfig, EncodedDocument, LayoutOutcome,
};
pub use error::{AssemblyError, ItemError, SkippedField, StoreError};
pub use export::{DirectoryExportSink, RetainExportSink};
pub use store::FormStore;

pub use estimate_render_core::{Block, LaidOutDocument, PageSlot};
pub use estimate_resource::FilesystemResourceProvider;
pub use estimate_traits::{
    ExportError, ExportSink, InMemoryResourceProvider, RecordingExportSink, ResourceError,
    ResourceProvider,
};
pub use estimate_types::{ContentKind, FormDataBag, FormValue, PageKey, ResourceUri};
