pub mod export;
pub mod resource;

pub use export::{ExportError, ExportSink, RecordingExportSink};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
