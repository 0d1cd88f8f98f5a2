pub mod fixtures;
pub mod pdf_assertions;

use estimate_pdf::{
    Assembler, AssemblerBuilder, AssemblyError, EncodedDocument, ExportSink,
    InMemoryResourceProvider, RecordingExportSink,
};
use estimate_pdf::{FormDataBag, LayoutOutcome};
use lopdf::Document as LopdfDocument;
use std::sync::Arc;
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of one page, 1-based.
    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// An assembler wired to in-memory resources, a recording sink and a
/// private output directory.
pub struct Harness {
    pub assembler: Assembler,
    pub resources: Arc<InMemoryResourceProvider>,
    pub sink: Arc<RecordingExportSink>,
    pub output_dir: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_sink(RecordingExportSink::new())
    }

    pub fn with_sink(sink: RecordingExportSink) -> Self {
        Self::configured(sink, |builder| builder)
    }

    pub fn configured(
        sink: RecordingExportSink,
        configure: impl FnOnce(AssemblerBuilder) -> AssemblerBuilder,
    ) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let resources = Arc::new(InMemoryResourceProvider::new());
        let sink = Arc::new(sink);
        let output_dir = tempfile::tempdir().expect("temp dir");
        let builder = AssemblerBuilder::new()
            .with_resource_provider(resources.clone())
            .with_export_sink(sink.clone() as Arc<dyn ExportSink>)
            .with_output_dir(output_dir.path());
        let assembler = configure(builder).build().expect("valid assembler");

        Self {
            assembler,
            resources,
            sink,
            output_dir,
        }
    }

    pub fn add_resource(&self, uri: &str, bytes: Vec<u8>) {
        self.resources.add(uri, bytes).expect("resource added");
    }

    pub fn assemble(
        &self,
        page_key: &str,
        form: &FormDataBag,
    ) -> Result<EncodedDocument, AssemblyError> {
        tokio::runtime::Runtime::new()
            .expect("runtime")
            .block_on(self.assembler.assemble(page_key, form))
    }

    #[allow(dead_code)]
    pub fn layout(
        &self,
        page_key: &str,
        form: &FormDataBag,
    ) -> Result<LayoutOutcome, AssemblyError> {
        tokio::runtime::Runtime::new()
            .expect("runtime")
            .block_on(self.assembler.layout(page_key, form))
    }

    /// Files currently in the output directory.
    pub fn output_files(&self) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(self.output_dir.path())
            .map(|entries| entries.filter_map(|e| e.ok().map(|e| e.path())).collect())
            .unwrap_or_default()
    }
}
