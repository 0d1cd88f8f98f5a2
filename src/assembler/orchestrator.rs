// src/assembler/orchestrator.rs
use super::classify::{Classification, classify, container_line, truncated_line};
use super::context::AssemblyContext;
use super::cursor::Cursor;
use super::photo::{PreparedImage, prepare_image};
use super::traversal::{Traversal, VisitKind};
use super::wrap::break_lines;
use crate::error::{AssemblyError, ItemError, SkippedField};
use estimate_render_core::{
    Block, ComposedPage, DocumentRenderer, EmbeddedPages, ImageBlock, LaidOutDocument, PageSlot,
    TextBlock,
};
use estimate_render_lopdf::{LopdfRenderer, text_width};
use estimate_traits::ExportError;
use estimate_types::{FormDataBag, FormValue, ResourceUri};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// A finished, written document.
#[derive(Debug, Clone)]
pub struct EncodedDocument {
    pub bytes: Vec<u8>,
    /// Where the PDF was written.
    pub path: PathBuf,
    pub page_count: usize,
    /// Attachments that could not be embedded, in traversal order.
    pub skipped: Vec<SkippedField>,
}

/// The result of laying out a page, before encoding.
#[derive(Debug, Clone)]
pub struct LayoutOutcome {
    pub document: LaidOutDocument,
    pub skipped: Vec<SkippedField>,
}

/// Turns one page of form data into a paginated PDF.
///
/// The assembler itself is immutable and cheap to clone; every call to
/// [`Assembler::assemble`] owns its own cursor and in-progress document, so
/// concurrent calls do not interfere.
#[derive(Debug, Clone)]
pub struct Assembler {
    context: Arc<AssemblyContext>,
}

impl Assembler {
    pub(crate) fn new(context: AssemblyContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }

    pub fn context(&self) -> &AssemblyContext {
        &self.context
    }

    /// Lays out `page_key`, encodes it, writes it to the output directory and
    /// hands the file to the export sink.
    ///
    /// When the sink cannot present documents the call fails with
    /// [`AssemblyError::ExportUnavailable`], but the file has been written.
    pub async fn assemble(
        &self,
        page_key: &str,
        form_data: &FormDataBag,
    ) -> Result<EncodedDocument, AssemblyError> {
        let start = Instant::now();
        let LayoutOutcome { document, skipped } = self.layout(page_key, form_data).await?;
        let page_count = document.page_count();

        let assembler = self.clone();
        let title = page_key.to_string();
        let bytes = tokio::task::spawn_blocking(move || assembler.encode(&document, &title))
            .await
            .map_err(|e| AssemblyError::EncodingFailed(format!("encoder task failed: {}", e)))??;

        let path = self.write_output(page_key, &bytes).await?;
        log::info!(
            "Assembled '{}' into {} ({} pages, {} bytes, {} skipped) in {:.2?}",
            page_key,
            path.display(),
            page_count,
            bytes.len(),
            skipped.len(),
            start.elapsed()
        );

        self.hand_off(&path).await?;

        Ok(EncodedDocument {
            bytes,
            path,
            page_count,
            skipped,
        })
    }

    /// Paginates `page_key` without encoding or writing anything.
    ///
    /// Referenced images and documents are still loaded, since their sizes
    /// and page counts drive pagination.
    pub async fn layout(
        &self,
        page_key: &str,
        form_data: &FormDataBag,
    ) -> Result<LayoutOutcome, AssemblyError> {
        let page = match form_data.get(page_key) {
            Some(value) if !value.is_null() => value,
            _ => return Err(AssemblyError::NoDataForPage(page_key.to_string())),
        };
        let config = &self.context.config;

        let cursor = Cursor::new(config.geometry(), config.line_height);
        let mut state = LayoutState::new(cursor, config.font_size);
        for visit in Traversal::new(page_key, page, config.max_depth) {
            match visit.kind {
                VisitKind::Container(value) => {
                    state.push_text(container_line(visit.label, value))
                }
                VisitKind::Truncated => state.push_text(truncated_line(visit.label)),
                VisitKind::Leaf(value) => {
                    self.place_leaf(&mut state, visit.label, &visit.path, value)
                        .await
                }
            }
        }

        let outcome = state.finish();
        log::debug!(
            "Laid out '{}': {} pages in {} slots",
            page_key,
            outcome.document.page_count(),
            outcome.document.slots.len()
        );
        Ok(outcome)
    }

    /// Serializes a laid-out document to PDF bytes.
    pub fn encode(
        &self,
        document: &LaidOutDocument,
        title: &str,
    ) -> Result<Vec<u8>, AssemblyError> {
        let config = &self.context.config;
        let mut renderer = Box::new(LopdfRenderer::new().with_title(title));
        renderer
            .render(document, config.geometry().size)
            .map_err(|e| AssemblyError::EncodingFailed(e.to_string()))?;
        log::debug!("Encoded {} pages", renderer.page_count());
        renderer
            .finish()
            .map_err(|e| AssemblyError::EncodingFailed(e.to_string()))
    }

    async fn place_leaf(
        &self,
        state: &mut LayoutState,
        label: &str,
        path: &str,
        value: &FormValue,
    ) {
        match classify(label, value) {
            Classification::Text(line) => state.push_text(line),
            Classification::Image(uri) => match self.load_image(&uri).await {
                Ok(prepared) => state.push_image(prepared),
                Err(reason) => state.skip(path, &uri, reason),
            },
            Classification::Document(uri) => match self.load_document(&uri).await {
                Ok(embedded) => state.push_document(embedded),
                Err(reason) => state.skip(path, &uri, reason),
            },
        }
    }

    async fn load_image(&self, uri: &ResourceUri) -> Result<PreparedImage, ItemError> {
        let provider = Arc::clone(&self.context.resource_provider);
        let config = Arc::clone(&self.context.config);
        let uri = uri.clone();
        tokio::task::spawn_blocking(move || {
            let bytes = provider.load(uri.as_str())?;
            prepare_image(&bytes, config.max_image_dimension, config.jpeg_quality())
        })
        .await?
    }

    async fn load_document(&self, uri: &ResourceUri) -> Result<EmbeddedPages, ItemError> {
        let provider = Arc::clone(&self.context.resource_provider);
        let uri = uri.clone();
        tokio::task::spawn_blocking(move || {
            let bytes = provider.load(uri.as_str())?;
            let document =
                lopdf::Document::load_mem(&bytes).map_err(|e| ItemError::Pdf(e.to_string()))?;
            // Encoding repeats this import; anything it rejects is skipped here.
            let page_count = estimate_pdf_composer::check_importable(&document)
                .map_err(|e| ItemError::Pdf(e.to_string()))?;
            Ok(EmbeddedPages {
                source_uri: uri.as_str().to_string(),
                document: Arc::new(document),
                page_count,
            })
        })
        .await?
    }

    /// Writes `bytes` to a fresh, uniquely named file in the output directory.
    async fn write_output(&self, page_key: &str, bytes: &[u8]) -> Result<PathBuf, AssemblyError> {
        let dir = self.context.config.output_dir();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            AssemblyError::EncodingFailed(format!("cannot create {}: {}", dir.display(), e))
        })?;

        let prefix = output_prefix(page_key);
        let path = tokio::task::spawn_blocking(move || reserve_output_path(&dir, &prefix))
            .await
            .map_err(|e| AssemblyError::EncodingFailed(format!("writer task failed: {}", e)))??;

        tokio::fs::write(&path, bytes).await.map_err(|e| {
            AssemblyError::EncodingFailed(format!("cannot write {}: {}", path.display(), e))
        })?;
        Ok(path)
    }

    async fn hand_off(&self, path: &Path) -> Result<(), AssemblyError> {
        let sink = Arc::clone(&self.context.export_sink);
        if !sink.is_available() {
            log::warn!(
                "Export sink '{}' is unavailable; leaving {}",
                sink.name(),
                path.display()
            );
            return Err(AssemblyError::ExportUnavailable {
                path: path.to_path_buf(),
            });
        }

        let owned = path.to_path_buf();
        let result = tokio::task::spawn_blocking(move || sink.export(&owned))
            .await
            .map_err(|e| AssemblyError::EncodingFailed(format!("export task failed: {}", e)))?;
        match result {
            Ok(()) => Ok(()),
            Err(ExportError::Unavailable) => Err(AssemblyError::ExportUnavailable {
                path: path.to_path_buf(),
            }),
            Err(e) => Err(AssemblyError::EncodingFailed(e.to_string())),
        }
    }
}

/// `<slug>-<timestamp>-`; the random part and extension are added on creation.
fn output_prefix(page_key: &str) -> String {
    let slug = slug::slugify(page_key);
    let slug = if slug.is_empty() {
        "estimate".to_string()
    } else {
        slug
    };
    format!("{}-{}-", slug, chrono::Local::now().format("%Y%m%d-%H%M%S"))
}

fn reserve_output_path(dir: &Path, prefix: &str) -> Result<PathBuf, AssemblyError> {
    let file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".pdf")
        .tempfile_in(dir)
        .map_err(|e| AssemblyError::EncodingFailed(format!("cannot create output file: {}", e)))?;
    let (_, path) = file
        .keep()
        .map_err(|e| AssemblyError::EncodingFailed(format!("cannot keep output file: {}", e)))?;
    Ok(path)
}

/// Pages and skipped items accumulated during one layout run.
struct LayoutState {
    cursor: Cursor,
    font_size: f32,
    slots: Vec<PageSlot>,
    current: ComposedPage,
    skipped: Vec<SkippedField>,
}

impl LayoutState {
    fn new(cursor: Cursor, font_size: f32) -> Self {
        Self {
            cursor,
            font_size,
            slots: Vec::new(),
            current: ComposedPage::default(),
            skipped: Vec::new(),
        }
    }

    /// Places `text` as one or more lines, wrapped to the drawable width.
    fn push_text(&mut self, text: String) {
        let max_width = self.cursor.area().width;
        for line in break_lines(&text, max_width, self.font_size) {
            if !self.cursor.fits(self.cursor.line_height()) {
                self.break_page();
            }
            let y = self.cursor.place_line();
            self.place(Block::Text(TextBlock {
                x: self.cursor.left(),
                y,
                width: text_width(&line, self.font_size),
                text: line,
                font_size: self.font_size,
            }));
        }
    }

    fn push_image(&mut self, prepared: PreparedImage) {
        let size = prepared.size;
        if !self.cursor.fits(size.height) {
            self.break_page();
        }
        let y = self.cursor.place_block(size.height);
        self.place(Block::Image(ImageBlock {
            x: self.cursor.left(),
            y,
            width: size.width,
            height: size.height,
            image: prepared.image,
        }));
    }

    fn place(&mut self, block: Block) {
        // Only a glyph wider than the whole drawable width can get here.
        if !self.cursor.area().contains(&block.bounds()) {
            log::warn!("Block at {:?} crosses the page margins", block.bounds());
        }
        self.current.blocks.push(block);
    }

    /// Splices an attached document after the current page. Content that
    /// follows starts on a fresh page.
    fn push_document(&mut self, embedded: EmbeddedPages) {
        log::debug!(
            "Embedding {} pages from {}",
            embedded.page_count,
            embedded.source_uri
        );
        self.flush_page();
        self.slots.push(PageSlot::Embedded(embedded));
        self.cursor.new_page();
    }

    fn skip(&mut self, path: &str, uri: &ResourceUri, reason: ItemError) {
        log::warn!("Skipping field '{}' ({}): {}", path, uri, reason);
        self.skipped.push(SkippedField {
            path: path.to_string(),
            uri: uri.as_str().to_string(),
            reason,
        });
    }

    fn break_page(&mut self) {
        self.flush_page();
        self.cursor.new_page();
    }

    fn flush_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        if !page.is_empty() {
            self.slots.push(PageSlot::Composed(page));
        }
    }

    fn finish(mut self) -> LayoutOutcome {
        self.flush_page();
        if self.slots.is_empty() {
            self.slots.push(PageSlot::Composed(ComposedPage::default()));
        }
        LayoutOutcome {
            document: LaidOutDocument { slots: self.slots },
            skipped: self.skipped,
        }
    }
}
