use crate::text::encode_win_ansi;
use estimate_pdf_composer::import_pages;
use estimate_render_core::{
    Block, ComposedPage, DocumentRenderer, EmbeddedPages, EncodedImage, ImageBlock,
    LaidOutDocument, PageSlot, RenderError, TextBlock,
};
use estimate_types::Size;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

const FONT_RESOURCE: &str = "F1";

/// An in-memory PDF renderer using the `lopdf` library.
/// It builds the document's object graph and serializes it on `finish`.
pub struct LopdfRenderer {
    document: Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    page_ids: Vec<ObjectId>,
    /// Image XObjects already written, keyed by the shared image they came from.
    image_xobjects: HashMap<usize, ObjectId>,
    title: Option<String>,
}

impl LopdfRenderer {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });

        Self {
            document,
            pages_id,
            font_id,
            page_ids: Vec::new(),
            image_xobjects: HashMap::new(),
            title: None,
        }
    }

    /// Sets the document title written to the Info dictionary.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn render_composed(&mut self, page: &ComposedPage, page_size: Size) -> Result<(), RenderError> {
        let mut page_ctx = PageContext::new(self);
        for block in &page.blocks {
            page_ctx.draw_block(block);
        }
        let (content, xobjects) = page_ctx.finish();

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&content.encode()?)?;
        let compressed_content = encoder.finish()?;
        let content_stream =
            Stream::new(dictionary! {"Filter" => "FlateDecode"}, compressed_content);
        let content_id = self.document.add_object(content_stream);

        let mut resources = dictionary! {
            "Font" => dictionary! { FONT_RESOURCE => self.font_id },
        };
        if !xobjects.is_empty() {
            resources.set("XObject", Object::Dictionary(xobjects));
        }

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_size.width.into(), page_size.height.into()],
            "Contents" => content_id,
            "Resources" => resources,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        Ok(())
    }

    fn render_embedded(&mut self, embedded: &EmbeddedPages) -> Result<(), RenderError> {
        let imported = import_pages(&mut self.document, &embedded.document, self.pages_id)
            .map_err(|e| RenderError::Import(format!("{}: {}", embedded.source_uri, e)))?;
        log::debug!(
            "Spliced {} page(s) from {} after page {}",
            imported.len(),
            embedded.source_uri,
            self.page_ids.len()
        );
        self.page_ids.extend(imported);
        Ok(())
    }

    /// Writes the image as a DCT-encoded XObject once and returns its ID.
    fn image_xobject(&mut self, image: &Arc<EncodedImage>) -> ObjectId {
        let key = Arc::as_ptr(image) as usize;
        if let Some(id) = self.image_xobjects.get(&key) {
            return *id;
        }
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.pixel_width as i64,
                "Height" => image.pixel_height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            image.jpeg.clone(),
        )
        // JPEG data is already compressed; keep lopdf from deflating it again.
        .with_compression(false);
        let id = self.document.add_object(stream);
        self.image_xobjects.insert(key, id);
        id
    }
}

impl Default for LopdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer for LopdfRenderer {
    fn render(&mut self, document: &LaidOutDocument, page_size: Size) -> Result<(), RenderError> {
        for slot in &document.slots {
            match slot {
                PageSlot::Composed(page) => self.render_composed(page, page_size)?,
                PageSlot::Embedded(embedded) => self.render_embedded(embedded)?,
            }
        }
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn finish(mut self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        if self.page_ids.is_empty() {
            return Err(RenderError::Other("Document has no pages".into()));
        }

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self
            .document
            .add_object(dictionary! { "Type" => "Catalog", "Pages" => self.pages_id });
        self.document.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => Object::string_literal("estimate-pdf"),
        };
        if let Some(title) = &self.title {
            info.set(
                "Title",
                Object::String(encode_win_ansi(title), StringFormat::Literal),
            );
        }
        let info_id = self.document.add_object(info);
        self.document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Accumulates the content stream and XObject names of one page.
struct PageContext<'a> {
    renderer: &'a mut LopdfRenderer,
    content: Content,
    xobjects: Dictionary,
}

impl<'a> PageContext<'a> {
    fn new(renderer: &'a mut LopdfRenderer) -> Self {
        Self {
            renderer,
            content: Content { operations: vec![] },
            xobjects: Dictionary::new(),
        }
    }

    fn finish(self) -> (Content, Dictionary) {
        (self.content, self.xobjects)
    }

    fn draw_block(&mut self, block: &Block) {
        match block {
            Block::Text(text) => self.draw_text(text),
            Block::Image(image) => self.draw_image(image),
        }
    }

    fn draw_text(&mut self, text: &TextBlock) {
        if text.text.trim().is_empty() {
            return;
        }
        let ops = &mut self.content.operations;
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec![FONT_RESOURCE.into(), text.font_size.into()]));
        ops.push(Operation::new("Td", vec![text.x.into(), text.y.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&text.text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    fn draw_image(&mut self, image: &ImageBlock) {
        let xobject_id = self.renderer.image_xobject(&image.image);
        let name = format!("Im{}", xobject_id.0);
        self.xobjects.set(name.as_bytes(), xobject_id);

        let ops = &mut self.content.operations;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                image.width.into(),
                0.into(),
                0.into(),
                image.height.into(),
                image.x.into(),
                image.y.into(),
            ],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        ops.push(Operation::new("Q", vec![]));
    }
}
