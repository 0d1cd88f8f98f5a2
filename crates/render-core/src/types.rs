use estimate_types::Rect;
use std::sync::Arc;

/// A JPEG ready to be embedded as an image XObject.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub jpeg: Vec<u8>,
}

/// A single line of text. `y` is the baseline in PDF user space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub x: f32,
    pub y: f32,
    /// Measured advance width of `text` at `font_size`.
    pub width: f32,
    pub text: String,
    pub font_size: f32,
}

/// An image placed with its bottom-left corner at (`x`, `y`).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub image: Arc<EncodedImage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text(TextBlock),
    Image(ImageBlock),
}

impl Block {
    /// The area the block was placed into. Text occupies its baseline, from
    /// the origin to the end of the measured advance.
    pub fn bounds(&self) -> Rect {
        match self {
            Block::Text(text) => Rect::new(text.x, text.y, text.width, 0.0),
            Block::Image(image) => Rect::new(image.x, image.y, image.width, image.height),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Block::Text(text) => Some(&text.text),
            Block::Image(_) => None,
        }
    }
}

/// A page produced by the assembler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposedPage {
    pub blocks: Vec<Block>,
}

impl ComposedPage {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(Block::as_text)
    }
}

/// All pages of an attached PDF, spliced in at this position.
#[derive(Debug, Clone)]
pub struct EmbeddedPages {
    /// Where the document came from, for logs.
    pub source_uri: String,
    pub document: Arc<lopdf::Document>,
    pub page_count: usize,
}

#[derive(Debug, Clone)]
pub enum PageSlot {
    Composed(ComposedPage),
    Embedded(EmbeddedPages),
}

/// The paginated document before encoding.
#[derive(Debug, Clone, Default)]
pub struct LaidOutDocument {
    pub slots: Vec<PageSlot>,
}

impl LaidOutDocument {
    /// Total pages, counting every page of embedded documents.
    pub fn page_count(&self) -> usize {
        self.slots
            .iter()
            .map(|slot| match slot {
                PageSlot::Composed(_) => 1,
                PageSlot::Embedded(embedded) => embedded.page_count,
            })
            .sum()
    }

    pub fn composed_pages(&self) -> impl Iterator<Item = &ComposedPage> {
        self.slots.iter().filter_map(|slot| match slot {
            PageSlot::Composed(page) => Some(page),
            PageSlot::Embedded(_) => None,
        })
    }

    /// Every text line in document order.
    pub fn text_lines(&self) -> Vec<&str> {
        self.composed_pages()
            .flat_map(ComposedPage::text_lines)
            .collect()
    }
}
