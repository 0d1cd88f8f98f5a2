use estimate_types::{PageGeometry, Rect};

/// Vertical write position on the current page.
///
/// The offset is measured from the bottom of the page in PDF user space and
/// moves down as content is placed. Nothing is ever placed below the bottom
/// margin: callers ask [`Cursor::fits`] first and start a new page when it
/// returns `false`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    geometry: PageGeometry,
    line_height: f32,
    page_number: usize,
    offset: f32,
}

impl Cursor {
    pub fn new(geometry: PageGeometry, line_height: f32) -> Self {
        Self {
            geometry,
            line_height,
            page_number: 1,
            offset: geometry.top_offset(),
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// 1-based number of the page being written. Embedded pages are not counted.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn left(&self) -> f32 {
        self.geometry.margin
    }

    /// The region inside the margins that every block must stay within.
    pub fn area(&self) -> Rect {
        self.geometry.drawable_area()
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Whether `height` more points fit above the bottom margin.
    pub fn fits(&self, height: f32) -> bool {
        self.offset - height >= self.geometry.margin
    }

    /// True until something has been placed on the current page.
    pub fn at_page_top(&self) -> bool {
        self.offset == self.geometry.top_offset()
    }

    pub fn new_page(&mut self) {
        self.page_number += 1;
        self.offset = self.geometry.top_offset();
        log::debug!("Starting page {} at offset {}", self.page_number, self.offset);
    }

    /// Reserves one text line. Returns the baseline to draw at.
    pub fn place_line(&mut self) -> f32 {
        let baseline = self.offset;
        self.offset -= self.line_height;
        baseline
    }

    /// Reserves a block of `height` plus one line of spacing below it.
    /// Returns the y of the block's bottom edge.
    pub fn place_block(&mut self, height: f32) -> f32 {
        let bottom = self.offset - height;
        self.offset = bottom - self.line_height;
        bottom
    }
}
