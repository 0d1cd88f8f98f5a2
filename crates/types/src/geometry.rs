/// An axis-aligned rectangle in PDF user space (origin bottom-left).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        const EPSILON: f32 = 0.01;
        other.x + EPSILON >= self.x
            && other.y + EPSILON >= self.y
            && other.right() <= self.right() + EPSILON
            && other.top() <= self.top() + EPSILON
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// Scales the size down to fit a `max` x `max` box, keeping the aspect ratio.
    ///
    /// Sizes that already fit are returned unchanged; nothing is scaled up.
    pub fn fit_within(self, max: f32) -> Size {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Size::zero();
        }
        let scale = (max / self.width).min(max / self.height).min(1.0);
        Size {
            width: self.width * scale,
            height: self.height * scale,
        }
    }
}

/// ISO A4 at 72 units per inch.
pub const A4: Size = Size {
    width: 595.28,
    height: 841.89,
};

/// Page dimensions and the margin that bounds the drawable area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub size: Size,
    pub margin: f32,
}

impl PageGeometry {
    pub fn new(size: Size, margin: f32) -> Self {
        Self { size, margin }
    }

    /// The page minus the margin on all four sides.
    pub fn drawable_area(&self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            self.size.width - 2.0 * self.margin,
            self.size.height - 2.0 * self.margin,
        )
    }

    /// The vertical offset content starts at on a fresh page.
    pub fn top_offset(&self) -> f32 {
        self.size.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            size: A4,
            margin: 40.0,
        }
    }
}
