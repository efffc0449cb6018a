use crate::units::*;

/// A rectangle on a raster page, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the top-left corner.
    pub x1: Px,
    /// The y-coordinate of the top-left corner.
    pub y1: Px,
    /// The x-coordinate of the bottom-right corner.
    pub x2: Px,
    /// The y-coordinate of the bottom-right corner.
    pub y2: Px,
}

impl Rect {
    /// Create a rectangle from its top-left corner and its size
    pub fn from_xywh(x: Px, y: Px, width: Px, height: Px) -> Rect {
        Rect {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> Px {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Px {
        self.y2 - self.y1
    }

    /// Convert to a rasterizer rectangle. Returns [None] for empty or inverted rectangles
    pub(crate) fn to_skia(self) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_ltrb(self.x1.0, self.y1.0, self.x2.0, self.y2.0)
    }
}
