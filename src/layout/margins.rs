use crate::units::Px;

/// Blank space kept free around the edges of a page. Column geometry is derived from
/// the left and right margins; the bottom margin marks where content is considered to
/// overflow the page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: Px,
    pub right: Px,
    pub bottom: Px,
    pub left: Px,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Px, right: Px, bottom: Px, left: Px) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Px>>(value: D) -> Margins {
        let value: Px = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Px, horizontal: Px) -> Margins {
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Width left between the left and right margins of a page
    pub fn content_width(&self, page_width: Px) -> Px {
        page_width - self.left - self.right
    }
}
