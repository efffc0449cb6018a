use super::margins::Margins;
use crate::{units::Px, ReportError};

/// How many columns a page is split into
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ColumnCount {
    Single,
    Double,
}

impl ColumnCount {
    pub fn count(self) -> usize {
        match self {
            ColumnCount::Single => 1,
            ColumnCount::Double => 2,
        }
    }

    pub fn from_count(count: usize) -> Result<ColumnCount, ReportError> {
        match count {
            1 => Ok(ColumnCount::Single),
            2 => Ok(ColumnCount::Double),
            n => Err(ReportError::InvalidConfig(format!(
                "pages have 1 or 2 columns, not {n}"
            ))),
        }
    }
}

/// Where the right column of a two-column page starts.
///
/// Each kind of page picks one of these explicitly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RightColumnStart {
    /// Both columns start at the top of the content area
    #[default]
    Top,
    /// The right column starts where the left column's cursor is once the left column's
    /// opening block (usually a heading) has been drawn; see
    /// [ColumnLayout::end_left_block]
    AfterLeftBlock,
}

/// A vertical strip of a page with its own cursor. The cursor only ever moves down.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    x: Px,
    width: Px,
    cursor: Px,
}

impl Column {
    pub fn new(x: Px, width: Px, y_start: Px) -> Column {
        Column {
            x,
            width,
            cursor: y_start,
        }
    }

    pub fn x(&self) -> Px {
        self.x
    }

    pub fn width(&self) -> Px {
        self.width
    }

    /// Where the next element in this column is drawn
    pub fn cursor(&self) -> Px {
        self.cursor
    }

    /// Move the cursor down to `y`. Positions above the cursor are ignored.
    pub fn advance_to(&mut self, y: Px) {
        if y > self.cursor {
            self.cursor = y;
        }
    }

    /// Move the cursor down by `dy`; negative distances are ignored
    pub fn advance_by(&mut self, dy: Px) {
        self.advance_to(self.cursor + dy);
    }
}

/// Splits a page into one or two [Column]s.
///
/// A single column spans the page between the left and right margins. Two columns
/// share the page width equally: the left one starts at the left margin, the right one
/// `gutter` pixels past the page's midline, and each is `page_width / 2 - margin -
/// gutter` wide.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    columns: Vec<Column>,
    count: ColumnCount,
    right_start: RightColumnStart,
    bottom: Px,
}

impl ColumnLayout {
    pub fn new(
        page_width: Px,
        page_height: Px,
        count: ColumnCount,
        margins: &Margins,
        gutter: Px,
        y_start: Px,
    ) -> ColumnLayout {
        let columns = match count {
            ColumnCount::Single => vec![Column::new(
                margins.left,
                margins.content_width(page_width),
                y_start,
            )],
            ColumnCount::Double => {
                let half = page_width / 2.0;
                let width = half - margins.left - gutter;
                vec![
                    Column::new(margins.left, width, y_start),
                    Column::new(half + gutter, width, y_start),
                ]
            }
        };

        ColumnLayout {
            columns,
            count,
            right_start: RightColumnStart::default(),
            bottom: page_height - margins.bottom,
        }
    }

    pub fn with_right_start(mut self, policy: RightColumnStart) -> ColumnLayout {
        self.right_start = policy;
        self
    }

    /// Stop content at `bottom` instead of the bottom margin
    pub fn with_bottom(mut self, bottom: Px) -> ColumnLayout {
        self.bottom = bottom;
        self
    }

    pub fn count(&self) -> ColumnCount {
        self.count
    }

    pub fn right_start(&self) -> RightColumnStart {
        self.right_start
    }

    /// The lowest y-coordinate content may reach. Defaults to the bottom margin.
    pub fn bottom(&self) -> Px {
        self.bottom
    }

    pub fn column(&self, index: usize) -> Result<&Column, ReportError> {
        let count = self.columns.len();
        self.columns
            .get(index)
            .ok_or(ReportError::InvalidColumn { index, count })
    }

    pub fn column_mut(&mut self, index: usize) -> Result<&mut Column, ReportError> {
        let count = self.columns.len();
        self.columns
            .get_mut(index)
            .ok_or(ReportError::InvalidColumn { index, count })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Marks the end of the left column's opening block. Under
    /// [RightColumnStart::AfterLeftBlock] the right column moves down to the left
    /// column's cursor; under [RightColumnStart::Top] nothing changes.
    pub fn end_left_block(&mut self) {
        if self.right_start != RightColumnStart::AfterLeftBlock {
            return;
        }
        let left = self.columns[0].cursor();
        if let Some(right) = self.columns.get_mut(1) {
            right.advance_to(left);
        }
    }

    /// The furthest any column's cursor has moved down
    pub fn lowest_cursor(&self) -> Px {
        self.columns
            .iter()
            .map(Column::cursor)
            .fold(Px(f32::MIN), Px::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(count: ColumnCount) -> ColumnLayout {
        ColumnLayout::new(
            Px(1080.0),
            Px(1920.0),
            count,
            &Margins::all(Px(48.0)),
            Px(24.0),
            Px(280.0),
        )
    }

    #[test]
    fn two_column_geometry() {
        let layout = layout(ColumnCount::Double);
        let left = layout.column(0).unwrap();
        let right = layout.column(1).unwrap();
        assert_eq!((left.x(), left.width()), (Px(48.0), Px(468.0)));
        assert_eq!((right.x(), right.width()), (Px(564.0), Px(468.0)));
        assert_eq!(right.x() + right.width(), Px(1080.0 - 48.0));
        assert_eq!(left.cursor(), Px(280.0));
        assert_eq!(right.cursor(), Px(280.0));
        assert_eq!(layout.bottom(), Px(1872.0));
    }

    #[test]
    fn single_column_spans_the_content_width() {
        let layout = layout(ColumnCount::Single);
        let only = layout.column(0).unwrap();
        assert_eq!((only.x(), only.width()), (Px(48.0), Px(984.0)));
        assert!(matches!(
            layout.column(1),
            Err(ReportError::InvalidColumn { index: 1, count: 1 })
        ));
    }

    #[test]
    fn columns_have_independent_cursors() {
        let mut layout = layout(ColumnCount::Double);
        layout.column_mut(0).unwrap().advance_by(Px(500.0));
        assert_eq!(layout.column(0).unwrap().cursor(), Px(780.0));
        assert_eq!(layout.column(1).unwrap().cursor(), Px(280.0));
        layout.end_left_block();
        assert_eq!(layout.column(1).unwrap().cursor(), Px(280.0));
        assert_eq!(layout.lowest_cursor(), Px(780.0));
    }

    #[test]
    fn after_left_block_moves_the_right_column_down() {
        let mut layout =
            layout(ColumnCount::Double).with_right_start(RightColumnStart::AfterLeftBlock);
        layout.column_mut(0).unwrap().advance_by(Px(58.0));
        layout.end_left_block();
        assert_eq!(layout.column(1).unwrap().cursor(), Px(338.0));
    }

    #[test]
    fn bottom_can_be_raised_above_the_margin() {
        let layout = layout(ColumnCount::Single).with_bottom(Px(1810.0));
        assert_eq!(layout.bottom(), Px(1810.0));
        assert_eq!(layout.column(0).unwrap().cursor(), Px(280.0));
    }

    #[test]
    fn cursors_never_move_up() {
        let mut column = Column::new(Px(0.0), Px(100.0), Px(50.0));
        column.advance_to(Px(10.0));
        assert_eq!(column.cursor(), Px(50.0));
        column.advance_by(Px(-5.0));
        assert_eq!(column.cursor(), Px(50.0));
        column.advance_by(Px(5.0));
        assert_eq!(column.cursor(), Px(55.0));
    }

    #[test]
    fn column_count_from_number() {
        assert_eq!(ColumnCount::from_count(2).unwrap(), ColumnCount::Double);
        assert_eq!(ColumnCount::Double.count(), 2);
        assert!(ColumnCount::from_count(3).is_err());
    }
}
