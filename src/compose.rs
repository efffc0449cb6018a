//! Composing whole pages: background, title, content, footer.
//!
//! A [PageComposer] owns everything that is the same on every page of a report. Each
//! page's content is drawn by a callback that receives a [LayoutContext]: the page's
//! canvas, its columns, and a [FieldPrinter] configured for the page's section.

use crate::{
    canvas::{Canvas, CanvasProvider},
    colour::{colours, Colour},
    font::{Font, TextMeasurer, TextStyle},
    image::RasterImage,
    layout::{
        draw_wrapped, Column, ColumnCount, ColumnLayout, FieldPrinter, Margins, PageGroup,
        PaginationPlan, RecordSlot, RightColumnStart,
    },
    page::{FinishedPage, Page},
    rect::Rect,
    units::Px,
    ReportError,
};
use id_arena::Id;
use log::{debug, warn};

/// Disclaimer printed at the bottom of every page unless replaced
pub const DEFAULT_FOOTER: &str =
    "Esta imagen es informativa. No constituye documento oficial. (SEEKER)";

/// Geometry, colours and text styles shared by every page of a report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportStyle {
    pub page_width: Px,
    pub page_height: Px,
    pub background: Colour,
    pub margins: Margins,
    /// Distance between the page's midline and the right column
    pub gutter: Px,
    /// Where content starts, below the title
    pub y_start: Px,
    /// Space taken by a heading before the fields under it
    pub heading_spacing: Px,
    pub line_height: Px,
    /// Space left under each field
    pub field_spacing: Px,
    /// Space left between two records of a list
    pub record_spacing: Px,
    pub title_position: (Px, Px),
    /// Distance from the bottom of the page to the footer line
    pub footer_offset: Px,
    pub footer_text: String,
    pub title: TextStyle,
    pub heading: TextStyle,
    pub record_title: TextStyle,
    pub label: TextStyle,
    pub data: TextStyle,
}

impl ReportStyle {
    /// The standard 1080x1920 report look, drawing labels with `bold` and everything
    /// else with `regular`
    pub fn new(regular: Id<Font>, bold: Id<Font>) -> ReportStyle {
        let white = colours::WHITE;
        ReportStyle {
            page_width: Px(1080.0),
            page_height: Px(1920.0),
            background: colours::DEEP_TEAL,
            margins: Margins::all(Px(48.0)),
            gutter: Px(24.0),
            y_start: Px(280.0),
            heading_spacing: Px(48.0),
            line_height: Px(36.0),
            field_spacing: Px(6.0),
            record_spacing: Px(16.0),
            title_position: (Px(48.0), Px(150.0)),
            footer_offset: Px(110.0),
            footer_text: DEFAULT_FOOTER.to_string(),
            title: TextStyle::new(regular, Px(64.0), white),
            heading: TextStyle::new(regular, Px(32.0), white),
            record_title: TextStyle::new(regular, Px(24.0), white),
            label: TextStyle::new(bold, Px(16.0), white),
            data: TextStyle::new(regular, Px(16.0), white),
        }
    }

    /// Set the page size, modifying `self`
    pub fn page_size(&mut self, width: Px, height: Px) -> &mut Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the background colour, modifying `self`
    pub fn background(&mut self, background: Colour) -> &mut Self {
        self.background = background;
        self
    }

    /// Set the footer disclaimer, modifying `self`
    pub fn footer<S: ToString>(&mut self, text: S) -> &mut Self {
        self.footer_text = text.to_string();
        self
    }

    /// Top of the footer line
    pub fn footer_y(&self) -> Px {
        self.page_height - self.footer_offset
    }

    /// How far a list section's heading moves the left column down
    pub fn section_heading_advance(&self) -> Px {
        self.heading_spacing + Px(10.0)
    }

    /// Lay out the columns a page of `config` starts with. Content ends at the footer
    /// line.
    pub fn column_layout(&self, config: &SectionConfig) -> ColumnLayout {
        ColumnLayout::new(
            self.page_width,
            self.page_height,
            config.columns,
            &self.margins,
            self.gutter,
            config.y_start.unwrap_or(self.y_start),
        )
        .with_right_start(config.right_column_start)
        .with_bottom(self.footer_y())
    }
}

/// How the pages of one section are laid out
#[derive(Debug, Clone, PartialEq)]
pub struct SectionConfig {
    pub records_per_page: usize,
    pub columns: ColumnCount,
    /// Distance from a field's label to its value
    pub label_width: Px,
    /// Distance between wrapped lines of a value
    pub line_height: Px,
    pub right_column_start: RightColumnStart,
    /// Overrides [ReportStyle::y_start] for this section's columns
    pub y_start: Option<Px>,
    /// Height of one record of a list section when each of its values fits on one line
    pub record_height: Option<Px>,
}

impl SectionConfig {
    pub fn new(
        records_per_page: usize,
        columns: ColumnCount,
        label_width: Px,
        line_height: Px,
    ) -> SectionConfig {
        SectionConfig {
            records_per_page,
            columns,
            label_width,
            line_height,
            right_column_start: RightColumnStart::Top,
            y_start: None,
            record_height: None,
        }
    }

    pub fn with_right_column_start(mut self, policy: RightColumnStart) -> SectionConfig {
        self.right_column_start = policy;
        self
    }

    pub fn starting_at(mut self, y: Px) -> SectionConfig {
        self.y_start = Some(y);
        self
    }

    pub fn with_record_height(mut self, height: Px) -> SectionConfig {
        self.record_height = Some(height);
        self
    }

    /// Check that pages of this section can be laid out with `style`. With a
    /// [record height](SectionConfig::record_height), a full column of records below the
    /// section heading must end above the footer line.
    pub fn validate(&self, style: &ReportStyle) -> Result<(), ReportError> {
        if self.records_per_page == 0 {
            return Err(ReportError::InvalidConfig(
                "records per page must be at least 1".to_string(),
            ));
        }
        if self.line_height <= Px(0.0) {
            return Err(ReportError::InvalidConfig(format!(
                "line height must be positive, got {}",
                self.line_height
            )));
        }
        let layout = style.column_layout(self);
        let width = layout.column(0)?.width();
        if self.label_width >= width {
            return Err(ReportError::InvalidConfig(format!(
                "label width {} doesn't fit in a {} column",
                self.label_width, width
            )));
        }
        if let Some(height) = self.record_height {
            let per_column = self.plan(self.records_per_page)?.column_capacity();
            let first = layout.column(0)?.cursor() + style.section_heading_advance();
            let end = first + height * per_column as f32;
            let bottom = layout.bottom();
            if end > bottom {
                return Err(ReportError::InvalidConfig(format!(
                    "{per_column} records of {height} per column end at {end}, below {bottom}"
                )));
            }
        }
        Ok(())
    }

    pub fn plan(&self, total: usize) -> Result<PaginationPlan, ReportError> {
        PaginationPlan::new(total, self.records_per_page, self.columns)
    }
}

/// What a page's content callback draws with
pub struct LayoutContext<'c, C: Canvas, M: TextMeasurer> {
    canvas: &'c mut C,
    measurer: &'c M,
    style: &'c ReportStyle,
    columns: ColumnLayout,
    fields: FieldPrinter,
}

impl<'c, C: Canvas, M: TextMeasurer> LayoutContext<'c, C, M> {
    pub fn new(
        canvas: &'c mut C,
        measurer: &'c M,
        style: &'c ReportStyle,
        config: &SectionConfig,
    ) -> LayoutContext<'c, C, M> {
        let fields =
            FieldPrinter::new(style.label, style.data, config.label_width, config.line_height)
                .with_spacing(style.field_spacing);
        LayoutContext {
            canvas,
            measurer,
            style,
            columns: style.column_layout(config),
            fields,
        }
    }

    pub fn style(&self) -> &ReportStyle {
        self.style
    }

    pub fn measurer(&self) -> &M {
        self.measurer
    }

    pub fn canvas(&mut self) -> &mut C {
        &mut *self.canvas
    }

    pub fn columns(&self) -> &ColumnLayout {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut ColumnLayout {
        &mut self.columns
    }

    pub fn column(&self, index: usize) -> Result<&Column, ReportError> {
        self.columns.column(index)
    }

    /// Where the next element of column `index` goes
    pub fn cursor(&self, index: usize) -> Result<Px, ReportError> {
        Ok(self.columns.column(index)?.cursor())
    }

    /// Print `label: value` into column `col`, returning the column's new cursor
    pub fn print_field(
        &mut self,
        col: usize,
        label: &str,
        value: Option<&str>,
    ) -> Result<Px, ReportError> {
        let column = self.columns.column_mut(col)?;
        self.fields
            .print_field(&mut *self.canvas, self.measurer, column, label, value)
    }

    /// Draw one line of text at the cursor of column `col`, then move the cursor down by
    /// `advance`
    pub fn line(
        &mut self,
        col: usize,
        style: &TextStyle,
        text: &str,
        advance: Px,
    ) -> Result<Px, ReportError> {
        let column = self.columns.column_mut(col)?;
        self.canvas.draw_text(style, column.x(), column.cursor(), text)?;
        column.advance_by(advance);
        Ok(column.cursor())
    }

    /// Draw `text` wrapped to the width of column `col`
    pub fn print_block(
        &mut self,
        col: usize,
        style: &TextStyle,
        text: &str,
        line_height: Px,
    ) -> Result<Px, ReportError> {
        let column = self.columns.column_mut(col)?;
        let bottom = draw_wrapped(
            &mut *self.canvas,
            self.measurer,
            style,
            column.x(),
            column.cursor(),
            column.width(),
            text,
            line_height,
        )?;
        column.advance_to(bottom);
        Ok(column.cursor())
    }

    /// Draw a heading in column `col` and leave room for the fields under it
    pub fn heading(&mut self, col: usize, text: &str) -> Result<Px, ReportError> {
        let style = self.style.heading;
        self.line(col, &style, text, self.style.heading_spacing)
    }

    /// Draw the heading of a list section at the top of the left column. It marks the
    /// end of the left column's opening block.
    pub fn section_heading(&mut self, text: &str) -> Result<Px, ReportError> {
        let style = self.style.heading;
        let y = self.line(0, &style, text, self.style.section_heading_advance())?;
        self.columns.end_left_block();
        Ok(y)
    }

    pub fn space(&mut self, col: usize, dy: Px) -> Result<Px, ReportError> {
        let column = self.columns.column_mut(col)?;
        column.advance_by(dy);
        Ok(column.cursor())
    }

    /// A faint one pixel line across column `col` at its cursor
    pub fn rule(&mut self, col: usize) -> Result<(), ReportError> {
        let column = self.columns.column(col)?;
        let rect = Rect::from_xywh(column.x(), column.cursor(), column.width(), Px(1.0));
        self.canvas.draw_rect(rect, colours::FAINT_WHITE)
    }

    /// The vertical line between the two columns of a page
    pub fn column_separator(&mut self) -> Result<(), ReportError> {
        let style = self.style;
        let rect = Rect::from_xywh(
            (style.page_width / 2.0).floor(),
            style.y_start - Px(60.0),
            Px(2.0),
            style.page_height - Px(320.0),
        );
        self.canvas.draw_rect(rect, colours::WHITE)
    }

    /// Draw `image` horizontally centred in column `col` with its top at `y`. The
    /// column's cursor doesn't move. Returns the bottom of the image.
    pub fn image_centred(
        &mut self,
        col: usize,
        image: &RasterImage,
        y: Px,
    ) -> Result<Px, ReportError> {
        let column = self.columns.column(col)?;
        let width = Px::from(image.width());
        let x = column.x() + ((column.width() - width) / 2.0).floor();
        self.canvas.composite_image(image, x, y, 1.0)?;
        Ok(y + Px::from(image.height()))
    }
}

/// Turns content callbacks into finished pages
pub struct PageComposer<P: CanvasProvider, M: TextMeasurer> {
    provider: P,
    measurer: M,
    style: ReportStyle,
}

impl<P: CanvasProvider, M: TextMeasurer> PageComposer<P, M> {
    pub fn new(provider: P, measurer: M, style: ReportStyle) -> PageComposer<P, M> {
        PageComposer {
            provider,
            measurer,
            style,
        }
    }

    pub fn style(&self) -> &ReportStyle {
        &self.style
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Compose one page: fill the background, draw `title`, run `content` once with the
    /// page's [LayoutContext], draw the footer, and finish the canvas.
    ///
    /// An error from `content` abandons the page, and so does content that runs off the
    /// bottom of the page. Content that only reaches into the footer is logged.
    pub fn compose_page<F>(
        &self,
        title: &str,
        config: &SectionConfig,
        content: F,
    ) -> Result<FinishedPage<<P::Canvas as Canvas>::Output>, ReportError>
    where
        F: FnOnce(&mut LayoutContext<'_, P::Canvas, M>) -> Result<(), ReportError>,
    {
        let style = &self.style;
        config.validate(style)?;

        let canvas = self
            .provider
            .create_canvas(style.page_width, style.page_height, style.background)?;
        let (title_x, title_y) = style.title_position;

        let page = Page::new(canvas, title)
            .draw_header(&style.title, title_x, title_y)?
            .draw_content(|canvas| {
                let mut ctx = LayoutContext::new(canvas, &self.measurer, style, config);
                content(&mut ctx)?;

                let lowest = ctx.columns().lowest_cursor();
                let bottom = ctx.columns().bottom();
                if lowest > style.page_height {
                    return Err(ReportError::ContentOverflow {
                        page: title.to_string(),
                        bottom: lowest,
                    });
                }
                if lowest > bottom {
                    warn!(
                        "content of '{}' runs to {} and overlaps the footer at {}",
                        title, lowest, bottom
                    );
                }
                Ok(())
            })?
            .draw_footer(&style.data, style.margins.left, style.footer_y(), &style.footer_text)?
            .finalize()?;

        debug!("composed page '{}'", page.title());
        Ok(page)
    }

    /// Compose the page holding `group`: the section's `heading`, the column separator
    /// on two-column pages, then each record drawn by `draw` in slot order.
    pub fn compose_group<T, F>(
        &self,
        title: &str,
        config: &SectionConfig,
        heading: &str,
        group: &PageGroup<'_, T>,
        mut draw: F,
    ) -> Result<FinishedPage<<P::Canvas as Canvas>::Output>, ReportError>
    where
        F: FnMut(
            &mut LayoutContext<'_, P::Canvas, M>,
            RecordSlot<'_, T>,
        ) -> Result<(), ReportError>,
    {
        self.compose_page(title, config, |ctx| {
            ctx.section_heading(heading)?;
            if config.columns == ColumnCount::Double {
                ctx.column_separator()?;
            }
            for slot in group.slots() {
                draw(ctx, slot)?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DisplayList, DrawOp, FixedMetrics, FontBook, RecordingProvider};

    fn composer() -> PageComposer<RecordingProvider, FixedMetrics> {
        let font = FontBook::new().fonts.next_id();
        PageComposer::new(
            RecordingProvider,
            FixedMetrics::default(),
            ReportStyle::new(font, font),
        )
    }

    fn two_columns() -> SectionConfig {
        SectionConfig::new(4, ColumnCount::Double, Px(120.0), Px(36.0))
    }

    #[test]
    fn header_content_and_footer_are_drawn_in_order() {
        let composer = composer();
        let page = composer
            .compose_page("FICHA 1 - DATOS GENERALES - 12345678", &two_columns(), |ctx| {
                ctx.print_field(0, "DNI", Some("12345678"))?;
                Ok(())
            })
            .unwrap();

        let list: &DisplayList = page.output();
        assert_eq!(
            list.texts().collect::<Vec<_>>(),
            vec!["FICHA 1 - DATOS GENERALES - 12345678", "DNI:", "12345678", DEFAULT_FOOTER]
        );
        assert_eq!(
            list.position_of("FICHA 1 - DATOS GENERALES - 12345678"),
            Some((Px(48.0), Px(150.0)))
        );
        assert_eq!(list.position_of(DEFAULT_FOOTER), Some((Px(48.0), Px(1810.0))));
        assert_eq!(list.background, colours::DEEP_TEAL);
    }

    #[test]
    fn measurement_failures_abort_the_page() {
        let font = FontBook::new().fonts.next_id();
        let fonts = FontBook::new();
        let composer = PageComposer::new(RecordingProvider, &fonts, ReportStyle::new(font, font));
        let result = composer.compose_page("t", &two_columns(), |ctx| {
            ctx.print_field(0, "DNI", Some("12345678"))?;
            Ok(())
        });
        assert!(matches!(result, Err(ReportError::FontNotLoaded { index: 0 })));
    }

    #[test]
    fn invalid_sections_are_rejected_before_drawing() {
        let composer = composer();
        let mut calls = 0;
        let config = SectionConfig::new(4, ColumnCount::Double, Px(500.0), Px(36.0));
        let result = composer.compose_page("t", &config, |_| {
            calls += 1;
            Ok(())
        });
        assert!(matches!(result, Err(ReportError::InvalidConfig(_))));
        assert_eq!(calls, 0);

        let empty = SectionConfig::new(0, ColumnCount::Single, Px(120.0), Px(36.0));
        assert!(empty.validate(composer.style()).is_err());
    }

    #[test]
    fn columns_end_at_the_footer_line() {
        let composer = composer();
        let style = composer.style();
        assert_eq!(style.column_layout(&two_columns()).bottom(), style.footer_y());
        assert_eq!(style.footer_y(), Px(1810.0));
    }

    #[test]
    fn sections_whose_records_reach_the_footer_are_rejected() {
        let composer = composer();
        let style = composer.style();
        let jobs = |per_page| {
            SectionConfig::new(per_page, ColumnCount::Single, Px(200.0), Px(36.0))
                .starting_at(Px(260.0))
                .with_record_height(Px(232.0))
        };
        // records start at 318: six end at 1710, seven at 1942
        assert!(jobs(6).validate(style).is_ok());
        assert!(matches!(jobs(7).validate(style), Err(ReportError::InvalidConfig(_))));

        // two columns only need room for half of the page's records each
        let family = SectionConfig::new(16, ColumnCount::Double, Px(120.0), Px(36.0))
            .starting_at(Px(260.0))
            .with_record_height(Px(186.0));
        assert!(family.validate(style).is_ok());
        let mut calls = 0;
        let result = composer.compose_page("t", &family.with_record_height(Px(187.0)), |_| {
            calls += 1;
            Ok(())
        });
        assert!(matches!(result, Err(ReportError::InvalidConfig(_))));
        assert_eq!(calls, 0);
    }

    #[test]
    fn content_past_the_page_fails_and_into_the_footer_is_kept() {
        let composer = composer();
        let into_footer = composer.compose_page("t", &two_columns(), |ctx| {
            ctx.space(0, Px(1600.0))?;
            Ok(())
        });
        assert!(into_footer.is_ok());

        let off_page = composer.compose_page("FICHA 4", &two_columns(), |ctx| {
            ctx.space(1, Px(1700.0))?;
            Ok(())
        });
        match off_page {
            Err(ReportError::ContentOverflow { page, bottom }) => {
                assert_eq!((page.as_str(), bottom), ("FICHA 4", Px(1980.0)));
            }
            other => panic!("expected ContentOverflow, got {other:?}"),
        }
    }

    #[test]
    fn addressing_a_missing_column_fails() {
        let composer = composer();
        let config = SectionConfig::new(4, ColumnCount::Single, Px(200.0), Px(36.0));
        let result = composer.compose_page("t", &config, |ctx| {
            ctx.print_field(1, "DNI", None)?;
            Ok(())
        });
        assert!(matches!(
            result,
            Err(ReportError::InvalidColumn { index: 1, count: 1 })
        ));
    }

    #[test]
    fn groups_draw_heading_separator_and_records() {
        let composer = composer();
        let config = two_columns()
            .with_right_column_start(RightColumnStart::AfterLeftBlock)
            .starting_at(Px(260.0));
        let records = ["a", "b", "c"];
        let plan = config.plan(records.len()).unwrap();
        let group = plan.group(&records, 0).unwrap();

        let page = composer
            .compose_group("FICHA 2", &config, "Lista (3 registros)", &group, |ctx, slot| {
                ctx.print_field(slot.column, &slot.display_index.to_string(), Some(*slot.record))?;
                Ok(())
            })
            .unwrap();

        let list = page.output();
        assert_eq!(list.position_of("Lista (3 registros)"), Some((Px(48.0), Px(260.0))));
        // left column: records 1 and 2; right column starts below the heading
        assert_eq!(list.position_of("1:"), Some((Px(48.0), Px(318.0))));
        assert_eq!(list.position_of("2:"), Some((Px(48.0), Px(360.0))));
        assert_eq!(list.position_of("3:"), Some((Px(564.0), Px(318.0))));

        let separators: Vec<&Rect> = list
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { rect, .. } => Some(rect),
                _ => None,
            })
            .collect();
        assert_eq!(
            separators,
            vec![&Rect::from_xywh(Px(540.0), Px(220.0), Px(2.0), Px(1600.0))]
        );
    }

    #[test]
    fn images_are_centred_in_their_column() {
        use image::{Rgba, RgbaImage};
        let composer = composer();
        let photo = RasterImage {
            image: RgbaImage::from_pixel(360, 10, Rgba([0, 0, 0, 255])),
        };
        let page = composer
            .compose_page("t", &two_columns(), |ctx| {
                let bottom = ctx.image_centred(1, &photo, Px(260.0))?;
                assert_eq!(bottom, Px(270.0));
                Ok(())
            })
            .unwrap();
        assert!(page.output().ops.contains(&DrawOp::Image {
            x: Px(618.0),
            y: Px(260.0),
            width: 360,
            height: 10,
            opacity: 1.0,
        }));
    }
}
