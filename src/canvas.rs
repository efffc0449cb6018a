//! Drawing surfaces that pages are composed onto.
//!
//! Layout code never rasterizes anything itself; it issues a handful of primitive
//! operations against a [Canvas]. Two canvases ship with the crate:
//!
//! - [RasterCanvas] renders into a [tiny_skia::Pixmap], drawing glyph outlines from the
//!   fonts in a [FontBook], and finishes as PNG bytes
//! - [RecordingCanvas] keeps a [DisplayList] of the operations, which is what tests and
//!   previews inspect

use crate::{
    colour::Colour,
    font::{FontBook, TextStyle},
    image::RasterImage,
    rect::Rect,
    units::Px,
    ReportError,
};
use derive_more::{Deref, From, Into};
use owned_ttf_parser::AsFaceRef;
use tiny_skia::{ColorU8, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};

/// A mutable drawing surface for one page.
///
/// Coordinates are in pixels from the top-left corner. Text is positioned by the top
/// of its line box, not its baseline.
pub trait Canvas {
    /// What the canvas turns into once the page is finished
    type Output;

    /// Width and height of the canvas
    fn size(&self) -> (Px, Px);

    fn draw_text(&mut self, style: &TextStyle, x: Px, y: Px, text: &str)
        -> Result<(), ReportError>;

    fn draw_rect(&mut self, rect: Rect, colour: Colour) -> Result<(), ReportError>;

    /// Draw `image` with its top-left corner at `(x, y)`
    fn composite_image(
        &mut self,
        image: &RasterImage,
        x: Px,
        y: Px,
        opacity: f32,
    ) -> Result<(), ReportError>;

    /// Consume the canvas, producing its immutable output
    fn finish(self) -> Result<Self::Output, ReportError>;
}

/// Creates blank canvases for new pages
pub trait CanvasProvider {
    type Canvas: Canvas;

    fn create_canvas(
        &self,
        width: Px,
        height: Px,
        background: Colour,
    ) -> Result<Self::Canvas, ReportError>;
}

/// Encoded PNG bytes of a finished raster page
#[derive(Clone, Debug, PartialEq, Deref, From, Into)]
pub struct PngData(pub Vec<u8>);

/// Creates [RasterCanvas]es that draw text with the fonts of a [FontBook]
#[derive(Clone, Copy)]
pub struct RasterProvider<'f> {
    pub fonts: &'f FontBook,
}

impl<'f> RasterProvider<'f> {
    pub fn new(fonts: &'f FontBook) -> RasterProvider<'f> {
        RasterProvider { fonts }
    }
}

impl<'f> CanvasProvider for RasterProvider<'f> {
    type Canvas = RasterCanvas<'f>;

    fn create_canvas(
        &self,
        width: Px,
        height: Px,
        background: Colour,
    ) -> Result<RasterCanvas<'f>, ReportError> {
        let mut pixmap = Pixmap::new(width.0.ceil() as u32, height.0.ceil() as u32)
            .ok_or_else(|| {
                ReportError::Canvas(format!("can't allocate a {}x{} page", width.0, height.0))
            })?;
        pixmap.fill(background.into());
        Ok(RasterCanvas {
            pixmap,
            fonts: self.fonts,
        })
    }
}

/// A raster page backed by a [tiny_skia::Pixmap]
pub struct RasterCanvas<'f> {
    pub pixmap: Pixmap,
    fonts: &'f FontBook,
}

/// Collects a glyph outline into a path, in font units
struct GlyphPath(PathBuilder);

impl owned_ttf_parser::OutlineBuilder for GlyphPath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}

fn solid_paint(colour: Colour) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(colour.into());
    paint.anti_alias = true;
    paint
}

impl<'f> Canvas for RasterCanvas<'f> {
    type Output = PngData;

    fn size(&self) -> (Px, Px) {
        (
            Px(self.pixmap.width() as f32),
            Px(self.pixmap.height() as f32),
        )
    }

    fn draw_text(
        &mut self,
        style: &TextStyle,
        x: Px,
        y: Px,
        text: &str,
    ) -> Result<(), ReportError> {
        let font = self.fonts.get(style.font)?;
        let scaling = font.scaling(style.size);
        let baseline = y + font.ascent(style.size);
        let paint = solid_paint(style.colour);

        let mut pen = x;
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let gid = font.glyph_or_replacement(ch)?;
            let mut outline = GlyphPath(PathBuilder::new());
            // glyphs without outlines (spaces) only advance the pen
            if font.face.as_face_ref().outline_glyph(gid, &mut outline).is_some() {
                if let Some(path) = outline.0.finish() {
                    // font units are y-up, the page is y-down
                    let transform =
                        Transform::from_row(scaling, 0.0, 0.0, -scaling, pen.0, baseline.0);
                    self.pixmap
                        .fill_path(&path, &paint, FillRule::Winding, transform, None);
                }
            }
            pen += font.advance(gid, style.size)?;
        }

        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, colour: Colour) -> Result<(), ReportError> {
        // empty rectangles draw nothing
        if let Some(rect) = rect.to_skia() {
            self.pixmap
                .fill_rect(rect, &solid_paint(colour), Transform::identity(), None);
        }
        Ok(())
    }

    fn composite_image(
        &mut self,
        image: &RasterImage,
        x: Px,
        y: Px,
        opacity: f32,
    ) -> Result<(), ReportError> {
        let mut source = Pixmap::new(image.width(), image.height()).ok_or_else(|| {
            ReportError::Canvas(format!(
                "can't allocate a {}x{} image",
                image.width(),
                image.height()
            ))
        })?;
        for (dst, src) in source.pixels_mut().iter_mut().zip(image.image.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }

        let paint = PixmapPaint {
            opacity: opacity.clamp(0.0, 1.0),
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            x.0.round() as i32,
            y.0.round() as i32,
            source.as_ref(),
            &paint,
            Transform::identity(),
            None,
        );
        Ok(())
    }

    fn finish(self) -> Result<PngData, ReportError> {
        self.pixmap
            .encode_png()
            .map(PngData)
            .map_err(|e| ReportError::Canvas(e.to_string()))
    }
}

/// One primitive operation recorded by a [RecordingCanvas]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text {
        style: TextStyle,
        x: Px,
        y: Px,
        text: String,
    },
    Rect {
        rect: Rect,
        colour: Colour,
    },
    Image {
        x: Px,
        y: Px,
        width: u32,
        height: u32,
        opacity: f32,
    },
}

/// The operations drawn onto one page, in drawing order
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayList {
    pub width: Px,
    pub height: Px,
    pub background: Colour,
    pub ops: Vec<DrawOp>,
}

impl DisplayList {
    /// All text runs, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Position of the first text run equal to `needle`
    pub fn position_of(&self, needle: &str) -> Option<(Px, Px)> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Text { text, x, y, .. } if text == needle => Some((*x, *y)),
            _ => None,
        })
    }
}

/// Creates [RecordingCanvas]es
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordingProvider;

impl CanvasProvider for RecordingProvider {
    type Canvas = RecordingCanvas;

    fn create_canvas(
        &self,
        width: Px,
        height: Px,
        background: Colour,
    ) -> Result<RecordingCanvas, ReportError> {
        Ok(RecordingCanvas {
            list: DisplayList {
                width,
                height,
                background,
                ops: Vec::new(),
            },
        })
    }
}

/// A canvas that records operations instead of rasterizing them
#[derive(Debug)]
pub struct RecordingCanvas {
    list: DisplayList,
}

impl RecordingCanvas {
    pub fn ops(&self) -> &[DrawOp] {
        &self.list.ops
    }
}

impl Canvas for RecordingCanvas {
    type Output = DisplayList;

    fn size(&self) -> (Px, Px) {
        (self.list.width, self.list.height)
    }

    fn draw_text(
        &mut self,
        style: &TextStyle,
        x: Px,
        y: Px,
        text: &str,
    ) -> Result<(), ReportError> {
        self.list.ops.push(DrawOp::Text {
            style: *style,
            x,
            y,
            text: text.to_string(),
        });
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, colour: Colour) -> Result<(), ReportError> {
        self.list.ops.push(DrawOp::Rect { rect, colour });
        Ok(())
    }

    fn composite_image(
        &mut self,
        image: &RasterImage,
        x: Px,
        y: Px,
        opacity: f32,
    ) -> Result<(), ReportError> {
        self.list.ops.push(DrawOp::Image {
            x,
            y,
            width: image.width(),
            height: image.height(),
            opacity,
        });
        Ok(())
    }

    fn finish(self) -> Result<DisplayList, ReportError> {
        Ok(self.list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use image::{Rgba, RgbaImage};

    #[test]
    fn raster_canvas_fills_background_and_rects() {
        let fonts = FontBook::new();
        let provider = RasterProvider::new(&fonts);
        let mut canvas = provider
            .create_canvas(Px(20.0), Px(10.0), colours::DEEP_TEAL)
            .expect("can allocate");
        assert_eq!(canvas.size(), (Px(20.0), Px(10.0)));

        canvas
            .draw_rect(Rect::from_xywh(Px(0.0), Px(0.0), Px(2.0), Px(10.0)), colours::WHITE)
            .expect("can draw");

        let corner = canvas.pixmap.pixel(0, 0).expect("pixel exists");
        assert_eq!((corner.red(), corner.green(), corner.blue()), (255, 255, 255));
        let middle = canvas.pixmap.pixel(10, 5).expect("pixel exists");
        assert_eq!((middle.red(), middle.green(), middle.blue()), (11, 43, 58));

        let png = canvas.finish().expect("can encode");
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn raster_canvas_composites_images() {
        let fonts = FontBook::new();
        let mut canvas = RasterProvider::new(&fonts)
            .create_canvas(Px(8.0), Px(8.0), colours::BLACK)
            .expect("can allocate");
        let image = RasterImage {
            image: RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])),
        };
        canvas
            .composite_image(&image, Px(4.0), Px(4.0), 1.0)
            .expect("can composite");
        let inside = canvas.pixmap.pixel(5, 5).expect("pixel exists");
        assert_eq!(inside.red(), 255);
        let outside = canvas.pixmap.pixel(1, 1).expect("pixel exists");
        assert_eq!(outside.red(), 0);
    }

    #[test]
    fn raster_text_needs_a_loaded_font() {
        let fonts = FontBook::new();
        let mut canvas = RasterProvider::new(&fonts)
            .create_canvas(Px(8.0), Px(8.0), colours::BLACK)
            .expect("can allocate");
        let style = TextStyle::new(fonts.fonts.next_id(), Px(16.0), colours::WHITE);
        assert!(matches!(
            canvas.draw_text(&style, Px(0.0), Px(0.0), "DNI"),
            Err(ReportError::FontNotLoaded { .. })
        ));
    }

    #[test]
    fn recording_canvas_keeps_drawing_order() {
        let mut canvas = RecordingProvider
            .create_canvas(Px(100.0), Px(100.0), colours::DEEP_TEAL)
            .expect("can create");
        let style = TextStyle::new(FontBook::new().fonts.next_id(), Px(16.0), colours::WHITE);
        canvas.draw_text(&style, Px(1.0), Px(2.0), "first").unwrap();
        canvas
            .draw_rect(Rect::from_xywh(Px(0.0), Px(0.0), Px(1.0), Px(1.0)), colours::WHITE)
            .unwrap();
        canvas.draw_text(&style, Px(3.0), Px(4.0), "second").unwrap();
        assert_eq!(canvas.ops().len(), 3);

        let list = canvas.finish().unwrap();
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(list.position_of("second"), Some((Px(3.0), Px(4.0))));
        assert_eq!(list.background, colours::DEEP_TEAL);
    }
}
