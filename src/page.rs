//! A page is drawn in a fixed order: header, content, footer. Each step consumes the
//! page and returns it in its next state, so a step can't be skipped or repeated, and
//! once [Page::finalize] has run nothing can draw on the page again.

use crate::{canvas::Canvas, font::TextStyle, units::Px, ReportError};
use std::marker::PhantomData;

/// A blank page with only its background
#[derive(Debug)]
pub struct Created;

/// The page's title has been drawn
#[derive(Debug)]
pub struct HeaderDrawn;

/// The page's content has been drawn
#[derive(Debug)]
pub struct ContentDrawn;

/// The footer has been drawn; the page can be finalized
#[derive(Debug)]
pub struct FooterDrawn;

/// A page being drawn onto a canvas of type `C`, currently in state `S`
pub struct Page<C: Canvas, S> {
    canvas: C,
    title: String,
    state: PhantomData<S>,
}

impl<C: Canvas, S> Page<C, S> {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> (Px, Px) {
        self.canvas.size()
    }

    fn into_state<T>(self) -> Page<C, T> {
        Page {
            canvas: self.canvas,
            title: self.title,
            state: PhantomData,
        }
    }
}

impl<C: Canvas> Page<C, Created> {
    pub fn new<S: Into<String>>(canvas: C, title: S) -> Page<C, Created> {
        Page {
            canvas,
            title: title.into(),
            state: PhantomData,
        }
    }

    /// Draw the page's title with the top of its line at `(x, y)`
    pub fn draw_header(
        mut self,
        style: &TextStyle,
        x: Px,
        y: Px,
    ) -> Result<Page<C, HeaderDrawn>, ReportError> {
        self.canvas.draw_text(style, x, y, &self.title)?;
        Ok(self.into_state())
    }
}

impl<C: Canvas> Page<C, HeaderDrawn> {
    /// Run `draw` against the canvas. It is called exactly once; if it fails, the page
    /// is dropped along with the error.
    pub fn draw_content<F>(mut self, draw: F) -> Result<Page<C, ContentDrawn>, ReportError>
    where
        F: FnOnce(&mut C) -> Result<(), ReportError>,
    {
        draw(&mut self.canvas)?;
        Ok(self.into_state())
    }
}

impl<C: Canvas> Page<C, ContentDrawn> {
    pub fn draw_footer(
        mut self,
        style: &TextStyle,
        x: Px,
        y: Px,
        text: &str,
    ) -> Result<Page<C, FooterDrawn>, ReportError> {
        self.canvas.draw_text(style, x, y, text)?;
        Ok(self.into_state())
    }
}

impl<C: Canvas> Page<C, FooterDrawn> {
    /// Turn the canvas into its finished output
    pub fn finalize(self) -> Result<FinishedPage<C::Output>, ReportError> {
        let (width, height) = self.canvas.size();
        let output = self.canvas.finish()?;
        Ok(FinishedPage {
            title: self.title,
            width,
            height,
            output,
        })
    }
}

/// A finished page. It can be read, but never drawn on again.
#[derive(Clone, Debug, PartialEq)]
pub struct FinishedPage<O> {
    title: String,
    width: Px,
    height: Px,
    output: O,
}

impl<O> FinishedPage<O> {
    #[cfg(test)]
    pub(crate) fn from_parts<S: Into<String>>(title: S, width: Px, height: Px, output: O) -> Self {
        FinishedPage {
            title: title.into(),
            width,
            height,
            output,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> Px {
        self.width
    }

    pub fn height(&self) -> Px {
        self.height
    }

    /// What the canvas produced: PNG bytes for a raster page, a display list for a
    /// recorded one
    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{colours, CanvasProvider, FontBook, RecordingProvider, Rect};

    fn style() -> TextStyle {
        TextStyle::new(FontBook::new().fonts.next_id(), Px(64.0), colours::WHITE)
    }

    #[test]
    fn steps_draw_in_order() {
        let canvas = RecordingProvider
            .create_canvas(Px(1080.0), Px(1920.0), colours::DEEP_TEAL)
            .unwrap();
        let style = style();

        let page = Page::new(canvas, "FICHA 1 - DATOS GENERALES - 12345678")
            .draw_header(&style, Px(48.0), Px(150.0))
            .unwrap()
            .draw_content(|canvas| {
                canvas.draw_rect(
                    Rect::from_xywh(Px(539.0), Px(220.0), Px(2.0), Px(1600.0)),
                    colours::WHITE,
                )
            })
            .unwrap()
            .draw_footer(&style.sized(Px(16.0)), Px(48.0), Px(1810.0), "footer")
            .unwrap()
            .finalize()
            .unwrap();

        assert_eq!(page.title(), "FICHA 1 - DATOS GENERALES - 12345678");
        assert_eq!((page.width(), page.height()), (Px(1080.0), Px(1920.0)));
        let list = page.output();
        assert_eq!(list.background, colours::DEEP_TEAL);
        assert_eq!(list.ops.len(), 3);
        assert_eq!(
            list.texts().collect::<Vec<_>>(),
            vec!["FICHA 1 - DATOS GENERALES - 12345678", "footer"]
        );
        assert_eq!(
            list.position_of("FICHA 1 - DATOS GENERALES - 12345678"),
            Some((Px(48.0), Px(150.0)))
        );
    }

    #[test]
    fn content_errors_abort_the_page() {
        let canvas = RecordingProvider
            .create_canvas(Px(100.0), Px(100.0), colours::BLACK)
            .unwrap();
        let mut calls = 0;
        let result = Page::new(canvas, "t")
            .draw_header(&style(), Px(0.0), Px(0.0))
            .unwrap()
            .draw_content(|_| {
                calls += 1;
                Err(ReportError::MissingGlyph { ch: 'x' })
            });
        assert!(matches!(result, Err(ReportError::MissingGlyph { ch: 'x' })));
        assert_eq!(calls, 1);
    }
}
