use crate::{colour::Colour, units::Px, ReportError};
use id_arena::{Arena, Id};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};

/// A parsed font object. Fonts can be TTF or OTF fonts and are used both to measure
/// text during layout and to rasterize glyph outlines onto pages.
///
/// Fonts are referred to throughout layout code by their [Id] within a [FontBook],
/// usually through a [TextStyle].
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, ReportError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Obtain the full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Pixels per font unit at the given size
    pub fn scaling(&self, size: Px) -> f32 {
        size.0 / self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given
    /// font size
    pub fn ascent(&self, size: Px) -> Px {
        Px(self.scaling(size) * self.face.as_face_ref().ascender() as f32)
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the
    /// given font size. Note: this is usually negative
    pub fn descent(&self, size: Px) -> Px {
        Px(self.scaling(size) * self.face.as_face_ref().descender() as f32)
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: Px) -> Px {
        let scaling = self.scaling(size);
        let face = self.face.as_face_ref();
        let leading = scaling * face.line_gap() as f32;
        let ascent = scaling * face.ascender() as f32;
        let descent = scaling * face.descender() as f32;
        Px(leading + ascent - descent)
    }

    pub fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.face.as_face_ref().glyph_index(ch)
    }

    /// The glyph used to draw `ch`: the character's own glyph, or the font's replacement
    /// character (`U+FFFD`, then `?`) when the font doesn't cover it.
    pub fn glyph_or_replacement(&self, ch: char) -> Result<GlyphId, ReportError> {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .ok_or(ReportError::MissingGlyph { ch })
    }

    /// Horizontal advance of a single glyph at the given size
    pub fn advance(&self, gid: GlyphId, size: Px) -> Result<Px, ReportError> {
        scaled_advance(self.face.as_face_ref().glyph_hor_advance(gid), gid, self.scaling(size))
    }

    /// Calculate the width of a given string of text given the font size. Control
    /// characters take no space.
    pub fn width_of_text(&self, text: &str, size: Px) -> Result<Px, ReportError> {
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.advance(self.glyph_or_replacement(ch)?, size))
            .sum()
    }
}

/// Width in pixels of a glyph advance given in font units. Glyphs without horizontal
/// metrics are an error.
fn scaled_advance(advance: Option<u16>, gid: GlyphId, scaling: f32) -> Result<Px, ReportError> {
    advance
        .map(|units| Px(scaling * units as f32))
        .ok_or(ReportError::MissingAdvance { glyph: gid.0 })
}

/// The fonts available to a report. Fonts are loaded once, before any page is composed,
/// and are read-only afterwards.
#[derive(Default)]
pub struct FontBook {
    pub fonts: Arena<Font>,
}

impl FontBook {
    pub fn new() -> FontBook {
        FontBook::default()
    }

    /// Add a font to the book, returning the id that [TextStyle]s use to refer to it
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Parse and add a font from raw bytes
    pub fn load_font(&mut self, bytes: Vec<u8>) -> Result<Id<Font>, ReportError> {
        Ok(self.add_font(Font::load(bytes)?))
    }

    pub fn get(&self, id: Id<Font>) -> Result<&Font, ReportError> {
        self.fonts
            .get(id)
            .ok_or(ReportError::FontNotLoaded { index: id.index() })
    }
}

/// Everything needed to measure or draw a run of text
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TextStyle {
    pub font: Id<Font>,
    pub size: Px,
    pub colour: Colour,
}

impl TextStyle {
    pub fn new(font: Id<Font>, size: Px, colour: Colour) -> TextStyle {
        TextStyle { font, size, colour }
    }

    /// Copy of this style at a different size
    pub fn sized(self, size: Px) -> TextStyle {
        TextStyle { size, ..self }
    }
}

/// Measures rendered text. Layout code only ever sees text through this trait, so the
/// same layout can be driven by real font metrics or by fixed metrics.
///
/// A failed measurement is fatal to the page being laid out: guessing a width would
/// corrupt every position computed after it.
pub trait TextMeasurer {
    /// Rendered width of `text` in the given style
    fn measure(&self, style: &TextStyle, text: &str) -> Result<Px, ReportError>;

    /// Natural distance between two baselines in the given style
    fn line_height(&self, style: &TextStyle) -> Result<Px, ReportError>;
}

impl TextMeasurer for FontBook {
    fn measure(&self, style: &TextStyle, text: &str) -> Result<Px, ReportError> {
        self.get(style.font)?.width_of_text(text, style.size)
    }

    fn line_height(&self, style: &TextStyle) -> Result<Px, ReportError> {
        Ok(self.get(style.font)?.line_height(style.size))
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, style: &TextStyle, text: &str) -> Result<Px, ReportError> {
        (**self).measure(style, text)
    }

    fn line_height(&self, style: &TextStyle) -> Result<Px, ReportError> {
        (**self).line_height(style)
    }
}

/// Monospace metrics that don't need a font file: every character is `advance` ems wide
/// and lines are `line_spacing` ems apart. Useful for previews and tests of layout
/// decisions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedMetrics {
    pub advance: f32,
    pub line_spacing: f32,
}

impl FixedMetrics {
    pub fn monospace(advance: f32) -> FixedMetrics {
        FixedMetrics {
            advance,
            line_spacing: 1.2,
        }
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        FixedMetrics::monospace(0.5)
    }
}

impl TextMeasurer for FixedMetrics {
    fn measure(&self, style: &TextStyle, text: &str) -> Result<Px, ReportError> {
        let count = text.chars().filter(|ch| !ch.is_control()).count();
        Ok(style.size * (self.advance * count as f32))
    }

    fn line_height(&self, style: &TextStyle) -> Result<Px, ReportError> {
        Ok(style.size * self.line_spacing)
    }
}
