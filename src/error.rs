use crate::units::Px;
use thiserror::Error;

/// All errors that the crate can generate.
///
/// Only layout-level failures live here. Absent field values, empty record sets and
/// words wider than their column are handled in place and never surface as errors.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode or resize an image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// An embedded image was not valid base64
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    /// The lookup response was not valid JSON
    Json(#[from] serde_json::Error),

    #[error("font {index} is not loaded")]
    /// Text was measured or drawn with a font that isn't in the font book
    FontNotLoaded { index: usize },

    #[error("font has no glyph for {ch:?} and no replacement glyph")]
    /// Text can't be measured because the font can't represent a character
    MissingGlyph { ch: char },

    #[error("glyph {glyph} has no horizontal metrics")]
    /// Text can't be measured because the font has no advance for one of its glyphs
    MissingAdvance { glyph: u16 },

    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),

    #[error("content of '{page}' runs to {bottom}, off the bottom of the page")]
    /// Drawing continued past the bottom of the canvas, so part of the page is lost
    ContentOverflow { page: String, bottom: Px },

    #[error("column {index} does not exist in a {count}-column layout")]
    InvalidColumn { index: usize, count: usize },

    #[error("canvas error: {0}")]
    /// The raster backend couldn't allocate, draw, or encode a page
    Canvas(String),

    #[error("pdf error: {0}")]
    Pdf(String),
}
