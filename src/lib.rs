//! Lays out DNI lookup records on fixed-size raster pages and assembles the pages
//! into a PDF.
//!
//! The pieces build on each other: [layout] wraps text, prints labelled fields and
//! splits record lists into pages and columns; [PageComposer] draws one page per
//! record group; [report] describes the DNI report itself; [Document] embeds the
//! finished pages into a PDF.

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod compose;
pub use compose::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod record;
pub use record::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

pub mod report;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
