//! Placing text on report pages.
//!
//! Everything here works in pixels with the origin at the top-left corner of the page
//! and y growing downward. Text is positioned by the top of its line box.
//!
//! - [`wrap_text`](crate::layout::wrap_text) breaks a value into lines that fit a width
//! - [`FieldPrinter`](crate::layout::FieldPrinter) prints `label: value` pairs into a
//!   [`Column`](crate::layout::Column), moving its cursor down
//! - [`ColumnLayout`](crate::layout::ColumnLayout) splits a page into one or two columns
//! - [`PaginationPlan`](crate::layout::PaginationPlan) assigns records to pages and
//!   columns
//!
//! # Example
//!
//! ```
//! use ficha_gen::layout::{paginate, ColumnCount, ColumnLayout, FieldPrinter, Margins};
//! use ficha_gen::{
//!     colours, CanvasProvider, FixedMetrics, FontBook, Px, RecordingProvider, TextStyle,
//! };
//!
//! let font = FontBook::new().fonts.next_id();
//! let style = TextStyle::new(font, Px(16.0), colours::WHITE);
//! let printer = FieldPrinter::new(style.clone(), style, Px(120.0), Px(36.0));
//!
//! let phones = ["987654321", "912345678", "934567890"];
//! let pages = paginate(&phones, 2, ColumnCount::Double).unwrap();
//! assert_eq!(pages.len(), 2);
//!
//! let mut canvas = RecordingProvider
//!     .create_canvas(Px(1080.0), Px(1920.0), colours::BLACK)
//!     .unwrap();
//! let mut columns = ColumnLayout::new(
//!     Px(1080.0),
//!     Px(1920.0),
//!     ColumnCount::Double,
//!     &Margins::all(Px(48.0)),
//!     Px(24.0),
//!     Px(280.0),
//! );
//! for slot in pages[0].slots() {
//!     let column = columns.column_mut(slot.column).unwrap();
//!     printer
//!         .print_field(&mut canvas, &FixedMetrics::default(), column, "TEL", Some(*slot.record))
//!         .unwrap();
//! }
//! assert_eq!(canvas.ops().len(), 4);
//! ```

mod columns;
mod field;
mod margins;
mod paginate;
mod wrap;

pub use columns::*;
pub use field::*;
pub use margins::*;
pub use paginate::*;
pub use wrap::*;
