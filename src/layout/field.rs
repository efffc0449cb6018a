use super::{columns::Column, wrap::draw_wrapped, wrap::PLACEHOLDER};
use crate::{
    canvas::Canvas,
    font::{TextMeasurer, TextStyle},
    units::Px,
    ReportError,
};

/// Prints `label: value` pairs into a [Column].
///
/// The label is drawn at the column's left edge; the value starts `label_width` pixels
/// to the right and wraps within what's left of the column. Every printed field moves
/// the column's cursor strictly downward.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPrinter {
    pub label_style: TextStyle,
    pub value_style: TextStyle,
    pub label_width: Px,
    pub line_height: Px,
    /// Extra space left under each field
    pub spacing: Px,
}

impl FieldPrinter {
    pub fn new(
        label_style: TextStyle,
        value_style: TextStyle,
        label_width: Px,
        line_height: Px,
    ) -> Self {
        FieldPrinter {
            label_style,
            value_style,
            label_width,
            line_height,
            spacing: Px(0.0),
        }
    }

    pub fn with_spacing(mut self, spacing: Px) -> Self {
        self.spacing = spacing;
        self
    }

    /// Print one field at the column's cursor and move the cursor below it. A missing or
    /// blank value prints as [PLACEHOLDER].
    ///
    /// Returns the column's new cursor.
    pub fn print_field<C: Canvas + ?Sized, M: TextMeasurer + ?Sized>(
        &self,
        canvas: &mut C,
        measurer: &M,
        column: &mut Column,
        label: &str,
        value: Option<&str>,
    ) -> Result<Px, ReportError> {
        if self.line_height <= Px(0.0) {
            return Err(ReportError::InvalidConfig(format!(
                "field line height must be positive, got {}",
                self.line_height
            )));
        }
        let value_width = column.width() - self.label_width;
        if value_width <= Px(0.0) {
            return Err(ReportError::InvalidConfig(format!(
                "label width {} leaves no room for values in a {} column",
                self.label_width,
                column.width()
            )));
        }

        let y = column.cursor();
        canvas.draw_text(&self.label_style, column.x(), y, &format!("{label}:"))?;

        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(PLACEHOLDER);
        let bottom = draw_wrapped(
            canvas,
            measurer,
            &self.value_style,
            column.x() + self.label_width,
            y,
            value_width,
            value,
            self.line_height,
        )?;

        column.advance_to(bottom + self.spacing);
        Ok(column.cursor())
    }
}
