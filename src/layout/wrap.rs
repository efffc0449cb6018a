use crate::{
    canvas::Canvas,
    font::{TextMeasurer, TextStyle},
    units::Px,
    ReportError,
};
use log::trace;

/// What gets printed in place of a missing or blank value
pub const PLACEHOLDER: &str = "-";

/// Breaks `text` into lines no wider than `max_width`, greedily, at whitespace.
///
/// Words are added to the current line while the line still measures at most
/// `max_width`. A word that would overflow a non-empty line starts the next line
/// instead. Words are never split: a single word wider than `max_width` gets a line to
/// itself and overflows it.
///
/// Runs of whitespace collapse to a single space, and lines carry no leading or
/// trailing whitespace. Text with no words at all wraps to a single
/// [PLACEHOLDER] line.
pub fn wrap_text<M: TextMeasurer + ?Sized>(
    measurer: &M,
    style: &TextStyle,
    text: &str,
    max_width: Px,
) -> Result<Vec<String>, ReportError> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };

        if measurer.measure(style, &candidate)? > max_width && !line.is_empty() {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(PLACEHOLDER.to_string());
    }

    trace!("wrapped {} chars into {} lines", text.len(), lines.len());
    Ok(lines)
}

/// Wraps `text` to `max_width` and draws one line every `line_height` pixels, starting
/// at `(x, y)`.
///
/// Returns the y-coordinate just below the last line, `y + lines * line_height`.
#[allow(clippy::too_many_arguments)]
pub fn draw_wrapped<C: Canvas + ?Sized, M: TextMeasurer + ?Sized>(
    canvas: &mut C,
    measurer: &M,
    style: &TextStyle,
    x: Px,
    y: Px,
    max_width: Px,
    text: &str,
    line_height: Px,
) -> Result<Px, ReportError> {
    let lines = wrap_text(measurer, style, text, max_width)?;

    let mut cursor = y;
    for line in lines.iter() {
        canvas.draw_text(style, x, cursor, line)?;
        cursor += line_height;
    }

    Ok(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{colours, CanvasProvider, FixedMetrics, FontBook, RecordingProvider};

    fn style() -> TextStyle {
        // 16px at half an em per character: 8px per character
        TextStyle::new(FontBook::new().fonts.next_id(), Px(16.0), colours::WHITE)
    }

    #[test]
    fn breaks_before_the_overflowing_word() {
        let m = FixedMetrics::default();
        let s = style();
        let max = m.measure(&s, "The quick").unwrap() + Px(1.0);
        let lines = wrap_text(&m, &s, "The quick brown fox jumps", max).unwrap();
        assert_eq!(lines, vec!["The quick", "brown fox", "jumps"]);
    }

    #[test]
    fn empty_and_blank_text_wrap_to_placeholder() {
        let m = FixedMetrics::default();
        let s = style();
        assert_eq!(wrap_text(&m, &s, "", Px(100.0)).unwrap(), vec!["-"]);
        assert_eq!(wrap_text(&m, &s, " \t\n ", Px(100.0)).unwrap(), vec!["-"]);
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let m = FixedMetrics::default();
        let s = style();
        let lines = wrap_text(&m, &s, "a SUPERCALIFRAGILISTIC b", Px(40.0)).unwrap();
        assert_eq!(lines, vec!["a", "SUPERCALIFRAGILISTIC", "b"]);
    }

    #[test]
    fn whitespace_is_collapsed_and_trimmed() {
        let m = FixedMetrics::default();
        let s = style();
        let lines = wrap_text(&m, &s, "  JR   LOS\tPINOS  ", Px(1000.0)).unwrap();
        assert_eq!(lines, vec!["JR LOS PINOS"]);
    }

    #[test]
    fn draw_wrapped_advances_one_line_height_per_line() {
        let m = FixedMetrics::default();
        let s = style();
        let mut canvas = RecordingProvider
            .create_canvas(Px(500.0), Px(500.0), colours::BLACK)
            .unwrap();
        let bottom = draw_wrapped(
            &mut canvas,
            &m,
            &s,
            Px(10.0),
            Px(100.0),
            Px(80.0),
            "AV LAS FLORES 123 SAN ISIDRO",
            Px(36.0),
        )
        .unwrap();

        let ys: Vec<Px> = canvas
            .ops()
            .iter()
            .map(|op| match op {
                crate::DrawOp::Text { y, .. } => *y,
                other => panic!("unexpected op {other:?}"),
            })
            .collect();
        assert_eq!(ys, vec![Px(100.0), Px(136.0), Px(172.0)]);
        assert_eq!(bottom, Px(208.0));
    }
}
