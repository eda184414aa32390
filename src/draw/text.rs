//! Word-wrap layout for text labels.
//!
//! Wrapping is a pure function over a width-measuring callback. Labels are
//! measured with Pango on a surface-independent context, so the plate the
//! renderer draws and the box hit-testing uses are the same rectangle.

use super::font::FontDescriptor;
use pango::prelude::*;

/// Maximum line width before soft wrapping, in logical pixels.
pub const MAX_LINE_WIDTH: f64 = 980.0;

/// Padding between the label plate edge and its text.
pub const LABEL_PADDING: f64 = 12.0;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.25;

/// True when the content has nothing but whitespace.
pub fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

/// Splits `content` into display lines.
///
/// Explicit newlines are hard breaks. Each hard line is then wrapped greedily
/// at word boundaries so no line exceeds `max_width` according to `measure`.
/// Spacing inside a line (including indentation) is kept; the whitespace at
/// a soft break is dropped. A single word wider than `max_width` is kept on
/// its own line rather than split mid-word.
pub fn wrap_lines<F>(content: &str, max_width: f64, mut measure: F) -> Vec<String>
where
    F: FnMut(&str) -> f64,
{
    let mut lines = Vec::new();

    for hard_line in content.split('\n') {
        let mut current = String::new();

        for (index, segment) in word_segments(hard_line.trim_end()).into_iter().enumerate() {
            if index == 0 {
                current.push_str(segment);
                continue;
            }

            let candidate = format!("{current}{segment}");
            if measure(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(segment.trim_start());
            }
        }

        lines.push(current);
    }

    lines
}

/// Splits a line into words, each carrying the whitespace in front of it.
fn word_segments(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_word = false;

    for (index, ch) in line.char_indices() {
        if ch.is_whitespace() {
            if in_word {
                segments.push(&line[start..index]);
                start = index;
                in_word = false;
            }
        } else {
            in_word = true;
        }
    }
    if in_word {
        segments.push(&line[start..]);
    }

    segments
}

/// Measured layout of a label: wrapped lines and the padded plate size.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub lines: Vec<String>,
    pub line_height: f64,
    pub width: f64,
    pub height: f64,
}

/// Wraps and measures `content` with Pango. Returns `None` for blank text.
pub fn layout_label(content: &str, size: f64, font: &FontDescriptor) -> Option<LabelLayout> {
    if is_blank(content) {
        return None;
    }

    let context = pangocairo::FontMap::default().create_context();
    let layout = pango::Layout::new(&context);
    layout.set_font_description(Some(&font.to_pango(size)));
    let mut measure = |line: &str| {
        layout.set_text(line);
        layout.size().0 as f64 / pango::SCALE as f64
    };

    let lines = wrap_lines(content, MAX_LINE_WIDTH, &mut measure);
    let widest = lines
        .iter()
        .map(|line| measure(line))
        .fold(0.0_f64, f64::max);
    let line_height = size * LINE_HEIGHT_FACTOR;

    Some(LabelLayout {
        width: widest + LABEL_PADDING * 2.0,
        height: lines.len() as f64 * line_height + LABEL_PADDING * 2.0,
        lines,
        line_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_chars(line: &str) -> f64 {
        line.chars().count() as f64
    }

    #[test]
    fn hard_breaks_are_preserved() {
        let lines = wrap_lines("first\nsecond\n\nfourth", 100.0, by_chars);
        assert_eq!(lines, vec!["first", "second", "", "fourth"]);
    }

    #[test]
    fn greedy_soft_wrap() {
        let lines = wrap_lines("aaa bbb ccc dddd", 7.0, by_chars);
        assert_eq!(lines, vec!["aaa bbb", "ccc", "dddd"]);
    }

    #[test]
    fn overlong_word_stays_whole() {
        let lines = wrap_lines("tiny enormousword x", 5.0, by_chars);
        assert_eq!(lines, vec!["tiny", "enormousword", "x"]);
    }

    #[test]
    fn indentation_and_inner_spacing_survive() {
        let lines = wrap_lines("  - step 1\n\tcheck   valve", 100.0, by_chars);
        assert_eq!(lines, vec!["  - step 1", "\tcheck   valve"]);
    }

    #[test]
    fn soft_break_drops_only_the_separator() {
        let lines = wrap_lines("  aa   bb  cc", 9.0, by_chars);
        assert_eq!(lines, vec!["  aa   bb", "cc"]);
    }

    #[test]
    fn blank_content_has_no_layout() {
        let font = FontDescriptor::default();
        assert!(layout_label("   \n  ", 32.0, &font).is_none());
        assert!(layout_label("", 32.0, &font).is_none());
    }

    #[test]
    fn layout_includes_padding_and_lines() {
        let label = layout_label("ab\ncd", 20.0, &FontDescriptor::default()).unwrap();
        assert_eq!(label.lines, vec!["ab", "cd"]);
        assert!((label.height - (2.0 * 20.0 * 1.25 + 24.0)).abs() < 1e-9);
        assert!(label.width > LABEL_PADDING * 2.0);
    }

    #[test]
    fn long_labels_wrap_under_max_width() {
        let content = "slippery surface near loading bay ".repeat(20);
        let label = layout_label(&content, 40.0, &FontDescriptor::default()).unwrap();
        assert!(label.lines.len() > 1);
        assert!(label.width <= MAX_LINE_WIDTH + LABEL_PADDING * 2.0);
    }
}
