// Layout algorithms: text wrapping, popup sizing and window re-layout

use super::types::{Point, Rect, ScreenGeometry, Size};
use crate::surface::{FontStyle, TextMetrics};

/// Smallest width a draggable window may have once a drag or re-layout settles
pub const MIN_WINDOW_WIDTH: i32 = 200;
/// Smallest height a draggable window may have once a drag or re-layout settles
pub const MIN_WINDOW_HEIGHT: i32 = 150;
/// Column width used when wrapping body text
pub const WRAP_COLUMNS: usize = 40;
/// Vertical gap between consecutive text lines
pub const LINE_SPACING: i32 = 5;

/// Words of `line`, each paired with the whitespace run in front of it
fn words_with_gaps(line: &str) -> Vec<(&str, &str)> {
    let mut words = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find(|c: char| !c.is_whitespace()) {
        let (gap, tail) = rest.split_at(start);
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let (word, after) = tail.split_at(end);
        words.push((gap, word));
        rest = after;
    }
    words
}

/// Greedy word wrap of a single line (no embedded newlines).
/// Spacing between words on the same output line is kept as written; the
/// whitespace at a wrap point and at the end of the line is dropped. Words
/// longer than `columns` are split. A blank line yields no output lines.
pub fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for (gap, word) in words_with_gaps(line) {
        let gap_len = gap.chars().count();
        let word_len = word.chars().count();

        if current_len > 0 && current_len + gap_len + word_len <= columns {
            current.push_str(gap);
            current.push_str(word);
            current_len += gap_len + word_len;
            continue;
        }

        // Leading indentation survives on the first line only
        let first = lines.is_empty() && current_len == 0;
        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len <= columns {
            if first && gap_len + word_len <= columns {
                current.push_str(gap);
                current_len = gap_len;
            }
            current.push_str(word);
            current_len += word_len;
            continue;
        }

        // Split an over-long word into column-sized chunks; the tail stays open
        let chars: Vec<char> = word.chars().collect();
        let mut chunks = chars.chunks(columns).peekable();
        while let Some(chunk) = chunks.next() {
            let piece: String = chunk.iter().collect();
            if chunks.peek().is_some() {
                lines.push(piece);
            } else {
                current_len = chunk.len();
                current = piece;
            }
        }
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Wrap text that may contain explicit newlines.
///
/// The text is split on `'\n'` first and each segment is wrapped on its own, so
/// automatic wrapping never joins text across a manual break. An empty segment
/// renders as one empty line.
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    text.split('\n')
        .flat_map(|segment| {
            let wrapped = wrap_line(segment, columns);
            if wrapped.is_empty() {
                vec![String::new()]
            } else {
                wrapped
            }
        })
        .collect()
}

/// Size a text-only popup from rendered text metrics: the widest line plus
/// padding on both sides, and every line's height plus spacing plus padding.
pub fn popup_size<S: AsRef<str>>(
    lines: &[S],
    metrics: &dyn TextMetrics,
    style: FontStyle,
    padding: i32,
) -> Size {
    let mut max_width = 0;
    let mut total_height = padding * 2;
    for line in lines {
        let text = metrics.text_size(line.as_ref(), style);
        max_width = max_width.max(text.width);
        total_height += text.height + LINE_SPACING;
    }
    Size::new(max_width + padding * 2, total_height)
}

/// Scale a rectangle by `to / from` on each axis, truncating toward zero.
/// An empty `from` axis leaves that axis untouched.
pub fn scale_rect(rect: Rect, from: Size, to: Size) -> Rect {
    fn scale(value: i32, from: i32, to: i32) -> i32 {
        if from <= 0 {
            return value;
        }
        (i64::from(value) * i64::from(to) / i64::from(from)) as i32
    }

    Rect::new(
        scale(rect.x, from.width, to.width),
        scale(rect.y, from.height, to.height),
        scale(rect.width, from.width, to.width),
        scale(rect.height, from.height, to.height),
    )
}

/// Raise width/height to the minimum window size
pub fn enforce_min_size(rect: Rect) -> Rect {
    Rect::new(
        rect.x,
        rect.y,
        rect.width.max(MIN_WINDOW_WIDTH),
        rect.height.max(MIN_WINDOW_HEIGHT),
    )
}

/// Pull a rectangle back inside the screen minus the taskbar, shrinking it
/// only when it is larger than the available area.
pub fn constrain_to_screen(rect: Rect, screen: &ScreenGeometry) -> Rect {
    let mut rect = rect;
    let screen_width = screen.size.width;
    let desktop_height = screen.desktop_height();

    if rect.right() > screen_width {
        rect.x = (screen_width - rect.width).max(0);
    }
    if rect.bottom() > desktop_height {
        rect.y = (desktop_height - rect.height).max(0);
    }
    if rect.width > screen_width {
        rect.width = screen_width;
    }
    if rect.height > desktop_height {
        rect.height = desktop_height.max(0);
    }
    rect
}

/// Full re-layout of one window rectangle after the screen changed size
pub fn relayout_rect(rect: Rect, from: Size, screen: &ScreenGeometry) -> Rect {
    constrain_to_screen(enforce_min_size(scale_rect(rect, from, screen.size)), screen)
}

/// Position for a move-drag: the requested top-left clamped so the window stays
/// on screen and above the taskbar.
pub fn clamp_move(rect: Rect, desired: Point, screen: &ScreenGeometry) -> Rect {
    let x = desired.x.max(0).min(screen.size.width - rect.width);
    let y = desired.y.max(0).min(screen.desktop_height() - rect.height);
    Rect::new(x, y, rect.width, rect.height)
}

/// Size for a resize-drag, floored at the minimum window size. Returns `None`
/// when the result would cross the screen edge or the taskbar; the caller keeps
/// the old rectangle for that frame.
pub fn try_resize(rect: Rect, desired: Size, screen: &ScreenGeometry) -> Option<Rect> {
    let width = desired.width.max(MIN_WINDOW_WIDTH);
    let height = desired.height.max(MIN_WINDOW_HEIGHT);
    let fits = rect.x + width <= screen.size.width && rect.y + height <= screen.desktop_height();
    fits.then(|| Rect::new(rect.x, rect.y, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MonospaceMetrics;

    fn screen() -> ScreenGeometry {
        ScreenGeometry::new(Size::new(800, 600), 40)
    }

    #[test]
    fn test_wrap_line_respects_column_width() {
        let lines = wrap_line("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn test_wrap_line_splits_long_words() {
        let lines = wrap_line("abcdefghij xy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_wrap_line_keeps_inner_spacing() {
        assert_eq!(wrap_line("a  b", 40), vec!["a  b"]);
        assert_eq!(wrap_line("  indented   text  ", 40), vec!["  indented   text"]);
        // The run at the wrap point is dropped
        assert_eq!(wrap_line("ab    cd", 5), vec!["ab", "cd"]);
        assert!(wrap_line("   ", 40).is_empty());
    }

    #[test]
    fn test_wrap_text_preserves_manual_breaks() {
        let lines = wrap_text("first line\n\nthird", 40);
        assert_eq!(lines, vec!["first line", "", "third"]);

        // Auto-wrap never merges the two short segments
        let lines = wrap_text("a\nb", 40);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_popup_size_from_metrics() {
        let metrics = MonospaceMetrics::new(8, 16);
        let size = popup_size(&["abcd", "ab"], &metrics, FontStyle::Regular, 20);
        assert_eq!(size, Size::new(4 * 8 + 40, 40 + 2 * (16 + LINE_SPACING)));
    }

    #[test]
    fn test_relayout_scales_width_only() {
        let wide = ScreenGeometry::new(Size::new(1600, 600), 40);
        let rect = relayout_rect(Rect::new(100, 100, 300, 200), Size::new(800, 600), &wide);
        assert_eq!(rect, Rect::new(200, 100, 600, 200));
    }

    #[test]
    fn test_relayout_enforces_minimum_and_bounds() {
        let small = ScreenGeometry::new(Size::new(400, 300), 40);
        let rect = relayout_rect(Rect::new(700, 500, 300, 200), Size::new(800, 600), &small);
        assert!(rect.width >= MIN_WINDOW_WIDTH);
        assert!(rect.height >= MIN_WINDOW_HEIGHT);
        assert!(rect.right() <= 400);
        assert!(rect.bottom() <= 260);
    }

    #[test]
    fn test_clamp_move_keeps_window_above_taskbar() {
        let rect = Rect::new(0, 0, 300, 200);
        assert_eq!(clamp_move(rect, Point::new(-50, 900), &screen()), Rect::new(0, 360, 300, 200));
        assert_eq!(clamp_move(rect, Point::new(700, 10), &screen()), Rect::new(500, 10, 300, 200));
    }

    #[test]
    fn test_try_resize_floors_and_rejects() {
        let rect = Rect::new(100, 100, 300, 200);
        assert_eq!(
            try_resize(rect, Size::new(10, 10), &screen()),
            Some(Rect::new(100, 100, 200, 150))
        );
        assert_eq!(try_resize(rect, Size::new(800, 200), &screen()), None);
        assert_eq!(try_resize(rect, Size::new(300, 461), &screen()), None);
        assert_eq!(
            try_resize(rect, Size::new(700, 460), &screen()),
            Some(Rect::new(100, 100, 700, 460))
        );
    }
}
