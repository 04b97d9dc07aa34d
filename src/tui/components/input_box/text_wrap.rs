//! Row layout for the input box.
//!
//! The buffer is split into visual rows as byte ranges, so rendering and
//! cursor placement read from the same layout and can never disagree.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content rows before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from the area's left edge to the first text column (border + padding)
pub(super) const CONTENT_OFFSET_X: u16 = 2;
/// Offset from the area's top edge to the first text row (border)
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

/// Inner content width after subtracting border/padding. 0 if too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

pub(super) fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Display width of a string slice.
pub(super) fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Split `text` into visual rows of at most `width` columns.
///
/// Each row is a byte range into `text` that excludes the `\n` separating
/// logical lines. Long lines break after the last space that fits, or
/// mid-word if there is none. Always returns at least one row.
pub(super) fn visual_rows(text: &str, width: u16) -> Vec<Range<usize>> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let mut row_start = line_start;
        let mut col = 0;
        // Byte offset just after the last space in the current row
        let mut break_after: Option<usize> = None;

        for (i, c) in line.char_indices() {
            let at = line_start + i;
            let w = char_width(c);

            if col + w > width && at > row_start {
                let end = match break_after {
                    Some(b) if b > row_start && b < at => b,
                    _ => at,
                };
                rows.push(row_start..end);
                row_start = end;
                col = display_width(&text[row_start..at]);
                break_after = None;
            }

            col += w;
            if c == ' ' {
                break_after = Some(at + 1);
            }
        }

        let line_end = line_start + line.len();
        rows.push(row_start..line_end);
        line_start = line_end + 1;
    }

    rows
}

/// Index of the row holding byte offset `pos`. At a soft wrap the cursor
/// belongs to the start of the following row.
pub(super) fn row_of(rows: &[Range<usize>], pos: usize) -> usize {
    rows.iter().rposition(|r| r.start <= pos).unwrap_or(0)
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}
