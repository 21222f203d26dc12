//! Measuring rendered text on the terminal.

use unicode_width::UnicodeWidthStr;

/// Removes CSI (`ESC [ ... letter`) and OSC (`ESC ] ... BEL`) sequences.
pub(crate) fn strip_ansi(s: &str) -> String {
    let mut plain = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            plain.push(c);
            continue;
        }
        match chars.peek() {
            Some('[') => {
                chars.next();
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    plain
}

/// Number of terminal cells `s` occupies, ignoring escape sequences.
pub(crate) fn display_width(s: &str) -> usize {
    strip_ansi(s).width()
}

/// Physical rows a single line takes up in a terminal `columns` wide.
///
/// An empty line still takes one row.
#[allow(clippy::arithmetic_side_effects)]
pub(crate) fn wrapped_rows(line: &str, columns: u16) -> usize {
    let columns = usize::from(columns.max(1));
    display_width(line).div_ceil(columns).max(1)
}
