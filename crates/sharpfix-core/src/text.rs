//! Text position and layout utilities.
//!
//! ## Coordinate Conventions
//!
//! - Lines and columns are **1-indexed** (matching editor conventions)
//! - Byte offsets are **0-indexed**
//! - Columns count bytes, not characters
//!
//! The layout helpers (`line_indentation`, `detect_indent_unit`,
//! `detect_newline`) let rewrites synthesize code that matches the
//! surrounding file before the formatter sees it.

use crate::patch::Span;

/// Convert a byte offset to 1-indexed line and column.
///
/// If `offset` exceeds content length, returns position at end of content.
pub fn byte_offset_to_position(content: &str, offset: usize) -> (u32, u32) {
    let offset = offset.min(content.len());
    let mut line = 1u32;
    let mut col = 1u32;

    for &byte in &content.as_bytes()[..offset] {
        if byte == b'\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}

/// Convert 1-indexed line and column to byte offset.
///
/// Line or column values of 0 are treated as 1. If the position is beyond
/// the content, returns the content length.
pub fn position_to_byte_offset(content: &str, line: u32, col: u32) -> usize {
    let line = line.max(1);
    let col = col.max(1);
    let mut current_line = 1u32;
    let mut line_start = 0usize;

    if line > 1 {
        for (i, byte) in content.bytes().enumerate() {
            if byte == b'\n' {
                current_line += 1;
                if current_line == line {
                    line_start = i + 1;
                    break;
                }
            }
        }
        if current_line < line {
            return content.len();
        }
    }

    let line_end = content[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(content.len());
    (line_start + (col as usize - 1)).min(line_end)
}

/// Offset of the first byte of the line containing `offset`.
pub fn line_start(content: &str, offset: usize) -> usize {
    let offset = offset.min(content.len());
    content[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Leading whitespace of the line containing `offset`.
pub fn line_indentation(content: &str, offset: usize) -> &str {
    let start = line_start(content, offset);
    let rest = &content[start..];
    let end = rest
        .char_indices()
        .find(|(_, c)| *c != ' ' && *c != '\t')
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Guess the file's indentation unit from its indented lines.
///
/// Returns a tab if any line is tab-indented, otherwise the smallest
/// non-zero run of leading spaces. Files with no indentation get four spaces.
pub fn detect_indent_unit(content: &str) -> String {
    let mut smallest: Option<usize> = None;
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with('\t') {
            return "\t".to_string();
        }
        let spaces = line.len() - line.trim_start_matches(' ').len();
        if spaces > 0 {
            smallest = Some(smallest.map_or(spaces, |s| s.min(spaces)));
        }
    }
    " ".repeat(smallest.unwrap_or(4))
}

/// The line terminator used by `content` (`"\r\n"` or `"\n"`).
pub fn detect_newline(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Extract the text covered by `span`, clamped to the content.
pub fn span_text(content: &str, span: Span) -> &str {
    let end = span.end.min(content.len());
    let start = span.start.min(end);
    &content[start..end]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_to_position_counts_lines() {
        let content = "class A\n{\n    int x;\n}";
        assert_eq!(byte_offset_to_position(content, 0), (1, 1));
        assert_eq!(byte_offset_to_position(content, 6), (1, 7));
        assert_eq!(byte_offset_to_position(content, 8), (2, 1));
        assert_eq!(byte_offset_to_position(content, 14), (3, 5));
        assert_eq!(byte_offset_to_position(content, 1000), (4, 2));
    }

    #[test]
    fn position_to_offset_round_trips() {
        let content = "class A\n{\n    int x;\n}";
        for offset in [0, 3, 8, 10, 14, 20] {
            let (line, col) = byte_offset_to_position(content, offset);
            assert_eq!(position_to_byte_offset(content, line, col), offset);
        }
        assert_eq!(position_to_byte_offset(content, 99, 1), content.len());
        assert_eq!(position_to_byte_offset(content, 1, 99), 7);
    }

    #[test]
    fn indentation_of_line() {
        let content = "class A\n{\n    void M()\n\t\tx();\n}";
        assert_eq!(line_indentation(content, 0), "");
        assert_eq!(line_indentation(content, 16), "    ");
        assert_eq!(line_indentation(content, 26), "\t\t");
    }

    #[test]
    fn indent_unit_detection() {
        assert_eq!(detect_indent_unit("a\n  b\n    c\n"), "  ");
        assert_eq!(detect_indent_unit("a\n\tb\n"), "\t");
        assert_eq!(detect_indent_unit("a\nb\n"), "    ");
    }

    #[test]
    fn newline_detection() {
        assert_eq!(detect_newline("a\r\nb"), "\r\n");
        assert_eq!(detect_newline("a\nb"), "\n");
    }

    #[test]
    fn span_text_clamps() {
        assert_eq!(span_text("hello", Span::new(1, 3)), "el");
        assert_eq!(span_text("hello", Span::new(3, 99)), "lo");
    }
}
