#![allow(clippy::module_inception)]

use crate::errors::errors::Error;

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod pipeline;
pub mod type_checker;

extern crate regex;

/// Byte offsets of a lexeme inside the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Returns the text of the given 1-based line, or `None` if the source is shorter.
pub fn get_line(source: &str, line: i32) -> Option<&str> {
    if line < 1 {
        return None;
    }

    source
        .split('\n')
        .nth((line - 1) as usize)
        .map(|text| text.trim_end_matches('\r'))
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line() {
        let source = "Hello, world!\nsecond\r\n\nTesting { }\n";
        assert_eq!(super::get_line(source, 1), Some("Hello, world!"));
        assert_eq!(super::get_line(source, 2), Some("second"));
        assert_eq!(super::get_line(source, 3), Some(""));
        assert_eq!(super::get_line(source, 4), Some("Testing { }"));
        assert_eq!(super::get_line(source, 0), None);
        assert_eq!(super::get_line(source, 9), None);
    }

    #[test]
    fn test_render_error_points_at_column() {
        use crate::errors::errors::{Error, ErrorImpl};
        use crate::lexer::tokens::{Token, TokenKind};
        use crate::Span;

        let source = "var x : int;\n  x := \"a\";";
        let token = Token::new(TokenKind::Identifier, String::from("x"), 2, 3, Span { start: 15, end: 16 });
        let error = Error::new(ErrorImpl::UndeclaredVariable { variable: String::from("x") }, Some(token));

        let rendered = super::render_error(&error, source);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Error near \"x\" on line 2 column 3: Undeclared variable x");
        assert_eq!(lines[1], "  2 | x := \"a\";");
        assert_eq!(lines[2], "    | ^");
    }
}

/// Renders a diagnostic followed by the offending source line and a caret.
///
/// ```text
/// Error near line 2 column 7: Invalid input character '#'
///   2 | print #;
///     |       ^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let mut rendered = error.to_string();

    let Some((line, column)) = error.get_position() else {
        return rendered;
    };
    let Some(line_text) = get_line(source, line) else {
        return rendered;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    let arrows = (column as usize).saturating_sub(removed_whitespace).max(1);

    rendered.push_str(&format!("\n{:>padding$} | {}", line_string, line_text_removed));
    rendered.push_str(&format!("\n{:>padding$} | {:>arrows$}", "", "^"));
    rendered
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (&string[start..], start)
}
