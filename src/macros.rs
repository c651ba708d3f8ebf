//! Utility macros for the interpreter.
//!
//! - `MK_TOKEN!` - Creates a Token instance

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's lexeme
/// * `$line` - 1-based line of the first character
/// * `$column` - 1-based column of the first character
/// * `$span` - Byte offsets in the source
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntegerLiteral, "42".to_string(), 1, 5, span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $line:expr, $column:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            line: $line,
            column: $column,
            span: $span,
        }
    };
}
