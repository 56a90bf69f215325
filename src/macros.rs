//! Utility macros for the compiler.
//!
//! - `MK_TOKEN!` - Creates a Token instance, with or without a text value

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$location` - The source location of the token's first byte
/// * `$value` - Optional text value (identifiers, numbers, unknown bytes)
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, location, "42".to_string());
/// let brace = MK_TOKEN!(TokenKind::LBrace, location);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $location:expr) => {
        Token {
            kind: $kind,
            location: $location,
            value: None,
        }
    };
    ($kind:expr, $location:expr, $value:expr) => {
        Token {
            kind: $kind,
            location: $location,
            value: Some($value),
        }
    };
}
