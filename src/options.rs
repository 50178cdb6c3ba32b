//! Configuration for TOON encoding.

/// Options controlling the textual layout of encoded TOON.
///
/// Only the indentation width is configurable. Decoding treats indentation
/// relatively, so documents encoded at any width re-parse to the same tree.
///
/// # Examples
///
/// ```rust
/// use toon::{toon, to_string_with_options, EncodeOptions};
///
/// let value = toon!({"outer": {"inner": 1}});
/// let wide = to_string_with_options(&value, EncodeOptions::new().with_indent(4)).unwrap();
/// assert_eq!(wide, "outer: \n    inner: 1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Spaces emitted per nesting level. Defaults to 2.
    pub indent: usize,
}

impl EncodeOptions {
    /// Creates options with the default layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per nesting level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions { indent: 2 }
    }
}
