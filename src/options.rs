//! Configuration options for PYON encoding.
//!
//! This module provides [`EncodeOptions`], which controls the layout of
//! encoded output. The default options produce the canonical single-line
//! form; a nonzero indent switches the encoder into its width-aware pretty
//! mode.
//!
//! ## Examples
//!
//! ```rust
//! use serde_pyon::{EncodeOptions, encode_with_options, pyon};
//!
//! let value = pyon!({"a": [1, 2, 3]});
//!
//! // Canonical single-line form
//! let compact = encode_with_options(&value, &EncodeOptions::new());
//! assert_eq!(compact, "{'a': [1, 2, 3]}");
//!
//! // Pretty form, breaking groupings that run past 20 columns
//! let options = EncodeOptions::pretty().with_width(20);
//! let pretty = encode_with_options(&value, &options);
//! ```

/// Configuration options for PYON encoding.
///
/// `indent` is the number of spaces per nesting level; zero (the default)
/// keeps everything on one line. `width` is the column budget a grouping's
/// single-line form must fit in before it is broken across lines, and is
/// only consulted when `indent` is nonzero.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::EncodeOptions;
///
/// // Default single-line output
/// let options = EncodeOptions::new();
///
/// // Pretty-printed with 4-space indentation
/// let options = EncodeOptions::pretty();
///
/// // Custom configuration
/// let options = EncodeOptions::new().with_indent(2).with_width(80);
/// ```
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    pub indent: usize,
    pub width: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: 0,
            width: 160,
        }
    }
}

impl EncodeOptions {
    /// Creates default options (single-line output, 160-column width).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::EncodeOptions;
    ///
    /// let options = EncodeOptions::new();
    /// assert_eq!(options.indent, 0);
    /// assert_eq!(options.width, 160);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output with 4-space indentation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::EncodeOptions;
    ///
    /// let options = EncodeOptions::pretty();
    /// assert_eq!(options.indent, 4);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        EncodeOptions {
            indent: 4,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// Zero keeps the output on a single line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::EncodeOptions;
    ///
    /// let options = EncodeOptions::new().with_indent(2);
    /// assert_eq!(options.indent, 2);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the column budget for keeping a grouping on one line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::EncodeOptions;
    ///
    /// let options = EncodeOptions::pretty().with_width(80);
    /// assert_eq!(options.width, 80);
    /// ```
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}
