//! reformadoc: reflows `///` XML documentation comments.
//!
//! Text inside a comment is re-wrapped to a wrap column; block elements
//! (`<summary>`, `<para>`, ...) go on their own lines, list and table parts
//! are indented, and `<code>` content is kept verbatim apart from its
//! leading comment markers. The result is a list of [`TextEdit`]s against the
//! original text, ordered and non-overlapping, so callers can apply them with
//! [`apply_edits`] or hand them to an editor.
//!
//! # Example
//!
//! ```
//! use reformadoc::{apply_edits, format_document, FormatConfig};
//!
//! let src = "/// <summary>Adds   two numbers.</summary>\nint Add(int a, int b);\n";
//! let edits = format_document(src, &FormatConfig::default()).unwrap();
//! assert_eq!(
//!     apply_edits(src, &edits),
//!     "/// <summary>\n/// Adds two numbers.\n/// </summary>\nint Add(int a, int b);\n"
//! );
//! ```

mod breaker;
pub mod column;
pub mod config;
pub mod edit;
pub mod element;
mod emitter;
pub mod error;
pub mod formatter;
pub mod parse;
pub mod settings;
pub mod syntax;
mod walker;

pub use column::{column_after, column_with_edits, initial_column};
pub use config::{FormatConfig, NewLine};
pub use edit::{apply_edits, is_ordered, TextEdit};
pub use element::{classify, ElementFormatting};
pub use error::{ConfigError, ConfigResult, FormatError, FormatResult};
pub use formatter::{format_comment, format_document, format_span};
pub use parse::parse_document;
pub use syntax::{CommentKind, DocComment, Span, XmlNode};
