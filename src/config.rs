// src/config.rs
//
// Formatting configuration. Resolved once per pass and never mutated during it.

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, FormatResult};

/// Wrap column used when nothing else is configured.
pub const DEFAULT_WRAP_COLUMN: usize = 80;

/// Columns per tab stop by default.
pub const DEFAULT_TAB_SIZE: usize = 4;

/// Indentation added inside indenting elements by default.
pub const DEFAULT_INDENT_SIZE: usize = 4;

/// Line terminator written at forced line breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewLine {
    #[default]
    Lf,
    CrLf,
}

impl NewLine {
    pub fn as_str(self) -> &'static str {
        match self {
            NewLine::Lf => "\n",
            NewLine::CrLf => "\r\n",
        }
    }

    /// The terminator of the first line of `text`, if it has one.
    pub fn detect(text: &str) -> Option<NewLine> {
        let i = memchr::memchr(b'\n', text.as_bytes())?;
        if i > 0 && text.as_bytes()[i - 1] == b'\r' {
            Some(NewLine::CrLf)
        } else {
            Some(NewLine::Lf)
        }
    }

    /// Parses `lf` / `crlf` (any case).
    pub fn parse(s: &str) -> Option<NewLine> {
        if s.eq_ignore_ascii_case("lf") {
            Some(NewLine::Lf)
        } else if s.eq_ignore_ascii_case("crlf") {
            Some(NewLine::CrLf)
        } else {
            None
        }
    }
}

/// Formatting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Indent the exterior of continuation lines with tabs where possible.
    pub use_tabs: bool,
    /// Columns per tab stop (> 0).
    pub tab_size: usize,
    /// Interior indentation added by indenting elements.
    pub indent_size: usize,
    /// Line terminator written at forced line breaks.
    pub new_line: NewLine,
    /// Words that would end past this column go to the next line (> 0).
    pub wrap_column: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            use_tabs: false,
            tab_size: DEFAULT_TAB_SIZE,
            indent_size: DEFAULT_INDENT_SIZE,
            new_line: NewLine::Lf,
            wrap_column: DEFAULT_WRAP_COLUMN,
        }
    }
}

impl FormatConfig {
    pub fn with_wrap_column(mut self, wrap_column: usize) -> Self {
        self.wrap_column = wrap_column;
        self
    }

    pub fn with_tabs(mut self, use_tabs: bool) -> Self {
        self.use_tabs = use_tabs;
        self
    }

    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    pub fn with_indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    pub fn with_new_line(mut self, new_line: NewLine) -> Self {
        self.new_line = new_line;
        self
    }

    pub fn validate(&self) -> FormatResult<()> {
        if self.tab_size == 0 {
            return Err(FormatError::InvalidConfig("tab_size must be positive".into()));
        }
        if self.wrap_column == 0 {
            return Err(FormatError::InvalidConfig("wrap_column must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FormatConfig::default();
        assert_eq!(config.wrap_column, 80);
        assert_eq!(config.tab_size, 4);
        assert_eq!(config.new_line.as_str(), "\n");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_tab_size_and_wrap_column() {
        assert!(FormatConfig::default().with_tab_size(0).validate().is_err());
        assert!(FormatConfig::default().with_wrap_column(0).validate().is_err());
    }

    #[test]
    fn detects_first_terminator() {
        assert_eq!(NewLine::detect("a\r\nb\n"), Some(NewLine::CrLf));
        assert_eq!(NewLine::detect("a\nb\r\n"), Some(NewLine::Lf));
        assert_eq!(NewLine::detect("abc"), None);
    }

    #[test]
    fn deserializes_partial_toml() {
        let config: FormatConfig = toml::from_str("wrap_column = 40\nnew_line = \"crlf\"").unwrap();
        assert_eq!(config.wrap_column, 40);
        assert_eq!(config.new_line, NewLine::CrLf);
        assert_eq!(config.tab_size, 4);
    }
}
