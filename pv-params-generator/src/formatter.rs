/// Keyword array formatter
///
/// Turns a raw byte stream into the body of a C initializer list: lowercase
/// `0x..` literals, comma separated, indented and wrapped at a fixed width.

use serde::{Deserialize, Serialize};

/// Default indentation of every array line (spaces)
pub const DEFAULT_INDENT: usize = 8;

/// Default width threshold for closing a line
pub const DEFAULT_LINE_WIDTH: usize = 120;

const SEPARATOR: &str = ", ";

/// Formatter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// Leading spaces on every line
    pub indent: usize,

    /// A line is closed once it reaches this many characters
    pub line_width: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

/// Formats byte slices into C array body lines
#[derive(Debug, Clone, Default)]
pub struct ArrayFormatter {
    config: FormatterConfig,
}

impl ArrayFormatter {
    /// Create a formatter with default indent and width
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom configuration
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Format `bytes` into initializer lines.
    ///
    /// Every line ends with a comma. The returned sequence always ends with
    /// an empty string, so joining it with `\n` leaves a newline after the
    /// last value. An empty input produces only that empty string.
    ///
    /// The width check runs before a token is appended. When it fires, the
    /// token placed last moves down to open the next line, so a closed line
    /// never holds the token that pushed it over the threshold.
    pub fn format(&self, bytes: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        let mut row: Vec<String> = Vec::new();

        for &byte in bytes {
            if !row.is_empty() && self.row_width(&row) >= self.config.line_width {
                // A lone token has nothing to carry over
                let carried = if row.len() > 1 { row.pop() } else { None };
                lines.push(self.render_row(&row));
                row.clear();
                row.extend(carried);
            }

            row.push(format!("0x{:02x}", byte));
        }

        if !row.is_empty() {
            lines.push(self.render_row(&row));
        }

        lines.push(String::new());
        lines
    }

    /// Width of a row without its trailing comma
    fn row_width(&self, row: &[String]) -> usize {
        let tokens: usize = row.iter().map(String::len).sum();
        self.config.indent + tokens + SEPARATOR.len() * (row.len() - 1)
    }

    fn render_row(&self, row: &[String]) -> String {
        format!("{}{},", " ".repeat(self.config.indent), row.join(SEPARATOR))
    }
}

/// Format `bytes` with the default configuration
pub fn format_c_array(bytes: &[u8]) -> Vec<String> {
    ArrayFormatter::new().format(bytes)
}
