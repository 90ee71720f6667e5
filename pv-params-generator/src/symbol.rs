//! C symbol names for keyword arrays

use serde::{Deserialize, Serialize};

/// Symbol used for the first wake word of every language block
pub const DEFAULT_ARRAY_SYMBOL: &str = "DEFAULT_KEYWORD_ARRAY";

/// Suffix appended to every non-default array symbol
pub const ARRAY_SYMBOL_SUFFIX: &str = "_KEYWORD_ARRAY";

/// How a wake word is turned into a C identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPolicy {
    /// ASCII alphanumerics are uppercased, everything else becomes `_`
    #[default]
    Sanitized,

    /// Uppercase the wake word as-is. Spaces and non-ASCII letters end up in
    /// the identifier, which most C compilers reject.
    Verbatim,
}

impl SymbolPolicy {
    /// Identifier stem for a wake word, or `None` if nothing usable remains
    pub fn stem(&self, wake_word: &str) -> Option<String> {
        let stem = match self {
            SymbolPolicy::Verbatim => wake_word.to_uppercase(),
            SymbolPolicy::Sanitized => sanitize(wake_word),
        };

        if stem.is_empty() || stem.chars().all(|c| c == '_') {
            None
        } else {
            Some(stem)
        }
    }

    /// Array symbol for the wake word at `index` within its language block
    pub fn array_symbol(&self, index: usize, wake_word: &str) -> Option<String> {
        if index == 0 {
            return Some(DEFAULT_ARRAY_SYMBOL.to_string());
        }

        self.stem(wake_word)
            .map(|stem| format!("{}{}", stem, ARRAY_SYMBOL_SUFFIX))
    }
}

fn sanitize(wake_word: &str) -> String {
    let mut out: String = wake_word
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();

    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("picovoice", "PICOVOICE" ; "single_word")]
    #[test_case("hey computer", "HEY_COMPUTER" ; "space")]
    #[test_case("olá computador", "OL__COMPUTADOR" ; "accented")]
    #[test_case("hey-siri2", "HEY_SIRI2" ; "punctuation_and_digit")]
    #[test_case("3po", "_3PO" ; "leading_digit")]
    fn test_sanitized_stem(wake_word: &str, expected: &str) {
        assert_eq!(SymbolPolicy::Sanitized.stem(wake_word).unwrap(), expected);
    }

    #[test]
    fn test_verbatim_stem_keeps_raw_characters() {
        let policy = SymbolPolicy::Verbatim;
        assert_eq!(policy.stem("hey computer").unwrap(), "HEY COMPUTER");
        assert_eq!(policy.stem("konnichiwa konpyūtā").unwrap(), "KONNICHIWA KONPYŪTĀ");
    }

    #[test]
    fn test_first_word_is_default() {
        for policy in [SymbolPolicy::Sanitized, SymbolPolicy::Verbatim] {
            assert_eq!(policy.array_symbol(0, "porcupine").unwrap(), DEFAULT_ARRAY_SYMBOL);
            assert_eq!(policy.array_symbol(0, "").unwrap(), DEFAULT_ARRAY_SYMBOL);
        }
    }

    #[test]
    fn test_later_words_get_suffix() {
        let policy = SymbolPolicy::default();
        assert_eq!(policy.array_symbol(1, "picovoice").unwrap(), "PICOVOICE_KEYWORD_ARRAY");
        assert_eq!(policy.array_symbol(3, "alexa").unwrap(), "ALEXA_KEYWORD_ARRAY");
    }

    #[test]
    fn test_unusable_stem() {
        assert!(SymbolPolicy::Sanitized.array_symbol(1, "").is_none());
        assert!(SymbolPolicy::Sanitized.array_symbol(1, "!!").is_none());
        assert!(SymbolPolicy::Verbatim.array_symbol(1, "").is_none());
    }
}
