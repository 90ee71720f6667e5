/// pv_params.h header generator
///
/// Walks every configured target, reads the keyword model of each enabled
/// wake word and writes one header per target with the models embedded as
/// aligned `uint8_t` arrays behind per-language preprocessor guards.

use crate::config::{GeneratorConfig, TargetSpec};
use crate::formatter::ArrayFormatter;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Name of the generated header inside every target include directory
pub const HEADER_FILE_NAME: &str = "pv_params.h";

/// License banner, include guard and includes at the top of every header
pub const HEADER_PREAMBLE: &str = r#"
/*
    Copyright 2020-2022 Picovoice Inc.

    You may not use this file except in compliance with the license. A copy of the license is located in the "LICENSE"
    file accompanying this source.

    Unless required by applicable law or agreed to in writing, software distributed under the License is distributed on
    an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the License for the
    specific language governing permissions and limitations under the License.
*/

#ifndef PV_PARAMS_H
#define PV_PARAMS_H

#include <stdint.h>

"#;

/// Closes the include guard
pub const HEADER_FOOTER: &str = "\n#endif // PV_PARAMS_H\n\n";

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("No wake words configured for language '{0}'")]
    UnknownLanguage(String),

    #[error("No language name configured for language '{0}'")]
    UnnamedLanguage(String),

    #[error("Failed to read keyword file {}: {source}", .path.display())]
    KeywordFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Keyword file is empty: {}", .0.display())]
    EmptyKeywordFile(PathBuf),

    #[error("Wake word {wake_word:?} ({language}) does not map to a C identifier")]
    InvalidWakeWord { language: String, wake_word: String },

    #[error("Symbol {symbol} is generated twice for language '{language}'")]
    DuplicateSymbol { language: String, symbol: String },

    #[error("Failed to write header {}: {source}", .path.display())]
    HeaderWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Summary of one generated header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSummary {
    pub path: PathBuf,
    pub languages: Vec<String>,
    pub arrays: usize,
    pub keyword_bytes: usize,
}

/// Result of a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub headers: Vec<HeaderSummary>,

    /// True when nothing was written to disk
    pub dry_run: bool,
}

impl GenerationReport {
    pub fn total_arrays(&self) -> usize {
        self.headers.iter().map(|h| h.arrays).sum()
    }
}

/// Header text for one target, not yet written
#[derive(Debug, Clone)]
pub struct RenderedHeader {
    pub text: String,
    pub summary: HeaderSummary,
}

/// Generates pv_params.h headers from a [`GeneratorConfig`]
pub struct HeaderGenerator {
    config: GeneratorConfig,
    formatter: ArrayFormatter,
}

impl HeaderGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let formatter = ArrayFormatter::with_config(config.formatter);
        Self { config, formatter }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Render and write every target header
    ///
    /// Targets are processed in order; the first failure aborts the run and
    /// headers written before it are left in place.
    pub fn generate(&self) -> Result<GenerationReport, GeneratorError> {
        self.run(false)
    }

    /// Render every target header without writing anything
    pub fn dry_run(&self) -> Result<GenerationReport, GeneratorError> {
        self.run(true)
    }

    fn run(&self, dry_run: bool) -> Result<GenerationReport, GeneratorError> {
        let mut report = GenerationReport {
            headers: Vec::with_capacity(self.config.targets.len()),
            dry_run,
        };

        for target in &self.config.targets {
            let rendered = self.render_header(target)?;

            if dry_run {
                info!(
                    "Would write {} ({} arrays)",
                    rendered.summary.path.display(),
                    rendered.summary.arrays
                );
            } else {
                write_header(&rendered.summary.path, &rendered.text)?;
                info!(
                    "Wrote {} ({} arrays, {} keyword bytes)",
                    rendered.summary.path.display(),
                    rendered.summary.arrays,
                    rendered.summary.keyword_bytes
                );
            }

            report.headers.push(rendered.summary);
        }

        Ok(report)
    }

    /// Build the complete header text for one target
    pub fn render_header(&self, target: &TargetSpec) -> Result<RenderedHeader, GeneratorError> {
        let path = self.config.header_path(target);
        debug!("Rendering {} for languages {:?}", path.display(), target.languages);

        let mut text = String::from(HEADER_PREAMBLE);
        let mut arrays = 0;
        let mut keyword_bytes = 0;

        for language in &target.languages {
            let block = self.render_language(language)?;
            text.push_str(&block.text);
            arrays += block.arrays;
            keyword_bytes += block.keyword_bytes;
        }

        text.push_str(HEADER_FOOTER);

        Ok(RenderedHeader {
            text,
            summary: HeaderSummary {
                path,
                languages: target.languages.clone(),
                arrays,
                keyword_bytes,
            },
        })
    }

    /// `#if defined(...)` block with one array per wake word of a language
    fn render_language(&self, language: &str) -> Result<LanguageBlock, GeneratorError> {
        let wake_words = self
            .config
            .wake_words
            .get(language)
            .ok_or_else(|| GeneratorError::UnknownLanguage(language.to_string()))?;

        let name = self
            .config
            .language_names
            .get(language)
            .ok_or_else(|| GeneratorError::UnnamedLanguage(language.to_string()))?;

        let mut block = LanguageBlock {
            text: format!("#if defined(__PV_LANGUAGE_{}__)\n\n", name.to_uppercase()),
            arrays: 0,
            keyword_bytes: 0,
        };
        let mut symbols = HashSet::new();

        for (index, wake_word) in wake_words.iter().enumerate() {
            let symbol = self
                .config
                .symbol_policy
                .array_symbol(index, wake_word)
                .ok_or_else(|| GeneratorError::InvalidWakeWord {
                    language: language.to_string(),
                    wake_word: wake_word.clone(),
                })?;

            if !symbols.insert(symbol.clone()) {
                return Err(GeneratorError::DuplicateSymbol {
                    language: language.to_string(),
                    symbol,
                });
            }

            let path = self.config.resources.keyword_file(language, wake_word);
            let bytes = read_keyword_file(&path)?;
            debug!("{} <- {} ({} bytes)", symbol, path.display(), bytes.len());

            block.text.push_str(&format!("// Wake-word = {}\n", wake_word));
            block.text.push_str(&format!(
                "static const uint8_t {}[] __attribute__ ((aligned (16))) = {{\n",
                symbol
            ));
            block.text.push_str(&self.formatter.format(&bytes).join("\n"));
            block.text.push_str("};\n\n");

            block.arrays += 1;
            block.keyword_bytes += bytes.len();
        }

        block.text.push_str("#endif\n\n");
        Ok(block)
    }
}

struct LanguageBlock {
    text: String,
    arrays: usize,
    keyword_bytes: usize,
}

fn read_keyword_file(path: &Path) -> Result<Vec<u8>, GeneratorError> {
    let bytes = std::fs::read(path).map_err(|source| GeneratorError::KeywordFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.is_empty() {
        return Err(GeneratorError::EmptyKeywordFile(path.to_path_buf()));
    }

    Ok(bytes)
}

/// Write a rendered header; the parent directory must already exist
pub fn write_header(path: &Path, text: &str) -> Result<(), GeneratorError> {
    let to_error = |source: std::io::Error| GeneratorError::HeaderWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(text.as_bytes()).map_err(to_error)?;
    writer.flush().map_err(to_error)?;

    Ok(())
}
