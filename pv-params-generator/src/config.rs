//! Generator configuration: wake-word catalog, targets and resource layout

use crate::formatter::FormatterConfig;
use crate::symbol::SymbolPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    #[error("Invalid config format: {0}")]
    InvalidFormat(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Language code -> ordered wake words. The first entry becomes the default
/// keyword of that language.
pub type WakeWordCatalog = BTreeMap<String, Vec<String>>;

/// Language code -> full language name used in `__PV_LANGUAGE_<NAME>__`
pub type LanguageTable = BTreeMap<String, String>;

/// One generated header: an include directory and the languages it enables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Include directory, relative to the output root
    pub include_dir: PathBuf,

    /// Language codes, in block order
    pub languages: Vec<String>,
}

impl TargetSpec {
    pub fn new(include_dir: impl Into<PathBuf>, languages: &[&str]) -> Self {
        Self {
            include_dir: include_dir.into(),
            languages: languages.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Where keyword files live on disk
///
/// The default language reads from `<repo_root>/<keyword_dir>/<platform>`,
/// every other language from `<repo_root>/<keyword_dir>_<lang>/<platform>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLayout {
    /// Repository root that holds `resources/`
    pub repo_root: PathBuf,

    /// Language whose keyword directory carries no suffix
    pub default_language: String,

    /// Keyword directory stem, relative to the repository root
    pub keyword_dir: PathBuf,

    /// Platform directory and keyword file suffix
    pub platform: String,
}

impl Default for ResourceLayout {
    fn default() -> Self {
        Self {
            repo_root: PathBuf::from("../.."),
            default_language: "en".to_string(),
            keyword_dir: PathBuf::from("resources/keyword_files"),
            platform: "cortexm".to_string(),
        }
    }
}

impl ResourceLayout {
    /// Keyword directory for a language
    ///
    /// The language suffix goes on the last component of `keyword_dir`, so a
    /// trailing slash in the configured stem does not matter.
    pub fn resource_dir(&self, language: &str) -> PathBuf {
        let stem = match self.keyword_dir.file_name() {
            Some(name) if language != self.default_language => {
                let mut suffixed = name.to_os_string();
                suffixed.push(format!("_{}", language));
                self.keyword_dir.with_file_name(suffixed)
            }
            _ => self.keyword_dir.clone(),
        };

        self.repo_root.join(stem).join(&self.platform)
    }

    /// Path of the binary model for one wake word
    pub fn keyword_file(&self, language: &str, wake_word: &str) -> PathBuf {
        self.resource_dir(language)
            .join(format!("{}_{}.ppn", wake_word, self.platform))
    }
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Base directory that target include directories are relative to
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    #[serde(default)]
    pub resources: ResourceLayout,

    #[serde(default = "default_language_names")]
    pub language_names: LanguageTable,

    pub wake_words: WakeWordCatalog,

    pub targets: Vec<TargetSpec>,

    #[serde(default)]
    pub formatter: FormatterConfig,

    #[serde(default)]
    pub symbol_policy: SymbolPolicy,
}

fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_language_names() -> LanguageTable {
    [
        ("en", "english"),
        ("de", "german"),
        ("es", "spanish"),
        ("fr", "french"),
        ("it", "italian"),
        ("ja", "japanese"),
        ("ko", "korean"),
        ("pt", "portuguese"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}

fn default_wake_words() -> WakeWordCatalog {
    let entries: [(&str, &[&str]); 8] = [
        ("en", &["porcupine", "picovoice", "bumblebee", "alexa"]),
        ("de", &["hey computer"]),
        ("es", &["hola computadora"]),
        ("fr", &["salut ordinateur"]),
        ("it", &["ciao computer"]),
        ("ja", &["konnichiwa konpyūtā"]),
        ("ko", &["annyeong keompyuteo"]),
        ("pt", &["olá computador"]),
    ];

    entries
        .into_iter()
        .map(|(code, words)| {
            (
                code.to_string(),
                words.iter().map(|w| w.to_string()).collect(),
            )
        })
        .collect()
}

fn default_targets() -> Vec<TargetSpec> {
    const ALL: &[&str] = &["en", "de", "es", "fr", "it", "ja", "ko", "pt"];
    const EUROPEAN: &[&str] = &["en", "de", "es", "fr"];

    vec![
        TargetSpec::new("imxrt1050/imxrt1050-evkb/inc", ALL),
        TargetSpec::new("stm32f407/stm32f407g-disc1/Inc", EUROPEAN),
        TargetSpec::new("stm32f411/stm32f411e-disco/Inc", EUROPEAN),
        TargetSpec::new("stm32f469/stm32f469i-disco/Inc", ALL),
        TargetSpec::new("stm32f769/stm32f769i-disco/Inc", ALL),
        TargetSpec::new("stm32h735/stm32h735g-dk/Inc", EUROPEAN),
        TargetSpec::new("stm32h747/stm32h747i-disco/CM7/Inc", ALL),
    ]
}

impl Default for GeneratorConfig {
    /// The MCU demo boards and their keyword sets
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            resources: ResourceLayout::default(),
            language_names: default_language_names(),
            wake_words: default_wake_words(),
            targets: default_targets(),
            formatter: FormatterConfig::default(),
            symbol_policy: SymbolPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Configuration with the default tables but no targets
    pub fn empty() -> Self {
        Self {
            targets: Vec::new(),
            ..Default::default()
        }
    }

    /// Validate configuration
    ///
    /// Language lookups are left to generation time; this only rejects
    /// values that can never produce a header.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resources.default_language.is_empty() {
            return Err(ConfigError::Invalid(
                "Default language must not be empty".to_string(),
            ));
        }

        if self.resources.platform.is_empty() {
            return Err(ConfigError::Invalid(
                "Platform must not be empty".to_string(),
            ));
        }

        // Suffixed language directories are built from the last component
        if self.resources.keyword_dir.file_name().is_none() {
            return Err(ConfigError::Invalid(format!(
                "Keyword directory {} must end in a directory name",
                self.resources.keyword_dir.display()
            )));
        }

        if self.formatter.line_width == 0 {
            return Err(ConfigError::Invalid(
                "Line width must be greater than zero".to_string(),
            ));
        }

        for (language, words) in &self.wake_words {
            if let Some(word) = words.iter().find(|w| w.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "Blank wake word {:?} for language '{}'",
                    word, language
                )));
            }

            // Wake words become file names; they must not walk out of the
            // keyword directory
            if let Some(word) = words
                .iter()
                .find(|w| w.chars().any(|c| c == '\\' || std::path::is_separator(c)))
            {
                return Err(ConfigError::Invalid(format!(
                    "Wake word {:?} for language '{}' contains a path separator",
                    word, language
                )));
            }
        }

        for target in &self.targets {
            if target.include_dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(
                    "Target include directory must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Load from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Export to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Load from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Export to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("{}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    /// Path of the header generated for a target
    pub fn header_path(&self, target: &TargetSpec) -> PathBuf {
        self.output_root
            .join(&target.include_dir)
            .join(crate::HEADER_FILE_NAME)
    }
}
