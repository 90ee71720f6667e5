//! pv_params.h generator
//!
//! Embeds Porcupine keyword models (`.ppn`) into C headers for the MCU demos:
//! - Per-language `#if defined(__PV_LANGUAGE_<NAME>__)` blocks
//! - One 16-byte aligned `uint8_t` array per wake word
//! - Configurable catalog, boards and resource layout (JSON/YAML)

pub mod config;
pub mod formatter;
pub mod generator;
pub mod symbol;

pub use config::{
    ConfigError, GeneratorConfig, LanguageTable, ResourceLayout, TargetSpec, WakeWordCatalog,
};
pub use formatter::{format_c_array, ArrayFormatter, FormatterConfig};
pub use generator::{
    write_header, GenerationReport, GeneratorError, HeaderGenerator, HeaderSummary,
    RenderedHeader, HEADER_FILE_NAME,
};
pub use symbol::{SymbolPolicy, DEFAULT_ARRAY_SYMBOL};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging
///
/// Logs go to stderr so generated output on stdout stays clean.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pv_params_generator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
