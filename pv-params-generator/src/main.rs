//! pv_params.h generator CLI
//!
//! Run without arguments from `demo/mcu` to regenerate every board header
//! from the built-in configuration.

use anyhow::{Context, Result};
use clap::Parser;
use pv_params_generator::{init_logging, GeneratorConfig, HeaderGenerator, SymbolPolicy};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "generate-pv-params")]
#[command(about = "Embed Porcupine keyword files into pv_params.h headers", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (JSON if it ends in .json, YAML otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Repository root containing resources/keyword_files*
    #[arg(long)]
    repo_root: Option<PathBuf>,

    /// Directory the board include paths are relative to
    #[arg(long)]
    output_root: Option<PathBuf>,

    /// Render every header but write nothing
    #[arg(long)]
    dry_run: bool,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,

    /// Uppercase wake words as-is instead of sanitizing them
    #[arg(long)]
    raw_symbols: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(repo_root) = &self.repo_root {
            config.resources.repo_root = repo_root.clone();
        }
        if let Some(output_root) = &self.output_root {
            config.output_root = output_root.clone();
        }
        if self.raw_symbols {
            config.symbol_policy = SymbolPolicy::Verbatim;
        }
    }
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    cli.apply(&mut config);

    config.validate().context("Invalid configuration")?;

    if cli.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    info!(
        "Generating {} headers (keyword files under {})",
        config.targets.len(),
        config.resources.repo_root.display()
    );

    let generator = HeaderGenerator::new(config);
    let report = if cli.dry_run {
        generator.dry_run()
    } else {
        generator.generate()
    }
    .context("Header generation failed")?;

    for header in &report.headers {
        println!(
            "{} {} [{}] {} arrays, {} bytes",
            if report.dry_run { "would write" } else { "wrote" },
            header.path.display(),
            header.languages.join(", "),
            header.arrays,
            header.keyword_bytes
        );
    }

    info!(
        "Done: {} headers, {} arrays",
        report.headers.len(),
        report.total_arrays()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::parse_from(["generate-pv-params"]);
        let mut config = GeneratorConfig::default();
        cli.apply(&mut config);

        assert_eq!(config, GeneratorConfig::default());
        assert!(!cli.dry_run);
        assert!(!cli.print_config);
    }

    #[test]
    fn test_path_overrides() {
        let cli = Cli::parse_from([
            "generate-pv-params",
            "--repo-root",
            "/src/porcupine",
            "--output-root",
            "/src/porcupine/demo/mcu",
        ]);
        let mut config = GeneratorConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.resources.repo_root, PathBuf::from("/src/porcupine"));
        assert_eq!(config.output_root, PathBuf::from("/src/porcupine/demo/mcu"));
        assert_eq!(config.symbol_policy, SymbolPolicy::Sanitized);
        assert_eq!(
            config.resources.keyword_file("en", "alexa"),
            PathBuf::from("/src/porcupine/resources/keyword_files/cortexm/alexa_cortexm.ppn")
        );
    }

    #[test]
    fn test_raw_symbols_flag() {
        let cli = Cli::parse_from(["generate-pv-params", "--raw-symbols", "--dry-run"]);
        let mut config = GeneratorConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.symbol_policy, SymbolPolicy::Verbatim);
        assert!(cli.dry_run);
        assert_eq!(config.resources.repo_root, PathBuf::from("../.."));
    }

    #[test]
    fn test_config_flag_parsed() {
        let cli = Cli::parse_from(["generate-pv-params", "-c", "boards.yaml"]);
        assert_eq!(cli.config, Some(PathBuf::from("boards.yaml")));
    }
}
