use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use pubsift_core::config_file;
use pubsift_ingest::{FileSource, HttpSource, PageSource, PipelineConfig, Variant};

mod output;

use output::ColorMode;

/// Publication list scraper - turn an academic publications page into JSON records
#[derive(Parser, Debug)]
#[command(name = "pubsift", version, about, long_about = None)]
struct Cli {
    /// Kind of listing page: sections by publication type, or by research theme
    #[arg(long, value_enum, default_value_t = VariantArg::Typed)]
    variant: VariantArg,

    /// Listing page URL
    #[arg(long)]
    url: Option<String>,

    /// Path of the JSON record array
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path of the theme index (themed variant)
    #[arg(long)]
    themes_output: Option<PathBuf>,

    /// Config file to use instead of the default lookup
    #[arg(long)]
    config: Option<PathBuf>,

    /// Parse a saved HTML file instead of fetching the URL
    #[arg(long)]
    input: Option<PathBuf>,

    /// Print records to stdout without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log decisions at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Typed,
    Themed,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Typed => Variant::Typed,
            VariantArg::Themed => Variant::Themed,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;
    let source: Box<dyn PageSource> = match &cli.input {
        Some(path) => Box::new(FileSource::new(path.clone())),
        None => Box::new(HttpSource::new(config.fetch_timeout)?),
    };

    let collected = pubsift_ingest::collect(&config, source.as_ref()).await?;

    if cli.dry_run {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &collected.records)?;
        writeln!(out)?;

        let color = ColorMode(!cli.no_color && std::io::stderr().is_terminal());
        let mut err = std::io::stderr();
        output::print_summary(&mut err, &config, &collected.summary(), true, color)?;
        return Ok(());
    }

    let summary = pubsift_ingest::write_outputs(&collected, &config)?;
    let color = ColorMode(!cli.no_color && std::io::stdout().is_terminal());
    let mut out = std::io::stdout();
    output::print_summary(&mut out, &config, &summary, false, color)?;
    Ok(())
}

/// Logs go to stderr; `-v` forces debug, otherwise `RUST_LOG` or `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Resolve configuration: CLI flags > config file > variant preset
fn resolve_config(cli: &Cli) -> anyhow::Result<PipelineConfig> {
    let mut config = PipelineConfig::for_variant(cli.variant.into());

    let file = match &cli.config {
        Some(path) => config_file::load_from_path(path)
            .with_context(|| format!("could not load config file {}", path.display()))?,
        None => config_file::load_config(),
    };
    config.apply_file(&file)?;

    if let Some(url) = &cli.url {
        config.source_url = url.clone();
    }
    if let Some(path) = &cli.output {
        config.output_path = path.clone();
    }
    if let Some(path) = &cli.themes_output {
        config.themes_path = Some(path.clone());
    }

    tracing::debug!(
        variant = config.variant.as_str(),
        url = %config.source_url,
        output = %config.output_path.display(),
        "configuration resolved"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["pubsift"]).unwrap();
        assert_eq!(cli.variant, VariantArg::Typed);
        assert!(!cli.dry_run);
        assert!(cli.url.is_none());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["pubsift", "--config", "/nonexistent/pubsift.toml"]).unwrap();
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn test_cli_flags_override_file_and_preset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[source]\nurl = \"https://file.example/p/\"\ntimeout_secs = 7\n\n[output]\nrecords_path = \"from-file.json\""
        )
        .unwrap();
        let config_path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from([
            "pubsift",
            "--variant",
            "themed",
            "--url",
            "https://example.org/p/",
            "--themes-output",
            "themes.json",
            "--config",
            config_path,
        ])
        .unwrap();
        assert_eq!(cli.variant, VariantArg::Themed);

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.variant, Variant::Themed);
        assert_eq!(config.source_url, "https://example.org/p/");
        assert_eq!(config.output_path, PathBuf::from("from-file.json"));
        assert_eq!(config.themes_path, Some(PathBuf::from("themes.json")));
        assert_eq!(config.fetch_timeout, std::time::Duration::from_secs(7));

        let cli = Cli::try_parse_from([
            "pubsift",
            "--output",
            "out.json",
            "--config",
            config_path,
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.output_path, PathBuf::from("out.json"));
        assert_eq!(config.source_url, "https://file.example/p/");
    }

    #[test]
    fn test_cli_rejects_unknown_variant() {
        assert!(Cli::try_parse_from(["pubsift", "--variant", "weekly"]).is_err());
    }
}
