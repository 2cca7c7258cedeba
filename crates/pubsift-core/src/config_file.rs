use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::HeadingRule;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub source: Option<SourceConfig>,
    pub output: Option<OutputConfig>,
    pub sections: Option<SectionsConfig>,
    pub parsing: Option<ParsingFileConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub records_path: Option<String>,
    pub themes_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionsConfig {
    /// Heading-to-type rules for the typed variant, checked in order.
    pub headings: Option<Vec<HeadingRule>>,
    /// Allowed theme headings for the themed variant.
    pub themes: Option<Vec<String>>,
    pub lenient_nesting: Option<bool>,
    pub fallback_all_items: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsingFileConfig {
    pub min_title_chars: Option<usize>,
    pub sentence_fallback: Option<bool>,
    pub resource_labels: Option<Vec<String>>,
    pub stopwords: Option<Vec<String>>,
}

/// Platform config directory path: `<config_dir>/pubsift/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pubsift").join("config.toml"))
}

/// Load config by cascading CWD `.pubsift.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pubsift.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let source = match (base.source, overlay.source) {
        (Some(b), Some(o)) => Some(SourceConfig {
            url: o.url.or(b.url),
            timeout_secs: o.timeout_secs.or(b.timeout_secs),
        }),
        (b, o) => o.or(b),
    };

    let output = match (base.output, overlay.output) {
        (Some(b), Some(o)) => Some(OutputConfig {
            records_path: o.records_path.or(b.records_path),
            themes_path: o.themes_path.or(b.themes_path),
        }),
        (b, o) => o.or(b),
    };

    let sections = match (base.sections, overlay.sections) {
        (Some(b), Some(o)) => Some(SectionsConfig {
            headings: o.headings.or(b.headings),
            themes: o.themes.or(b.themes),
            lenient_nesting: o.lenient_nesting.or(b.lenient_nesting),
            fallback_all_items: o.fallback_all_items.or(b.fallback_all_items),
        }),
        (b, o) => o.or(b),
    };

    let parsing = match (base.parsing, overlay.parsing) {
        (Some(b), Some(o)) => Some(ParsingFileConfig {
            min_title_chars: o.min_title_chars.or(b.min_title_chars),
            sentence_fallback: o.sentence_fallback.or(b.sentence_fallback),
            resource_labels: o.resource_labels.or(b.resource_labels),
            stopwords: o.stopwords.or(b.stopwords),
        }),
        (b, o) => o.or(b),
    };

    ConfigFile {
        source,
        output,
        sections,
        parsing,
    }
}
