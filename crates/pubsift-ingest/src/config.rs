use std::path::PathBuf;
use std::time::Duration;

use pubsift_core::DEFAULT_FETCH_TIMEOUT;
use pubsift_core::config_file::ConfigFile;
use pubsift_page::{SectionScheme, WalkOptions};
use pubsift_parsing::{ParsingConfig, ParsingConfigBuilder};
use pubsift_reporting::SortOrder;

use crate::IngestError;

/// Listing page used by [`PipelineConfig::typed`].
pub const TYPED_SOURCE_URL: &str = "https://raghavian.github.io/publications/";
/// Listing page used by [`PipelineConfig::themed`].
pub const THEMED_SOURCE_URL: &str = "https://raghavian.github.io/projects/";

/// Record array written by both variants.
pub const DEFAULT_OUTPUT_PATH: &str = "_data/publications.json";
pub const THEMED_INDEX_PATH: &str = "_data/project_themes.json";

/// Which kind of listing page is being scraped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Sections named after publication types.
    Typed,
    /// Sections named after research themes.
    Themed,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Typed => "typed",
            Variant::Themed => "themed",
        }
    }
}

/// Everything one run needs to know.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub variant: Variant,
    pub source_url: String,
    pub output_path: PathBuf,
    /// Where the theme index goes; `None` skips it.
    pub themes_path: Option<PathBuf>,
    pub fetch_timeout: Duration,
    pub scheme: SectionScheme,
    pub parsing: ParsingConfig,
    pub walk: WalkOptions,
    pub dedupe: bool,
    pub sort: SortOrder,
}

impl PipelineConfig {
    /// Publication-type page: lenient nesting, no dedup, grouped by type.
    pub fn typed() -> Self {
        Self {
            variant: Variant::Typed,
            source_url: TYPED_SOURCE_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            themes_path: None,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            scheme: SectionScheme::typed_default(),
            parsing: ParsingConfig::default(),
            walk: WalkOptions {
                lenient_nesting: true,
                fallback_all_items: true,
            },
            dedupe: false,
            sort: SortOrder::KindDateTitleAsc,
        }
    }

    /// Themed project page: strict lists, deduplicated, newest first, plus a
    /// theme index.
    pub fn themed() -> Self {
        Self {
            variant: Variant::Themed,
            source_url: THEMED_SOURCE_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            themes_path: Some(PathBuf::from(THEMED_INDEX_PATH)),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            scheme: SectionScheme::themed_default(),
            parsing: ParsingConfig::default().with_sentence_fallback(false),
            walk: WalkOptions {
                lenient_nesting: false,
                fallback_all_items: true,
            },
            dedupe: true,
            sort: SortOrder::DateTitleDesc,
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Typed => Self::typed(),
            Variant::Themed => Self::themed(),
        }
    }

    /// Overlay values from a config file onto this config.
    ///
    /// Heading rules only apply to the typed variant and theme labels only to
    /// the themed one. Fails when the resulting parsing patterns do not compile.
    pub fn apply_file(&mut self, file: &ConfigFile) -> Result<(), IngestError> {
        if let Some(source) = &file.source {
            if let Some(url) = &source.url {
                self.source_url = url.clone();
            }
            if let Some(secs) = source.timeout_secs {
                self.fetch_timeout = Duration::from_secs(secs);
            }
        }

        if let Some(output) = &file.output {
            if let Some(path) = &output.records_path {
                self.output_path = PathBuf::from(path);
            }
            if self.variant == Variant::Themed
                && let Some(path) = &output.themes_path
            {
                self.themes_path = Some(PathBuf::from(path));
            }
        }

        if let Some(sections) = &file.sections {
            match (&mut self.scheme, &sections.headings, &sections.themes) {
                (SectionScheme::Typed(rules), Some(headings), _) => *rules = headings.clone(),
                (SectionScheme::Themed(labels), _, Some(themes)) => *labels = themes.clone(),
                _ => {}
            }
            if let Some(lenient) = sections.lenient_nesting {
                self.walk.lenient_nesting = lenient;
            }
            if let Some(fallback) = sections.fallback_all_items {
                self.walk.fallback_all_items = fallback;
            }
        }

        if let Some(parsing) = &file.parsing {
            let mut builder = ParsingConfigBuilder::new()
                .quote_styles(self.parsing.quote_styles().to_vec())
                .min_title_chars(parsing.min_title_chars.unwrap_or(self.parsing.min_title_chars()))
                .sentence_fallback(
                    parsing
                        .sentence_fallback
                        .unwrap_or(self.parsing.sentence_fallback()),
                );
            if let Some(labels) = &parsing.resource_labels {
                builder = builder.set_resource_labels(labels.clone());
            }
            if let Some(words) = &parsing.stopwords {
                builder = builder.set_stopwords(words.clone());
            }
            self.parsing = builder.build()?;
        }

        Ok(())
    }
}
