use std::path::PathBuf;

use pubsift_core::{PageSource, PublicationRecord};
use pubsift_page::PageWalker;
use pubsift_parsing::ItemExtractor;
use pubsift_reporting::{ThemeIndex, dedupe_by_title, sort_records, stage_json};

use crate::IngestError;
use crate::config::PipelineConfig;

/// Records and themes gathered from one page, ready to be written.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub records: Vec<PublicationRecord>,
    pub themes: ThemeIndex,
    pub items_visited: usize,
    pub duplicates_dropped: usize,
    pub used_fallback: bool,
}

impl Collected {
    /// Summary of this collection with no outputs written yet.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            items_visited: self.items_visited,
            records_kept: self.records.len(),
            duplicates_dropped: self.duplicates_dropped,
            used_fallback: self.used_fallback,
            outputs: Vec::new(),
        }
    }
}

/// What a run did, for the CLI to report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub items_visited: usize,
    pub records_kept: usize,
    pub duplicates_dropped: usize,
    pub used_fallback: bool,
    /// Files written, in write order.
    pub outputs: Vec<PathBuf>,
}

/// Walk already-fetched markup and aggregate the records.
pub fn collect_from_html(html: &str, config: &PipelineConfig) -> Collected {
    let walker = PageWalker::new(
        config.scheme.clone(),
        ItemExtractor::with_config(config.parsing.clone()),
        config.walk,
    );
    let outcome = walker.walk(html);

    let (mut records, duplicates_dropped) = if config.dedupe {
        dedupe_by_title(outcome.records)
    } else {
        (outcome.records, 0)
    };
    sort_records(&mut records, config.sort);

    Collected {
        records,
        themes: ThemeIndex::new(outcome.themes),
        items_visited: outcome.items_visited,
        duplicates_dropped,
        used_fallback: outcome.used_fallback,
    }
}

/// Fetch the configured page and collect its records. Nothing is written.
pub async fn collect(
    config: &PipelineConfig,
    source: &dyn PageSource,
) -> Result<Collected, IngestError> {
    tracing::info!(
        url = %config.source_url,
        source = %source.describe(),
        variant = config.variant.as_str(),
        "fetching listing page"
    );
    let html = source.fetch(&config.source_url).await?;
    tracing::debug!(bytes = html.len(), "page fetched");

    let collected = collect_from_html(&html, config);
    tracing::info!(
        items = collected.items_visited,
        records = collected.records.len(),
        duplicates = collected.duplicates_dropped,
        "page parsed"
    );
    Ok(collected)
}

/// Write the record array and, when configured, the theme index.
///
/// Both documents are staged before either is renamed into place, so a
/// serialization or write failure leaves both previous files untouched.
pub fn write_outputs(
    collected: &Collected,
    config: &PipelineConfig,
) -> Result<RunSummary, IngestError> {
    let mut summary = collected.summary();

    let mut staged = vec![stage_json(&config.output_path, &collected.records)?];
    if let Some(themes_path) = &config.themes_path {
        staged.push(stage_json(themes_path, &collected.themes)?);
    }

    for file in staged {
        summary.outputs.push(file.commit()?);
    }

    tracing::info!(records = summary.records_kept, files = summary.outputs.len(), "outputs written");
    Ok(summary)
}

/// Fetch, parse, aggregate and write. A failed fetch leaves every output untouched.
pub async fn run(
    config: &PipelineConfig,
    source: &dyn PageSource,
) -> Result<RunSummary, IngestError> {
    let collected = collect(config, source).await?;
    write_outputs(&collected, config)
}
