use thiserror::Error;

pub mod config;
pub mod pipeline;

pub use config::{PipelineConfig, Variant};
pub use pipeline::{Collected, RunSummary, collect, collect_from_html, run, write_outputs};

// Re-export so callers can build sources without depending on core directly
pub use pubsift_core::{FetchError, FileSource, HttpSource, PageSource};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Fetch(#[from] pubsift_core::FetchError),
    #[error(transparent)]
    Report(#[from] pubsift_reporting::ReportError),
    #[error("invalid parsing pattern: {0}")]
    Config(#[from] regex::Error),
}
