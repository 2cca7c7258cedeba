//! Turns a publication list page into tagged records.
//!
//! [`PageWalker`] visits the list items under each recognised `h2`/`h3`
//! heading, runs them through [`pubsift_parsing::ItemExtractor`] and attaches
//! their hyperlinks as resources.

pub mod resources;
pub mod sections;
pub mod walker;

pub use resources::{collect_resources, primary_link};
pub use sections::{DEFAULT_THEMES, SectionScheme, theme_key};
pub use walker::{PageOutcome, PageWalker, WalkOptions, record_from_item};
