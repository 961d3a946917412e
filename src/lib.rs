//! Parsing of veiling trade descriptions into a product catalog.
//!
//! [`parse_record`] runs one `code;description` record through the engine;
//! [`Catalog`] groups the results into base products and commercial sets.

pub mod catalog;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod parser;
pub mod slug;
pub mod stats;

pub use catalog::Catalog;
pub use error::{CatalogError, Result};
pub use model::{BaseProduct, CommercialSet, ParsedAttributes, RawRecord};
pub use parser::{parse_record, ParseOutcome};
pub use slug::SlugRegistry;
pub use stats::RuleStats;
