//! Query and statistics engine for vacancy CSV exports.
//!
//! The pipeline: the loader turns a delimited file into an immutable
//! [`data::model::Catalog`]; the display path filters, sorts, and formats
//! it through [`output::table`]; the statistics path groups it by year or
//! region in [`stats`] and hands the six resulting series to the report
//! renderers.
//!
//! Library code returns [`error::EngineError`] everywhere; only the binary
//! decides what ends the process.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod stats;
