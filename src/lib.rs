//! CV importer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod store;
pub mod output;

pub use error::{Result, CvImportError};
pub use config::Config;
pub use processing::document::CvDocument;
pub use processing::parser::{CvParser, ParseOutcome};
