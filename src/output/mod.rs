//! Output: CV rendering and parse-result reports

pub mod formatter;
pub mod render;

pub use formatter::{save_report_to_file, suggest_filename, OutputFormatter, ReportGenerator};
pub use render::{render, TemplateId};
