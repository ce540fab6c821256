//! Output module
//! Report envelope and the console, JSON, markdown and HTML renderers

pub mod formatter;
pub mod report;

pub use formatter::{save_report_to_file, suggest_filename, OutputFormatter, ReportGenerator};
pub use report::{MatchReport, ReportMetadata, ScoreBand};
