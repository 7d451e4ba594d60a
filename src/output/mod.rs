//! Report assembly and formatting

pub mod report;
pub mod formatter;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::{BatchEntry, BatchSummary, Recommendations, ReportAssembler, ScoreReport};
