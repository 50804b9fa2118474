pub mod report_writer;
pub mod score_writer;

pub use report_writer::MarkdownReport;
pub use score_writer::{OutputFormat, ScoreWriter};
