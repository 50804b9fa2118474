use chrono::{Datelike, Local};
use std::path::PathBuf;

fn date_stamp() -> String {
    let now = Local::now();
    format!("{:02}{:02}{:02}", now.year() % 100, now.month(), now.day())
}

/// Generate default score table filename with format: accessibility-scores-{YYMMDD}.csv
pub fn generate_default_scores_filename() -> PathBuf {
    PathBuf::from("output").join(format!("accessibility-scores-{}.csv", date_stamp()))
}

/// Generate default report filename with format: accessibility-report-{YYMMDD}.md
pub fn generate_default_report_filename() -> PathBuf {
    PathBuf::from("output").join(format!("accessibility-report-{}.md", date_stamp()))
}
