pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{is_within_korea_bounds, parse_coordinate, GeographicBounds};
pub use filename::{generate_default_report_filename, generate_default_scores_filename};
pub use progress::ProgressReporter;
