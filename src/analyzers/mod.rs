pub mod accessibility_analyzer;
pub mod charger_analyzer;
pub mod support_analyzer;

pub use accessibility_analyzer::{
    AccessibilityAnalyzer, AccessibilityPatterns, GroupComparison, RankedDistrict,
};
pub use charger_analyzer::{CapacityStats, ChargerAnalyzer, ChargerStatistics, FeatureCount};
pub use support_analyzer::{SupportAnalyzer, SupportStatistics};
