use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrative district identifier (구/군)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct District(String);

impl District {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for District {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Ordinal accessibility classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccessibilityTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl AccessibilityTier {
    pub const ALL: [AccessibilityTier; 4] = [
        AccessibilityTier::Low,
        AccessibilityTier::Medium,
        AccessibilityTier::High,
        AccessibilityTier::VeryHigh,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AccessibilityTier::Low => "Low",
            AccessibilityTier::Medium => "Medium",
            AccessibilityTier::High => "High",
            AccessibilityTier::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for AccessibilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-district accessibility metrics and composite score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictAccessibility {
    pub district: District,
    pub charger_count: usize,
    pub support_count: usize,
    pub ratio_24h: f64,
    pub ratio_air_pump: f64,
    pub ratio_phone_charge: f64,
    pub avg_simultaneous_capacity: f64,
    pub charger_score: f64,
    pub support_score: f64,
    pub function_score: f64,
    pub capacity_score: f64,
    pub composite_score: f64,
    pub tier: AccessibilityTier,
}

impl DistrictAccessibility {
    pub fn has_support_center(&self) -> bool {
        self.support_count > 0
    }

    /// All three functional ratios are non-zero
    pub fn is_high_function(&self) -> bool {
        self.ratio_24h > 0.0 && self.ratio_air_pump > 0.0 && self.ratio_phone_charge > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(AccessibilityTier::Low < AccessibilityTier::Medium);
        assert!(AccessibilityTier::High < AccessibilityTier::VeryHigh);
        assert_eq!(AccessibilityTier::VeryHigh.to_string(), "Very High");
    }

    #[test]
    fn test_district_serializes_as_plain_string() {
        let json = serde_json::to_string(&District::new("달서구")).unwrap();
        assert_eq!(json, "\"달서구\"");
    }
}
