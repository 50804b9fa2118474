//! Run configuration: target region, district enumeration, score weights,
//! tier edges and the header mapping for both input datasets.
//!
//! Values are layered with the `config` crate: built-in defaults, then an
//! optional settings file, then `ACCESS__*` environment variables
//! (e.g. `ACCESS__WEIGHTS__SUPPORT_CENTER=40`).

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;
use validator::{Validate, ValidationError};

use crate::error::Result;
use crate::models::{AccessibilityTier, District};
use crate::utils::constants::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_districts"))]
pub struct Settings {
    /// Province name as written in the charger dataset and in addresses
    #[validate(length(min = 1))]
    pub region: String,

    /// Substring that marks a support-center address as inside the region
    #[validate(length(min = 1))]
    pub region_keyword: String,

    #[validate(length(min = 1))]
    pub districts: Vec<String>,

    pub rural_districts: Vec<String>,

    #[validate(nested)]
    pub weights: ScoreWeights,

    #[validate(nested)]
    pub tiers: TierEdges,

    pub charger_columns: ChargerColumns,

    pub support_columns: SupportColumns,
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(path) = path {
            debug!(path = %path.display(), "Loading settings file");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(SETTINGS_ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn district_list(&self) -> Vec<District> {
        self.districts.iter().map(|d| District::new(d.as_str())).collect()
    }

    pub fn is_rural(&self, district: &District) -> bool {
        self.rural_districts.iter().any(|d| d == district.as_str())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            region_keyword: DEFAULT_REGION_KEYWORD.to_string(),
            districts: DEFAULT_DISTRICTS.iter().map(|d| d.to_string()).collect(),
            rural_districts: DEFAULT_RURAL_DISTRICTS.iter().map(|d| d.to_string()).collect(),
            weights: ScoreWeights::default(),
            tiers: TierEdges::default(),
            charger_columns: ChargerColumns::default(),
            support_columns: SupportColumns::default(),
        }
    }
}

fn validate_districts(settings: &Settings) -> std::result::Result<(), ValidationError> {
    let mut seen = HashSet::new();
    if settings.districts.iter().any(|d| !seen.insert(d.as_str())) {
        return Err(ValidationError::new("duplicate_district"));
    }
    Ok(())
}

/// Multipliers applied by the composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ScoreWeights {
    #[validate(range(min = 0.0))]
    pub charger: f64,

    #[validate(range(min = 0.0))]
    pub support_center: f64,

    #[validate(range(min = 0.0))]
    pub all_day: f64,

    #[validate(range(min = 0.0))]
    pub air_pump: f64,

    #[validate(range(min = 0.0))]
    pub phone_charge: f64,

    #[validate(range(min = 0.0))]
    pub capacity: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            charger: WEIGHT_PER_CHARGER,
            support_center: WEIGHT_PER_SUPPORT_CENTER,
            all_day: WEIGHT_ALL_DAY,
            air_pump: WEIGHT_AIR_PUMP,
            phone_charge: WEIGHT_PHONE_CHARGE,
            capacity: WEIGHT_CAPACITY,
        }
    }
}

/// Lower edges (inclusive) of the Medium, High and VeryHigh tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_tier_edges"))]
pub struct TierEdges {
    #[validate(range(min = 0.0))]
    pub medium: f64,
    pub high: f64,
    pub very_high: f64,
}

impl TierEdges {
    pub fn classify(&self, score: f64) -> AccessibilityTier {
        match score {
            s if s >= self.very_high => AccessibilityTier::VeryHigh,
            s if s >= self.high => AccessibilityTier::High,
            s if s >= self.medium => AccessibilityTier::Medium,
            _ => AccessibilityTier::Low,
        }
    }
}

impl Default for TierEdges {
    fn default() -> Self {
        Self {
            medium: TIER_MEDIUM_MIN,
            high: TIER_HIGH_MIN,
            very_high: TIER_VERY_HIGH_MIN,
        }
    }
}

fn validate_tier_edges(edges: &TierEdges) -> std::result::Result<(), ValidationError> {
    if edges.medium < edges.high && edges.high < edges.very_high {
        Ok(())
    } else {
        Err(ValidationError::new("tier_edges_not_ascending"))
    }
}

/// Header names of the fast-charger dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargerColumns {
    pub facility_name: String,
    pub province: String,
    pub district: String,
    pub address: String,
    pub capacity: String,
    pub weekday_start: String,
    pub air_pump: String,
    pub phone_charge: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for ChargerColumns {
    fn default() -> Self {
        Self {
            facility_name: CHARGER_FACILITY_NAME_HEADER.to_string(),
            province: CHARGER_PROVINCE_HEADER.to_string(),
            district: CHARGER_DISTRICT_HEADER.to_string(),
            address: CHARGER_ADDRESS_HEADER.to_string(),
            capacity: CHARGER_CAPACITY_HEADER.to_string(),
            weekday_start: CHARGER_WEEKDAY_START_HEADER.to_string(),
            air_pump: CHARGER_AIR_PUMP_HEADER.to_string(),
            phone_charge: CHARGER_PHONE_CHARGE_HEADER.to_string(),
            latitude: CHARGER_LATITUDE_HEADER.to_string(),
            longitude: CHARGER_LONGITUDE_HEADER.to_string(),
        }
    }
}

/// Header names of the transport-support center dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportColumns {
    pub name: String,
    pub address: String,
    pub vehicles: String,
    pub slope_vehicles: String,
    pub lift_vehicles: String,
}

impl Default for SupportColumns {
    fn default() -> Self {
        Self {
            name: SUPPORT_NAME_HEADER.to_string(),
            address: SUPPORT_ADDRESS_HEADER.to_string(),
            vehicles: SUPPORT_VEHICLES_HEADER.to_string(),
            slope_vehicles: SUPPORT_SLOPE_VEHICLES_HEADER.to_string(),
            lift_vehicles: SUPPORT_LIFT_VEHICLES_HEADER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.districts.len(), 9);
        assert!(settings.is_rural(&District::new("군위군")));
        assert!(!settings.is_rural(&District::new("수성구")));
    }

    #[test]
    fn test_tier_classification_lower_edge_inclusive() {
        let tiers = TierEdges::default();
        assert_eq!(tiers.classify(0.0), AccessibilityTier::Low);
        assert_eq!(tiers.classify(199.99), AccessibilityTier::Low);
        assert_eq!(tiers.classify(200.0), AccessibilityTier::Medium);
        assert_eq!(tiers.classify(399.99), AccessibilityTier::Medium);
        assert_eq!(tiers.classify(400.0), AccessibilityTier::High);
        assert_eq!(tiers.classify(600.0), AccessibilityTier::VeryHigh);
        assert_eq!(tiers.classify(10_000.0), AccessibilityTier::VeryHigh);
    }

    #[test]
    fn test_rejects_descending_tier_edges() {
        let mut settings = Settings::default();
        settings.tiers.high = 100.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_weight() {
        let mut settings = Settings::default();
        settings.weights.capacity = -1.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_duplicate_and_empty_districts() {
        let mut settings = Settings::default();
        settings.districts.push("중구".to_string());
        assert!(settings.validate().is_err());

        settings.districts.clear();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_defaults_without_file() -> Result<()> {
        let settings = Settings::load(None)?;
        assert_eq!(settings.region, DEFAULT_REGION);
        assert_eq!(settings.weights, ScoreWeights::default());
        Ok(())
    }

    #[test]
    fn test_load_overrides_from_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "districts = [\"A\", \"B\"]")?;
        writeln!(file, "[weights]")?;
        writeln!(file, "support_center = 40.0")?;
        writeln!(file, "[tiers]")?;
        writeln!(file, "very_high = 800.0")?;
        file.flush()?;

        let settings = Settings::load(Some(file.path()))?;

        assert_eq!(settings.districts, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(settings.weights.support_center, 40.0);
        assert_eq!(settings.weights.charger, WEIGHT_PER_CHARGER);
        assert_eq!(settings.tiers.very_high, 800.0);
        assert_eq!(settings.tiers.classify(700.0), AccessibilityTier::High);
        assert_eq!(settings.tiers.medium, TIER_MEDIUM_MIN);
        assert_eq!(settings.charger_columns.district, CHARGER_DISTRICT_HEADER);
        Ok(())
    }

    #[test]
    fn test_load_rejects_invalid_file_values() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "[tiers]")?;
        writeln!(file, "medium = 500.0")?;
        file.flush()?;

        assert!(Settings::load(Some(file.path())).is_err());
        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(Settings::load(Some(Path::new("does/not/exist.toml"))).is_err());
    }
}
