//! Explicit normalization of raw dataset text into typed records.
//!
//! Missing or unparsable values never fail a run. Each one is mapped to a
//! documented default and counted in a [`NormalizationReport`]:
//!
//! | Field                    | Default | Parsed as                          |
//! |--------------------------|---------|------------------------------------|
//! | simultaneous capacity    | `0`     | integer ≥ 0, or integral float     |
//! | 24h operation            | `false` | weekday start time == `00:00`      |
//! | air pump / phone charge  | `false` | flag == `Y`                        |
//! | latitude / longitude     | `None`  | decimal degrees within range       |
//! | coordinate pair          | `None`  | both inside the Korean bounding box |
//! | vehicle counts           | `None`  | integer ≥ 0, or integral float     |
//! | support-center district  | `None`  | district token after the region    |

use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

use crate::models::{ChargerRecord, SupportCenterRecord};
use crate::processors::AddressParser;
use crate::readers::{RawChargerRow, RawSupportRow};
use crate::utils::constants::{ALL_DAY_START_TIME, FLAG_AVAILABLE};
use crate::utils::coordinates::{is_within_korea_bounds, parse_coordinate};

const FLAG_UNAVAILABLE: &str = "N";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NormalizedField {
    ChargerDistrict,
    Capacity,
    WeekdayStart,
    AirPump,
    PhoneCharge,
    Latitude,
    Longitude,
    Coordinates,
    SupportAddress,
    SupportDistrict,
    Vehicles,
    SlopeVehicles,
    LiftVehicles,
}

impl fmt::Display for NormalizedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NormalizedField::ChargerDistrict => "charger district",
            NormalizedField::Capacity => "simultaneous capacity",
            NormalizedField::WeekdayStart => "weekday start time",
            NormalizedField::AirPump => "air pump flag",
            NormalizedField::PhoneCharge => "phone charge flag",
            NormalizedField::Latitude => "latitude",
            NormalizedField::Longitude => "longitude",
            NormalizedField::Coordinates => "coordinate pair",
            NormalizedField::SupportAddress => "support center address",
            NormalizedField::SupportDistrict => "support center district",
            NormalizedField::Vehicles => "vehicle count",
            NormalizedField::SlopeVehicles => "slope vehicle count",
            NormalizedField::LiftVehicles => "lift vehicle count",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldCoercions {
    pub missing: usize,
    pub unparsable: usize,
}

impl FieldCoercions {
    pub fn total(&self) -> usize {
        self.missing + self.unparsable
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizationReport {
    pub charger_rows: usize,
    pub support_rows: usize,
    pub coercions: BTreeMap<NormalizedField, FieldCoercions>,
}

impl NormalizationReport {
    fn missing(&mut self, field: NormalizedField) {
        self.coercions.entry(field).or_default().missing += 1;
    }

    fn unparsable(&mut self, field: NormalizedField) {
        self.coercions.entry(field).or_default().unparsable += 1;
    }

    pub fn field(&self, field: NormalizedField) -> FieldCoercions {
        self.coercions.get(&field).copied().unwrap_or_default()
    }

    pub fn total_coercions(&self) -> usize {
        self.coercions.values().map(FieldCoercions::total).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.total_coercions() == 0
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Normalization Report ===\n");
        summary.push_str(&format!("Charger Rows: {}\n", self.charger_rows));
        summary.push_str(&format!("Support Center Rows: {}\n", self.support_rows));
        summary.push_str(&format!("Defaulted Values: {}\n", self.total_coercions()));

        for (field, counts) in self.coercions.iter().filter(|(_, c)| c.total() > 0) {
            summary.push_str(&format!(
                "  - {}: {} missing, {} unparsable\n",
                field, counts.missing, counts.unparsable
            ));
        }

        summary
    }
}

enum Parsed<T> {
    Value(T),
    Missing,
    Unparsable,
}

fn parse_count(raw: Option<&str>) -> Parsed<u32> {
    let Some(text) = raw else {
        return Parsed::Missing;
    };

    if let Ok(value) = text.parse::<u32>() {
        return Parsed::Value(value);
    }

    // spreadsheets round-trip integer columns as "2.0"
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => {
            Parsed::Value(v as u32)
        }
        _ => Parsed::Unparsable,
    }
}

fn parse_flag(raw: Option<&str>) -> Parsed<bool> {
    match raw {
        None => Parsed::Missing,
        Some(FLAG_AVAILABLE) => Parsed::Value(true),
        Some(FLAG_UNAVAILABLE) => Parsed::Value(false),
        Some(_) => Parsed::Unparsable,
    }
}

fn parse_degrees(raw: Option<&str>, limit: f64) -> Parsed<f64> {
    match raw {
        None => Parsed::Missing,
        Some(text) => match parse_coordinate(text, limit) {
            Ok(value) => Parsed::Value(value),
            Err(_) => Parsed::Unparsable,
        },
    }
}

pub struct Normalizer {
    address_parser: AddressParser,
}

impl Normalizer {
    pub fn new(address_parser: AddressParser) -> Self {
        Self { address_parser }
    }

    fn settle<T>(
        parsed: Parsed<T>,
        field: NormalizedField,
        default: T,
        report: &mut NormalizationReport,
    ) -> T {
        match parsed {
            Parsed::Value(value) => value,
            Parsed::Missing => {
                report.missing(field);
                default
            }
            Parsed::Unparsable => {
                report.unparsable(field);
                default
            }
        }
    }

    pub fn normalize_charger(
        &self,
        row: &RawChargerRow,
        report: &mut NormalizationReport,
    ) -> ChargerRecord {
        report.charger_rows += 1;

        let district = match row.district.as_deref() {
            Some(district) => district.to_string(),
            None => {
                report.missing(NormalizedField::ChargerDistrict);
                String::new()
            }
        };

        let simultaneous_capacity = Self::settle(
            parse_count(row.capacity.as_deref()),
            NormalizedField::Capacity,
            0,
            report,
        );

        let operates_24h = match row.weekday_start.as_deref() {
            Some(start) => start == ALL_DAY_START_TIME,
            None => {
                report.missing(NormalizedField::WeekdayStart);
                false
            }
        };

        let air_pump = Self::settle(
            parse_flag(row.air_pump.as_deref()),
            NormalizedField::AirPump,
            false,
            report,
        );
        let phone_charge = Self::settle(
            parse_flag(row.phone_charge.as_deref()),
            NormalizedField::PhoneCharge,
            false,
            report,
        );

        let latitude = Self::settle(
            parse_degrees(row.latitude.as_deref(), 90.0).map_some(),
            NormalizedField::Latitude,
            None,
            report,
        );
        let longitude = Self::settle(
            parse_degrees(row.longitude.as_deref(), 180.0).map_some(),
            NormalizedField::Longitude,
            None,
            report,
        );

        // pairs outside Korea are treated as mis-keyed
        let (latitude, longitude) = match latitude.zip(longitude) {
            Some((lat, lon)) if !is_within_korea_bounds(lat, lon) => {
                report.unparsable(NormalizedField::Coordinates);
                (None, None)
            }
            _ => (latitude, longitude),
        };

        ChargerRecord {
            facility_name: row.facility_name.clone().unwrap_or_default(),
            province: row.province.clone().unwrap_or_default(),
            district,
            address: row.address.clone().unwrap_or_default(),
            simultaneous_capacity,
            operates_24h,
            air_pump,
            phone_charge,
            latitude,
            longitude,
        }
    }

    pub fn normalize_support_center(
        &self,
        row: &RawSupportRow,
        report: &mut NormalizationReport,
    ) -> SupportCenterRecord {
        report.support_rows += 1;

        let address = match row.address.as_deref() {
            Some(address) => address.to_string(),
            None => {
                report.missing(NormalizedField::SupportAddress);
                String::new()
            }
        };

        let district = self.address_parser.parse(&address);
        if district.is_none() && !address.is_empty() {
            report.unparsable(NormalizedField::SupportDistrict);
        }

        let vehicles = Self::settle(
            parse_count(row.vehicles.as_deref()).map_some(),
            NormalizedField::Vehicles,
            None,
            report,
        );
        let slope_vehicles = Self::settle(
            parse_count(row.slope_vehicles.as_deref()).map_some(),
            NormalizedField::SlopeVehicles,
            None,
            report,
        );
        let lift_vehicles = Self::settle(
            parse_count(row.lift_vehicles.as_deref()).map_some(),
            NormalizedField::LiftVehicles,
            None,
            report,
        );

        SupportCenterRecord {
            name: row.name.clone().unwrap_or_default(),
            address,
            district,
            vehicles,
            slope_vehicles,
            lift_vehicles,
        }
    }

    pub fn normalize_chargers(
        &self,
        rows: &[RawChargerRow],
        report: &mut NormalizationReport,
    ) -> Vec<ChargerRecord> {
        let records: Vec<_> = rows
            .iter()
            .map(|row| self.normalize_charger(row, report))
            .collect();
        debug!(rows = records.len(), "Normalized charger rows");
        records
    }

    pub fn normalize_support_centers(
        &self,
        rows: &[RawSupportRow],
        report: &mut NormalizationReport,
    ) -> Vec<SupportCenterRecord> {
        let records: Vec<_> = rows
            .iter()
            .map(|row| self.normalize_support_center(row, report))
            .collect();

        let unresolved = report.field(NormalizedField::SupportDistrict).unparsable;
        if unresolved > 0 {
            warn!(unresolved, "Support center addresses without a recognizable district");
        }
        records
    }
}

impl<T> Parsed<T> {
    fn map_some(self) -> Parsed<Option<T>> {
        match self {
            Parsed::Value(value) => Parsed::Value(Some(value)),
            Parsed::Missing => Parsed::Missing,
            Parsed::Unparsable => Parsed::Unparsable,
        }
    }
}
