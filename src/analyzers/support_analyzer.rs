use std::collections::BTreeMap;

use crate::models::SupportCenterRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupportStatistics {
    pub total_centers: usize,
    pub unresolved_districts: usize,
    pub total_vehicles: u64,
    pub slope_vehicles: u64,
    pub lift_vehicles: u64,
    /// Number of centers per fleet size, for centers reporting one
    pub fleet_distribution: BTreeMap<u32, usize>,
    pub centers_by_district: BTreeMap<String, usize>,
}

impl SupportStatistics {
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Support Center Statistics ===\n");
        summary.push_str(&format!("Total Centers: {}\n", self.total_centers));
        summary.push_str(&format!("Total Vehicles: {}\n", self.total_vehicles));
        summary.push_str(&format!("Slope-type Wheelchair Vehicles: {}\n", self.slope_vehicles));
        summary.push_str(&format!("Lift-type Wheelchair Vehicles: {}\n", self.lift_vehicles));

        if !self.fleet_distribution.is_empty() {
            summary.push_str("\nFleet Size Distribution:\n");
            for (vehicles, centers) in &self.fleet_distribution {
                summary.push_str(&format!("  {} vehicles: {} centers\n", vehicles, centers));
            }
        }

        if !self.centers_by_district.is_empty() {
            summary.push_str("\nCenters by District:\n");
            for (district, centers) in &self.centers_by_district {
                summary.push_str(&format!("  {}: {}\n", district, centers));
            }
        }

        if self.unresolved_districts > 0 {
            summary.push_str(&format!(
                "Centers without a recognizable district: {}\n",
                self.unresolved_districts
            ));
        }

        summary
    }
}

pub struct SupportAnalyzer;

impl SupportAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, centers: &[SupportCenterRecord]) -> SupportStatistics {
        let mut stats = SupportStatistics {
            total_centers: centers.len(),
            ..SupportStatistics::default()
        };

        for center in centers {
            match &center.district {
                Some(district) => {
                    *stats
                        .centers_by_district
                        .entry(district.to_string())
                        .or_default() += 1
                }
                None => stats.unresolved_districts += 1,
            }

            if let Some(vehicles) = center.vehicles {
                stats.total_vehicles += u64::from(vehicles);
                *stats.fleet_distribution.entry(vehicles).or_default() += 1;
            }
            stats.slope_vehicles += u64::from(center.slope_vehicles.unwrap_or(0));
            stats.lift_vehicles += u64::from(center.lift_vehicles.unwrap_or(0));
        }

        stats
    }
}

impl Default for SupportAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
