use std::collections::HashMap;

use crate::models::ChargerRecord;
use crate::utils::coordinates::GeographicBounds;

#[derive(Debug, Clone, PartialEq)]
pub struct CapacityStats {
    pub mean: f64,
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureCount {
    pub available: usize,
    pub unavailable: usize,
}

impl FeatureCount {
    pub fn percentage(&self) -> f64 {
        let total = self.available + self.unavailable;
        if total == 0 {
            0.0
        } else {
            100.0 * self.available as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargerStatistics {
    pub total_chargers: usize,
    /// Chargers per district, most first; ties in name order
    pub district_counts: Vec<(String, usize)>,
    pub capacity: Option<CapacityStats>,
    pub all_day: FeatureCount,
    pub air_pump: FeatureCount,
    pub phone_charge: FeatureCount,
    pub fully_featured: usize,
    pub geographic_bounds: Option<GeographicBounds>,
}

impl ChargerStatistics {
    pub fn best_served(&self) -> Option<&(String, usize)> {
        self.district_counts.first()
    }

    pub fn least_served(&self) -> Option<&(String, usize)> {
        self.district_counts.last()
    }

    /// Difference between the best and least served district
    pub fn district_gap(&self) -> usize {
        match (self.best_served(), self.least_served()) {
            (Some((_, max)), Some((_, min))) => max - min,
            _ => 0,
        }
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Charger Statistics ===\n");
        summary.push_str(&format!("Total Chargers: {}\n", self.total_chargers));

        if !self.district_counts.is_empty() {
            summary.push_str("\nChargers by District:\n");
            for (district, count) in &self.district_counts {
                summary.push_str(&format!(
                    "  {}: {} ({:.1}%)\n",
                    district,
                    count,
                    100.0 * *count as f64 / self.total_chargers as f64
                ));
            }
        }

        match &self.capacity {
            Some(capacity) => summary.push_str(&format!(
                "\nSimultaneous Capacity: mean {:.1}, min {}, max {}\n",
                capacity.mean, capacity.min, capacity.max
            )),
            None => summary.push_str("\nSimultaneous Capacity: no chargers\n"),
        }

        summary.push_str(&format!(
            "24h Operation: {} ({} limited hours, {:.1}%)\n",
            self.all_day.available,
            self.all_day.unavailable,
            self.all_day.percentage()
        ));
        summary.push_str(&format!(
            "Air Pump: {} available, {} unavailable ({:.1}%)\n",
            self.air_pump.available,
            self.air_pump.unavailable,
            self.air_pump.percentage()
        ));
        summary.push_str(&format!(
            "Phone Charging: {} available, {} unavailable ({:.1}%)\n",
            self.phone_charge.available,
            self.phone_charge.unavailable,
            self.phone_charge.percentage()
        ));
        summary.push_str(&format!("All Three Features: {}\n", self.fully_featured));

        if let (Some((best, max)), Some((least, min))) = (self.best_served(), self.least_served()) {
            summary.push_str(&format!(
                "\nMost Chargers: {} ({})\nFewest Chargers: {} ({})\nDistrict Gap: {}\n",
                best,
                max,
                least,
                min,
                self.district_gap()
            ));
        }

        if let Some(bounds) = &self.geographic_bounds {
            summary.push_str(&format!(
                "Coverage: {:.4}°N-{:.4}°N, {:.4}°E-{:.4}°E (center {:.4}, {:.4})\n",
                bounds.min_lat,
                bounds.max_lat,
                bounds.min_lon,
                bounds.max_lon,
                bounds.center_lat,
                bounds.center_lon
            ));
        }

        summary
    }
}

pub struct ChargerAnalyzer;

impl ChargerAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, chargers: &[ChargerRecord]) -> ChargerStatistics {
        let mut per_district: HashMap<&str, usize> = HashMap::new();
        let mut all_day = FeatureCount::default();
        let mut air_pump = FeatureCount::default();
        let mut phone_charge = FeatureCount::default();
        let mut fully_featured = 0;
        let mut capacity_sum = 0u64;
        let mut capacity_min = u32::MAX;
        let mut capacity_max = 0u32;

        let tally = |count: &mut FeatureCount, present: bool| {
            if present {
                count.available += 1;
            } else {
                count.unavailable += 1;
            }
        };

        for charger in chargers {
            if !charger.district.is_empty() {
                *per_district.entry(charger.district.as_str()).or_default() += 1;
            }

            tally(&mut all_day, charger.operates_24h);
            tally(&mut air_pump, charger.air_pump);
            tally(&mut phone_charge, charger.phone_charge);
            if charger.is_fully_featured() {
                fully_featured += 1;
            }

            capacity_sum += u64::from(charger.simultaneous_capacity);
            capacity_min = capacity_min.min(charger.simultaneous_capacity);
            capacity_max = capacity_max.max(charger.simultaneous_capacity);
        }

        let mut district_counts: Vec<(String, usize)> = per_district
            .into_iter()
            .map(|(district, count)| (district.to_string(), count))
            .collect();
        district_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let capacity = (!chargers.is_empty()).then(|| CapacityStats {
            mean: capacity_sum as f64 / chargers.len() as f64,
            min: capacity_min,
            max: capacity_max,
        });

        ChargerStatistics {
            total_chargers: chargers.len(),
            district_counts,
            capacity,
            all_day,
            air_pump,
            phone_charge,
            fully_featured,
            geographic_bounds: GeographicBounds::from_points(
                chargers.iter().filter_map(ChargerRecord::coordinates),
            ),
        }
    }
}

impl Default for ChargerAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
