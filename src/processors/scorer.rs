use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::{ProcessingError, Result};
use crate::models::{ChargerRecord, District, DistrictAccessibility, SupportCenterRecord};
use crate::settings::{ScoreWeights, Settings, TierEdges};

/// Chargers and support-center counts grouped by district
struct DistrictIndex<'a> {
    chargers: HashMap<&'a str, Vec<&'a ChargerRecord>>,
    support_centers: HashMap<&'a District, usize>,
}

impl<'a> DistrictIndex<'a> {
    fn build(chargers: &'a [ChargerRecord], centers: &'a [SupportCenterRecord]) -> Self {
        let mut by_district: HashMap<&str, Vec<&ChargerRecord>> = HashMap::new();
        for charger in chargers {
            by_district
                .entry(charger.district.as_str())
                .or_default()
                .push(charger);
        }

        let mut support_centers: HashMap<&District, usize> = HashMap::new();
        for district in centers.iter().filter_map(|c| c.district.as_ref()) {
            *support_centers.entry(district).or_default() += 1;
        }

        Self {
            chargers: by_district,
            support_centers,
        }
    }

    fn chargers_in(&self, district: &District) -> &[&'a ChargerRecord] {
        self.chargers
            .get(district.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn support_count(&self, district: &District) -> usize {
        self.support_centers.get(district).copied().unwrap_or(0)
    }
}

/// Share of chargers satisfying `feature`; zero for an empty district
fn feature_ratio(chargers: &[&ChargerRecord], feature: fn(&ChargerRecord) -> bool) -> f64 {
    if chargers.is_empty() {
        return 0.0;
    }
    let matching = chargers.iter().filter(|c| feature(**c)).count();
    matching as f64 / chargers.len() as f64
}

fn mean_capacity(chargers: &[&ChargerRecord]) -> f64 {
    if chargers.is_empty() {
        return 0.0;
    }
    let total: u64 = chargers
        .iter()
        .map(|c| u64::from(c.simultaneous_capacity))
        .sum();
    total as f64 / chargers.len() as f64
}

/// Computes one [`DistrictAccessibility`] row per configured district.
///
/// Charger presence and support centers earn flat per-unit points. Functional
/// quality (24h, air pump, phone charging) and average capacity are scaled by
/// the district's charger count, so a district without chargers scores on
/// support centers alone.
#[derive(Debug, Clone)]
pub struct DistrictAccessibilityScorer {
    districts: Vec<District>,
    weights: ScoreWeights,
    tiers: TierEdges,
}

impl DistrictAccessibilityScorer {
    pub fn new(districts: Vec<District>, weights: ScoreWeights, tiers: TierEdges) -> Self {
        Self {
            districts,
            weights,
            tiers,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.district_list(), settings.weights, settings.tiers)
    }

    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    /// Score every district, in configured order
    pub fn score(
        &self,
        chargers: &[ChargerRecord],
        centers: &[SupportCenterRecord],
    ) -> Vec<DistrictAccessibility> {
        let index = DistrictIndex::build(chargers, centers);
        let scores: Vec<_> = self
            .districts
            .iter()
            .map(|district| self.score_district(district, &index))
            .collect();

        self.log_outcome(chargers.len(), centers.len(), &scores);
        scores
    }

    /// Score districts on a dedicated rayon pool; output order matches [`Self::score`]
    pub fn score_parallel(
        &self,
        chargers: &[ChargerRecord],
        centers: &[SupportCenterRecord],
        max_workers: usize,
    ) -> Result<Vec<DistrictAccessibility>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(max_workers)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        let index = DistrictIndex::build(chargers, centers);
        let scores: Vec<_> = pool.install(|| {
            self.districts
                .par_iter()
                .map(|district| self.score_district(district, &index))
                .collect()
        });

        self.log_outcome(chargers.len(), centers.len(), &scores);
        Ok(scores)
    }

    fn score_district(
        &self,
        district: &District,
        index: &DistrictIndex<'_>,
    ) -> DistrictAccessibility {
        let chargers = index.chargers_in(district);
        let support_count = index.support_count(district);

        let ratio_24h = feature_ratio(chargers, |c| c.operates_24h);
        let ratio_air_pump = feature_ratio(chargers, |c| c.air_pump);
        let ratio_phone_charge = feature_ratio(chargers, |c| c.phone_charge);
        let avg_simultaneous_capacity = mean_capacity(chargers);

        let w = &self.weights;
        let charger_count = chargers.len();
        let count = charger_count as f64;

        let charger_score = count * w.charger;
        let support_score = support_count as f64 * w.support_center;
        let function_score = (ratio_24h * w.all_day
            + ratio_air_pump * w.air_pump
            + ratio_phone_charge * w.phone_charge)
            * count;
        let capacity_score = avg_simultaneous_capacity * w.capacity * count;
        let composite_score = charger_score + support_score + function_score + capacity_score;

        debug!(
            district = %district,
            charger_count,
            support_count,
            composite_score,
            "Scored district"
        );

        DistrictAccessibility {
            district: district.clone(),
            charger_count,
            support_count,
            ratio_24h,
            ratio_air_pump,
            ratio_phone_charge,
            avg_simultaneous_capacity,
            charger_score,
            support_score,
            function_score,
            capacity_score,
            composite_score,
            tier: self.tiers.classify(composite_score),
        }
    }

    fn log_outcome(&self, chargers: usize, centers: usize, scores: &[DistrictAccessibility]) {
        let matched_chargers: usize = scores.iter().map(|s| s.charger_count).sum();
        let matched_centers: usize = scores.iter().map(|s| s.support_count).sum();
        info!(
            districts = scores.len(),
            chargers,
            matched_chargers,
            centers,
            matched_centers,
            "Scored districts"
        );
    }
}
