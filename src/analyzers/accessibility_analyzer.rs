use std::collections::BTreeMap;

use crate::models::{AccessibilityTier, District, DistrictAccessibility};
use crate::settings::Settings;
use crate::utils::constants::DEFAULT_TOP_N;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedDistrict {
    pub district: District,
    pub composite_score: f64,
    pub tier: AccessibilityTier,
}

impl From<&DistrictAccessibility> for RankedDistrict {
    fn from(score: &DistrictAccessibility) -> Self {
        Self {
            district: score.district.clone(),
            composite_score: score.composite_score,
            tier: score.tier,
        }
    }
}

/// Mean composite score of a district group against the remaining districts
#[derive(Debug, Clone, PartialEq)]
pub struct GroupComparison {
    pub title: String,
    pub group_label: String,
    pub rest_label: String,
    pub group_size: usize,
    pub rest_size: usize,
    /// `None` when the group is empty
    pub group_mean: Option<f64>,
    pub rest_mean: Option<f64>,
}

impl GroupComparison {
    fn split<F>(
        title: &str,
        group_label: &str,
        rest_label: &str,
        scores: &[DistrictAccessibility],
        in_group: F,
    ) -> Self
    where
        F: Fn(&DistrictAccessibility) -> bool,
    {
        let (group, rest): (Vec<&DistrictAccessibility>, Vec<&DistrictAccessibility>) =
            scores.iter().partition(|s| in_group(*s));

        Self {
            title: title.to_string(),
            group_label: group_label.to_string(),
            rest_label: rest_label.to_string(),
            group_size: group.len(),
            rest_size: rest.len(),
            group_mean: mean_score(&group),
            rest_mean: mean_score(&rest),
        }
    }

    pub fn difference(&self) -> Option<f64> {
        Some(self.group_mean? - self.rest_mean?)
    }

    pub fn describe(&self) -> String {
        let fmt = |mean: Option<f64>| match mean {
            Some(m) => format!("{:.1}", m),
            None => "n/a".to_string(),
        };
        let gap = match self.difference() {
            Some(d) => format!("{:+.1}", d),
            None => "n/a".to_string(),
        };
        format!(
            "{}: {} {} ({} districts) vs {} {} ({} districts), difference {}",
            self.title,
            self.group_label,
            fmt(self.group_mean),
            self.group_size,
            self.rest_label,
            fmt(self.rest_mean),
            self.rest_size,
            gap
        )
    }
}

fn mean_score(scores: &[&DistrictAccessibility]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().map(|s| s.composite_score).sum::<f64>() / scores.len() as f64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccessibilityPatterns {
    /// Highest composite score first; equal scores keep district order
    pub ranking: Vec<RankedDistrict>,
    pub top_by_chargers: Vec<(District, usize)>,
    pub with_support: Vec<(District, usize)>,
    pub high_function: Vec<District>,
    pub tier_counts: BTreeMap<AccessibilityTier, usize>,
    pub comparisons: Vec<GroupComparison>,
    pub best: Option<RankedDistrict>,
    pub worst: Option<RankedDistrict>,
}

impl AccessibilityPatterns {
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Accessibility Ranking ===\n");
        for (i, ranked) in self.ranking.iter().enumerate() {
            summary.push_str(&format!(
                "  {}. {}: {:.1} ({})\n",
                i + 1,
                ranked.district,
                ranked.composite_score,
                ranked.tier
            ));
        }

        summary.push_str("\nTiers:\n");
        for tier in AccessibilityTier::ALL {
            summary.push_str(&format!(
                "  {}: {}\n",
                tier,
                self.tier_counts.get(&tier).copied().unwrap_or(0)
            ));
        }

        summary.push_str(&format!("\nMost chargers (top {}):\n", self.top_by_chargers.len()));
        for (district, count) in &self.top_by_chargers {
            summary.push_str(&format!("  {}: {}\n", district, count));
        }

        summary.push_str(&format!(
            "\nDistricts with support centers: {}\n",
            self.with_support.len()
        ));
        summary.push_str(&format!(
            "Districts offering all three charger features: {}\n",
            self.high_function.len()
        ));

        summary.push_str("\nComparisons:\n");
        for comparison in &self.comparisons {
            summary.push_str(&format!("  {}\n", comparison.describe()));
        }

        summary
    }
}

pub struct AccessibilityAnalyzer {
    rural_districts: Vec<District>,
    top_n: usize,
}

impl AccessibilityAnalyzer {
    pub fn new(rural_districts: Vec<District>) -> Self {
        Self {
            rural_districts,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings
                .rural_districts
                .iter()
                .map(|d| District::new(d.as_str()))
                .collect(),
        )
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn analyze(&self, scores: &[DistrictAccessibility]) -> AccessibilityPatterns {
        let mut ranking: Vec<RankedDistrict> = scores.iter().map(RankedDistrict::from).collect();
        ranking.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));

        let mut by_chargers: Vec<(District, usize)> = scores
            .iter()
            .map(|s| (s.district.clone(), s.charger_count))
            .collect();
        by_chargers.sort_by(|a, b| b.1.cmp(&a.1));
        by_chargers.truncate(self.top_n);

        let with_support = scores
            .iter()
            .filter(|s| s.has_support_center())
            .map(|s| (s.district.clone(), s.support_count))
            .collect();

        let high_function = scores
            .iter()
            .filter(|s| s.is_high_function())
            .map(|s| s.district.clone())
            .collect();

        let mut tier_counts = BTreeMap::new();
        for score in scores {
            *tier_counts.entry(score.tier).or_insert(0) += 1;
        }

        let comparisons = vec![
            GroupComparison::split("Urban-rural gap", "urban", "rural", scores, |s| {
                !self.rural_districts.contains(&s.district)
            }),
            GroupComparison::split(
                "Support center presence",
                "with support",
                "without support",
                scores,
                DistrictAccessibility::has_support_center,
            ),
            GroupComparison::split(
                "Charger feature coverage",
                "all features",
                "others",
                scores,
                DistrictAccessibility::is_high_function,
            ),
        ];

        // first occurrence wins on ties
        let best = scores
            .iter()
            .fold(None::<&DistrictAccessibility>, |acc, s| match acc {
                Some(a) if a.composite_score >= s.composite_score => Some(a),
                _ => Some(s),
            })
            .map(RankedDistrict::from);
        let worst = scores
            .iter()
            .fold(None::<&DistrictAccessibility>, |acc, s| match acc {
                Some(a) if a.composite_score <= s.composite_score => Some(a),
                _ => Some(s),
            })
            .map(RankedDistrict::from);

        AccessibilityPatterns {
            ranking,
            top_by_chargers: by_chargers,
            with_support,
            high_function,
            tier_counts,
            comparisons,
            best,
            worst,
        }
    }
}
