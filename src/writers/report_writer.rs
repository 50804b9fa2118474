use chrono::NaiveDate;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::analyzers::{AccessibilityPatterns, ChargerStatistics, SupportStatistics};
use crate::error::Result;
use crate::models::{AccessibilityTier, DistrictAccessibility};

/// Markdown accessibility report for one region
pub struct MarkdownReport<'a> {
    pub region: &'a str,
    pub generated: NaiveDate,
    pub scores: &'a [DistrictAccessibility],
    pub patterns: &'a AccessibilityPatterns,
    pub chargers: &'a ChargerStatistics,
    pub support: Option<&'a SupportStatistics>,
}

impl MarkdownReport<'_> {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out).expect("writing to a String is infallible");
        out
    }

    fn render_into(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "# {} Wheelchair Accessibility Report", self.region)?;
        writeln!(out)?;
        writeln!(out, "## Overview")?;
        writeln!(out, "- Generated: {}", self.generated.format("%Y-%m-%d"))?;
        writeln!(out, "- Districts: {}", self.scores.len())?;
        writeln!(out, "- Fast chargers: {}", self.chargers.total_chargers)?;
        match self.support {
            Some(support) => writeln!(
                out,
                "- Transport-support centers: {} ({} vehicles)",
                support.total_centers, support.total_vehicles
            )?,
            None => writeln!(out, "- Transport-support centers: not provided")?,
        }

        writeln!(out)?;
        writeln!(out, "## District Ranking")?;
        writeln!(out)?;
        writeln!(out, "| Rank | District | Score | Tier |")?;
        writeln!(out, "|---:|---|---:|---|")?;
        for (i, ranked) in self.patterns.ranking.iter().enumerate() {
            writeln!(
                out,
                "| {} | {} | {:.1} | {} |",
                i + 1,
                ranked.district,
                ranked.composite_score,
                ranked.tier
            )?;
        }

        writeln!(out)?;
        writeln!(out, "## Score Components")?;
        writeln!(out)?;
        writeln!(
            out,
            "| District | Chargers | Support Centers | Avg Capacity | Charger | Support | Function | Capacity |"
        )?;
        writeln!(out, "|---|---:|---:|---:|---:|---:|---:|---:|")?;
        for score in self.scores {
            writeln!(
                out,
                "| {} | {} | {} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} |",
                score.district,
                score.charger_count,
                score.support_count,
                score.avg_simultaneous_capacity,
                score.charger_score,
                score.support_score,
                score.function_score,
                score.capacity_score
            )?;
        }

        writeln!(out)?;
        writeln!(out, "## Charger Features")?;
        writeln!(out)?;
        for score in self.scores {
            writeln!(
                out,
                "- {}: 24h {:.1}%, air pump {:.1}%, phone charging {:.1}%",
                score.district,
                score.ratio_24h * 100.0,
                score.ratio_air_pump * 100.0,
                score.ratio_phone_charge * 100.0
            )?;
        }

        writeln!(out)?;
        writeln!(out, "## Tiers")?;
        writeln!(out)?;
        for tier in AccessibilityTier::ALL {
            let districts: Vec<String> = self
                .scores
                .iter()
                .filter(|s| s.tier == tier)
                .map(|s| s.district.to_string())
                .collect();
            let listed = if districts.is_empty() {
                "-".to_string()
            } else {
                districts.join(", ")
            };
            writeln!(out, "- {}: {}", tier, listed)?;
        }

        writeln!(out)?;
        writeln!(out, "## Findings")?;
        writeln!(out)?;
        if let (Some(best), Some(worst)) = (&self.patterns.best, &self.patterns.worst) {
            writeln!(
                out,
                "- Highest score: {} ({:.1}); lowest: {} ({:.1})",
                best.district, best.composite_score, worst.district, worst.composite_score
            )?;
        }
        if let (Some((most, max)), Some((fewest, min))) =
            (self.chargers.best_served(), self.chargers.least_served())
        {
            writeln!(
                out,
                "- Most chargers: {} ({}); fewest: {} ({}); gap {}",
                most,
                max,
                fewest,
                min,
                self.chargers.district_gap()
            )?;
        }
        for comparison in &self.patterns.comparisons {
            writeln!(out, "- {}", comparison.describe())?;
        }

        Ok(())
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.render())?;
        info!(path = %path.display(), "Wrote Markdown report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::{AccessibilityAnalyzer, ChargerAnalyzer, SupportAnalyzer};
    use crate::models::{ChargerRecord, District, SupportCenterRecord};
    use crate::processors::DistrictAccessibilityScorer;
    use crate::settings::Settings;
    use tempfile::TempDir;

    #[test]
    fn test_render_report() {
        let settings = Settings::default();
        let chargers = vec![
            ChargerRecord::new("수성구").with_capacity(2).with_features(true, true, true),
            ChargerRecord::new("중구").with_capacity(1),
        ];
        let centers = vec![SupportCenterRecord::new(
            "대구광역시 동구 동촌로 1",
            Some(District::new("동구")),
        )];

        let scores =
            DistrictAccessibilityScorer::from_settings(&settings).score(&chargers, &centers);
        let patterns = AccessibilityAnalyzer::from_settings(&settings).analyze(&scores);
        let charger_stats = ChargerAnalyzer::new().analyze(&chargers);
        let support_stats = SupportAnalyzer::new().analyze(&centers);

        let report = MarkdownReport {
            region: &settings.region,
            generated: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            scores: &scores,
            patterns: &patterns,
            chargers: &charger_stats,
            support: Some(&support_stats),
        };
        let markdown = report.render();

        assert!(markdown.starts_with("# 대구광역시 Wheelchair Accessibility Report"));
        assert!(markdown.contains("- Generated: 2025-07-01"));
        // 수성구: 10 + 45 + 10 = 65
        assert!(markdown.contains("| 1 | 수성구 | 65.0 | Low |"));
        assert!(markdown.contains("- 수성구: 24h 100.0%, air pump 100.0%, phone charging 100.0%"));
        assert!(markdown.contains("- Very High: -"));
        assert!(markdown.contains("Urban-rural gap"));

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.md");
        report.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), markdown);
    }
}
