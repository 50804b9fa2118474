use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::models::DistrictAccessibility;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Pick the format from a file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }
}

/// Writes and reads district score tables
pub struct ScoreWriter {
    format: OutputFormat,
}

impl ScoreWriter {
    pub fn new() -> Self {
        Self {
            format: OutputFormat::Csv,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn write_scores(&self, scores: &[DistrictAccessibility], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        match self.format {
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(file);
                for score in scores {
                    writer.serialize(score)?;
                }
                writer.flush()?;
            }
            OutputFormat::Json => {
                let mut writer = BufWriter::new(file);
                serde_json::to_writer_pretty(&mut writer, scores)?;
                writer.flush()?;
            }
        }

        info!(
            path = %path.display(),
            rows = scores.len(),
            format = ?self.format,
            "Wrote score table"
        );
        Ok(())
    }

    pub fn read_scores(&self, path: &Path) -> Result<Vec<DistrictAccessibility>> {
        let file = File::open(path)?;
        match self.format {
            OutputFormat::Csv => {
                let mut reader = csv::Reader::from_reader(file);
                let scores = reader
                    .deserialize()
                    .collect::<std::result::Result<Vec<DistrictAccessibility>, _>>()?;
                Ok(scores)
            }
            OutputFormat::Json => Ok(serde_json::from_reader(BufReader::new(file))?),
        }
    }
}

impl Default for ScoreWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccessibilityTier, ChargerRecord, District, SupportCenterRecord};
    use crate::processors::DistrictAccessibilityScorer;
    use crate::settings::Settings;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn scores() -> Vec<DistrictAccessibility> {
        let chargers = vec![
            ChargerRecord::new("중구").with_capacity(2).with_features(true, true, false),
            ChargerRecord::new("중구").with_capacity(4).with_features(false, true, false),
        ];
        let centers = vec![SupportCenterRecord::new(
            "대구광역시 중구 공평로 88",
            Some(District::new("중구")),
        )];
        DistrictAccessibilityScorer::from_settings(&Settings::default()).score(&chargers, &centers)
    }

    #[test]
    fn test_csv_output_layout() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("scores.csv");

        ScoreWriter::new().write_scores(&scores(), &path)?;

        let content = std::fs::read_to_string(&path)?;
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("district,charger_count,support_count,ratio_24h,ratio_air_pump,ratio_phone_charge,avg_simultaneous_capacity,charger_score,support_score,function_score,capacity_score,composite_score,tier")
        );
        assert_eq!(
            lines.next(),
            Some("중구,2,1,0.5,1.0,0.0,3.0,20.0,50.0,50.0,30.0,150.0,Low")
        );
        assert_eq!(content.lines().count(), 10);
        Ok(())
    }

    #[test]
    fn test_read_back_written_scores() -> Result<()> {
        let dir = TempDir::new()?;
        let original = scores();

        for name in ["scores.csv", "scores.json"] {
            let path = dir.path().join(name);
            let writer = ScoreWriter::new().with_output_format(OutputFormat::from_path(&path));
            writer.write_scores(&original, &path)?;

            let read = writer.read_scores(&path)?;
            assert_eq!(read.len(), 9);
            assert_eq!(read[0].district, District::new("중구"));
            assert_eq!(read[0].composite_score, 150.0);
            assert_eq!(read[0].tier, AccessibilityTier::Low);
        }
        Ok(())
    }

    #[test]
    fn test_format_selection() {
        assert_eq!(ScoreWriter::new().format(), OutputFormat::Csv);
        assert_eq!(
            ScoreWriter::new()
                .with_output_format(OutputFormat::Json)
                .format(),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out/SCORES.JSON")),
            OutputFormat::Json
        );
        assert_eq!(OutputFormat::from_path(Path::new("scores")), OutputFormat::Csv);
    }
}
