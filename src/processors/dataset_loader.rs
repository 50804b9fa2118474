use std::path::Path;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{ChargerRecord, SupportCenterRecord};
use crate::processors::{AddressParser, NormalizationReport, Normalizer, RegionScope};
use crate::readers::{ChargerReader, SupportCenterReader};
use crate::settings::Settings;
use crate::utils::progress::ProgressReporter;

/// Region-scoped, normalized input tables
#[derive(Debug, Clone)]
pub struct LoadedDatasets {
    pub chargers: Vec<ChargerRecord>,
    /// `None` when no support-center dataset was supplied
    pub support_centers: Option<Vec<SupportCenterRecord>>,
    pub report: NormalizationReport,
}

impl LoadedDatasets {
    pub fn support_centers(&self) -> &[SupportCenterRecord] {
        self.support_centers.as_deref().unwrap_or(&[])
    }
}

/// Reads both datasets, scopes them to the region and normalizes every field
pub struct DatasetLoader {
    charger_reader: ChargerReader,
    support_reader: SupportCenterReader,
    scope: RegionScope,
    normalizer: Normalizer,
}

impl DatasetLoader {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            charger_reader: ChargerReader::new(settings.charger_columns.clone()),
            support_reader: SupportCenterReader::new(settings.support_columns.clone()),
            scope: RegionScope::from_settings(settings),
            normalizer: Normalizer::new(AddressParser::new(&settings.region)?),
        })
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.charger_reader = self.charger_reader.with_mmap(use_mmap);
        self.support_reader = self.support_reader.with_mmap(use_mmap);
        self
    }

    pub fn load(
        &self,
        charger_path: &Path,
        support_path: Option<&Path>,
        progress: Option<&ProgressReporter>,
    ) -> Result<LoadedDatasets> {
        let mut report = NormalizationReport::default();

        if let Some(p) = progress {
            p.set_message("Reading charger data...");
        }
        let raw_chargers = self.scope.chargers(self.charger_reader.read_chargers(charger_path)?);
        let chargers = self.normalizer.normalize_chargers(&raw_chargers, &mut report);

        let support_centers = match support_path {
            Some(path) => {
                if let Some(p) = progress {
                    p.set_message("Reading support center data...");
                }
                let raw_centers = self
                    .scope
                    .support_centers(self.support_reader.read_centers(path)?);
                Some(self.normalizer.normalize_support_centers(&raw_centers, &mut report))
            }
            None => {
                warn!("No support center dataset given; support counts will be zero");
                None
            }
        };

        info!(
            chargers = chargers.len(),
            support_centers = support_centers.as_ref().map_or(0, Vec::len),
            defaulted_values = report.total_coercions(),
            "Loaded regional datasets"
        );

        Ok(LoadedDatasets {
            chargers,
            support_centers,
            report,
        })
    }
}
