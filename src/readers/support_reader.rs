use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::readers::csv_table::{cell, CsvTable};
use crate::settings::SupportColumns;

pub const SUPPORT_DATASET: &str = "support";

/// A transport-support center row as text, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSupportRow {
    pub name: Option<String>,
    pub address: Option<String>,
    pub vehicles: Option<String>,
    pub slope_vehicles: Option<String>,
    pub lift_vehicles: Option<String>,
}

pub struct SupportCenterReader {
    columns: SupportColumns,
    use_mmap: bool,
}

impl SupportCenterReader {
    pub fn new(columns: SupportColumns) -> Self {
        Self {
            columns,
            use_mmap: false,
        }
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Read every row of the national transport-support center dataset
    pub fn read_centers(&self, path: &Path) -> Result<Vec<RawSupportRow>> {
        let table = CsvTable::read(path, SUPPORT_DATASET, self.use_mmap)?;
        let rows = self.rows_from_table(&table)?;

        info!(
            path = %path.display(),
            encoding = table.encoding(),
            rows = rows.len(),
            "Read support center dataset"
        );
        Ok(rows)
    }

    pub fn rows_from_table(&self, table: &CsvTable) -> Result<Vec<RawSupportRow>> {
        let c = &self.columns;
        let address = Some(table.require_column(&c.address, SUPPORT_DATASET)?);
        let name = table.column(&c.name);
        let vehicles = table.column(&c.vehicles);
        let slope_vehicles = table.column(&c.slope_vehicles);
        let lift_vehicles = table.column(&c.lift_vehicles);

        Ok(table
            .rows()
            .iter()
            .map(|record| RawSupportRow {
                name: cell(record, name),
                address: cell(record, address),
                vehicles: cell(record, vehicles),
                slope_vehicles: cell(record, slope_vehicles),
                lift_vehicles: cell(record, lift_vehicles),
            })
            .collect())
    }
}

impl Default for SupportCenterReader {
    fn default() -> Self {
        Self::new(SupportColumns::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;

    #[test]
    fn test_rows_from_table() -> Result<()> {
        let table = CsvTable::parse(
            "이동지원센터명,소재지도로명주소,보유차량대수,슬로프형휠체어차량대수,리프트형휠체어차량대수\n\
             대구광역시 교통약자이동지원센터,대구광역시 동구 동촌로 1,120,100,20\n\
             ,,abc,,\n"
                .as_bytes(),
        )?;
        let rows = SupportCenterReader::default().rows_from_table(&table)?;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].address.as_deref(), Some("대구광역시 동구 동촌로 1"));
        assert_eq!(rows[0].vehicles.as_deref(), Some("120"));
        assert_eq!(rows[1].address, None);
        assert_eq!(rows[1].vehicles.as_deref(), Some("abc"));
        Ok(())
    }

    #[test]
    fn test_missing_address_column_is_error() -> Result<()> {
        let table = CsvTable::parse("이동지원센터명\n센터\n".as_bytes())?;
        assert!(matches!(
            SupportCenterReader::default().rows_from_table(&table),
            Err(ProcessingError::MissingData(_))
        ));
        Ok(())
    }
}
