use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::readers::csv_table::{cell, CsvTable};
use crate::settings::ChargerColumns;

pub const CHARGER_DATASET: &str = "charger";

/// A fast-charger row as text, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawChargerRow {
    pub facility_name: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub address: Option<String>,
    pub capacity: Option<String>,
    pub weekday_start: Option<String>,
    pub air_pump: Option<String>,
    pub phone_charge: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

pub struct ChargerReader {
    columns: ChargerColumns,
    use_mmap: bool,
}

impl ChargerReader {
    pub fn new(columns: ChargerColumns) -> Self {
        Self {
            columns,
            use_mmap: false,
        }
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Read every row of the national fast-charger dataset
    pub fn read_chargers(&self, path: &Path) -> Result<Vec<RawChargerRow>> {
        let table = CsvTable::read(path, CHARGER_DATASET, self.use_mmap)?;
        let rows = self.rows_from_table(&table)?;

        info!(
            path = %path.display(),
            encoding = table.encoding(),
            rows = rows.len(),
            "Read charger dataset"
        );
        Ok(rows)
    }

    /// Map table columns to charger fields. Province and district are required;
    /// any other absent column reads as missing on every row.
    pub fn rows_from_table(&self, table: &CsvTable) -> Result<Vec<RawChargerRow>> {
        let c = &self.columns;
        let province = Some(table.require_column(&c.province, CHARGER_DATASET)?);
        let district = Some(table.require_column(&c.district, CHARGER_DATASET)?);
        let facility_name = table.column(&c.facility_name);
        let address = table.column(&c.address);
        let capacity = table.column(&c.capacity);
        let weekday_start = table.column(&c.weekday_start);
        let air_pump = table.column(&c.air_pump);
        let phone_charge = table.column(&c.phone_charge);
        let latitude = table.column(&c.latitude);
        let longitude = table.column(&c.longitude);

        Ok(table
            .rows()
            .iter()
            .map(|record| RawChargerRow {
                facility_name: cell(record, facility_name),
                province: cell(record, province),
                district: cell(record, district),
                address: cell(record, address),
                capacity: cell(record, capacity),
                weekday_start: cell(record, weekday_start),
                air_pump: cell(record, air_pump),
                phone_charge: cell(record, phone_charge),
                latitude: cell(record, latitude),
                longitude: cell(record, longitude),
            })
            .collect())
    }
}

impl Default for ChargerReader {
    fn default() -> Self {
        Self::new(ChargerColumns::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "시설명,시도명,시군구명,소재지도로명주소,동시사용가능대수,평일운영시작시각,공기주입가능여부,휴대전화충전가능여부,위도,경도";

    #[test]
    fn test_read_chargers_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "{}", HEADER)?;
        writeln!(
            temp_file,
            "수성구청,대구광역시,수성구,대구광역시 수성구 달구벌대로 2423,2,00:00,Y,N,35.8582,128.6306"
        )?;
        writeln!(temp_file, "서울역,서울특별시,중구,,1,09:00,N,N,,")?;

        let rows = ChargerReader::default().read_chargers(temp_file.path())?;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].facility_name.as_deref(), Some("수성구청"));
        assert_eq!(rows[0].district.as_deref(), Some("수성구"));
        assert_eq!(rows[0].weekday_start.as_deref(), Some("00:00"));
        assert_eq!(rows[0].latitude.as_deref(), Some("35.8582"));
        assert_eq!(rows[1].province.as_deref(), Some("서울특별시"));
        assert_eq!(rows[1].address, None);
        assert_eq!(rows[1].longitude, None);
        Ok(())
    }

    #[test]
    fn test_optional_columns_may_be_absent() -> Result<()> {
        let table = CsvTable::parse("시도명,시군구명\n대구광역시,북구\n".as_bytes())?;
        let rows = ChargerReader::default().rows_from_table(&table)?;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].district.as_deref(), Some("북구"));
        assert_eq!(rows[0].capacity, None);
        assert_eq!(rows[0].air_pump, None);
        Ok(())
    }

    #[test]
    fn test_missing_district_column_is_error() -> Result<()> {
        let table = CsvTable::parse("시도명,위도\n대구광역시,35.8\n".as_bytes())?;
        let result = ChargerReader::default().rows_from_table(&table);

        assert!(matches!(result, Err(ProcessingError::MissingData(_))));
        Ok(())
    }

    #[test]
    fn test_custom_column_mapping() -> Result<()> {
        let columns = ChargerColumns {
            province: "sido".to_string(),
            district: "sigungu".to_string(),
            capacity: "slots".to_string(),
            ..ChargerColumns::default()
        };
        let table = CsvTable::parse(b"sido,sigungu,slots\nDaegu,Jung-gu,3\n")?;
        let rows = ChargerReader::new(columns).rows_from_table(&table)?;

        assert_eq!(rows[0].district.as_deref(), Some("Jung-gu"));
        assert_eq!(rows[0].capacity.as_deref(), Some("3"));
        Ok(())
    }
}
