use csv::{ReaderBuilder, StringRecord, Trim};
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::readers::encoding::decode_text;
use crate::utils::constants::DEFAULT_BUFFER_SIZE;

/// A decoded CSV file with header lookup by name
#[derive(Debug, Clone)]
pub struct CsvTable {
    encoding: &'static str,
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl CsvTable {
    /// Read and decode a CSV file. Open failures are reported as the
    /// dataset being unavailable.
    pub fn read(path: &Path, dataset: &str, use_mmap: bool) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            ProcessingError::unavailable(dataset, format!("{}: {}", path.display(), e))
        })?;

        let table = if use_mmap {
            let mmap = unsafe { Mmap::map(&file)? };
            Self::parse(&mmap)?
        } else {
            let mut bytes = Vec::new();
            BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file).read_to_end(&mut bytes)?;
            Self::parse(&bytes)?
        };

        debug!(
            dataset,
            path = %path.display(),
            encoding = table.encoding,
            rows = table.rows.len(),
            "Loaded CSV table"
        );
        Ok(table)
    }

    /// Parse CSV bytes in UTF-8 or CP949
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let (text, encoding) = decode_text(bytes)?;

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            encoding: encoding.name(),
            headers,
            rows,
        })
    }

    pub fn encoding(&self) -> &'static str {
        self.encoding
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str, dataset: &str) -> Result<usize> {
        self.column(name).ok_or_else(|| {
            ProcessingError::MissingData(format!("{} dataset has no '{}' column", dataset, name))
        })
    }
}

/// Non-empty trimmed cell value, `None` for a missing column or blank cell
pub fn cell(record: &StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::EUC_KR;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_and_lookup() -> Result<()> {
        let table =
            CsvTable::parse("시도명, 시군구명 ,위도\n대구광역시,중구,35.86\n대구광역시,,\n".as_bytes())?;

        assert_eq!(table.encoding(), "UTF-8");
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("시군구명"), Some(1));
        assert_eq!(table.column("경도"), None);

        let district = table.column("시군구명");
        assert_eq!(cell(&table.rows()[0], district), Some("중구".to_string()));
        assert_eq!(cell(&table.rows()[1], district), None);
        assert_eq!(cell(&table.rows()[0], None), None);
        Ok(())
    }

    #[test]
    fn test_short_rows_are_tolerated() -> Result<()> {
        let table = CsvTable::parse(b"a,b,c\n1\n1,2,3\n")?;
        assert_eq!(table.len(), 2);
        assert_eq!(cell(&table.rows()[0], Some(2)), None);
        Ok(())
    }

    #[test]
    fn test_require_column() -> Result<()> {
        let table = CsvTable::parse(b"a,b\n1,2\n")?;
        assert_eq!(table.require_column("b", "test")?, 1);
        assert!(matches!(
            table.require_column("z", "test"),
            Err(ProcessingError::MissingData(_))
        ));
        Ok(())
    }

    #[test]
    fn test_read_cp949_file_with_and_without_mmap() -> Result<()> {
        let (encoded, _, _) = EUC_KR.encode("시도명,시군구명\n대구광역시,달서구\n");
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(&encoded)?;

        for use_mmap in [false, true] {
            let table = CsvTable::read(temp_file.path(), "charger", use_mmap)?;
            assert_eq!(table.encoding(), "EUC-KR");
            assert_eq!(table.headers(), ["시도명", "시군구명"]);
            assert_eq!(cell(&table.rows()[0], Some(1)), Some("달서구".to_string()));
        }
        Ok(())
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let result = CsvTable::read(Path::new("no/such/file.csv"), "support", false);
        assert!(matches!(
            result,
            Err(ProcessingError::DataUnavailable { ref dataset, .. }) if dataset == "support"
        ));
    }
}
